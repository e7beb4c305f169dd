use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use super::{StoreError, StoreResult};
use crate::entity::course;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, name: String) -> StoreResult<course::Model>;
    async fn rename(&self, id: i32, name: String) -> StoreResult<course::Model>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<course::Model>>;
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<course::Model>>;
    async fn list(&self) -> StoreResult<Vec<course::Model>>;
}

#[derive(Clone)]
pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn create(&self, name: String) -> StoreResult<course::Model> {
        let model = course::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model)
    }

    async fn rename(&self, id: i32, name: String) -> StoreResult<course::Model> {
        let model = course::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut active: course::ActiveModel = model.into();
        active.name = Set(name);
        Ok(active.update(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<course::Model>> {
        Ok(course::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<course::Model>> {
        Ok(course::Entity::find()
            .filter(course::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn list(&self) -> StoreResult<Vec<course::Model>> {
        Ok(course::Entity::find()
            .order_by_asc(course::Column::Name)
            .all(&self.db)
            .await?)
    }
}
