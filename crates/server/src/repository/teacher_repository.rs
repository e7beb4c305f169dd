use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use super::{StoreError, StoreResult};
use crate::entity::teacher;

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn create(&self, name: String) -> StoreResult<teacher::Model>;
    async fn rename(&self, id: i32, name: String) -> StoreResult<teacher::Model>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<teacher::Model>>;
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<teacher::Model>>;
    async fn list(&self) -> StoreResult<Vec<teacher::Model>>;
}

#[derive(Clone)]
pub struct SeaOrmTeacherRepository {
    db: DatabaseConnection,
}

impl SeaOrmTeacherRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeacherRepository for SeaOrmTeacherRepository {
    async fn create(&self, name: String) -> StoreResult<teacher::Model> {
        let model = teacher::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model)
    }

    async fn rename(&self, id: i32, name: String) -> StoreResult<teacher::Model> {
        let model = teacher::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut active: teacher::ActiveModel = model.into();
        active.name = Set(name);
        Ok(active.update(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<teacher::Model>> {
        Ok(teacher::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<teacher::Model>> {
        Ok(teacher::Entity::find()
            .filter(teacher::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn list(&self) -> StoreResult<Vec<teacher::Model>> {
        Ok(teacher::Entity::find()
            .order_by_asc(teacher::Column::Name)
            .all(&self.db)
            .await?)
    }
}
