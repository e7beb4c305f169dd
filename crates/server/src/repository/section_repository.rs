use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use super::{StoreError, StoreResult};
use crate::entity::section;

/// Sections are create-and-rename only; there is no delete route.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    async fn create(&self, name: String) -> StoreResult<section::Model>;
    async fn rename(&self, id: i32, name: String) -> StoreResult<section::Model>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<section::Model>>;
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<section::Model>>;
    async fn list(&self) -> StoreResult<Vec<section::Model>>;
    async fn count(&self) -> StoreResult<u64>;
}

#[derive(Clone)]
pub struct SeaOrmSectionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSectionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SectionRepository for SeaOrmSectionRepository {
    async fn create(&self, name: String) -> StoreResult<section::Model> {
        let model = section::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model)
    }

    async fn rename(&self, id: i32, name: String) -> StoreResult<section::Model> {
        let model = section::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut active: section::ActiveModel = model.into();
        active.name = Set(name);
        Ok(active.update(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<section::Model>> {
        Ok(section::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<section::Model>> {
        Ok(section::Entity::find()
            .filter(section::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn list(&self) -> StoreResult<Vec<section::Model>> {
        Ok(section::Entity::find()
            .order_by_asc(section::Column::Name)
            .all(&self.db)
            .await?)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(section::Entity::find().count(&self.db).await?)
    }
}
