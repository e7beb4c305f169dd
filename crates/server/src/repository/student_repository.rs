use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder,
    TransactionTrait,
};

use super::{StoreError, StoreResult};
use crate::entity::student;

/// Inline-edit input: either field may be absent, and both are applied in one
/// transaction when present.
#[derive(Debug, Clone, Default)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub section_id: Option<i32>,
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create(&self, name: String, section_id: i32) -> StoreResult<student::Model>;
    async fn update(&self, id: i32, update: StudentUpdate) -> StoreResult<student::Model>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<student::Model>>;
    async fn list(&self) -> StoreResult<Vec<student::Model>>;
}

#[derive(Clone)]
pub struct SeaOrmStudentRepository {
    db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn create(&self, name: String, section_id: i32) -> StoreResult<student::Model> {
        let model = student::ActiveModel {
            name: Set(name),
            section_id: Set(section_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model)
    }

    async fn update(&self, id: i32, update: StudentUpdate) -> StoreResult<student::Model> {
        let txn = self.db.begin().await?;

        let model = student::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(StoreError::NotFound)?;

        // Only a genuinely different section is a reassignment.
        let new_section = update.section_id.filter(|&id| id != model.section_id);
        if update.name.is_none() && new_section.is_none() {
            txn.commit().await?;
            return Ok(model);
        }

        let mut active: student::ActiveModel = model.into();
        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(section_id) = new_section {
            active.section_id = Set(section_id);
        }

        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(model)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<student::Model>> {
        Ok(student::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list(&self) -> StoreResult<Vec<student::Model>> {
        Ok(student::Entity::find()
            .order_by_asc(student::Column::SectionId)
            .order_by_asc(student::Column::Name)
            .all(&self.db)
            .await?)
    }
}
