use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use super::StoreResult;
use crate::entity::assignment;

/// Result of binding a teacher to a (section, course) pair.
#[derive(Debug, Clone)]
pub enum AssignOutcome {
    Created(assignment::Model),
    Updated {
        assignment: assignment::Model,
        previous_teacher_id: i32,
    },
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Binds `teacher_id` to the (section, course) pair, overwriting any
    /// existing binding. At most one assignment exists per pair at all times.
    async fn assign(
        &self,
        section_id: i32,
        course_id: i32,
        teacher_id: i32,
    ) -> StoreResult<AssignOutcome>;
    async fn list(&self) -> StoreResult<Vec<assignment::Model>>;
}

#[derive(Clone)]
pub struct SeaOrmAssignmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssignmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AssignmentRepository for SeaOrmAssignmentRepository {
    async fn assign(
        &self,
        section_id: i32,
        course_id: i32,
        teacher_id: i32,
    ) -> StoreResult<AssignOutcome> {
        let txn = self.db.begin().await?;

        let existing = assignment::Entity::find()
            .filter(assignment::Column::SectionId.eq(section_id))
            .filter(assignment::Column::CourseId.eq(course_id))
            .one(&txn)
            .await?;

        let outcome = match existing {
            Some(model) => {
                let previous_teacher_id = model.teacher_id;
                let mut active: assignment::ActiveModel = model.into();
                active.teacher_id = Set(teacher_id);
                let model = active.update(&txn).await?;
                AssignOutcome::Updated {
                    assignment: model,
                    previous_teacher_id,
                }
            }
            None => {
                let model = assignment::ActiveModel {
                    section_id: Set(section_id),
                    course_id: Set(course_id),
                    teacher_id: Set(teacher_id),
                    created_at: Set(Utc::now().naive_utc()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
                AssignOutcome::Created(model)
            }
        };

        txn.commit().await?;
        Ok(outcome)
    }

    async fn list(&self) -> StoreResult<Vec<assignment::Model>> {
        Ok(assignment::Entity::find()
            .order_by_asc(assignment::Column::SectionId)
            .order_by_asc(assignment::Column::CourseId)
            .all(&self.db)
            .await?)
    }
}
