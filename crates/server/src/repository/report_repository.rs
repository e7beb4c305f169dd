use async_trait::async_trait;
use chrono::Utc;
use classlog_core::domain::Month;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use super::{StoreError, StoreResult};
use crate::entity::report;

#[derive(Debug, Clone)]
pub struct NewReport {
    pub student_id: i32,
    pub course_id: i32,
    pub teacher_id: i32,
    pub month: Month,
    pub body: String,
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Inserts without checking for an existing (student, course, month) row;
    /// callers run [`find_duplicate`](Self::find_duplicate) first. The two
    /// statements do not share a transaction, so concurrent identical
    /// submissions can both land. Known race, kept from the original design.
    async fn create(&self, new_report: NewReport) -> StoreResult<report::Model>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<report::Model>>;
    /// Overwrites the teacher and narrative body; student, course and month
    /// are immutable once the report exists.
    async fn update_narrative(
        &self,
        id: i32,
        teacher_id: i32,
        body: String,
    ) -> StoreResult<report::Model>;
    async fn delete(&self, id: i32) -> StoreResult<()>;
    /// All reports, newest month first, then newest created first.
    async fn list_all(&self) -> StoreResult<Vec<report::Model>>;
    async fn find_duplicate(
        &self,
        student_id: i32,
        course_id: i32,
        month: &Month,
    ) -> StoreResult<Option<report::Model>>;
    /// Reports for one student and month, ordered by course id for printing.
    async fn list_for_student_month(
        &self,
        student_id: i32,
        month: &Month,
    ) -> StoreResult<Vec<report::Model>>;
    /// Distinct report months, newest first.
    async fn distinct_months(&self) -> StoreResult<Vec<String>>;
}

#[derive(Clone)]
pub struct SeaOrmReportRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportRepository for SeaOrmReportRepository {
    async fn create(&self, new_report: NewReport) -> StoreResult<report::Model> {
        let model = report::ActiveModel {
            student_id: Set(new_report.student_id),
            course_id: Set(new_report.course_id),
            teacher_id: Set(new_report.teacher_id),
            month: Set(new_report.month.as_str().to_string()),
            body: Set(new_report.body),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<report::Model>> {
        Ok(report::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update_narrative(
        &self,
        id: i32,
        teacher_id: i32,
        body: String,
    ) -> StoreResult<report::Model> {
        let model = report::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound)?;

        let mut active: report::ActiveModel = model.into();
        active.teacher_id = Set(teacher_id);
        active.body = Set(body);
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let result = report::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_all(&self) -> StoreResult<Vec<report::Model>> {
        Ok(report::Entity::find()
            .order_by_desc(report::Column::Month)
            .order_by_desc(report::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn find_duplicate(
        &self,
        student_id: i32,
        course_id: i32,
        month: &Month,
    ) -> StoreResult<Option<report::Model>> {
        Ok(report::Entity::find()
            .filter(report::Column::StudentId.eq(student_id))
            .filter(report::Column::CourseId.eq(course_id))
            .filter(report::Column::Month.eq(month.as_str()))
            .one(&self.db)
            .await?)
    }

    async fn list_for_student_month(
        &self,
        student_id: i32,
        month: &Month,
    ) -> StoreResult<Vec<report::Model>> {
        Ok(report::Entity::find()
            .filter(report::Column::StudentId.eq(student_id))
            .filter(report::Column::Month.eq(month.as_str()))
            .order_by_asc(report::Column::CourseId)
            .all(&self.db)
            .await?)
    }

    async fn distinct_months(&self) -> StoreResult<Vec<String>> {
        Ok(report::Entity::find()
            .select_only()
            .column(report::Column::Month)
            .distinct()
            .order_by_desc(report::Column::Month)
            .into_tuple()
            .all(&self.db)
            .await?)
    }
}
