mod assignment_repository;
mod course_repository;
mod report_repository;
mod section_repository;
mod student_repository;
mod teacher_repository;

pub use assignment_repository::{AssignOutcome, AssignmentRepository, SeaOrmAssignmentRepository};
pub use course_repository::{CourseRepository, SeaOrmCourseRepository};
pub use report_repository::{NewReport, ReportRepository, SeaOrmReportRepository};
pub use section_repository::{SeaOrmSectionRepository, SectionRepository};
pub use student_repository::{SeaOrmStudentRepository, StudentRepository, StudentUpdate};
pub use teacher_repository::{SeaOrmTeacherRepository, TeacherRepository};

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure classes the handlers translate into user-facing messages.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("duplicate value for a unique column")]
    Duplicate,
    #[error(transparent)]
    Db(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Duplicate,
            _ => StoreError::Db(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
