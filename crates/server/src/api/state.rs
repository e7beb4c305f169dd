use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::repository::{
    AssignmentRepository, CourseRepository, ReportRepository, SeaOrmAssignmentRepository,
    SeaOrmCourseRepository, SeaOrmReportRepository, SeaOrmSectionRepository,
    SeaOrmStudentRepository, SeaOrmTeacherRepository, SectionRepository, StudentRepository,
    TeacherRepository,
};

/// Shared application state: one repository per entity, all backed by the
/// same connection pool.
#[derive(Clone)]
pub struct AppState {
    pub sections: Arc<dyn SectionRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            sections: Arc::new(SeaOrmSectionRepository::new(db.clone())),
            students: Arc::new(SeaOrmStudentRepository::new(db.clone())),
            courses: Arc::new(SeaOrmCourseRepository::new(db.clone())),
            teachers: Arc::new(SeaOrmTeacherRepository::new(db.clone())),
            assignments: Arc::new(SeaOrmAssignmentRepository::new(db.clone())),
            reports: Arc::new(SeaOrmReportRepository::new(db)),
        }
    }
}
