pub mod assignment;
pub mod course;
pub mod report;
pub mod section;
pub mod student;
pub mod teacher;
