//! Shared request/response types used by API-facing crates.
//!
//! Form payloads arrive form-encoded, so every field is a string on the wire;
//! numeric ids go through [`empty_to_none`] which collapses blank or
//! unparsable values to `None` and leaves the "required field missing"
//! decision to the handler.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Severity of a transient status message carried on a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Warning,
    Error,
}

impl FlashLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Warning => "warning",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

/// Entity discriminator for the generic inline-edit route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Student,
    Course,
    Section,
    Teacher,
}

fn empty_to_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewReportForm {
    #[serde(default, deserialize_with = "empty_to_none")]
    pub teacher_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub student_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub course_id: Option<i32>,
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub body: String,
}

/// Student, course and month are immutable once a report exists; edits only
/// touch the teacher and the narrative body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EditReportForm {
    #[serde(default, deserialize_with = "empty_to_none")]
    pub teacher_id: Option<i32>,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewStudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub section_id: Option<i32>,
}

/// Payload for the add-course, add-section and add-teacher routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InlineEditForm {
    pub entity: EntityKind,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub section_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssignTeacherForm {
    #[serde(default, deserialize_with = "empty_to_none")]
    pub section_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub course_id: Option<i32>,
    #[serde(default, deserialize_with = "empty_to_none")]
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PrintQuery {
    #[serde(default, deserialize_with = "empty_to_none")]
    pub student_id: Option<i32>,
    #[serde(default)]
    pub month: String,
}

/// Flash parameters echoed back by the listing view after a redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    pub flash: Option<String>,
    pub flash_level: Option<FlashLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedView {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentView {
    pub id: i32,
    pub name: String,
    pub section_id: i32,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub id: i32,
    pub student: String,
    pub course: String,
    pub teacher: String,
    pub month: String,
    pub body: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentView {
    pub id: i32,
    pub section: String,
    pub course: String,
    pub teacher: String,
}

/// Everything the listing page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub flash: Option<FlashMessage>,
    pub reports: Vec<ReportView>,
    pub students: Vec<StudentView>,
    pub courses: Vec<NamedView>,
    pub sections: Vec<NamedView>,
    pub teachers: Vec<NamedView>,
    pub assignments: Vec<AssignmentView>,
    /// Distinct report months, newest first, for the month filter.
    pub months: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFormView {
    pub flash: Option<FlashMessage>,
    /// Pre-filled with the current calendar month.
    pub month: String,
    pub students: Vec<StudentView>,
    pub courses: Vec<NamedView>,
    pub teachers: Vec<NamedView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditReportFormView {
    pub id: i32,
    pub student: String,
    pub course: String,
    pub month: String,
    pub teacher_id: i32,
    pub body: String,
    pub teachers: Vec<NamedView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintReportView {
    pub course: String,
    pub teacher: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintView {
    pub student: String,
    pub month: String,
    pub reports: Vec<PrintReportView>,
}
