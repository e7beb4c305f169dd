//! Handler for binding a teacher to a (section, course) pair.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::Response;
use classlog_api_types::{AssignTeacherForm, FlashLevel};
use tracing::warn;

use super::flash::redirect_with_flash;
use super::state::AppState;
use crate::repository::{AssignOutcome, AssignmentRepository, TeacherRepository};

/// POST `/assignments/assign`. An existing assignment for the pair is
/// overwritten in place rather than duplicated.
pub async fn assign_teacher(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AssignTeacherForm>,
) -> Response {
    let (Some(section_id), Some(course_id), Some(teacher_id)) =
        (form.section_id, form.course_id, form.teacher_id)
    else {
        return redirect_with_flash(
            FlashLevel::Error,
            "Section, course and teacher are all required for an assignment.",
        );
    };

    let teacher = match state.teachers.find_by_id(teacher_id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => return redirect_with_flash(FlashLevel::Error, "Unknown teacher."),
        Err(err) => {
            warn!(error = %err, "teacher lookup failed");
            return redirect_with_flash(FlashLevel::Error, &format!("Database error: {err}"));
        }
    };

    match state
        .assignments
        .assign(section_id, course_id, teacher_id)
        .await
    {
        Ok(AssignOutcome::Created(_)) => redirect_with_flash(
            FlashLevel::Success,
            &format!("Assigned {} to the section and course.", teacher.name),
        ),
        Ok(AssignOutcome::Updated {
            previous_teacher_id,
            ..
        }) => {
            let previous = match state.teachers.find_by_id(previous_teacher_id).await {
                Ok(Some(previous)) => previous.name,
                _ => format!("#{previous_teacher_id}"),
            };
            redirect_with_flash(
                FlashLevel::Success,
                &format!("Assignment updated from {} to {}.", previous, teacher.name),
            )
        }
        Err(err) => {
            warn!(error = %err, section_id, course_id, teacher_id, "assignment failed");
            redirect_with_flash(
                FlashLevel::Error,
                &format!("Database error while saving the assignment: {err}"),
            )
        }
    }
}
