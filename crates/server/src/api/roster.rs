//! Handlers for roster upkeep: adding students, courses, sections and
//! teachers, plus the generic inline-edit route the listing page posts to.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::response::Response;
use classlog_api_types::{EntityKind, FlashLevel, InlineEditForm, NameForm, NewStudentForm};
use classlog_core::domain::{normalize_name, normalize_section_name};
use tracing::warn;

use super::flash::{redirect_home, redirect_with_flash};
use super::state::AppState;
use crate::repository::{
    CourseRepository, SectionRepository, StoreError, StoreResult, StudentRepository, StudentUpdate,
    TeacherRepository,
};

/// POST `/students/add`.
pub async fn add_student(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewStudentForm>,
) -> Response {
    let (Some(name), Some(section_id)) = (normalize_name(&form.name), form.section_id) else {
        return redirect_with_flash(
            FlashLevel::Error,
            "Could not add the student: name and section are required.",
        );
    };

    match state.students.create(name, section_id).await {
        Ok(student) => redirect_with_flash(
            FlashLevel::Success,
            &format!("Student {} added.", student.name),
        ),
        Err(err) => {
            warn!(error = %err, "failed to add student");
            redirect_with_flash(
                FlashLevel::Error,
                &format!("Database error while adding the student: {err}"),
            )
        }
    }
}

/// POST `/courses/add`. Blank names are a silent no-op.
pub async fn add_course(State(state): State<Arc<AppState>>, Form(form): Form<NameForm>) -> Response {
    let Some(name) = normalize_name(&form.name) else {
        return redirect_home();
    };

    match state.courses.find_by_name(&name).await {
        Ok(Some(_)) => return duplicate_flash("course", &name),
        Ok(None) => {}
        Err(err) => return check_failed_flash("course", err),
    }
    insert_outcome_flash("course", &name, state.courses.create(name.clone()).await)
}

/// POST `/sections/add`. Names are upper-cased before storage and comparison;
/// blank names are a silent no-op.
pub async fn add_section(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NameForm>,
) -> Response {
    let Some(name) = normalize_section_name(&form.name) else {
        return redirect_home();
    };

    match state.sections.find_by_name(&name).await {
        Ok(Some(_)) => return duplicate_flash("section", &name),
        Ok(None) => {}
        Err(err) => return check_failed_flash("section", err),
    }
    insert_outcome_flash("section", &name, state.sections.create(name.clone()).await)
}

/// POST `/teachers/add`. Blank names are a silent no-op.
pub async fn add_teacher(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NameForm>,
) -> Response {
    let Some(name) = normalize_name(&form.name) else {
        return redirect_home();
    };

    match state.teachers.find_by_name(&name).await {
        Ok(Some(_)) => return duplicate_flash("teacher", &name),
        Ok(None) => {}
        Err(err) => return check_failed_flash("teacher", err),
    }
    insert_outcome_flash("teacher", &name, state.teachers.create(name.clone()).await)
}

fn duplicate_flash(kind: &str, name: &str) -> Response {
    redirect_with_flash(
        FlashLevel::Error,
        &format!("A {kind} named '{name}' already exists."),
    )
}

fn check_failed_flash(kind: &str, err: StoreError) -> Response {
    warn!(error = %err, kind, "existence check failed");
    redirect_with_flash(FlashLevel::Error, &format!("Database error: {err}"))
}

fn insert_outcome_flash<M>(kind: &str, name: &str, created: StoreResult<M>) -> Response {
    match created {
        Ok(_) => redirect_with_flash(FlashLevel::Success, &format!("Added {kind} '{name}'.")),
        // The unique key backstops the existence check above.
        Err(StoreError::Duplicate) => duplicate_flash(kind, name),
        Err(err) => {
            warn!(error = %err, kind, "failed to insert");
            redirect_with_flash(
                FlashLevel::Error,
                &format!("Database error while adding the {kind}: {err}"),
            )
        }
    }
}

/// POST `/entities/edit`: generic inline edit dispatched on the entity
/// discriminator. Renames any of the four entities; additionally moves a
/// student to a different section when one is supplied.
pub async fn edit_entity(
    State(state): State<Arc<AppState>>,
    Form(form): Form<InlineEditForm>,
) -> Response {
    let Some(id) = form.id else {
        return redirect_with_flash(FlashLevel::Error, "No record selected for editing.");
    };

    let result = match form.entity {
        EntityKind::Student => {
            let update = StudentUpdate {
                name: normalize_name(&form.name),
                section_id: form.section_id,
            };
            state.students.update(id, update).await.map(|_| ())
        }
        EntityKind::Course => match normalize_name(&form.name) {
            Some(name) => state.courses.rename(id, name).await.map(|_| ()),
            None => Ok(()),
        },
        EntityKind::Section => match normalize_section_name(&form.name) {
            Some(name) => state.sections.rename(id, name).await.map(|_| ()),
            None => Ok(()),
        },
        EntityKind::Teacher => match normalize_name(&form.name) {
            Some(name) => state.teachers.rename(id, name).await.map(|_| ()),
            None => Ok(()),
        },
    };

    match result {
        Ok(()) => redirect_with_flash(FlashLevel::Success, "Changes saved."),
        Err(StoreError::Duplicate) => {
            redirect_with_flash(FlashLevel::Error, "That name is already taken.")
        }
        Err(err) => {
            warn!(error = %err, entity = ?form.entity, id, "inline edit failed");
            redirect_with_flash(
                FlashLevel::Error,
                &format!("Database error while saving changes: {err}"),
            )
        }
    }
}
