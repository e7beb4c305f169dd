//! Handlers for the report lifecycle: listing, filing, editing, deleting and
//! the print view.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, Path, Query, State};
use axum::response::{IntoResponse, Response};
use classlog_api_types::{
    AssignmentView, EditReportForm, EditReportFormView, FlashLevel, FlashMessage, ListQuery,
    ListView, NamedView, NewReportForm, PrintQuery, PrintReportView, PrintView, ReportFormView,
    ReportView, StudentView,
};
use classlog_core::domain::Month;
use tracing::warn;

use super::error::ApiError;
use super::flash::redirect_with_flash;
use super::state::AppState;
use crate::entity::{course, section, student, teacher};
use crate::repository::{
    AssignmentRepository, CourseRepository, NewReport, ReportRepository, SectionRepository,
    StoreError, StudentRepository, TeacherRepository,
};

fn name_map(rows: impl IntoIterator<Item = (i32, String)>) -> HashMap<i32, String> {
    rows.into_iter().collect()
}

fn name_of(names: &HashMap<i32, String>, id: i32) -> String {
    names.get(&id).cloned().unwrap_or_else(|| format!("#{id}"))
}

fn student_views(
    students: Vec<student::Model>,
    section_names: &HashMap<i32, String>,
) -> Vec<StudentView> {
    students
        .into_iter()
        .map(|s| StudentView {
            id: s.id,
            name: s.name,
            section_id: s.section_id,
            section: name_of(section_names, s.section_id),
        })
        .collect()
}

fn named_views<M>(models: Vec<M>, into: impl Fn(M) -> (i32, String)) -> Vec<NamedView> {
    models
        .into_iter()
        .map(|m| {
            let (id, name) = into(m);
            NamedView { id, name }
        })
        .collect()
}

fn section_pairs(sections: &[section::Model]) -> impl Iterator<Item = (i32, String)> + '_ {
    sections.iter().map(|s| (s.id, s.name.clone()))
}

fn course_pairs(courses: &[course::Model]) -> impl Iterator<Item = (i32, String)> + '_ {
    courses.iter().map(|c| (c.id, c.name.clone()))
}

fn teacher_pairs(teachers: &[teacher::Model]) -> impl Iterator<Item = (i32, String)> + '_ {
    teachers.iter().map(|t| (t.id, t.name.clone()))
}

/// GET `/`: everything the listing page shows, in one read.
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListView>, ApiError> {
    let reports = state.reports.list_all().await?;
    let students = state.students.list().await?;
    let courses = state.courses.list().await?;
    let sections = state.sections.list().await?;
    let teachers = state.teachers.list().await?;
    let assignments = state.assignments.list().await?;
    let months = state.reports.distinct_months().await?;

    let section_names = name_map(section_pairs(&sections));
    let course_names = name_map(course_pairs(&courses));
    let teacher_names = name_map(teacher_pairs(&teachers));
    let student_names = name_map(students.iter().map(|s| (s.id, s.name.clone())));

    let flash = match (query.flash, query.flash_level) {
        (Some(message), level) => Some(FlashMessage {
            level: level.unwrap_or(FlashLevel::Success),
            message,
        }),
        _ => None,
    };

    let view = ListView {
        flash,
        reports: reports
            .into_iter()
            .map(|r| ReportView {
                id: r.id,
                student: name_of(&student_names, r.student_id),
                course: name_of(&course_names, r.course_id),
                teacher: name_of(&teacher_names, r.teacher_id),
                month: r.month,
                body: r.body,
                created_at: r.created_at.to_string(),
            })
            .collect(),
        students: student_views(students, &section_names),
        courses: named_views(courses, |c| (c.id, c.name)),
        sections: named_views(sections, |s| (s.id, s.name)),
        teachers: named_views(teachers, |t| (t.id, t.name)),
        assignments: assignments
            .into_iter()
            .map(|a| AssignmentView {
                id: a.id,
                section: name_of(&section_names, a.section_id),
                course: name_of(&course_names, a.course_id),
                teacher: name_of(&teacher_names, a.teacher_id),
            })
            .collect(),
        months,
    };

    Ok(Json(view))
}

async fn report_form_view(
    state: &AppState,
    flash: Option<FlashMessage>,
) -> Result<ReportFormView, ApiError> {
    let students = state.students.list().await?;
    let courses = state.courses.list().await?;
    let teachers = state.teachers.list().await?;
    let sections = state.sections.list().await?;
    let section_names = name_map(section_pairs(&sections));

    Ok(ReportFormView {
        flash,
        month: Month::current().to_string(),
        students: student_views(students, &section_names),
        courses: named_views(courses, |c| (c.id, c.name)),
        teachers: named_views(teachers, |t| (t.id, t.name)),
    })
}

/// GET `/reports/add`: empty form pre-filled with the current month.
pub async fn new_report_form(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReportFormView>, ApiError> {
    Ok(Json(report_form_view(&state, None).await?))
}

/// POST `/reports/add`.
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewReportForm>,
) -> Response {
    let month = form.month.trim().parse::<Month>().ok();
    let body = form.body.trim().to_string();

    let (Some(teacher_id), Some(student_id), Some(course_id), Some(month)) =
        (form.teacher_id, form.student_id, form.course_id, month)
    else {
        return rerender_form_with_error(&state, "Could not save the report: all fields are required.")
            .await;
    };
    if body.is_empty() {
        return rerender_form_with_error(&state, "Could not save the report: all fields are required.")
            .await;
    }

    match state
        .reports
        .find_duplicate(student_id, course_id, &month)
        .await
    {
        Ok(Some(_)) => {
            return redirect_with_flash(
                FlashLevel::Warning,
                "A report for this student, course and month already exists; nothing was saved.",
            );
        }
        Ok(None) => {}
        Err(err) => {
            warn!(error = %err, "duplicate check failed");
            return redirect_with_flash(FlashLevel::Error, &format!("Database error: {err}"));
        }
    }

    let new_report = NewReport {
        student_id,
        course_id,
        teacher_id,
        month,
        body,
    };
    match state.reports.create(new_report).await {
        Ok(_) => redirect_with_flash(FlashLevel::Success, "Report saved."),
        Err(err) => {
            warn!(error = %err, "failed to save report");
            redirect_with_flash(
                FlashLevel::Error,
                &format!("Database error while saving the report: {err}"),
            )
        }
    }
}

async fn rerender_form_with_error(state: &AppState, message: &str) -> Response {
    let flash = Some(FlashMessage {
        level: FlashLevel::Error,
        message: message.to_string(),
    });
    match report_form_view(state, flash).await {
        Ok(view) => Json(view).into_response(),
        Err(err) => err.into_response(),
    }
}

/// GET `/reports/{id}/edit`: form pre-filled with the stored report.
/// Student, course and month are shown but immutable.
pub async fn edit_report_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EditReportFormView>, ApiError> {
    let report = state
        .reports
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let student = state
        .students
        .find_by_id(report.student_id)
        .await?
        .map(|s| s.name)
        .unwrap_or_else(|| format!("#{}", report.student_id));
    let course = state
        .courses
        .find_by_id(report.course_id)
        .await?
        .map(|c| c.name)
        .unwrap_or_else(|| format!("#{}", report.course_id));
    let teachers = state.teachers.list().await?;

    Ok(Json(EditReportFormView {
        id: report.id,
        student,
        course,
        month: report.month,
        teacher_id: report.teacher_id,
        body: report.body,
        teachers: named_views(teachers, |t| (t.id, t.name)),
    }))
}

/// POST `/reports/{id}/edit`: overwrites teacher and body unconditionally.
pub async fn update_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<EditReportForm>,
) -> Response {
    let Some(teacher_id) = form.teacher_id else {
        return redirect_with_flash(
            FlashLevel::Error,
            "Could not update the report: a teacher is required.",
        );
    };

    match state
        .reports
        .update_narrative(id, teacher_id, form.body)
        .await
    {
        Ok(_) => redirect_with_flash(FlashLevel::Success, "Report updated."),
        Err(StoreError::NotFound) => ApiError::NotFound.into_response(),
        Err(err) => {
            warn!(error = %err, report_id = id, "failed to update report");
            redirect_with_flash(
                FlashLevel::Error,
                &format!("Database error while updating the report: {err}"),
            )
        }
    }
}

/// POST `/reports/{id}/delete`.
pub async fn delete_report(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Response {
    match state.reports.delete(id).await {
        Ok(()) => redirect_with_flash(FlashLevel::Warning, "Report deleted."),
        Err(StoreError::NotFound) => ApiError::NotFound.into_response(),
        Err(err) => {
            warn!(error = %err, report_id = id, "failed to delete report");
            redirect_with_flash(
                FlashLevel::Error,
                &format!("Database error while deleting the report: {err}"),
            )
        }
    }
}

/// GET `/reports/print?student_id=<id>&month=YYYY-MM`: print-oriented view
/// of one student's reports for one month, ordered by course.
pub async fn print_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PrintQuery>,
) -> Response {
    let month = query.month.trim().parse::<Month>().ok();
    let (Some(student_id), Some(month)) = (query.student_id, month) else {
        return redirect_with_flash(
            FlashLevel::Error,
            "A student and a month are required for printing.",
        );
    };

    let student = match state.students.find_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return redirect_with_flash(FlashLevel::Error, "Unknown student."),
        Err(err) => return ApiError::from(err).into_response(),
    };

    let reports = match state.reports.list_for_student_month(student_id, &month).await {
        Ok(reports) => reports,
        Err(err) => return ApiError::from(err).into_response(),
    };
    if reports.is_empty() {
        return redirect_with_flash(
            FlashLevel::Warning,
            &format!("No reports for {} in {month}.", student.name),
        );
    }

    let (courses, teachers) = match (state.courses.list().await, state.teachers.list().await) {
        (Ok(courses), Ok(teachers)) => (courses, teachers),
        (Err(err), _) | (_, Err(err)) => return ApiError::from(err).into_response(),
    };
    let course_names = name_map(course_pairs(&courses));
    let teacher_names = name_map(teacher_pairs(&teachers));

    let view = PrintView {
        student: student.name,
        month: month.to_string(),
        reports: reports
            .into_iter()
            .map(|r| PrintReportView {
                course: name_of(&course_names, r.course_id),
                teacher: name_of(&teacher_names, r.teacher_id),
                body: r.body,
            })
            .collect(),
    };

    Json(view).into_response()
}
