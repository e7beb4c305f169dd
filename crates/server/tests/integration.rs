use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Form, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use classlog_api_types::{
    AssignTeacherForm, EditReportForm, EntityKind, InlineEditForm, NameForm, NewReportForm,
    NewStudentForm,
};
use classlog_core::domain::Month;
use classlog_migration::{Migrator, MigratorTrait};
use classlog_server::api::{AppState, assignments, reports, roster};
use classlog_server::repository::{
    AssignOutcome, AssignmentRepository, CourseRepository, ReportRepository, SectionRepository,
    StoreError, StudentRepository, TeacherRepository,
};
use classlog_server::seed;
use sea_orm::{ConnectOptions, Database};

async fn seeded_state() -> Arc<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    // One pooled connection keeps every statement on the same in-memory db.
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("in-memory sqlite should connect");
    Migrator::up(&db, None).await.expect("migrations should run");

    let state = Arc::new(AppState::new(db));
    seed::seed_if_empty(&state)
        .await
        .expect("seed dataset should insert");
    state
}

async fn student_id(state: &AppState, name: &str) -> i32 {
    state
        .students
        .list()
        .await
        .expect("list students")
        .into_iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("seeded student {name} should exist"))
        .id
}

async fn course_id(state: &AppState, name: &str) -> i32 {
    state
        .courses
        .list()
        .await
        .expect("list courses")
        .into_iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("seeded course {name} should exist"))
        .id
}

async fn section_id(state: &AppState, name: &str) -> i32 {
    state
        .sections
        .list()
        .await
        .expect("list sections")
        .into_iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("seeded section {name} should exist"))
        .id
}

async fn teacher_id(state: &AppState, name: &str) -> i32 {
    state
        .teachers
        .list()
        .await
        .expect("list teachers")
        .into_iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("seeded teacher {name} should exist"))
        .id
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a location")
        .to_str()
        .expect("location should be ascii")
}

fn assert_flash_redirect(response: &Response, level: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(response);
    assert!(
        target.starts_with("/?flash="),
        "expected flash redirect, got {target}"
    );
    assert!(
        target.ends_with(&format!("flash_level={level}")),
        "expected {level} flash, got {target}"
    );
}

async fn file_report(
    state: &Arc<AppState>,
    student: i32,
    course: i32,
    teacher: i32,
    month: &str,
    body: &str,
) -> Response {
    let form = NewReportForm {
        teacher_id: Some(teacher),
        student_id: Some(student),
        course_id: Some(course),
        month: month.to_string(),
        body: body.to_string(),
    };
    reports::create_report(State(state.clone()), Form(form)).await
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let state = seeded_state().await;
    seed::seed_if_empty(&state).await.expect("rerun seed");

    let sections = state.sections.list().await.expect("list sections");
    assert_eq!(sections.len(), 2);
    assert_eq!(state.students.list().await.expect("list").len(), 3);
    assert_eq!(state.courses.list().await.expect("list").len(), 3);
}

#[tokio::test]
async fn filed_report_appears_exactly_once_in_listing() {
    let state = seeded_state().await;
    let maria = student_id(&state, "Maria").await;
    let math = course_id(&state, "Math").await;
    let teacher = teacher_id(&state, "K. Papadopoulou").await;

    let response = file_report(&state, maria, math, teacher, "2024-11", "Good progress.").await;
    assert_flash_redirect(&response, "success");

    let listed = state.reports.list_all().await.expect("list reports");
    let matching = listed
        .iter()
        .filter(|r| r.student_id == maria && r.course_id == math && r.month == "2024-11")
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
async fn duplicate_report_is_rejected_and_original_preserved() {
    let state = seeded_state().await;
    let maria = student_id(&state, "Maria").await;
    let math = course_id(&state, "Math").await;
    let teacher = teacher_id(&state, "K. Papadopoulou").await;

    let first = file_report(&state, maria, math, teacher, "2024-11", "Original text.").await;
    assert_flash_redirect(&first, "success");

    let second = file_report(&state, maria, math, teacher, "2024-11", "Different text.").await;
    assert_flash_redirect(&second, "warning");

    let month: Month = "2024-11".parse().expect("valid month");
    let stored = state
        .reports
        .find_duplicate(maria, math, &month)
        .await
        .expect("duplicate lookup")
        .expect("first report should still exist");
    assert_eq!(stored.body, "Original text.");

    let listed = state.reports.list_all().await.expect("list reports");
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn missing_fields_rerender_the_form_without_writing() {
    let state = seeded_state().await;

    let response = reports::create_report(State(state.clone()), Form(NewReportForm::default())).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(state.reports.list_all().await.expect("list").is_empty());
}

#[tokio::test]
async fn malformed_month_is_a_validation_error() {
    let state = seeded_state().await;
    let maria = student_id(&state, "Maria").await;
    let math = course_id(&state, "Math").await;
    let teacher = teacher_id(&state, "K. Papadopoulou").await;

    let response = file_report(&state, maria, math, teacher, "November 2024", "text").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.reports.list_all().await.expect("list").is_empty());
}

#[tokio::test]
async fn editing_changes_only_teacher_and_body() {
    let state = seeded_state().await;
    let maria = student_id(&state, "Maria").await;
    let math = course_id(&state, "Math").await;
    let papadopoulou = teacher_id(&state, "K. Papadopoulou").await;
    let dimitriou = teacher_id(&state, "N. Dimitriou").await;

    let response = file_report(&state, maria, math, papadopoulou, "2024-11", "First draft.").await;
    assert_flash_redirect(&response, "success");
    let report = state.reports.list_all().await.expect("list")[0].clone();

    let form = EditReportForm {
        teacher_id: Some(dimitriou),
        body: "Revised narrative.".to_string(),
    };
    let response =
        reports::update_report(State(state.clone()), Path(report.id), Form(form)).await;
    assert_flash_redirect(&response, "success");

    let updated = state
        .reports
        .find_by_id(report.id)
        .await
        .expect("lookup")
        .expect("report should still exist");
    assert_eq!(updated.body, "Revised narrative.");
    assert_eq!(updated.teacher_id, dimitriou);
    assert_eq!(updated.student_id, maria);
    assert_eq!(updated.course_id, math);
    assert_eq!(updated.month, "2024-11");
}

#[tokio::test]
async fn editing_a_missing_report_is_not_found() {
    let state = seeded_state().await;

    let form = EditReportForm {
        teacher_id: Some(1),
        body: "text".to_string(),
    };
    let response = reports::update_report(State(state.clone()), Path(9999), Form(form)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_report_twice_yields_not_found() {
    let state = seeded_state().await;
    let maria = student_id(&state, "Maria").await;
    let math = course_id(&state, "Math").await;
    let teacher = teacher_id(&state, "K. Papadopoulou").await;

    file_report(&state, maria, math, teacher, "2024-11", "To be removed.").await;
    let report = state.reports.list_all().await.expect("list")[0].clone();

    let first = reports::delete_report(State(state.clone()), Path(report.id)).await;
    assert_flash_redirect(&first, "warning");
    assert!(state.reports.list_all().await.expect("list").is_empty());

    let second = reports::delete_report(State(state.clone()), Path(report.id)).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn section_rename_upper_cases_input() {
    let state = seeded_state().await;
    let b2 = section_id(&state, "B2").await;

    let form = InlineEditForm {
        entity: EntityKind::Section,
        id: Some(b2),
        name: "b3".to_string(),
        section_id: None,
    };
    let response = roster::edit_entity(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "success");

    let renamed = state
        .sections
        .find_by_id(b2)
        .await
        .expect("lookup")
        .expect("section should exist");
    assert_eq!(renamed.name, "B3");
}

#[tokio::test]
async fn inline_edit_moves_student_between_sections() {
    let state = seeded_state().await;
    let eleni = student_id(&state, "Eleni").await;
    let a1 = section_id(&state, "A1").await;

    let form = InlineEditForm {
        entity: EntityKind::Student,
        id: Some(eleni),
        name: String::new(),
        section_id: Some(a1),
    };
    let response = roster::edit_entity(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "success");

    let moved = state
        .students
        .find_by_id(eleni)
        .await
        .expect("lookup")
        .expect("student should exist");
    assert_eq!(moved.section_id, a1);
    assert_eq!(moved.name, "Eleni");
}

#[tokio::test]
async fn inline_edit_without_id_is_an_error() {
    let state = seeded_state().await;

    let form = InlineEditForm {
        entity: EntityKind::Teacher,
        id: None,
        name: "Someone".to_string(),
        section_id: None,
    };
    let response = roster::edit_entity(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "error");
}

#[tokio::test]
async fn duplicate_roster_names_are_rejected() {
    let state = seeded_state().await;

    let before = state.courses.list().await.expect("list").len();
    let form = NameForm {
        name: "Math".to_string(),
    };
    let response = roster::add_course(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "error");
    assert_eq!(state.courses.list().await.expect("list").len(), before);

    // Uniqueness is case-sensitive: "math" is a different course.
    let err = state
        .courses
        .create("Math".to_string())
        .await
        .expect_err("direct duplicate insert should fail");
    assert!(matches!(err, StoreError::Duplicate));
    state
        .courses
        .create("math".to_string())
        .await
        .expect("lower-case variant should insert");
}

#[tokio::test]
async fn blank_roster_name_is_a_silent_no_op() {
    let state = seeded_state().await;

    let before = state.teachers.list().await.expect("list").len();
    let form = NameForm {
        name: "   ".to_string(),
    };
    let response = roster::add_teacher(State(state.clone()), Form(form)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(state.teachers.list().await.expect("list").len(), before);
}

#[tokio::test]
async fn added_section_is_stored_upper_cased() {
    let state = seeded_state().await;

    let form = NameForm {
        name: "c3".to_string(),
    };
    let response = roster::add_section(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "success");

    let sections = state.sections.list().await.expect("list");
    assert!(sections.iter().any(|s| s.name == "C3"));
    assert!(!sections.iter().any(|s| s.name == "c3"));
}

#[tokio::test]
async fn add_student_requires_name_and_section() {
    let state = seeded_state().await;
    let before = state.students.list().await.expect("list").len();

    let form = NewStudentForm {
        name: "  ".to_string(),
        section_id: Some(section_id(&state, "A1").await),
    };
    let response = roster::add_student(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "error");
    assert_eq!(state.students.list().await.expect("list").len(), before);

    let form = NewStudentForm {
        name: "Nikos".to_string(),
        section_id: Some(section_id(&state, "A1").await),
    };
    let response = roster::add_student(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "success");
    assert_eq!(state.students.list().await.expect("list").len(), before + 1);
}

#[tokio::test]
async fn assignment_overwrites_instead_of_duplicating() {
    let state = seeded_state().await;
    let a1 = section_id(&state, "A1").await;
    let math = course_id(&state, "Math").await;
    let papadopoulou = teacher_id(&state, "K. Papadopoulou").await;
    let dimitriou = teacher_id(&state, "N. Dimitriou").await;

    let outcome = state
        .assignments
        .assign(a1, math, dimitriou)
        .await
        .expect("reassignment should succeed");
    match outcome {
        AssignOutcome::Updated {
            previous_teacher_id,
            assignment,
        } => {
            assert_eq!(previous_teacher_id, papadopoulou);
            assert_eq!(assignment.teacher_id, dimitriou);
        }
        AssignOutcome::Created(_) => panic!("seeded pair should be updated, not created"),
    }

    let assignments = state.assignments.list().await.expect("list assignments");
    let for_pair = assignments
        .iter()
        .filter(|a| a.section_id == a1 && a.course_id == math)
        .count();
    assert_eq!(for_pair, 1);
}

#[tokio::test]
async fn assign_handler_reports_update_and_creation() {
    let state = seeded_state().await;
    let a1 = section_id(&state, "A1").await;
    let math = course_id(&state, "Math").await;
    let physics = course_id(&state, "Physics").await;
    let dimitriou = teacher_id(&state, "N. Dimitriou").await;

    let form = AssignTeacherForm {
        section_id: Some(a1),
        course_id: Some(math),
        teacher_id: Some(dimitriou),
    };
    let response = assignments::assign_teacher(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "success");
    assert!(location(&response).contains("updated"));

    let form = AssignTeacherForm {
        section_id: Some(a1),
        course_id: Some(physics),
        teacher_id: Some(dimitriou),
    };
    let response = assignments::assign_teacher(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "success");
    assert!(location(&response).contains("Assigned"));

    let form = AssignTeacherForm::default();
    let response = assignments::assign_teacher(State(state.clone()), Form(form)).await;
    assert_flash_redirect(&response, "error");
}

#[tokio::test]
async fn print_view_orders_reports_by_course() {
    let state = seeded_state().await;
    let maria = student_id(&state, "Maria").await;
    let math = course_id(&state, "Math").await;
    let literature = course_id(&state, "Literature").await;
    let teacher = teacher_id(&state, "K. Papadopoulou").await;

    file_report(&state, maria, literature, teacher, "2024-11", "Reads well.").await;
    file_report(&state, maria, math, teacher, "2024-11", "Counts well.").await;

    let query = classlog_api_types::PrintQuery {
        student_id: Some(maria),
        month: "2024-11".to_string(),
    };
    let response =
        reports::print_reports(State(state.clone()), axum::extract::Query(query)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read print body");
    let view: serde_json::Value = serde_json::from_slice(&bytes).expect("print view is json");
    assert_eq!(view["student"], "Maria");
    assert_eq!(view["month"], "2024-11");
    let courses: Vec<&str> = view["reports"]
        .as_array()
        .expect("reports array")
        .iter()
        .map(|r| r["course"].as_str().expect("course name"))
        .collect();
    // Math was seeded before Literature, so it has the lower course id.
    assert_eq!(courses, vec!["Math", "Literature"]);
}

#[tokio::test]
async fn print_view_redirects_when_nothing_matches() {
    let state = seeded_state().await;
    let maria = student_id(&state, "Maria").await;

    let query = classlog_api_types::PrintQuery {
        student_id: Some(maria),
        month: "2024-12".to_string(),
    };
    let response =
        reports::print_reports(State(state.clone()), axum::extract::Query(query)).await;
    assert_flash_redirect(&response, "warning");

    let query = classlog_api_types::PrintQuery {
        student_id: Some(9999),
        month: "2024-12".to_string(),
    };
    let response =
        reports::print_reports(State(state.clone()), axum::extract::Query(query)).await;
    assert_flash_redirect(&response, "error");

    let response = reports::print_reports(
        State(state.clone()),
        axum::extract::Query(classlog_api_types::PrintQuery::default()),
    )
    .await;
    assert_flash_redirect(&response, "error");
}

#[tokio::test]
async fn listing_view_derives_distinct_months_newest_first() {
    let state = seeded_state().await;
    let maria = student_id(&state, "Maria").await;
    let giannis = student_id(&state, "Giannis").await;
    let math = course_id(&state, "Math").await;
    let teacher = teacher_id(&state, "K. Papadopoulou").await;

    file_report(&state, maria, math, teacher, "2024-09", "September.").await;
    file_report(&state, giannis, math, teacher, "2024-11", "November.").await;
    file_report(&state, giannis, math, teacher, "2024-09", "September too.").await;

    let months = state.reports.distinct_months().await.expect("months");
    assert_eq!(months, vec!["2024-11".to_string(), "2024-09".to_string()]);

    let listed = state.reports.list_all().await.expect("list");
    assert_eq!(listed[0].month, "2024-11");
}
