//! HTTP routes: one handler per route, each a single read-modify-write
//! against the repositories. POST handlers answer with a 303 redirect to the
//! listing route carrying a flash message; GET routes return the view model;
//! missing records answer 404.

pub mod assignments;
pub mod error;
pub mod flash;
pub mod reports;
pub mod roster;
pub mod state;

pub use state::AppState;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use classlog_api_types::HealthCheckResponse;
use tower_http::trace::TraceLayer;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(reports::list_reports))
        .route("/health", get(health))
        .route(
            "/reports/add",
            get(reports::new_report_form).post(reports::create_report),
        )
        .route(
            "/reports/{id}/edit",
            get(reports::edit_report_form).post(reports::update_report),
        )
        .route("/reports/{id}/delete", post(reports::delete_report))
        .route("/reports/print", get(reports::print_reports))
        .route("/students/add", post(roster::add_student))
        .route("/courses/add", post(roster::add_course))
        .route("/sections/add", post(roster::add_section))
        .route("/teachers/add", post(roster::add_teacher))
        .route("/entities/edit", post(roster::edit_entity))
        .route("/assignments/assign", post(assignments::assign_teacher))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
