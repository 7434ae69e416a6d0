//! Routes for student averages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use scoreboard_students::application::query_handlers::{self, StudentReportView};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::routes::ListParams;
use crate::state::AppState;

/// GET /api/v1/students
///
/// Responds `204 No Content` until the first student is known.
#[instrument(skip(state))]
async fn list_students(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let page = query_handlers::list_students(params.skip, params.limit, &params.sort_order, &state.students);
    if page.total == 0 {
        return StatusCode::NO_CONTENT.into_response();
    }
    info!(total = page.total, returned = page.items.len(), "listed students");
    Json(page).into_response()
}

/// GET /api/v1/students/{student_id}
#[instrument(skip(state))]
async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<StudentReportView>, ApiError> {
    let view = query_handlers::get_student_report(&student_id, &state.students)?;
    Ok(Json(view))
}

/// Returns the router for student queries.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students))
        .route("/{student_id}", get(get_student))
}
