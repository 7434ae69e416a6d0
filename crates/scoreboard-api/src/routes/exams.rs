//! Routes for exam listings and reports.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use scoreboard_exams::application::query_handlers;
use scoreboard_exams::domain::report::ExamReport;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::routes::ListParams;
use crate::state::AppState;

/// GET /api/v1/exams
///
/// Responds `204 No Content` until the first exam is known.
#[instrument(skip(state))]
async fn list_exams(State(state): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let page = query_handlers::list_exams(params.skip, params.limit, &params.sort_order, &state.exams);
    if page.total == 0 {
        return StatusCode::NO_CONTENT.into_response();
    }
    info!(total = page.total, returned = page.items.len(), "listed exams");
    Json(page).into_response()
}

/// GET /api/v1/exams/{exam_id}
///
/// A non-integer exam number is rejected by the `Path` extractor with 400.
#[instrument(skip(state))]
async fn get_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<i64>,
) -> Result<Json<Arc<ExamReport>>, ApiError> {
    let report = query_handlers::get_exam_report(exam_id, &state.exams)?;
    Ok(Json(report))
}

/// Returns the router for exam queries.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exams))
        .route("/{exam_id}", get(get_exam))
}
