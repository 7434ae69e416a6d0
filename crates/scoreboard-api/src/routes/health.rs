//! Health check endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use scoreboard_exams::application::report_cache::ReportStatsSnapshot;
use scoreboard_ingest::pipeline::IngestStatus;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Ingestion counters.
    pub ingest: IngestStatus,
    /// Exam report cache counters.
    pub report_cache: ReportStatsSnapshot,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ingest: state.ingestor.status(),
        report_cache: state.exams.stats().snapshot(),
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
