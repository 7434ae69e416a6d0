//! Scoreboard API: HTTP surface over the student and exam stores.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router with every route mounted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/students", routes::students::router())
        .nest("/api/v1/exams", routes::exams::router())
        .with_state(state)
}
