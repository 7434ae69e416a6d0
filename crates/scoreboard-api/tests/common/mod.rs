//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use scoreboard_core::event::ScoreEvent;
use scoreboard_core::projection::ScoreProjection;
use scoreboard_exams::application::report_cache::CachePolicy;
use scoreboard_exams::application::store::ExamStore;
use scoreboard_ingest::pipeline::Ingestor;
use scoreboard_students::application::store::StudentStore;
use scoreboard_test_support::{FixedClock, score_event};
use tower::ServiceExt;

use scoreboard_api::state::AppState;

/// Scores for exam 1000 from three students.
pub const EXAM_1000_SCORES: [(&str, f64); 3] = [
    ("John.Doe", 0.722_509_585_163_546_6),
    ("Jane.Doe", 0.659_299_572_219_434_1),
    ("Dohn.Joe", 0.908_556_805_008_296_4),
];

/// Scores for one student across three exams.
pub const JOHN_DOE_SCORES: [(i64, f64); 3] = [
    (3001, 0.535_700_021_959_321_2),
    (3002, 0.780_310_326_039_997),
    (3003, 0.716_182_107_744_407_9),
];

/// Application state with empty stores and a fixed clock.
pub fn build_state(policy: CachePolicy) -> AppState {
    let students = Arc::new(StudentStore::new());
    let exams = Arc::new(ExamStore::with_policy(policy));
    let projections: Vec<Arc<dyn ScoreProjection>> = vec![
        Arc::clone(&students) as Arc<dyn ScoreProjection>,
        Arc::clone(&exams) as Arc<dyn ScoreProjection>,
    ];
    let ingestor = Arc::new(Ingestor::new(projections, Arc::new(FixedClock::reference())));
    AppState::new(students, exams, ingestor)
}

/// Build the full app router over empty stores.
pub fn build_test_app() -> Router {
    scoreboard_api::build_router(build_state(CachePolicy::Enabled))
}

/// Build the full app router after ingesting `events`.
pub fn build_seeded_app(events: &[ScoreEvent]) -> Router {
    let state = build_state(CachePolicy::Enabled);
    for event in events {
        state.ingestor.ingest(event);
    }
    scoreboard_api::build_router(state)
}

/// The exam 1000 and John.Doe scores, as events.
pub fn sample_events() -> Vec<ScoreEvent> {
    let exam_scores = EXAM_1000_SCORES
        .iter()
        .map(|(student, score)| score_event(student, 1000, *score));
    let student_scores = JOHN_DOE_SCORES
        .iter()
        .map(|(exam, score)| score_event("John.Doe", *exam, *score));
    exam_scores.chain(student_scores).collect()
}

/// Send a GET request and return the status with the raw body bytes.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, body_bytes.to_vec())
}

/// Send a GET request and return the response parsed as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    (status, json)
}

/// Asserts two doubles agree to within a JSON round trip.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}
