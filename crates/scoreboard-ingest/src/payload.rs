//! JSON payload carried by `score` frames.

use scoreboard_core::event::ScoreEvent;
use serde::Deserialize;

use crate::error::IngestError;

/// Wire shape of a score: `{"studentId": "...", "exam": 1, "score": 0.5}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePayload {
    /// The student identifier.
    pub student_id: String,
    /// The exam number.
    pub exam: i64,
    /// The score obtained.
    pub score: f64,
}

impl ScorePayload {
    /// Converts the payload into a validated event.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Rejected` if the payload fails validation.
    pub fn into_event(self) -> Result<ScoreEvent, IngestError> {
        Ok(ScoreEvent::new(self.student_id, self.exam, self.score)?)
    }
}

/// Parses a frame's data into a validated event.
///
/// # Errors
///
/// Returns `IngestError::Payload` if `data` is not a score object, or
/// `IngestError::Rejected` if it fails validation.
pub fn parse_score(data: &str) -> Result<ScoreEvent, IngestError> {
    serde_json::from_str::<ScorePayload>(data)?.into_event()
}
