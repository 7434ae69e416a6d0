//! Test projection: records every event it is handed.

use std::sync::Mutex;

use scoreboard_core::event::ScoreEvent;
use scoreboard_core::projection::ScoreProjection;

/// A projection that keeps every recorded event, in order.
#[derive(Debug, Default)]
pub struct RecordingProjection {
    recorded: Mutex<Vec<ScoreEvent>>,
}

impl RecordingProjection {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn recorded(&self) -> Vec<ScoreEvent> {
        self.recorded.lock().unwrap().clone()
    }
}

impl ScoreProjection for RecordingProjection {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn record(&self, event: &ScoreEvent) {
        self.recorded.lock().unwrap().push(event.clone());
    }
}
