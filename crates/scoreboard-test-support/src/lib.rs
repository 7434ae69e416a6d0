//! Shared test doubles and fixtures for the scoreboard workspace.

mod clock;
mod fixtures;
mod projection;
mod source;

pub use clock::FixedClock;
pub use fixtures::score_event;
pub use projection::RecordingProjection;
pub use source::{ChunkedSource, ScriptedConnector};
