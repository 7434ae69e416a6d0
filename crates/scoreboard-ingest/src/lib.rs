//! Scoreboard: score stream ingestion.
//!
//! Reads the server-sent score stream, decodes `score` frames into
//! validated [`ScoreEvent`](scoreboard_core::event::ScoreEvent)s and fans
//! each one out to every registered projection. Malformed frames are
//! counted and dropped; they never reach the stores.

pub mod error;
pub mod payload;
pub mod pipeline;
pub mod runner;
pub mod source;
pub mod sse;
