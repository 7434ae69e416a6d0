//! Ingestion error types.

use scoreboard_core::error::DomainError;
use thiserror::Error;

/// Errors raised while reading or decoding the score stream.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Transport failure talking to the stream.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The stream answered with a non-success status.
    #[error("unexpected status from score stream: {0}")]
    UnexpectedStatus(u16),

    /// A frame's data was not a score payload.
    #[error("malformed score payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A payload decoded but failed validation.
    #[error("rejected score: {0}")]
    Rejected(#[from] DomainError),
}
