//! Long-running stream consumption with reconnects.

use std::time::Duration;

use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::error::IngestError;
use crate::pipeline::{FrameOutcome, Ingestor};
use crate::source::{ByteSource, Connector};
use crate::sse::SseDecoder;

/// Frame tallies for one connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Scores recorded.
    pub accepted: u64,
    /// Frames of other event types.
    pub skipped: u64,
    /// Score frames dropped.
    pub rejected: u64,
}

impl StreamSummary {
    fn tally(&mut self, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Accepted => self.accepted += 1,
            FrameOutcome::Skipped => self.skipped += 1,
            FrameOutcome::Rejected => self.rejected += 1,
        }
    }
}

/// How the runner reconnects after a stream ends or fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Pause between connections.
    pub delay: Duration,
    /// Stop after this many connection attempts; `None` runs forever.
    pub max_attempts: Option<u32>,
}

impl ReconnectPolicy {
    /// Reconnect forever with the given delay.
    #[must_use]
    pub fn forever(delay: Duration) -> Self {
        Self {
            delay,
            max_attempts: None,
        }
    }
}

/// Reads a source to its end, ingesting every frame.
///
/// # Errors
///
/// Returns the source's error if reading fails. Frames already ingested
/// stay ingested.
pub async fn consume<S>(source: &mut S, ingestor: &Ingestor) -> Result<StreamSummary, IngestError>
where
    S: ByteSource + ?Sized,
{
    let mut decoder = SseDecoder::new();
    let mut summary = StreamSummary::default();
    while let Some(chunk) = source.next_chunk().await? {
        for frame in decoder.push(&chunk) {
            summary.tally(ingestor.ingest_frame(&frame));
        }
    }
    Ok(summary)
}

/// Connects, consumes until the stream ends or fails, waits, and connects
/// again, until the policy's attempt budget (if any) is spent.
pub async fn run<C: Connector>(connector: &C, ingestor: &Ingestor, policy: ReconnectPolicy) {
    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);
        let connection_id = Uuid::now_v7();
        let span = info_span!("score_stream", %connection_id, attempt = attempts);
        async {
            match connector.connect().await {
                Ok(mut source) => {
                    info!("connected to score stream");
                    match consume(&mut source, ingestor).await {
                        Ok(summary) => info!(
                            accepted = summary.accepted,
                            skipped = summary.skipped,
                            rejected = summary.rejected,
                            "score stream ended"
                        ),
                        Err(err) => error!(%err, "score stream failed"),
                    }
                }
                Err(err) => error!(%err, "could not connect to score stream"),
            }
        }
        .instrument(span)
        .await;

        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            info!(attempts, "reconnect budget spent, stopping ingestion");
            return;
        }
        tokio::time::sleep(policy.delay).await;
    }
}
