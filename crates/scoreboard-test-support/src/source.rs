//! Test sources: in-memory `ByteSource` and `Connector` implementations.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use scoreboard_ingest::error::IngestError;
use scoreboard_ingest::source::{ByteSource, Connector};

/// A source that replays fixed chunks, then either ends cleanly or fails.
#[derive(Debug, Clone)]
pub struct ChunkedSource {
    chunks: VecDeque<Vec<u8>>,
    fail_at_end: bool,
}

impl ChunkedSource {
    /// A source that yields `chunks` and then ends.
    #[must_use]
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
            fail_at_end: false,
        }
    }

    /// A source that splits `text` into chunks of `size` bytes.
    #[must_use]
    pub fn split(text: &str, size: usize) -> Self {
        Self::new(text.as_bytes().chunks(size.max(1)).map(<[u8]>::to_vec))
    }

    /// Makes the source fail instead of ending once its chunks run out.
    #[must_use]
    pub fn failing_at_end(mut self) -> Self {
        self.fail_at_end = true;
        self
    }
}

#[async_trait]
impl ByteSource for ChunkedSource {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, IngestError> {
        match self.chunks.pop_front() {
            Some(chunk) => Ok(Some(chunk)),
            None if self.fail_at_end => Err(IngestError::UnexpectedStatus(502)),
            None => Ok(None),
        }
    }
}

/// A connector that hands out scripted sources in order. A `None` entry,
/// or running out of entries, makes that connection attempt fail.
#[derive(Debug, Default)]
pub struct ScriptedConnector {
    script: Mutex<VecDeque<Option<ChunkedSource>>>,
    attempts: AtomicU32,
}

impl ScriptedConnector {
    /// Creates a connector that plays `script` one entry per attempt.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = Option<ChunkedSource>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            attempts: AtomicU32::new(0),
        }
    }

    /// Number of connection attempts made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for ScriptedConnector {
    type Source = ChunkedSource;

    async fn connect(&self) -> Result<ChunkedSource, IngestError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front().flatten();
        next.ok_or(IngestError::UnexpectedStatus(503))
    }
}
