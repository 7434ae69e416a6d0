//! Incremental server-sent events decoder.
//!
//! Bytes arrive in arbitrary chunks; lines are only interpreted once their
//! terminator has been seen, so a frame split across chunks decodes the
//! same as one delivered whole.

use tracing::warn;

/// Event type assigned to frames that carry no `event:` field.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// Longest line the decoder will buffer before giving up on it.
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// The `event:` field, or [`DEFAULT_EVENT_TYPE`].
    pub event: String,
    /// All `data:` lines of the frame joined with `\n`.
    pub data: String,
}

/// Line-oriented decoder that turns byte chunks into [`SseFrame`]s.
///
/// A line longer than the limit is dropped together with the rest of its
/// frame.
#[derive(Debug)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
    max_line_bytes: usize,
    discarding_line: bool,
    skipping_frame: bool,
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::with_max_line_bytes(DEFAULT_MAX_LINE_BYTES)
    }
}

impl SseDecoder {
    /// Creates a decoder with nothing buffered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder that drops lines longer than `max_line_bytes`.
    #[must_use]
    pub fn with_max_line_bytes(max_line_bytes: usize) -> Self {
        Self {
            buffer: Vec::new(),
            event: None,
            data: Vec::new(),
            max_line_bytes,
            discarding_line: false,
            skipping_frame: false,
        }
    }

    /// Feeds a chunk and returns every frame it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=end).collect();
            if std::mem::take(&mut self.discarding_line) {
                continue;
            }
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.len() > self.max_line_bytes {
                self.drop_oversized(line.len());
                continue;
            }
            let line = String::from_utf8_lossy(&line);
            if let Some(frame) = self.process_line(&line) {
                frames.push(frame);
            }
        }
        if !self.discarding_line && self.buffer.len() > self.max_line_bytes {
            let buffered = self.buffer.len();
            self.buffer.clear();
            self.discarding_line = true;
            self.drop_oversized(buffered);
        } else if self.discarding_line {
            self.buffer.clear();
        }
        frames
    }

    fn drop_oversized(&mut self, len: usize) {
        warn!(len, max = self.max_line_bytes, "dropping oversized server-sent event line");
        self.event = None;
        self.data.clear();
        self.skipping_frame = true;
    }

    fn process_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            if std::mem::take(&mut self.skipping_frame) {
                self.event = None;
                self.data.clear();
                return None;
            }
            return self.dispatch();
        }
        if self.skipping_frame || line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_owned()),
            "data" => self.data.push(value.to_owned()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        let data = self.data.join("\n");
        self.data.clear();
        Some(SseFrame {
            event: event.unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_owned()),
            data,
        })
    }
}
