//! Byte sources for the score stream.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;

use crate::error::IngestError;

/// A connected stream that yields raw chunks until it ends.
#[async_trait]
pub trait ByteSource: Send {
    /// Returns the next chunk, or `None` once the stream has ended.
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, IngestError>;
}

/// Opens new [`ByteSource`]s, once per (re)connection.
#[async_trait]
pub trait Connector: Send + Sync {
    /// The source type produced on a successful connection.
    type Source: ByteSource;

    /// Opens a fresh connection.
    async fn connect(&self) -> Result<Self::Source, IngestError>;
}

/// An open `text/event-stream` HTTP response.
#[derive(Debug)]
pub struct HttpEventSource {
    response: reqwest::Response,
}

#[async_trait]
impl ByteSource for HttpEventSource {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, IngestError> {
        Ok(self.response.chunk().await?.map(|bytes| bytes.to_vec()))
    }
}

/// Connects to the score stream over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    client: reqwest::Client,
    url: String,
}

impl HttpConnector {
    /// Creates a connector for `url`.
    #[must_use]
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Creates a connector for `url` whose reads fail after `read_timeout`
    /// of silence, so a stalled stream ends and gets reconnected.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::Http` if the HTTP client cannot be built.
    pub fn with_read_timeout(url: impl Into<String>, read_timeout: Duration) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder().read_timeout(read_timeout).build()?;
        Ok(Self::new(client, url))
    }

    /// The stream URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Connector for HttpConnector {
    type Source = HttpEventSource;

    async fn connect(&self) -> Result<HttpEventSource, IngestError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::UnexpectedStatus(status.as_u16()));
        }
        Ok(HttpEventSource { response })
    }
}
