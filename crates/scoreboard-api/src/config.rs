//! Process configuration, read once from the environment at startup.

use std::time::Duration;

use crate::error::AppError;

/// Stream the original deployment read scores from.
pub const DEFAULT_STREAM_URL: &str = "https://live-test-scores.herokuapp.com/scores";

/// Runtime configuration for the API server and its ingestion task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Server-sent score stream to ingest.
    pub stream_url: String,
    /// Whether to run the ingestion task at all.
    pub ingest_enabled: bool,
    /// Pause before reconnecting a dropped stream.
    pub reconnect_delay: Duration,
    /// Silence after which an open stream is treated as dropped.
    pub stream_read_timeout: Duration,
    /// Whether exam reports are memoized.
    pub report_cache_enabled: bool,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns a variable's
    /// value if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = lookup("PORT")
            .map_or(Ok(3000), |raw| raw.parse::<u16>())
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let stream_url = lookup("SCORES_STREAM_URL").unwrap_or_else(|| DEFAULT_STREAM_URL.to_owned());
        let ingest_enabled = parse_flag("INGEST_ENABLED", lookup("INGEST_ENABLED"))?;
        let reconnect_secs = lookup("STREAM_RECONNECT_SECS")
            .map_or(Ok(5), |raw| raw.parse::<u64>())
            .map_err(|e| AppError::Config(format!("STREAM_RECONNECT_SECS must be whole seconds: {e}")))?;
        let read_timeout_secs = lookup("STREAM_READ_TIMEOUT_SECS")
            .map_or(Ok(30), |raw| raw.parse::<u64>())
            .map_err(|e| AppError::Config(format!("STREAM_READ_TIMEOUT_SECS must be whole seconds: {e}")))?;
        if read_timeout_secs == 0 {
            return Err(AppError::Config("STREAM_READ_TIMEOUT_SECS must be positive".to_owned()));
        }
        let report_cache_enabled = parse_flag("REPORT_CACHE_ENABLED", lookup("REPORT_CACHE_ENABLED"))?;

        Ok(Self {
            host,
            port,
            stream_url,
            ingest_enabled,
            reconnect_delay: Duration::from_secs(reconnect_secs),
            stream_read_timeout: Duration::from_secs(read_timeout_secs),
            report_cache_enabled,
        })
    }

    /// `host:port` string to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Unset means enabled.
fn parse_flag(key: &str, raw: Option<String>) -> Result<bool, AppError> {
    let Some(raw) = raw else {
        return Ok(true);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!("{key} must be a boolean, got {other:?}"))),
    }
}
