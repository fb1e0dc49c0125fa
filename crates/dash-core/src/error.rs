//! Error types for the dashboard coordinator

use dash_fetch::FetchError;
use dash_filters::InvalidFieldError;
use dash_records::DecodeError;
use std::path::PathBuf;

/// Main dashboard error type
#[derive(Debug, thiserror::Error)]
pub enum DashError {
    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file unreadable
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the schema
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Unknown filter field in an event
    #[error(transparent)]
    InvalidField(#[from] InvalidFieldError),

    /// Record fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Record data failed to decode
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}

impl DashError {
    /// Create configuration error
    #[inline]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error stems from configuration
    #[inline]
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::ConfigIo { .. } | Self::ConfigParse(_)
        )
    }

    /// Text to show in the dashboard, if the error is user-facing
    #[must_use]
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Fetch(err) if !err.is_cancelled() => Some(err.user_message()),
            _ => None,
        }
    }
}

/// Result alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashError>;
