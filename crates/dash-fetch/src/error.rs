//! Error types for record fetching

use dash_records::DecodeError;

/// Banner text shown when a filtered fetch fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load filtered data. Please try again.";

/// Errors from a record source
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure or timeout
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Body did not decode as records
    #[error("malformed response: {0}")]
    Decode(#[from] DecodeError),

    /// Request was superseded or the coordinator shut down
    #[error("fetch cancelled")]
    Cancelled,
}

impl FetchError {
    /// Message surfaced to the user
    #[inline]
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }

    /// Whether the fetch was cancelled rather than failed
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Whether the service was reached at all
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_shows_the_same_banner() {
        let status = FetchError::Status {
            status: 503,
            url: "http://localhost:8000/api/data/".into(),
        };
        assert_eq!(status.user_message(), LOAD_FAILED_MESSAGE);
        assert_eq!(
            status.to_string(),
            "unexpected status 503 from http://localhost:8000/api/data/"
        );

        let decode: FetchError = dash_records::RecordsResponse::parse("{")
            .unwrap_err()
            .into();
        assert_eq!(decode.user_message(), LOAD_FAILED_MESSAGE);
        assert!(!decode.is_cancelled());
        assert!(!decode.is_transport());
    }

    #[test]
    fn cancelled_is_flagged() {
        assert!(FetchError::Cancelled.is_cancelled());
    }
}
