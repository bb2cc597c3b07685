//! Transit error types

use thiserror::Error;

/// Errors that can occur during transit operations
#[derive(Debug, Error)]
pub enum TransitError {
    /// Connection to the transit service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to transit service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from transit service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A departure record lacked a trip id or a usable timestamp
    #[error("Invalid departure record: {0}")]
    InvalidRecord(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// The query itself was unusable (e.g. empty stop id)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TransitError {
    /// Returns true if the service answered with data we could not interpret
    #[must_use]
    pub const fn is_data_failure(&self) -> bool {
        matches!(self, Self::ParseError(_) | Self::InvalidRecord(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_failures() {
        assert!(TransitError::ParseError("bad json".to_string()).is_data_failure());
        assert!(TransitError::InvalidRecord("no when".to_string()).is_data_failure());
    }

    #[test]
    fn test_transport_failures_are_not_data_failures() {
        assert!(!TransitError::ConnectionFailed("test".to_string()).is_data_failure());
        assert!(!TransitError::RequestFailed("test".to_string()).is_data_failure());
        assert!(!TransitError::Timeout { timeout_secs: 30 }.is_data_failure());
        assert!(
            !TransitError::RateLimitExceeded {
                retry_after_secs: Some(60)
            }
            .is_data_failure()
        );
    }

    #[test]
    fn test_error_display() {
        let err = TransitError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));

        let err = TransitError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));

        let err = TransitError::InvalidRecord("missing when".to_string());
        assert!(err.to_string().contains("missing when"));
    }
}
