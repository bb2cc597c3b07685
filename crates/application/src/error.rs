//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The departure service could not be reached or answered with a failure status
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The departure service answered with a body that could not be parsed
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A departure record could not be normalized
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Caller supplied an unusable argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if the service answered with data that could not be interpreted
    pub fn is_data_failure(&self) -> bool {
        matches!(
            self,
            ApplicationError::MalformedResponse(_) | ApplicationError::InvalidRecord(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_failures() {
        assert!(ApplicationError::MalformedResponse("eof".into()).is_data_failure());
        assert!(ApplicationError::InvalidRecord("no when".into()).is_data_failure());
        assert!(!ApplicationError::ExternalService("timeout".into()).is_data_failure());
        assert!(!ApplicationError::RateLimited.is_data_failure());
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::MissingField("trip_id").into();
        assert_eq!(err.to_string(), DomainError::MissingField("trip_id").to_string());
    }
}
