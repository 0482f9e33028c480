//! Remote API errors

use thiserror::Error;

use crate::domain::FieldError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("validation failed ({} fields)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("no API endpoint configured")]
    NotConfigured,
}

impl ApiError {
    /// Returns true if repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout => true,
            Self::Http { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }

    /// Field messages carried by a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Timeout.is_transient());
        assert!(ApiError::Http { status: 503, body: String::new() }.is_transient());
        assert!(!ApiError::Http { status: 404, body: String::new() }.is_transient());
        assert!(!ApiError::Decode("eof".to_string()).is_transient());
    }
}
