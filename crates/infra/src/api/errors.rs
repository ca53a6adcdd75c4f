//! API-specific error types
//!
//! Provides error classification for API operations with retry metadata.

use std::time::Duration;

use salesdesk_domain::CrmError;
use thiserror::Error;

/// Categories of API errors for retry logic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403) - retry after token refresh
    Authentication,
    /// Rate limiting errors (429) - retry with backoff
    RateLimit,
    /// Server errors (5xx) - retryable
    Server,
    /// Client errors (4xx except auth) - non-retryable
    Client,
    /// Network/connection errors - retryable
    Network,
    /// Configuration errors - non-retryable
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) | Self::NotFound(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Check if this error should be retried
    pub fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::Authentication
                | ApiErrorCategory::RateLimit
                | ApiErrorCategory::Server
                | ApiErrorCategory::Network
        )
    }

    /// Get suggested retry delay in seconds
    pub fn retry_delay_secs(&self) -> u64 {
        match self.category() {
            ApiErrorCategory::Authentication => 5,
            ApiErrorCategory::RateLimit => 60,
            ApiErrorCategory::Server => 10,
            ApiErrorCategory::Network => 5,
            ApiErrorCategory::Client | ApiErrorCategory::Config => 0,
        }
    }
}

/// Collapse transport-level detail into the application error the core
/// layers report on
impl From<ApiError> for CrmError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::Client(message) => Self::InvalidInput(message),
            ApiError::Server(message) => Self::Internal(message),
            ApiError::RateLimit(message) | ApiError::Network(message) => Self::Network(message),
            ApiError::Timeout(duration) => {
                Self::Network(format!("request timed out after {duration:?}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_categories() {
        assert_eq!(ApiError::Auth("x".into()).category(), ApiErrorCategory::Authentication);
        assert_eq!(ApiError::RateLimit("x".into()).category(), ApiErrorCategory::RateLimit);
        assert_eq!(ApiError::Server("x".into()).category(), ApiErrorCategory::Server);
        assert_eq!(ApiError::NotFound("x".into()).category(), ApiErrorCategory::Client);
        assert_eq!(ApiError::Network("x".into()).category(), ApiErrorCategory::Network);
    }

    #[test]
    fn retryability() {
        assert!(ApiError::Auth("x".into()).should_retry());
        assert!(ApiError::RateLimit("x".into()).should_retry());
        assert!(ApiError::Server("x".into()).should_retry());
        assert!(ApiError::Network("x".into()).should_retry());
        assert!(!ApiError::Client("x".into()).should_retry());
        assert!(!ApiError::Config("x".into()).should_retry());
    }

    #[test]
    fn maps_to_application_errors() {
        assert!(matches!(CrmError::from(ApiError::Auth("x".into())), CrmError::Auth(_)));
        assert!(matches!(CrmError::from(ApiError::NotFound("x".into())), CrmError::NotFound(_)));
        assert!(matches!(
            CrmError::from(ApiError::Timeout(Duration::from_secs(30))),
            CrmError::Network(_)
        ));
        assert!(matches!(CrmError::from(ApiError::Server("x".into())), CrmError::Internal(_)));
    }
}
