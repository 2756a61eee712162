//! API-specific error types
//!
//! Provides error classification for API operations.

use reelview_domain::{ErrorBody, ReelviewError};
use reqwest::StatusCode;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// Network/connection errors
    Network,
    /// Configuration errors
    Config,
}

/// API operation errors
///
/// `Clone` so a single refresh failure can be handed to every request queued
/// behind it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) => ApiErrorCategory::Network,
            Self::Config(_) | Self::Cancelled => ApiErrorCategory::Config,
        }
    }

    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, url: &str, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("{} returned status {}", url, status)
        } else {
            format!("{} returned status {}: {}", url, status, body)
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Self::Auth(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimit(message)
        } else if status.is_server_error() {
            Self::Server(message)
        } else if status.is_client_error() {
            Self::Client(message)
        } else {
            Self::Network(message)
        }
    }

    /// Error for an interactive call (sign-in, sign-up) the user sees
    /// directly: the backend's `detail` message when present, else
    /// `fallback`. Transport failures keep their own category.
    pub fn user_facing(status: StatusCode, body: &str, fallback: &str) -> Self {
        let message = ErrorBody::detail_from(body).unwrap_or_else(|| fallback.to_string());

        if status == StatusCode::TOO_MANY_REQUESTS {
            Self::RateLimit(message)
        } else if status.is_server_error() {
            Self::Server(message)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Self::Auth(message)
        } else {
            Self::Client(message)
        }
    }

    /// Message suitable for display, without the status/URL prefix the
    /// `Display` impl adds.
    pub fn message(&self) -> String {
        match self {
            Self::Auth(m)
            | Self::RateLimit(m)
            | Self::Server(m)
            | Self::Client(m)
            | Self::Network(m)
            | Self::Config(m) => m.clone(),
            Self::Cancelled => self.to_string(),
        }
    }
}

/// Transport failures arrive as domain errors from [`crate::http::HttpClient`].
impl From<ReelviewError> for ApiError {
    fn from(err: ReelviewError) -> Self {
        match err {
            ReelviewError::Network(message) => Self::Network(message),
            ReelviewError::Auth(message) => Self::Auth(message),
            ReelviewError::Config(message) => Self::Config(message),
            ReelviewError::NotFound(message) | ReelviewError::InvalidInput(message) => {
                Self::Client(message)
            }
            ReelviewError::Internal(message) => Self::Server(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            ApiError::Auth("test".to_string()).category(),
            ApiErrorCategory::Authentication
        );
        assert_eq!(
            ApiError::RateLimit("test".to_string()).category(),
            ApiErrorCategory::RateLimit
        );
        assert_eq!(ApiError::Server("test".to_string()).category(), ApiErrorCategory::Server);
        assert_eq!(ApiError::Network("test".to_string()).category(), ApiErrorCategory::Network);
        assert_eq!(ApiError::Cancelled.category(), ApiErrorCategory::Config);
    }

    #[test]
    fn test_status_mapping() {
        let url = "http://localhost:8000/auth/me";
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, url, ""),
            ApiError::Auth(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, url, ""),
            ApiError::RateLimit(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, url, ""),
            ApiError::Server(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, url, "missing"),
            ApiError::Client(m) if m.ends_with("missing")
        ));
    }

    #[test]
    fn test_user_facing_prefers_detail() {
        let err = ApiError::user_facing(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"Invalid credentials"}"#,
            "Login failed",
        );
        assert_eq!(err, ApiError::Client("Invalid credentials".into()));
        assert_eq!(err.message(), "Invalid credentials");

        let err = ApiError::user_facing(StatusCode::BAD_REQUEST, "", "Login failed");
        assert_eq!(err.message(), "Login failed");
    }
}
