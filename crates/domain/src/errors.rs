//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Reelview
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ReelviewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReelviewError {
    /// Stable label suitable for structured log fields.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Message without the category prefix `Display` adds
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Config(m)
            | Self::Network(m)
            | Self::Auth(m)
            | Self::NotFound(m)
            | Self::InvalidInput(m)
            | Self::Internal(m) => m,
        }
    }
}

/// Result type alias for Reelview operations
pub type Result<T> = std::result::Result<T, ReelviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = ReelviewError::Auth("token expired".to_string());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["type"], "Auth");
        assert_eq!(json["message"], "token expired");
    }

    #[test]
    fn message_drops_category_prefix() {
        let err = ReelviewError::Auth("Invalid credentials".to_string());
        assert_eq!(err.message(), "Invalid credentials");
        assert_eq!(err.to_string(), "Authentication error: Invalid credentials");
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(ReelviewError::Network(String::new()).label(), "network");
        assert_eq!(ReelviewError::InvalidInput(String::new()).label(), "invalid_input");
    }
}
