//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Traincast
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TraincastError {
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

    /// A directory, calendar or mail service rejected the call.
    #[error("External service error: {0}")]
    External(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TraincastError {
    /// Whether the caller supplied bad data (maps to a 400-class outcome).
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::External(_) => "external",
            Self::Internal(_) => "internal",
        }
    }

    /// Prefix the message with the operation that failed, keeping the class.
    pub fn context(self, operation: &str) -> Self {
        match self {
            Self::Config(m) => Self::Config(format!("{operation}: {m}")),
            Self::Network(m) => Self::Network(format!("{operation}: {m}")),
            Self::Auth(m) => Self::Auth(format!("{operation}: {m}")),
            Self::NotFound(m) => Self::NotFound(format!("{operation}: {m}")),
            Self::InvalidInput(m) => Self::InvalidInput(format!("{operation}: {m}")),
            Self::External(m) => Self::External(format!("{operation}: {m}")),
            Self::Internal(m) => Self::Internal(format!("{operation}: {m}")),
        }
    }
}

/// Result type alias for Traincast operations
pub type Result<T> = std::result::Result<T, TraincastError>;
