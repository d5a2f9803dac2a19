//! Error types and result aliases for binscope operations.
//!
//! Provides a unified error type that covers all possible error conditions
//! across the binscope crates with actionable error messages.

use thiserror::Error;

/// Unified error type for all binscope operations
#[derive(Error, Debug)]
pub enum BinscopeError {
    // Input validation errors
    #[error("Invalid scope '{scope}': a scope must start with '@' followed by a name")]
    InvalidScope { scope: String },

    // Fetch errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Registry returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    // Decode errors
    #[error("Invalid response format: {message}")]
    InvalidResponseFormat { message: String },

    // Per-package errors, contained by the discovery phase
    #[error("Failed to resolve package '{name}': {reason}")]
    PackageResolution { name: String, reason: String },
}

/// Result type alias for binscope operations
pub type BinscopeResult<T> = Result<T, BinscopeError>;

impl BinscopeError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a per-package resolution error
    pub fn resolution(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PackageResolution {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable by retrying
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BinscopeError::Network { .. }
                | BinscopeError::Status { .. }
                | BinscopeError::Timeout { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            BinscopeError::InvalidScope { .. } => {
                Some("Pass the scope with its marker, e.g. '@modelcontextprotocol'")
            }
            BinscopeError::Network { .. } | BinscopeError::Timeout { .. } => {
                Some("Check your internet connection and try again")
            }
            BinscopeError::Status { status: 429, .. } => {
                Some("The registry is rate limiting requests, wait a moment and retry")
            }
            _ => None,
        }
    }
}
