//! Error types for Claude API integration

use thiserror::Error;

use crate::supply::SupplyError;

/// Errors that can occur when interacting with the Claude API
#[derive(Debug, Error)]
pub enum ClaudeError {
    /// API key is not configured
    #[error("API key not configured. Set ANTHROPIC_API_KEY or run `neethub set-key <key>`")]
    ApiKeyNotFound,

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Rate limited by the API
    #[error("Rate limited. Retry after {retry_after_seconds} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_seconds: u64,
    },

    /// The response had no text content
    #[error("Response contained no text")]
    EmptyResponse,

    /// Invalid API key format
    #[error("Invalid API key format. Key should start with 'sk-ant-'")]
    InvalidApiKey,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ClaudeError {
    /// Check if this error requires re-authentication
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            ClaudeError::ApiKeyNotFound
                | ClaudeError::InvalidApiKey
                | ClaudeError::ApiError { status: 401, .. }
        )
    }
}

impl From<ClaudeError> for SupplyError {
    fn from(err: ClaudeError) -> Self {
        match err {
            ClaudeError::JsonError(e) => SupplyError::Invalid(e),
            ClaudeError::EmptyResponse => SupplyError::Empty,
            other => SupplyError::Failed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_requires_reauth() {
        let err = ClaudeError::ApiError { status: 401, message: "nope".into() };
        assert!(err.requires_reauth());
        assert!(!ClaudeError::RateLimited { retry_after_seconds: 5 }.requires_reauth());
    }

    #[test]
    fn converts_to_supply_failure() {
        let err: SupplyError = ClaudeError::ApiKeyNotFound.into();
        assert!(matches!(err, SupplyError::Failed(msg) if msg.contains("ANTHROPIC_API_KEY")));
        assert!(matches!(SupplyError::from(ClaudeError::EmptyResponse), SupplyError::Empty));
    }
}
