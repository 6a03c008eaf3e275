//! Error types shared across the crate.
//!
//! [`TransportError`] is raised by the HTTP layer and passed through the
//! repository and service untouched. The controllers are the only place
//! where an [`ApiError`] is turned into text, via [`error_message`].

use thiserror::Error;

/// Application glue (terminal, event loop) result.
pub type Result<T> = anyhow::Result<T>;

/// Result of any repository, service or data-source call.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Fallback text for failures that carry no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Uniform shape for every failed HTTP exchange.
///
/// `status` is `0` when no response was received (connection refused,
/// DNS failure, timeout).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub status: u16,
    pub details: Option<serde_json::Value>,
}

impl TransportError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// No response reached us.
    pub fn is_connection_failure(&self) -> bool {
        self.status == 0
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string(), err.status().map_or(0, |s| s.as_u16()))
    }
}

/// Everything a user-facing action can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Structured failure from the HTTP layer; carries its own message.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Any other error value; its display text is the message.
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// A failure with no message we trust. The raw text is kept for logs only.
    ///
    /// The HTTP implementations never build it; substitute repositories and
    /// data sources use it for failures that carry nothing worth showing.
    #[error("unknown error")]
    Unknown(String),
}

/// Collapse an error into the single line shown in the API error banner.
///
/// A blank message is as good as none and gets the fixed fallback text.
pub fn error_message(err: &ApiError) -> String {
    let message = match err {
        ApiError::Transport(e) => e.message.clone(),
        ApiError::Other(e) => e.to_string(),
        ApiError::Unknown(_) => return UNKNOWN_ERROR_MESSAGE.to_string(),
    };
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_BASE_URL is not configured")]
    MissingBaseUrl,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_uses_its_own_message() {
        let err = ApiError::from(TransportError::new("Email already registered", 400));
        assert_eq!(error_message(&err), "Email already registered");
    }

    #[test]
    fn generic_error_uses_display_text() {
        let err = ApiError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(error_message(&err), "disk on fire");
    }

    #[test]
    fn unknown_error_collapses_to_fixed_text() {
        let err = ApiError::Unknown("some thrown string".into());
        assert_eq!(error_message(&err), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn blank_messages_fall_back_to_unknown() {
        let err = ApiError::from(TransportError::new("", 502));
        assert_eq!(error_message(&err), UNKNOWN_ERROR_MESSAGE);
        let err = ApiError::from(anyhow::anyhow!("  "));
        assert_eq!(error_message(&err), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn status_zero_means_no_response() {
        assert!(TransportError::new("connection refused", 0).is_connection_failure());
        assert!(!TransportError::new("not found", 404).is_connection_failure());
    }
}
