//! Error types for calls against the ordering API.

use crate::model::ValidationError;
use thiserror::Error;

/// Shown when the server could not be reached at all.
pub const NETWORK_MESSAGE: &str = "Failed to connect to server";

/// Everything that can go wrong when talking to the ordering API.
///
/// None of these are fatal: callers turn them into a [`Notice`](crate::notify::Notice)
/// and the user re-triggers the action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response: connection refused, timeout, DNS failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The server rejected the credentials or the bearer token.
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("credentials rejected"))]
    Unauthorized { message: Option<String> },

    /// A client-side check failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with a non-success status.
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text to show the user, falling back to `fallback` when the server said
    /// nothing useful.
    ///
    /// Validation messages are shown as-is, transport failures get
    /// [`NETWORK_MESSAGE`].
    pub fn user_message(&self, fallback: &str) -> String {
        self.user_message_or(fallback, NETWORK_MESSAGE)
    }

    /// Like [`user_message`](Self::user_message), with a flow-specific text
    /// for transport failures.
    pub fn user_message_or(&self, fallback: &str, offline: &str) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Network(_) => offline.to_string(),
            other => other.server_message().unwrap_or(fallback).to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
