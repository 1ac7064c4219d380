//! Error types for the session store.

use thiserror::Error;

/// Errors reading or writing the persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session file could not be read, written or removed.
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored record is not a valid session.
    #[error("Corrupt session record: {0}")]
    Corrupt(#[from] serde_json::Error),
}
