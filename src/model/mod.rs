//! Plain data structures exchanged with the ordering API.
//!
//! Nothing in here performs I/O. Wire formats (field names, the `_id` key,
//! prices sent as text) are handled by the serde attributes on each type.

pub mod amount;
pub mod menu;
pub mod order;
pub mod user;

pub use amount::*;
pub use menu::*;
pub use order::*;
pub use user::*;

use thiserror::Error;

/// A client-side check failed before anything was sent to the server.
///
/// The message is user-facing and is shown verbatim in a notice.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
