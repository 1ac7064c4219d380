//! Access to the remote ordering API.
//!
//! - [`Backend`] - the seam everything else depends on
//! - [`HttpBackend`] - the real thing, over `reqwest`
//! - [`mock::MockBackend`] - scripted responses for tests
//! - [`ApiError`] - the shared failure taxonomy

pub mod backend;
pub mod error;
pub mod http;
pub mod mock;

pub use backend::*;
pub use error::*;
pub use http::*;
