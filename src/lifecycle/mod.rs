//! Application lifecycle and process setup.
//!
//! # Main Components
//!
//! - [`App`] - owns the authentication state, performs the login, register
//!   and logout transitions, and opens screens for the active session
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod app;
pub mod tracing;

pub use app::*;
pub use tracing::*;
