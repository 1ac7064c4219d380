//! Runtime building blocks shared by the screens.
//!
//! # Main Components
//!
//! - [`PeriodicTask`] - a cancellable fixed-period job tied to its owner's lifetime

pub mod poller;

pub use poller::*;
