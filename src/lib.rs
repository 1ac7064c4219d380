//! # Kafe Client
//!
//! > **The client side of a small café ordering system.**
//!
//! A signed-in user browses a live menu, builds an order in a cart, submits
//! it, and follows the orders placed so far. The same account can maintain
//! the menu itself. Everything that is not pure view rendering lives here:
//! cart assembly, the REST client, session persistence and the polling that
//! keeps the menu and order lists fresh.
//!
//! ## Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each layer defines its own error type (`ApiError`, `SessionError`,
//! `ConfigError`) with `thiserror`. Screens turn errors into user-facing
//! [`Notice`](notify::Notice)s, falling back to a per-operation message when
//! the server gives none.
//!
//! ### 2. Explicit Auth State
//! There is no global logged-in flag. [`AuthState`](session::AuthState) is
//! owned by the [`App`](lifecycle::App) and screens are only opened for an
//! active, unexpired [`Session`](session::Session).
//!
//! ### 3. Cancellable Polling
//! Screens that show server data refresh it with a
//! [`PeriodicTask`](runtime::PeriodicTask). Runs never overlap, so the latest
//! response always wins, and the task stops when its screen closes.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`model`] - wire and domain types: [`Amount`](model::Amount),
//!   [`MenuItem`](model::MenuItem), [`Order`](model::Order)
//! - [`cart`] - the [`Cart`](cart::Cart) being assembled on the home screen
//! - [`api`] - the [`Backend`](api::Backend) seam, its HTTP implementation and
//!   a [`MockBackend`](api::mock::MockBackend) for tests
//! - [`session`] - sessions, auth state and where they are stored
//! - [`runtime`] - background tasks
//! - [`screens`] - headless state for each screen
//! - [`lifecycle`] - the [`App`](lifecycle::App) orchestrator and tracing setup
//! - [`config`] - `KAFE_*` environment configuration
//! - [`notify`] - success and error notices shown to the user
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info KAFE_API_URL=http://127.0.0.1:3000 kafe login alice secret
//! kafe order 64f0c2 64f0c2 64f0d9
//! ```

pub mod api;
pub mod cart;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod runtime;
pub mod screens;
pub mod session;
