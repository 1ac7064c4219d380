//! # Session
//!
//! The credential issued at login and the authentication state derived from
//! it.
//!
//! A [`Session`] is persisted as `{"token": "...", "expiry": "<RFC 3339>"}`.
//! Expiry is a purely local check: the client issues it as *login time +
//! validity window* and treats the session as gone once that instant passes.
//!
//! [`AuthState`] is the explicit application state that replaces a global
//! logged-in flag:
//!
//! ```text
//! Unauthenticated --login ok--> Authenticated(session)
//! Authenticated   --logout / expiry detected--> Unauthenticated
//! ```

pub mod error;
pub mod store;

pub use error::*;
pub use store::*;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default validity window of a freshly issued session.
pub const DEFAULT_VALIDITY_DAYS: i64 = 2;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

impl Session {
    /// Creates a session for `token` that is valid for `validity` from `now`.
    pub fn issue(token: impl Into<String>, now: DateTime<Utc>, validity: Duration) -> Self {
        Self {
            token: token.into(),
            expiry: now + validity,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

// Tokens stay out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Which top-level view the app shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Login / register.
    Login,
    /// The tabbed main view: home, menu, orders, profile.
    Main,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(Session),
}

impl AuthState {
    pub fn view(&self) -> View {
        match self {
            AuthState::Unauthenticated => View::Login,
            AuthState::Authenticated(_) => View::Main,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}
