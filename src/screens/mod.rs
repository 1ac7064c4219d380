//! Headless screen state.
//!
//! Each screen owns the state its view renders and talks to the [`Backend`]
//! with the session it was opened with. Screens that poll own their
//! [`PeriodicTask`](crate::runtime::PeriodicTask) and stop it in `close`;
//! dropping a screen aborts its poller as well.
//!
//! - [`HomeScreen`] - live menu, the cart, order submission
//! - [`OrderSummaryScreen`] - live list of placed orders
//! - [`MenuAdminScreen`] - menu CRUD and search
//! - [`ProfileScreen`] - the signed-in account

pub mod home;
pub mod menu_admin;
pub mod orders;
pub mod profile;

pub use home::*;
pub use menu_admin::*;
pub use orders::*;
pub use profile::*;

use crate::api::Backend;
use crate::notify::Notifier;
use crate::session::Session;
use std::sync::Arc;

/// What every screen needs: the API, the active session and a way to tell
/// the user what happened.
#[derive(Clone)]
pub struct ScreenContext {
    pub backend: Arc<dyn Backend>,
    pub session: Session,
    pub notifier: Notifier,
}

impl ScreenContext {
    pub fn new(backend: Arc<dyn Backend>, session: Session, notifier: Notifier) -> Self {
        Self {
            backend,
            session,
            notifier,
        }
    }

    pub fn token(&self) -> &str {
        self.session.token()
    }
}

impl std::fmt::Debug for ScreenContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenContext")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
