use crate::api::{ApiError, Backend};
use crate::config::Config;
use crate::model::{LoginRequest, RegisterRequest};
use crate::notify::{NoticeReceiver, Notifier};
use crate::screens::{HomeScreen, MenuAdminScreen, OrderSummaryScreen, ProfileScreen, ScreenContext};
use crate::session::{AuthState, Session, SessionError, SessionStore, View};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The application orchestrator.
///
/// `App` is responsible for:
/// - **Session restore**: reading the stored session at start and dropping it
///   when expired or unreadable
/// - **Auth transitions**: login, register and logout
/// - **Screen wiring**: handing each screen the backend, the active session
///   and the notifier
///
/// # Example
///
/// ```ignore
/// let (mut app, mut notices) = App::start(config, backend, store).await;
/// app.login("alice", "secret").await?;
///
/// let mut home = app.open_home().expect("signed in");
/// home.add(&latte);
/// home.submit_order().await?;
/// home.close().await?;
/// ```
pub struct App {
    config: Config,
    backend: Arc<dyn Backend>,
    store: Arc<dyn SessionStore>,
    notifier: Notifier,
    state: AuthState,
}

impl App {
    /// Restores the stored session and returns the app together with the
    /// receiving end of its notices.
    pub async fn start(
        config: Config,
        backend: Arc<dyn Backend>,
        store: Arc<dyn SessionStore>,
    ) -> (Self, NoticeReceiver) {
        Self::start_at(config, backend, store, Utc::now()).await
    }

    /// [`start`](Self::start) with an explicit clock reading.
    pub async fn start_at(
        config: Config,
        backend: Arc<dyn Backend>,
        store: Arc<dyn SessionStore>,
        now: DateTime<Utc>,
    ) -> (Self, NoticeReceiver) {
        let (notifier, notices) = Notifier::channel();
        let state = restore(store.as_ref(), now).await;
        info!(view = ?state.view(), "Application started");

        let app = Self {
            config,
            backend,
            store,
            notifier,
            state,
        };
        (app, notices)
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.view()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        self.login_at(username, password, Utc::now()).await
    }

    /// Signs in and persists a session valid from `now`.
    ///
    /// A session that cannot be written to the store still signs the user in
    /// for the lifetime of the process.
    #[instrument(skip(self, password))]
    pub async fn login_at(
        &mut self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let request = LoginRequest::new(username, password);
        let result = match request.validate() {
            Ok(()) => self.backend.login(&request).await,
            Err(e) => Err(e.into()),
        };
        let token = match result {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Login failed");
                self.notifier.error(e.user_message("User not found"));
                return Err(e);
            }
        };

        let session = Session::issue(token, now, self.config.token_validity());
        if let Err(e) = self.store.save(&session).await {
            warn!(error = %e, "Session not persisted");
        }
        info!(expiry = %session.expiry, "Logged in");
        self.state = AuthState::Authenticated(session);
        self.notifier.success("Login successful!");
        Ok(())
    }

    /// Creates an account. Does not sign in.
    #[instrument(skip(self, password))]
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let request = RegisterRequest::new(username, email, password);
        let result = match request.validate() {
            Ok(()) => self.backend.register(&request).await,
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(()) => {
                info!("Registered");
                self.notifier.success("Registration successful!");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                self.notifier.error(e.user_message_or(
                    "Registration failed.",
                    "Failed to connect to server. Please try again later.",
                ));
                Err(e)
            }
        }
    }

    /// Signs out. The in-memory state is dropped even if the store cannot be
    /// cleared.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.state = AuthState::Unauthenticated;
        self.store.clear().await?;
        info!("Logged out");
        Ok(())
    }

    pub async fn active_session(&mut self) -> Option<Session> {
        self.active_session_at(Utc::now()).await
    }

    /// The current session, if it is still valid at `now`. An expired session
    /// signs the user out.
    pub async fn active_session_at(&mut self, now: DateTime<Utc>) -> Option<Session> {
        let session = self.state.session()?.clone();
        if !session.is_expired_at(now) {
            return Some(session);
        }

        info!(expiry = %session.expiry, "Session expired");
        if let Err(e) = self.logout().await {
            warn!(error = %e, "Expired session not cleared");
        }
        None
    }

    /// Everything a screen needs, or `None` when signed out.
    pub async fn context(&mut self) -> Option<ScreenContext> {
        let session = self.active_session().await?;
        Some(ScreenContext::new(
            self.backend.clone(),
            session,
            self.notifier.clone(),
        ))
    }

    pub async fn open_home(&mut self) -> Option<HomeScreen> {
        let ctx = self.context().await?;
        Some(HomeScreen::open(ctx, self.config.poll_interval()))
    }

    pub async fn open_orders(&mut self) -> Option<OrderSummaryScreen> {
        let ctx = self.context().await?;
        Some(OrderSummaryScreen::open(ctx, self.config.poll_interval()))
    }

    pub async fn open_menu_admin(&mut self) -> Option<MenuAdminScreen> {
        let ctx = self.context().await?;
        Some(MenuAdminScreen::open(ctx).await)
    }

    pub async fn open_profile(&mut self) -> Option<ProfileScreen> {
        let ctx = self.context().await?;
        Some(ProfileScreen::open(&ctx).await)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

async fn restore(store: &dyn SessionStore, now: DateTime<Utc>) -> AuthState {
    match store.load().await {
        Ok(Some(session)) if !session.is_expired_at(now) => {
            info!(expiry = %session.expiry, "Session restored");
            AuthState::Authenticated(session)
        }
        Ok(Some(session)) => {
            info!(expiry = %session.expiry, "Stored session expired");
            discard(store).await;
            AuthState::Unauthenticated
        }
        Ok(None) => AuthState::Unauthenticated,
        Err(e) => {
            warn!(error = %e, "Stored session unreadable");
            discard(store).await;
            AuthState::Unauthenticated
        }
    }
}

async fn discard(store: &dyn SessionStore) {
    if let Err(e) = store.clear().await {
        warn!(error = %e, "Stored session not cleared");
    }
}
