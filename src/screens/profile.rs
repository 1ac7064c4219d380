use super::ScreenContext;
use crate::model::Profile;
use tracing::{info, warn};

/// The profile tab. Loaded once when opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileScreen {
    profile: Option<Profile>,
}

impl ProfileScreen {
    pub async fn open(ctx: &ScreenContext) -> Self {
        let profile = match ctx.backend.profile(ctx.token()).await {
            Ok(profile) => {
                info!(username = %profile.username, "Profile loaded");
                Some(profile)
            }
            Err(e) => {
                warn!(error = %e, "Profile load failed");
                ctx.notifier.error(e.user_message("Failed to fetch profile"));
                None
            }
        };
        Self { profile }
    }

    /// `None` when loading failed; the view shows "Failed to load profile".
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.profile.as_ref().map(Profile::avatar_url)
    }
}
