use super::ScreenContext;
use crate::api::ApiError;
use crate::model::{MenuForm, MenuId, MenuItem};
use tracing::{info, instrument};

/// The menu tab: list, search, add, edit and delete menu items.
///
/// The list is loaded once on open and then kept in step with the server by
/// applying each successful change locally.
#[derive(Debug)]
pub struct MenuAdminScreen {
    ctx: ScreenContext,
    items: Vec<MenuItem>,
    query: String,
}

impl MenuAdminScreen {
    pub async fn open(ctx: ScreenContext) -> Self {
        let mut screen = Self {
            ctx,
            items: Vec::new(),
            query: String::new(),
        };
        // Failures are already reported as a notice; the list stays empty.
        let _ = screen.refresh().await;
        screen
    }

    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        match self.ctx.backend.list_menu(self.ctx.token()).await {
            Ok(items) => {
                info!(count = items.len(), "Menu loaded");
                self.items = items;
                Ok(())
            }
            Err(e) => {
                self.ctx.notifier.error(e.user_message("Failed to load menu."));
                Err(e)
            }
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Items matching the current search query.
    pub fn visible(&self) -> Vec<&MenuItem> {
        self.items.iter().filter(|item| item.matches(&self.query)).collect()
    }

    /// Creates a menu item; it is shown first in the list.
    #[instrument(skip(self))]
    pub async fn add(&mut self, form: &MenuForm) -> Result<MenuItem, ApiError> {
        let result = match form.validate() {
            Ok(draft) => self.ctx.backend.create_menu(self.ctx.token(), &draft).await,
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(item) => {
                info!(id = %item.id, "Menu item added");
                self.items.insert(0, item.clone());
                Ok(item)
            }
            Err(e) => {
                self.ctx.notifier.error(e.user_message_or(
                    "Error adding menu",
                    "Failed to add menu. Please try again.",
                ));
                Err(e)
            }
        }
    }

    /// Updates a menu item in place.
    #[instrument(skip(self))]
    pub async fn edit(&mut self, id: &MenuId, form: &MenuForm) -> Result<MenuItem, ApiError> {
        let result = match form.validate() {
            Ok(draft) => self.ctx.backend.update_menu(self.ctx.token(), id, &draft).await,
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(item) => {
                info!(%id, "Menu item updated");
                if let Some(slot) = self.items.iter_mut().find(|existing| &existing.id == id) {
                    *slot = item.clone();
                }
                Ok(item)
            }
            Err(e) => {
                self.ctx.notifier.error(e.user_message_or(
                    "Error editing menu",
                    "Failed to edit menu. Please try again.",
                ));
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &MenuId) -> Result<(), ApiError> {
        match self.ctx.backend.delete_menu(self.ctx.token(), id).await {
            Ok(()) => {
                info!(%id, "Menu item deleted");
                self.items.retain(|item| &item.id != id);
                Ok(())
            }
            Err(e) => {
                self.ctx.notifier.error(e.user_message_or(
                    "Error deleting menu",
                    "Failed to delete menu. Please try again.",
                ));
                Err(e)
            }
        }
    }
}
