use super::ScreenContext;
use crate::api::ApiError;
use crate::cart::Cart;
use crate::model::{Amount, MenuId, MenuItem, ValidationError};
use crate::runtime::PeriodicTask;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// The home tab: the live menu and the order being put together.
///
/// The menu is refreshed in the background every `period`; a failed refresh
/// keeps the last menu and is only logged. The cart is local to the screen
/// and is lost when the screen closes.
pub struct HomeScreen {
    ctx: ScreenContext,
    cart: Cart,
    menu: watch::Receiver<Vec<MenuItem>>,
    publish: Arc<watch::Sender<Vec<MenuItem>>>,
    poller: PeriodicTask,
}

impl HomeScreen {
    pub fn open(ctx: ScreenContext, period: Duration) -> Self {
        let (publish, menu) = watch::channel(Vec::new());
        let publish = Arc::new(publish);
        let backend = ctx.backend.clone();
        let token = ctx.session.token.clone();
        let polled = publish.clone();

        let poller = PeriodicTask::spawn("menu", period, move || {
            let (backend, token, publish) = (backend.clone(), token.clone(), polled.clone());
            async move {
                match backend.list_menu(&token).await {
                    Ok(items) => {
                        debug!(count = items.len(), "Menu refreshed");
                        publish.send_replace(items);
                    }
                    Err(e) => warn!(error = %e, "Menu refresh failed"),
                }
            }
        });

        Self {
            ctx,
            cart: Cart::new(),
            menu,
            publish,
            poller,
        }
    }

    /// The latest menu snapshot. Empty until the first refresh lands.
    pub fn menu(&self) -> Vec<MenuItem> {
        self.menu.borrow().clone()
    }

    /// Fetches the menu now, outside the poll schedule.
    ///
    /// Unlike a background refresh, a failure here is reported as a notice.
    #[instrument(skip(self))]
    pub async fn refresh_menu(&mut self) -> Result<Vec<MenuItem>, ApiError> {
        match self.ctx.backend.list_menu(self.ctx.token()).await {
            Ok(items) => {
                debug!(count = items.len(), "Menu loaded");
                self.publish.send_replace(items.clone());
                Ok(items)
            }
            Err(e) => {
                warn!(error = %e, "Menu load failed");
                self.ctx.notifier.error(e.user_message("Failed to load menu."));
                Err(e)
            }
        }
    }

    /// A receiver that wakes on every menu refresh.
    pub fn menu_updates(&self) -> watch::Receiver<Vec<MenuItem>> {
        self.menu.clone()
    }

    pub fn find_item(&self, id: &MenuId) -> Option<MenuItem> {
        self.menu.borrow().iter().find(|item| &item.id == id).cloned()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add(&mut self, item: &MenuItem) {
        self.cart.add_item(item);
    }

    pub fn remove(&mut self, item: &MenuItem) {
        self.cart.remove_item(item);
    }

    pub fn quantity_of(&self, id: &MenuId) -> u32 {
        self.cart.quantity_of(id)
    }

    pub fn total(&self) -> Amount {
        self.cart.total()
    }

    /// Sends the cart as a new order.
    ///
    /// On success the cart is cleared and the server's reply returned. On
    /// failure the cart is left as it was so the user can retry. Either way
    /// the outcome is also reported as a notice.
    #[instrument(skip(self), fields(lines = self.cart.len()))]
    pub async fn submit_order(&mut self) -> Result<serde_json::Value, ApiError> {
        if self.cart.is_empty() {
            let err = ApiError::from(ValidationError::new("Add at least one item before ordering."));
            self.ctx.notifier.error(err.user_message(""));
            return Err(err);
        }

        let payload = self.cart.to_order_payload();
        match self.ctx.backend.submit_order(self.ctx.token(), &payload).await {
            Ok(reply) => {
                info!(total = %payload.total_amount, "Order submitted");
                self.cart.clear();
                self.ctx.notifier.success("Order created.");
                Ok(reply)
            }
            Err(e) => {
                warn!(error = %e, "Order submission failed");
                self.ctx.notifier.error(e.user_message("Failed to create order."));
                Err(e)
            }
        }
    }

    /// Stops the menu refresh. The cart is discarded.
    pub async fn close(self) -> Result<(), String> {
        debug!(abandoned_lines = self.cart.len(), "Closing home screen");
        self.poller.stop().await
    }
}
