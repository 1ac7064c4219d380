use super::ScreenContext;
use crate::model::Order;
use crate::runtime::PeriodicTask;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// What the order summary shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrdersState {
    /// No answer from the server yet.
    Loading,
    Ready(Vec<Order>),
}

impl OrdersState {
    pub fn orders(&self) -> &[Order] {
        match self {
            OrdersState::Loading => &[],
            OrdersState::Ready(orders) => orders,
        }
    }
}

/// The order summary tab: the user's placed orders, refreshed every `period`.
///
/// A failed refresh keeps whatever was shown before and raises an error
/// notice. The first answer, success or failure, ends the loading state.
pub struct OrderSummaryScreen {
    state: watch::Receiver<OrdersState>,
    poller: PeriodicTask,
}

impl OrderSummaryScreen {
    pub fn open(ctx: ScreenContext, period: Duration) -> Self {
        let (publish, state) = watch::channel(OrdersState::Loading);
        let publish = Arc::new(publish);

        let poller = PeriodicTask::spawn("orders", period, move || {
            let (ctx, publish) = (ctx.clone(), publish.clone());
            async move {
                match ctx.backend.list_orders(ctx.token()).await {
                    Ok(orders) => {
                        debug!(count = orders.len(), "Orders refreshed");
                        publish.send_replace(OrdersState::Ready(orders));
                    }
                    Err(e) => {
                        warn!(error = %e, "Orders refresh failed");
                        ctx.notifier.error(e.user_message("Failed to fetch orders."));
                        publish.send_if_modified(|state| {
                            if *state == OrdersState::Loading {
                                *state = OrdersState::Ready(Vec::new());
                                true
                            } else {
                                false
                            }
                        });
                    }
                }
            }
        });

        Self { state, poller }
    }

    pub fn state(&self) -> OrdersState {
        self.state.borrow().clone()
    }

    pub fn updates(&self) -> watch::Receiver<OrdersState> {
        self.state.clone()
    }

    pub async fn close(self) -> Result<(), String> {
        self.poller.stop().await
    }
}
