use crate::model::{Amount, MenuId, MenuItem, OrderLinePayload};

/// One menu item and its selected quantity.
///
/// The quantity of a line held by a [`Cart`](super::Cart) is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    item: MenuItem,
    quantity: u32,
}

impl CartLine {
    pub(super) fn new(item: &MenuItem) -> Self {
        Self {
            item: item.clone(),
            quantity: 1,
        }
    }

    pub fn id(&self) -> &MenuId {
        &self.item.id
    }

    /// Snapshot of the menu item taken when the line was created.
    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn total_price(&self) -> Amount {
        self.item.price.times(self.quantity)
    }

    pub(super) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Returns `false` when the line has reached zero and must be dropped.
    pub(super) fn decrement(&mut self) -> bool {
        self.quantity -= 1;
        self.quantity > 0
    }

    pub(super) fn to_payload(&self) -> OrderLinePayload {
        OrderLinePayload {
            menu_id: self.item.id.clone(),
            name: self.item.name.clone(),
            price: self.item.price,
            quantity: self.quantity,
            total_price: self.total_price(),
        }
    }
}
