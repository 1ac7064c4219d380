//! # Order cart
//!
//! The in-progress order owned by the home screen. Lines keep insertion order
//! for display; there is at most one line per menu item and every line has a
//! quantity of at least one.
//!
//! All operations are synchronous and infallible. Mutation goes through
//! `&mut Cart`, so a cart can only ever be edited by its single owner.
//!
//! ```
//! use kafe_client::cart::Cart;
//! use kafe_client::model::{Amount, MenuItem};
//!
//! let kopi = MenuItem::new("a", "Kopi", 10000);
//! let mut cart = Cart::new();
//! cart.add_item(&kopi);
//! cart.add_item(&kopi);
//! assert_eq!(cart.quantity_of(&kopi.id), 2);
//! assert_eq!(cart.total(), Amount(20000));
//! ```

mod line;

pub use line::CartLine;

use crate::model::{Amount, MenuId, MenuItem, OrderPayload};
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, creating its line on first add.
    pub fn add_item(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|line| line.id() == &item.id) {
            Some(line) => line.increment(),
            None => self.lines.push(CartLine::new(item)),
        }
        trace!(menu_id = %item.id, quantity = self.quantity_of(&item.id), "Cart add");
    }

    /// Removes one unit of `item`. The line disappears when it reaches zero;
    /// removing an item that is not in the cart does nothing.
    pub fn remove_item(&mut self, item: &MenuItem) {
        let Some(pos) = self.lines.iter().position(|line| line.id() == &item.id) else {
            return;
        };
        if !self.lines[pos].decrement() {
            self.lines.remove(pos);
        }
        trace!(menu_id = %item.id, quantity = self.quantity_of(&item.id), "Cart remove");
    }

    pub fn quantity_of(&self, id: &MenuId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.id() == id)
            .map_or(0, CartLine::quantity)
    }

    pub fn total(&self) -> Amount {
        self.lines.iter().map(CartLine::total_price).sum()
    }

    pub fn to_order_payload(&self) -> OrderPayload {
        let items: Vec<_> = self.lines.iter().map(CartLine::to_payload).collect();
        let total_amount = items.iter().map(|line| line.total_price).sum();
        OrderPayload { items, total_amount }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn kopi() -> MenuItem {
        MenuItem::new("a", "Kopi", 10000)
    }

    fn teh() -> MenuItem {
        MenuItem::new("b", "Teh", 8000)
    }

    #[test]
    fn test_add_twice_accumulates() {
        let mut cart = Cart::new();
        cart.add_item(&kopi());
        cart.add_item(&kopi());

        assert_eq!(cart.quantity_of(&"a".into()), 2);
        assert_eq!(cart.total(), Amount(20000));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_last_unit_drops_line() {
        let mut cart = Cart::new();
        cart.add_item(&kopi());
        cart.remove_item(&kopi());

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(&"a".into()), 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&kopi());
        let before = cart.clone();

        cart.remove_item(&teh());

        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let mut cart = Cart::new();
        cart.add_item(&kopi());
        cart.add_item(&teh());
        cart.add_item(&teh());

        for item in [kopi(), teh(), MenuItem::new("c", "Roti", 12000)] {
            let before = cart.clone();
            cart.add_item(&item);
            cart.remove_item(&item);
            assert_eq!(cart, before, "round trip on {}", item.id);
        }
    }

    #[test]
    fn test_payload_preserves_order_and_totals() {
        let mut cart = Cart::new();
        cart.add_item(&teh());
        cart.add_item(&kopi());
        cart.add_item(&teh());
        cart.add_item(&teh());

        let payload = cart.to_order_payload();

        let ids: Vec<_> = payload.items.iter().map(|line| line.menu_id.0.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(payload.items[0].quantity, 3);
        assert_eq!(payload.items[0].total_price, Amount(24000));
        assert_eq!(payload.total_amount, Amount(34000));
        assert_eq!(payload.total_amount, payload.items.iter().map(|l| l.total_price).sum::<Amount>());
        assert_eq!(payload.total_amount, cart.total());
    }

    #[test]
    fn test_clear_resets_total() {
        let mut cart = Cart::new();
        cart.add_item(&kopi());
        cart.add_item(&teh());
        cart.clear();

        assert_eq!(cart.total(), Amount::ZERO);
        assert!(cart.to_order_payload().items.is_empty());
    }

    #[test]
    fn test_line_keeps_price_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(&kopi());
        // Same id, repriced by a later menu refresh.
        cart.add_item(&MenuItem::new("a", "Kopi", 12000));

        assert_eq!(cart.total(), Amount(20000));
    }

    #[test]
    fn test_oversized_prices_do_not_panic() {
        let pricey = MenuItem::new("x", "Emas", u64::MAX / 2 + 1);
        let mut cart = Cart::new();
        cart.add_item(&pricey);
        cart.add_item(&pricey);
        cart.add_item(&teh());

        assert_eq!(cart.total(), Amount(u64::MAX));
        assert_eq!(cart.to_order_payload().total_amount, cart.total());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(usize),
    }

    const POOL: usize = 4;

    fn arb_menu() -> impl Strategy<Value = Vec<MenuItem>> {
        prop::collection::vec(0u64..=1_000_000, POOL).prop_map(|prices| {
            prices
                .into_iter()
                .enumerate()
                .map(|(i, price)| MenuItem::new(format!("m{i}"), format!("Item {i}"), price))
                .collect()
        })
    }

    fn arb_ops(max: usize) -> impl Strategy<Value = Vec<Op>> {
        let op = prop_oneof![(0..POOL).prop_map(Op::Add), (0..POOL).prop_map(Op::Remove)];
        prop::collection::vec(op, 0..max)
    }

    fn apply(cart: &mut Cart, menu: &[MenuItem], ops: &[Op]) {
        for op in ops {
            match *op {
                Op::Add(i) => cart.add_item(&menu[i]),
                Op::Remove(i) => cart.remove_item(&menu[i]),
            }
        }
    }

    proptest! {
        #[test]
        fn quantities_track_a_floor_at_zero_model(menu in arb_menu(), ops in arb_ops(200)) {
            let mut cart = Cart::new();
            let mut model: HashMap<MenuId, u32> = HashMap::new();

            for op in &ops {
                match *op {
                    Op::Add(i) => {
                        cart.add_item(&menu[i]);
                        *model.entry(menu[i].id.clone()).or_default() += 1;
                    }
                    Op::Remove(i) => {
                        cart.remove_item(&menu[i]);
                        let quantity = model.entry(menu[i].id.clone()).or_default();
                        *quantity = quantity.saturating_sub(1);
                    }
                }

                for item in &menu {
                    prop_assert_eq!(cart.quantity_of(&item.id), model.get(&item.id).copied().unwrap_or(0));
                }
                prop_assert!(cart.lines().all(|line| line.quantity() >= 1));

                let mut ids: Vec<_> = cart.lines().map(|line| line.id().clone()).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), cart.len());
            }
        }

        #[test]
        fn add_then_remove_is_identity(menu in arb_menu(), ops in arb_ops(50), pick in 0..POOL) {
            let mut cart = Cart::new();
            apply(&mut cart, &menu, &ops);
            let before = cart.clone();

            cart.add_item(&menu[pick]);
            cart.remove_item(&menu[pick]);

            prop_assert_eq!(cart, before);
        }

        #[test]
        fn payload_total_is_sum_of_lines(menu in arb_menu(), ops in arb_ops(100)) {
            let mut cart = Cart::new();
            apply(&mut cart, &menu, &ops);

            let payload = cart.to_order_payload();
            let summed: Amount = payload.items.iter().map(|line| line.total_price).sum();
            prop_assert_eq!(payload.total_amount, summed);
            prop_assert_eq!(payload.total_amount, cart.total());
            for line in &payload.items {
                prop_assert_eq!(line.total_price, line.price.times(line.quantity));
            }
        }
    }
}
