//! Cart state machine.
//!
//! Quantities are bounded by the stock recorded in the latest snapshot. The
//! cart reserves nothing server-side; the purchase calls made at checkout are
//! where competing shoppers are settled.

use serde::{Deserialize, Serialize};

use sweetshop_core::ItemId;
use sweetshop_inventory::InventorySnapshot;

/// One `(item, quantity)` pair; `quantity` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Mapping from item id to quantity, kept in insertion order.
///
/// Absence of an id means quantity zero; zero is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item_id`.
    ///
    /// No-op (returns `false`) when the item is unknown to `snapshot` or the
    /// cart already holds the recorded stock.
    pub fn increment(&mut self, snapshot: &InventorySnapshot, item_id: &ItemId) -> bool {
        let Some(stock) = snapshot.stock_of(item_id) else {
            tracing::debug!(%item_id, "increment ignored: item not in snapshot");
            return false;
        };

        let current = self.quantity(item_id);
        if current >= stock {
            tracing::debug!(%item_id, current, stock, "increment ignored: stock ceiling reached");
            return false;
        }

        match self.lines.iter_mut().find(|l| &l.item_id == item_id) {
            Some(line) => line.quantity = current + 1,
            None => self.lines.push(CartLine {
                item_id: item_id.clone(),
                quantity: 1,
            }),
        }
        true
    }

    /// Remove one unit of `item_id`; the line disappears when it would reach zero.
    ///
    /// Returns `false` if the item was not in the cart.
    pub fn decrement(&mut self, item_id: &ItemId) -> bool {
        let Some(pos) = self.lines.iter().position(|l| &l.item_id == item_id) else {
            return false;
        };

        if self.lines[pos].quantity <= 1 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity -= 1;
        }
        true
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn quantity(&self, item_id: &ItemId) -> u32 {
        self.lines
            .iter()
            .find(|l| &l.item_id == item_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `price * quantity` over lines still present in `snapshot`.
    pub fn total(&self, snapshot: &InventorySnapshot) -> f64 {
        self.lines
            .iter()
            .filter_map(|l| snapshot.get(&l.item_id).map(|item| item.price() * f64::from(l.quantity)))
            .sum()
    }
}
