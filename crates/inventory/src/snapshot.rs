//! Immutable, timestamped copy of the catalog.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use sweetshop_core::ItemId;

use crate::item::InventoryItem;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("duplicate item id in catalog: {0}")]
    DuplicateId(ItemId),
}

/// Ordered catalog records plus the instant they were fetched.
///
/// Item ids are unique. A refresh builds a new snapshot and the previous one
/// is dropped; snapshots are never merged or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySnapshot {
    items: Vec<InventoryItem>,
    fetched_at: DateTime<Utc>,
}

impl InventorySnapshot {
    pub fn new(items: Vec<InventoryItem>, fetched_at: DateTime<Utc>) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id()) {
                return Err(SnapshotError::DuplicateId(item.id().clone()));
            }
        }
        Ok(Self { items, fetched_at })
    }

    /// Snapshot used before the first successful fetch.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            fetched_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Stock recorded for `id`, `None` if the item is unknown to this snapshot.
    pub fn stock_of(&self, id: &ItemId) -> Option<u32> {
        self.get(id).map(InventoryItem::stock)
    }

    /// Distinct non-empty categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(InventoryItem::category)
            .filter(|c| !c.is_empty() && seen.insert(*c))
            .collect()
    }
}

impl Default for InventorySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
