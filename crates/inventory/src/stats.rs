//! Statistics and search for the admin dashboard, always recomputed from a snapshot.

use std::collections::HashSet;

use serde::Serialize;

use crate::item::InventoryItem;
use crate::snapshot::InventorySnapshot;

/// Items with `0 < stock <= LOW_STOCK_THRESHOLD` are low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Out-of-stock items are not low-stock.
pub fn is_low_stock(item: &InventoryItem) -> bool {
    item.stock() > 0 && item.stock() <= LOW_STOCK_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InventoryStats {
    pub total_skus: usize,
    pub total_stock: u64,
    pub category_count: usize,
    pub low_stock_count: usize,
}

impl InventoryStats {
    pub fn from_snapshot(snapshot: &InventorySnapshot) -> Self {
        let items = snapshot.items();
        let categories: HashSet<&str> = items
            .iter()
            .map(InventoryItem::category)
            .filter(|c| !c.is_empty())
            .collect();

        Self {
            total_skus: items.len(),
            total_stock: items.iter().map(|i| u64::from(i.stock())).sum(),
            category_count: categories.len(),
            low_stock_count: items.iter().filter(|i| is_low_stock(i)).count(),
        }
    }
}

/// Case-insensitive substring match against name, category or id.
///
/// A blank query matches everything; snapshot order is kept.
pub fn search<'a>(snapshot: &'a InventorySnapshot, query: &str) -> Vec<&'a InventoryItem> {
    let q = query.trim().to_lowercase();
    snapshot
        .items()
        .iter()
        .filter(|item| {
            q.is_empty()
                || item.name().to_lowercase().contains(&q)
                || item.category().to_lowercase().contains(&q)
                || item.id().as_str().to_lowercase().contains(&q)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot_with_stocks(stocks: &[u32]) -> InventorySnapshot {
        let items = stocks
            .iter()
            .enumerate()
            .map(|(i, s)| InventoryItem::new(i as u64 + 1, format!("Item {i}"), 1.0, *s))
            .collect();
        InventorySnapshot::new(items, Utc::now()).unwrap()
    }

    #[test]
    fn low_stock_excludes_out_of_stock_and_above_threshold() {
        let stats = InventoryStats::from_snapshot(&snapshot_with_stocks(&[0, 3, 5, 6, 10]));
        assert_eq!(stats.low_stock_count, 2);
        assert_eq!(stats.total_stock, 24);
        assert_eq!(stats.total_skus, 5);
    }

    #[test]
    fn category_count_ignores_blank_categories() {
        let snap = InventorySnapshot::new(
            vec![
                InventoryItem::new(1u64, "Ladoo", 10.0, 1).with_category("Classic"),
                InventoryItem::new(2u64, "Barfi", 10.0, 1).with_category("Classic"),
                InventoryItem::new(3u64, "Kaju", 10.0, 1).with_category("Dry fruit"),
                InventoryItem::new(4u64, "Mystery", 10.0, 1),
            ],
            Utc::now(),
        )
        .unwrap();
        assert_eq!(InventoryStats::from_snapshot(&snap).category_count, 2);
    }

    #[test]
    fn empty_snapshot_yields_zeroed_stats() {
        assert_eq!(
            InventoryStats::from_snapshot(&InventorySnapshot::empty()),
            InventoryStats::default()
        );
    }

    #[test]
    fn search_matches_name_category_or_id() {
        let snap = InventorySnapshot::new(
            vec![
                InventoryItem::new(1u64, "Gulab Jamun", 10.0, 1).with_category("Syrup"),
                InventoryItem::new(2u64, "Barfi", 10.0, 1).with_category("Milk"),
                InventoryItem::new(31u64, "Ladoo", 10.0, 1).with_category("Classic"),
            ],
            Utc::now(),
        )
        .unwrap();

        let ids = |q: &str| -> Vec<String> {
            search(&snap, q).iter().map(|i| i.id().to_string()).collect()
        };

        assert_eq!(ids("JAMUN"), vec!["1"]);
        assert_eq!(ids("milk"), vec!["2"]);
        assert_eq!(ids("3"), vec!["31"]);
        assert_eq!(ids("  "), vec!["1", "2", "31"]);
        assert!(ids("halwa").is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn low_stock_count_matches_threshold_rule(stocks in proptest::collection::vec(0u32..20, 0..30)) {
                let stats = InventoryStats::from_snapshot(&snapshot_with_stocks(&stocks));
                let expected = stocks.iter().filter(|s| **s > 0 && **s <= LOW_STOCK_THRESHOLD).count();
                prop_assert_eq!(stats.low_stock_count, expected);
                prop_assert_eq!(stats.total_skus, stocks.len());
            }
        }
    }
}
