//! Catalog view: the filtered list shown to the shopper.
//!
//! Pure functions of a snapshot and the current filters, recomputed on every
//! change of either.

use serde::{Deserialize, Serialize};

use sweetshop_inventory::{InventoryItem, InventorySnapshot};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Initial upper price bound of the shop filter.
pub const DEFAULT_MAX_PRICE: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilters {
    /// Case-insensitive substring of the item name; blank matches everything.
    pub search_text: String,
    /// Exact category, or [`ALL_CATEGORIES`].
    pub category: String,
    /// Inclusive upper bound.
    pub max_price: f64,
    pub in_stock_only: bool,
}

impl Default for CatalogFilters {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category: ALL_CATEGORIES.to_string(),
            max_price: DEFAULT_MAX_PRICE,
            in_stock_only: false,
        }
    }
}

impl CatalogFilters {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        let query = self.search_text.trim().to_lowercase();
        let matches_query = query.is_empty() || item.name().to_lowercase().contains(&query);
        let matches_category = self.category == ALL_CATEGORIES || self.category == item.category();
        let matches_price = item.price() <= self.max_price;
        let matches_stock = !self.in_stock_only || item.in_stock();

        matches_query && matches_category && matches_price && matches_stock
    }
}

/// Items of `snapshot` passing every filter, in snapshot order.
pub fn derive_view<'a>(snapshot: &'a InventorySnapshot, filters: &CatalogFilters) -> Vec<&'a InventoryItem> {
    snapshot
        .items()
        .iter()
        .filter(|item| filters.matches(item))
        .collect()
}

/// `"All"` followed by the snapshot's distinct non-empty categories.
pub fn category_options(snapshot: &InventorySnapshot) -> Vec<String> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(snapshot.categories().into_iter().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sweets() -> InventorySnapshot {
        InventorySnapshot::new(
            vec![
                InventoryItem::new(1u64, "Jalebi", 120.0, 0).with_category("Syrup"),
                InventoryItem::new(2u64, "Barfi", 150.0, 5).with_category("Milk"),
                InventoryItem::new(3u64, "Kaju Katli", 650.0, 2).with_category("Dry fruit"),
                InventoryItem::new(4u64, "Rasgulla", 90.0, 8).with_category("Syrup"),
            ],
            Utc::now(),
        )
        .unwrap()
    }

    fn ids(view: &[&InventoryItem]) -> Vec<String> {
        view.iter().map(|i| i.id().to_string()).collect()
    }

    #[test]
    fn in_stock_only_drops_sold_out_items() {
        let snap = InventorySnapshot::new(
            vec![
                InventoryItem::new(1u64, "Jalebi", 120.0, 0),
                InventoryItem::new(2u64, "Barfi", 150.0, 5),
            ],
            Utc::now(),
        )
        .unwrap();
        let filters = CatalogFilters {
            in_stock_only: true,
            ..CatalogFilters::default()
        };
        assert_eq!(ids(&derive_view(&snap, &filters)), vec!["2"]);
    }

    #[test]
    fn default_filters_apply_the_initial_price_bound() {
        assert_eq!(ids(&derive_view(&sweets(), &CatalogFilters::default())), vec!["1", "2", "4"]);
    }

    #[test]
    fn max_price_is_inclusive() {
        let filters = CatalogFilters {
            max_price: 120.0,
            ..CatalogFilters::default()
        };
        assert_eq!(ids(&derive_view(&sweets(), &filters)), vec!["1", "4"]);
    }

    #[test]
    fn search_is_case_insensitive_on_name_only() {
        let filters = CatalogFilters {
            search_text: "  BAR ".into(),
            max_price: f64::INFINITY,
            ..CatalogFilters::default()
        };
        assert_eq!(ids(&derive_view(&sweets(), &filters)), vec!["2"]);

        let by_category_text = CatalogFilters {
            search_text: "syrup".into(),
            ..CatalogFilters::default()
        };
        assert!(derive_view(&sweets(), &by_category_text).is_empty());
    }

    #[test]
    fn category_must_match_exactly() {
        let filters = CatalogFilters {
            category: "Syrup".into(),
            ..CatalogFilters::default()
        };
        assert_eq!(ids(&derive_view(&sweets(), &filters)), vec!["1", "4"]);

        let lower = CatalogFilters {
            category: "syrup".into(),
            ..CatalogFilters::default()
        };
        assert!(derive_view(&sweets(), &lower).is_empty());
    }

    #[test]
    fn empty_snapshot_yields_empty_view() {
        assert!(derive_view(&InventorySnapshot::empty(), &CatalogFilters::default()).is_empty());
    }

    #[test]
    fn category_options_start_with_all() {
        assert_eq!(category_options(&sweets()), vec!["All", "Syrup", "Milk", "Dry fruit"]);
        assert_eq!(category_options(&InventorySnapshot::empty()), vec!["All"]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_snapshot() -> impl Strategy<Value = InventorySnapshot> {
            proptest::collection::vec(
                ("[a-zA-Z ]{0,8}", prop::sample::select(vec!["", "Milk", "Syrup"]), 0.0f64..300.0, 0u32..4),
                0..20,
            )
            .prop_map(|rows| {
                let items = rows
                    .into_iter()
                    .enumerate()
                    .map(|(i, (name, cat, price, stock))| {
                        InventoryItem::new(i as u64, name, price, stock).with_category(cat)
                    })
                    .collect();
                InventorySnapshot::new(items, Utc::now()).unwrap()
            })
        }

        fn arb_filters() -> impl Strategy<Value = CatalogFilters> {
            (
                "[a-zA-Z]{0,2}",
                prop::sample::select(vec!["All", "Milk", "Syrup", ""]),
                0.0f64..300.0,
                any::<bool>(),
            )
                .prop_map(|(search_text, category, max_price, in_stock_only)| CatalogFilters {
                    search_text,
                    category: category.to_string(),
                    max_price,
                    in_stock_only,
                })
        }

        proptest! {
            /// The view is exactly the stable subsequence of items matching every predicate.
            #[test]
            fn view_is_stable_filter(snap in arb_snapshot(), filters in arb_filters()) {
                let view = derive_view(&snap, &filters);
                let expected: Vec<&InventoryItem> = snap
                    .items()
                    .iter()
                    .filter(|item| {
                        let q = filters.search_text.trim().to_lowercase();
                        (q.is_empty() || item.name().to_lowercase().contains(&q))
                            && (filters.category == "All" || filters.category == item.category())
                            && item.price() <= filters.max_price
                            && (!filters.in_stock_only || item.stock() > 0)
                    })
                    .collect();
                prop_assert_eq!(view, expected);
            }
        }
    }
}
