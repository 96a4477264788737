//! Inventory read side of the storefront.
//!
//! Catalog records as last read from the remote inventory service, the
//! immutable snapshot that owns them, and the statistics derived from it.
//! Pure data and functions (no IO).

pub mod item;
pub mod snapshot;
pub mod stats;

pub use item::InventoryItem;
pub use snapshot::{InventorySnapshot, SnapshotError};
pub use stats::{InventoryStats, LOW_STOCK_THRESHOLD, is_low_stock, search};
