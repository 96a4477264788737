//! `sweetshop-storefront`
//!
//! **Responsibility:** the client-side commerce logic of the sweet shop.
//!
//! - [`catalog`]: the filtered view shown to the shopper
//! - [`cart`]: stock-bounded cart quantities
//! - [`checkout`]: sequential purchase of the cart
//! - [`admin`]: the inventory editor
//!
//! [`Storefront`] and [`AdminEditor`] tie these to a [`RemoteInventory`] and a
//! [`SessionGate`]. Neither owns any IO of its own; both are driven by
//! discrete calls and expose a single status message.
//!
//! [`RemoteInventory`]: sweetshop_client::RemoteInventory
//! [`SessionGate`]: sweetshop_auth::SessionGate

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod shop;

pub use admin::{AdminEditDraft, AdminEditor, ConfirmedRemoval, ItemForm, RemovalRequest};
pub use cart::{Cart, CartLine};
pub use catalog::{ALL_CATEGORIES, CatalogFilters, DEFAULT_MAX_PRICE, category_options, derive_view};
pub use checkout::{CheckoutLine, CheckoutReport, CheckoutRun, LineFailure, RunState, checkout_lines};
pub use shop::{CheckoutOutcome, Storefront};
