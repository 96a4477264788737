//! `sweetshop-core`: shared building blocks for the storefront client.
//!
//! This crate holds **no IO**: identifiers, the error taxonomy every component
//! reports through, and the single status message a component exposes.

pub mod error;
pub mod id;
pub mod status;

pub use error::{ShopError, ShopResult};
pub use id::{CheckoutId, ItemId};
pub use status::{StatusKind, StatusMessage};
