//! `sweetshop-client`
//!
//! **Responsibility:** talk to the remote inventory service.
//!
//! The service is the only authority on stock. This crate fetches catalog
//! snapshots and forwards purchase and admin mutations; it never keeps state
//! of its own between calls.

pub mod config;
pub mod error;
pub mod http;
pub mod remote;
pub mod wire;

pub use config::{ClientConfig, ConfigError};
pub use error::RemoteError;
pub use http::HttpInventoryClient;
pub use remote::{Ack, RemoteInventory};
pub use wire::{CatalogRecord, ItemPatch, NewItem};
