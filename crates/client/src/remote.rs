//! The remote inventory service as the storefront sees it.

use async_trait::async_trait;

use sweetshop_auth::Credential;
use sweetshop_core::ItemId;
use sweetshop_inventory::InventorySnapshot;

use crate::error::RemoteError;
use crate::wire::{ItemPatch, NewItem};

/// Acknowledgement of a successful call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    /// Optional human-readable message supplied by the service.
    pub message: Option<String>,
}

/// Operations offered by the inventory service.
///
/// Each call either succeeds or fails as a whole; the service applies a
/// purchase's stock decrement atomically per call. Implementations must bound
/// every call by a timeout and report it as [`RemoteError::TimedOut`].
#[async_trait]
pub trait RemoteInventory: Send + Sync {
    /// `GET /catalog`; the credential is optional.
    async fn fetch_catalog(&self, credential: Option<&Credential>) -> Result<InventorySnapshot, RemoteError>;

    /// `POST /catalog/{id}/purchase` with `{quantity}`.
    async fn purchase(&self, credential: &Credential, item_id: &ItemId, quantity: u32) -> Result<Ack, RemoteError>;

    /// `POST /catalog` (admin).
    async fn create_item(&self, credential: &Credential, item: &NewItem) -> Result<Ack, RemoteError>;

    /// `PUT /catalog/{id}` with only the changed fields (admin).
    async fn update_item(&self, credential: &Credential, item_id: &ItemId, patch: &ItemPatch) -> Result<Ack, RemoteError>;

    /// `DELETE /catalog/{id}` (admin).
    async fn delete_item(&self, credential: &Credential, item_id: &ItemId) -> Result<Ack, RemoteError>;

    /// `POST /catalog/{id}/restock` with `{quantity}` (admin).
    async fn restock(&self, credential: &Credential, item_id: &ItemId, quantity: u32) -> Result<Ack, RemoteError>;
}
