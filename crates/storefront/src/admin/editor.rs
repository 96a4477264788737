//! The admin dashboard: load, mutate, reload.

use std::sync::Arc;

use sweetshop_auth::{Credential, SessionGate};
use sweetshop_client::RemoteInventory;
use sweetshop_core::{ItemId, ShopError, ShopResult, StatusMessage};
use sweetshop_inventory::{self as inventory, InventoryItem, InventorySnapshot, InventoryStats};

use super::draft::AdminEditDraft;
use super::form::{ItemForm, parse_quantity};

/// First half of a removal; only [`confirm`](Self::confirm) yields something
/// [`AdminEditor::remove`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    item_id: ItemId,
    name: String,
}

impl RemovalRequest {
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Name to show in the confirmation prompt.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn confirm(self) -> ConfirmedRemoval {
        ConfirmedRemoval { item_id: self.item_id }
    }
}

/// A removal the caller has confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedRemoval {
    item_id: ItemId,
}

impl ConfirmedRemoval {
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }
}

/// Admin inventory editor.
///
/// At most one row is edited at a time; starting a second edit is refused
/// with [`ShopError::DraftActive`].
pub struct AdminEditor {
    remote: Arc<dyn RemoteInventory>,
    session: Arc<dyn SessionGate>,
    snapshot: Arc<InventorySnapshot>,
    query: String,
    create_form: ItemForm,
    draft: Option<AdminEditDraft>,
    status: Option<StatusMessage>,
}

impl AdminEditor {
    pub fn new(remote: Arc<dyn RemoteInventory>, session: Arc<dyn SessionGate>) -> Self {
        Self {
            remote,
            session,
            snapshot: Arc::new(InventorySnapshot::empty()),
            query: String::new(),
            create_form: ItemForm::default(),
            draft: None,
            status: None,
        }
    }

    fn fail<T>(&mut self, err: ShopError) -> ShopResult<T> {
        tracing::warn!(error = %err, "admin operation failed");
        self.status = Some(StatusMessage::from(&err));
        Err(err)
    }

    fn admin_credential(&self) -> ShopResult<Credential> {
        let credential = self
            .session
            .current_credential()
            .ok_or(ShopError::AuthenticationRequired)?;
        if !self.session.is_admin() {
            return Err(ShopError::AdminRequired);
        }
        Ok(credential)
    }

    async fn reload(&mut self, credential: &Credential) -> ShopResult<()> {
        let snapshot = self.remote.fetch_catalog(Some(credential)).await?;
        tracing::info!(items = snapshot.len(), "admin catalog loaded");
        self.snapshot = Arc::new(snapshot);
        Ok(())
    }

    /// Report `message` and reload; a failed reload replaces the success status.
    async fn finish_mutation(&mut self, credential: &Credential, message: String) {
        self.status = Some(StatusMessage::success(message));
        if let Err(e) = self.reload(credential).await {
            tracing::warn!(error = %e, "reload after admin mutation failed");
            self.status = Some(StatusMessage::from(&e));
        }
    }

    /// Load the dashboard; requires an authenticated admin.
    pub async fn load(&mut self) -> ShopResult<()> {
        self.status = None;
        let credential = match self.admin_credential() {
            Ok(c) => c,
            Err(e) => return self.fail(e),
        };
        match self.reload(&credential).await {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e),
        }
    }

    pub fn snapshot(&self) -> Arc<InventorySnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats::from_snapshot(&self.snapshot)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn search_results(&self) -> Vec<&InventoryItem> {
        inventory::search(&self.snapshot, &self.query)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn create_form(&self) -> &ItemForm {
        &self.create_form
    }

    pub fn create_form_mut(&mut self) -> &mut ItemForm {
        &mut self.create_form
    }

    /// Create an item from the create form, then reset the form and reload.
    pub async fn create(&mut self) -> ShopResult<()> {
        self.status = None;
        let item = match self.create_form.to_new_item() {
            Ok(item) => item,
            Err(e) => return self.fail(e),
        };
        let credential = match self.admin_credential() {
            Ok(c) => c,
            Err(e) => return self.fail(e),
        };

        tracing::info!(name = %item.name, quantity = item.quantity, "creating item");
        let ack = match self.remote.create_item(&credential, &item).await {
            Ok(ack) => ack,
            Err(e) => return self.fail(e.into()),
        };

        self.create_form.clear();
        self.finish_mutation(&credential, ack.message.unwrap_or_else(|| "Item added".to_string()))
            .await;
        Ok(())
    }

    pub fn draft(&self) -> Option<&AdminEditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut AdminEditDraft> {
        self.draft.as_mut()
    }

    /// Open a draft for `item_id`, prefilled from the latest snapshot.
    pub fn begin_edit(&mut self, item_id: &ItemId) -> ShopResult<&mut AdminEditDraft> {
        self.status = None;
        if let Some(active) = &self.draft {
            let err = ShopError::DraftActive(active.item_id().clone());
            return self.fail(err);
        }
        let Some(item) = self.snapshot.get(item_id) else {
            return self.fail(ShopError::NotFound(item_id.clone()));
        };

        tracing::debug!(%item_id, "edit started");
        Ok(self.draft.insert(AdminEditDraft::from_item(item)))
    }

    /// Discard the active draft without saving.
    pub fn cancel_edit(&mut self) -> ShopResult<()> {
        match self.draft.take() {
            Some(draft) => {
                tracing::debug!(item_id = %draft.item_id(), "edit cancelled");
                Ok(())
            }
            None => Err(ShopError::NoActiveDraft),
        }
    }

    /// Send the changed fields of the active draft.
    ///
    /// The draft stays active on failure so it can be corrected and retried,
    /// unless its item has left the latest snapshot.
    pub async fn save(&mut self) -> ShopResult<()> {
        self.status = None;
        let Some(draft) = &self.draft else {
            return self.fail(ShopError::NoActiveDraft);
        };
        let item_id = draft.item_id().clone();
        let patch = draft.to_patch();

        if !self.snapshot.contains(&item_id) {
            // The row is gone since the edit started; the draft can never be saved.
            self.draft = None;
            return self.fail(ShopError::NotFound(item_id));
        }
        let patch = match patch {
            Ok(patch) => patch,
            Err(e) => return self.fail(e),
        };

        if patch.is_empty() {
            self.draft = None;
            self.status = Some(StatusMessage::success("No changes to save"));
            return Ok(());
        }

        let credential = match self.admin_credential() {
            Ok(c) => c,
            Err(e) => return self.fail(e),
        };

        tracing::info!(%item_id, ?patch, "updating item");
        let ack = match self.remote.update_item(&credential, &item_id, &patch).await {
            Ok(ack) => ack,
            Err(e) => return self.fail(e.into()),
        };

        self.draft = None;
        self.finish_mutation(&credential, ack.message.unwrap_or_else(|| "Item updated".to_string()))
            .await;
        Ok(())
    }

    /// Start removing `item_id`; the returned request must be confirmed.
    pub fn request_removal(&mut self, item_id: &ItemId) -> ShopResult<RemovalRequest> {
        self.status = None;
        match self.snapshot.get(item_id) {
            Some(item) => Ok(RemovalRequest {
                item_id: item_id.clone(),
                name: item.name().to_string(),
            }),
            None => self.fail(ShopError::NotFound(item_id.clone())),
        }
    }

    pub async fn remove(&mut self, removal: ConfirmedRemoval) -> ShopResult<()> {
        self.status = None;
        let item_id = removal.item_id;
        if !self.snapshot.contains(&item_id) {
            return self.fail(ShopError::NotFound(item_id));
        }
        let credential = match self.admin_credential() {
            Ok(c) => c,
            Err(e) => return self.fail(e),
        };

        tracing::info!(%item_id, "deleting item");
        let ack = match self.remote.delete_item(&credential, &item_id).await {
            Ok(ack) => ack,
            Err(e) => return self.fail(e.into()),
        };

        if self.draft.as_ref().is_some_and(|d| d.item_id() == &item_id) {
            self.draft = None;
        }
        self.finish_mutation(&credential, ack.message.unwrap_or_else(|| "Item deleted".to_string()))
            .await;
        Ok(())
    }

    /// Add `quantity_text` units to `item_id`'s stock.
    pub async fn restock(&mut self, item_id: &ItemId, quantity_text: &str) -> ShopResult<()> {
        self.status = None;
        let quantity = match parse_quantity("quantity", quantity_text) {
            Ok(Some(q)) if q > 0 => q,
            Ok(_) => {
                return self.fail(ShopError::validation("quantity", "Restock quantity must be greater than zero"));
            }
            Err(e) => return self.fail(e),
        };
        if !self.snapshot.contains(item_id) {
            return self.fail(ShopError::NotFound(item_id.clone()));
        }
        let credential = match self.admin_credential() {
            Ok(c) => c,
            Err(e) => return self.fail(e),
        };

        tracing::info!(%item_id, quantity, "restocking item");
        let ack = match self.remote.restock(&credential, item_id, quantity).await {
            Ok(ack) => ack,
            Err(e) => return self.fail(e.into()),
        };

        self.finish_mutation(&credential, ack.message.unwrap_or_else(|| "Item restocked".to_string()))
            .await;
        Ok(())
    }
}
