//! The shopper's side: catalog, cart and checkout over one shared snapshot.

use std::sync::Arc;

use tokio::sync::watch;

use sweetshop_auth::{SessionGate, SessionState};
use sweetshop_client::RemoteInventory;
use sweetshop_core::{ItemId, ShopError, ShopResult, StatusMessage};
use sweetshop_inventory::{InventoryItem, InventorySnapshot};

use crate::cart::{Cart, CartLine};
use crate::catalog::{self, CatalogFilters};
use crate::checkout::{self, CheckoutReport};

/// Outcome of [`Storefront::checkout`].
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Nothing resolvable in the cart; no call was made.
    Empty,
    /// Every line was purchased; the cart was cleared.
    Succeeded(CheckoutReport),
    /// A line failed; earlier lines stay committed and the cart is unchanged.
    Failed(CheckoutReport),
}

impl CheckoutOutcome {
    pub fn report(&self) -> Option<&CheckoutReport> {
        match self {
            Self::Empty => None,
            Self::Succeeded(report) | Self::Failed(report) => Some(report),
        }
    }

    /// Reason of the failing line, if any.
    pub fn error(&self) -> Option<&ShopError> {
        match self {
            Self::Failed(report) => report.failure.as_ref().map(|f| &f.error),
            _ => None,
        }
    }
}

/// Shopper component.
///
/// Mutating operations take `&mut self`, so at most one of them is in flight.
pub struct Storefront {
    remote: Arc<dyn RemoteInventory>,
    session: Arc<dyn SessionGate>,
    snapshot: Arc<InventorySnapshot>,
    filters: CatalogFilters,
    cart: Cart,
    status: Option<StatusMessage>,
}

impl Storefront {
    pub fn new(remote: Arc<dyn RemoteInventory>, session: Arc<dyn SessionGate>) -> Self {
        Self {
            remote,
            session,
            snapshot: Arc::new(InventorySnapshot::empty()),
            filters: CatalogFilters::default(),
            cart: Cart::new(),
            status: None,
        }
    }

    /// Replace the snapshot with a fresh read; the old one is kept on failure.
    pub async fn refresh(&mut self) -> ShopResult<()> {
        self.status = None;
        if let Err(e) = self.reload().await {
            self.status = Some(StatusMessage::from(&e));
            return Err(e);
        }
        Ok(())
    }

    async fn reload(&mut self) -> ShopResult<()> {
        let credential = self.session.current_credential();
        let snapshot = self.remote.fetch_catalog(credential.as_ref()).await.map_err(|e| {
            tracing::warn!(error = %e, "catalog refresh failed");
            ShopError::from(e)
        })?;

        tracing::info!(items = snapshot.len(), "catalog refreshed");
        self.snapshot = Arc::new(snapshot);
        Ok(())
    }

    /// Wait for the next session change and reload the catalog for it.
    ///
    /// Returns `false` once the gate is gone and no further change can come.
    pub async fn follow_session(&mut self, changes: &mut watch::Receiver<SessionState>) -> bool {
        if changes.changed().await.is_err() {
            return false;
        }

        let authenticated = changes.borrow_and_update().is_authenticated();
        tracing::debug!(authenticated, "session changed; reloading catalog");
        // A failed reload is already reported through `status`.
        let _ = self.refresh().await;
        true
    }

    pub fn session_changes(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    pub fn snapshot(&self) -> Arc<InventorySnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn filters(&self) -> &CatalogFilters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: CatalogFilters) {
        self.filters = filters;
    }

    pub fn filters_mut(&mut self) -> &mut CatalogFilters {
        &mut self.filters
    }

    /// Items shown to the shopper under the current filters.
    pub fn view(&self) -> Vec<&InventoryItem> {
        catalog::derive_view(&self.snapshot, &self.filters)
    }

    pub fn category_options(&self) -> Vec<String> {
        catalog::category_options(&self.snapshot)
    }

    pub fn increment(&mut self, item_id: &ItemId) -> bool {
        self.cart.increment(&self.snapshot, item_id)
    }

    pub fn decrement(&mut self, item_id: &ItemId) -> bool {
        self.cart.decrement(item_id)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn cart_count(&self) -> u64 {
        self.cart.count()
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.total(&self.snapshot)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Purchase the cart line by line.
    ///
    /// Without a credential this fails with [`ShopError::AuthenticationRequired`]
    /// before any call. A line failure is reported as
    /// [`CheckoutOutcome::Failed`], not as `Err`.
    pub async fn checkout(&mut self) -> ShopResult<CheckoutOutcome> {
        self.status = None;

        let Some(credential) = self.session.current_credential() else {
            let err = ShopError::AuthenticationRequired;
            self.status = Some(StatusMessage::from(&err));
            return Err(err);
        };

        let lines = checkout::checkout_lines(&self.cart, &self.snapshot);
        if lines.is_empty() {
            tracing::debug!("checkout skipped: nothing to purchase");
            return Ok(CheckoutOutcome::Empty);
        }

        let report = checkout::execute(self.remote.as_ref(), &credential, lines).await;

        if let Some(failure) = &report.failure {
            self.status = Some(StatusMessage::from(&failure.error));
            return Ok(CheckoutOutcome::Failed(report));
        }

        self.cart.clear();
        if let Err(e) = self.reload().await {
            tracing::warn!(error = %e, "catalog refresh after checkout failed");
        }
        self.status = Some(StatusMessage::success("Checkout successful"));
        Ok(CheckoutOutcome::Succeeded(report))
    }
}
