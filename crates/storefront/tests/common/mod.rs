//! Scripted in-process inventory service shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use sweetshop_auth::{Credential, InMemorySession, Role};
use sweetshop_client::{Ack, ItemPatch, NewItem, RemoteError, RemoteInventory};
use sweetshop_core::ItemId;
use sweetshop_inventory::{InventoryItem, InventorySnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch { authenticated: bool },
    Purchase { item_id: ItemId, quantity: u32 },
    Create(NewItem),
    Update { item_id: ItemId, patch: ItemPatch },
    Delete(ItemId),
    Restock { item_id: ItemId, quantity: u32 },
}

#[derive(Default)]
struct Script {
    catalog: Vec<InventoryItem>,
    calls: Vec<Call>,
    purchase_failures: HashMap<ItemId, RemoteError>,
    fetch_failure: Option<RemoteError>,
    mutation_failure: Option<RemoteError>,
}

/// Records every call in order and answers from an in-memory catalog.
#[derive(Clone, Default)]
pub struct ScriptedRemote(Arc<Mutex<Script>>);

impl ScriptedRemote {
    pub fn with_catalog(items: Vec<InventoryItem>) -> Self {
        let remote = Self::default();
        remote.0.lock().unwrap().catalog = items;
        remote
    }

    pub fn fail_purchase(&self, item_id: impl Into<ItemId>, err: RemoteError) {
        self.0.lock().unwrap().purchase_failures.insert(item_id.into(), err);
    }

    pub fn fail_fetch(&self, err: Option<RemoteError>) {
        self.0.lock().unwrap().fetch_failure = err;
    }

    pub fn fail_mutations(&self, err: Option<RemoteError>) {
        self.0.lock().unwrap().mutation_failure = err;
    }

    pub fn set_catalog(&self, items: Vec<InventoryItem>) {
        self.0.lock().unwrap().catalog = items;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().calls.clone()
    }

    pub fn purchases(&self) -> Vec<(ItemId, u32)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Purchase { item_id, quantity } => Some((item_id, quantity)),
                _ => None,
            })
            .collect()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Fetch { .. }))
            .count()
    }

    fn mutate(&self, call: Call) -> Result<Ack, RemoteError> {
        let mut script = self.0.lock().unwrap();
        script.calls.push(call);
        match &script.mutation_failure {
            Some(err) => Err(err.clone()),
            None => Ok(Ack::default()),
        }
    }
}

#[async_trait]
impl RemoteInventory for ScriptedRemote {
    async fn fetch_catalog(&self, credential: Option<&Credential>) -> Result<InventorySnapshot, RemoteError> {
        let mut script = self.0.lock().unwrap();
        script.calls.push(Call::Fetch {
            authenticated: credential.is_some(),
        });
        if let Some(err) = &script.fetch_failure {
            return Err(err.clone());
        }
        InventorySnapshot::new(script.catalog.clone(), Utc::now()).map_err(|e| RemoteError::Parse(e.to_string()))
    }

    async fn purchase(&self, _credential: &Credential, item_id: &ItemId, quantity: u32) -> Result<Ack, RemoteError> {
        let mut script = self.0.lock().unwrap();
        script.calls.push(Call::Purchase {
            item_id: item_id.clone(),
            quantity,
        });
        if let Some(err) = script.purchase_failures.get(item_id) {
            return Err(err.clone());
        }

        let Some(pos) = script.catalog.iter().position(|i| i.id() == item_id) else {
            return Err(rejected(404, "Sweet not found"));
        };
        let item = &script.catalog[pos];
        if item.stock() < quantity {
            return Err(rejected(400, "Not enough stock"));
        }
        let updated = InventoryItem::new(item.id().clone(), item.name(), item.price(), item.stock() - quantity)
            .with_category(item.category())
            .with_image_url(item.image_url());
        script.catalog[pos] = updated;
        Ok(Ack::default())
    }

    async fn create_item(&self, _credential: &Credential, item: &NewItem) -> Result<Ack, RemoteError> {
        self.mutate(Call::Create(item.clone()))
    }

    async fn update_item(&self, _credential: &Credential, item_id: &ItemId, patch: &ItemPatch) -> Result<Ack, RemoteError> {
        self.mutate(Call::Update {
            item_id: item_id.clone(),
            patch: patch.clone(),
        })
    }

    async fn delete_item(&self, _credential: &Credential, item_id: &ItemId) -> Result<Ack, RemoteError> {
        self.mutate(Call::Delete(item_id.clone()))
    }

    async fn restock(&self, _credential: &Credential, item_id: &ItemId, quantity: u32) -> Result<Ack, RemoteError> {
        self.mutate(Call::Restock {
            item_id: item_id.clone(),
            quantity,
        })
    }
}

pub fn rejected(status: u16, reason: &str) -> RemoteError {
    RemoteError::Rejected {
        status,
        reason: reason.to_string(),
    }
}

pub fn sweet(id: u64, name: &str, category: &str, price: f64, stock: u32) -> InventoryItem {
    InventoryItem::new(id, name, price, stock).with_category(category)
}

pub fn shopper() -> Arc<InMemorySession> {
    Arc::new(InMemorySession::signed_in(Credential::new("shopper-token"), Some(Role::USER)))
}

pub fn admin() -> Arc<InMemorySession> {
    Arc::new(InMemorySession::signed_in(Credential::new("admin-token"), Some(Role::ADMIN)))
}

pub fn anonymous() -> Arc<InMemorySession> {
    Arc::new(InMemorySession::new())
}
