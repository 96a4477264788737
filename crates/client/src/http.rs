//! reqwest-backed [`RemoteInventory`].

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{RequestBuilder, Response, Url};
use serde_json::Value;

use sweetshop_auth::Credential;
use sweetshop_core::ItemId;
use sweetshop_inventory::InventorySnapshot;

use crate::config::{ClientConfig, ConfigError};
use crate::error::RemoteError;
use crate::remote::{Ack, RemoteInventory};
use crate::wire::{self, CatalogRecord, ItemPatch, NewItem, QuantityRequest};

/// HTTP client for the inventory service.
///
/// No retries: every failure is terminal for the attempt that hit it.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    api_url: Url,
    http: reqwest::Client,
}

impl HttpInventoryClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let api_url = Url::parse(config.base_url()).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        if api_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(format!("{api_url} cannot carry a path")));
        }

        Ok(Self { api_url, http })
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }

    /// `api_url` extended by `segments`, each percent-encoded as one path segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `/catalog/{id}` followed by `suffix`.
    ///
    /// Dot segments would be dropped or resolved by URL normalization and
    /// address a different resource, so they are refused.
    fn item_url(&self, item_id: &ItemId, suffix: Option<&str>) -> Result<Url, RemoteError> {
        let id = item_id.as_str();
        if id.is_empty() || id == "." || id == ".." {
            return Err(RemoteError::InvalidItemId(id.to_string()));
        }

        let mut segments = vec!["catalog", id];
        segments.extend(suffix);
        Ok(self.url(&segments))
    }

    /// Send and turn any non-2xx status into [`RemoteError::Rejected`].
    async fn send(req: RequestBuilder, fallback: &str) -> Result<Response, RemoteError> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let reason = wire::reason_from_body(&body).unwrap_or_else(|| fallback.to_string());
        tracing::warn!(status = status.as_u16(), %reason, "inventory service rejected request");
        Err(RemoteError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }

    async fn ack(req: RequestBuilder, fallback: &str) -> Result<Ack, RemoteError> {
        let resp = Self::send(req, fallback).await?;
        let body = resp.text().await?;
        Ok(Ack {
            message: wire::message_from_body(&body),
        })
    }
}

#[async_trait]
impl RemoteInventory for HttpInventoryClient {
    async fn fetch_catalog(&self, credential: Option<&Credential>) -> Result<InventorySnapshot, RemoteError> {
        let mut req = self.http.get(self.url(&["catalog"]));
        if let Some(credential) = credential {
            req = req.bearer_auth(credential.token());
        }

        let resp = Self::send(req, "Unable to load catalog").await?;
        let body: Value = resp.json().await?;

        let records: Vec<CatalogRecord> = match body {
            Value::Array(_) => serde_json::from_value(body).map_err(|e| RemoteError::Parse(e.to_string()))?,
            other => {
                tracing::warn!(kind = ?other, "catalog response is not a list; treating as empty");
                Vec::new()
            }
        };

        let items = records.into_iter().filter_map(CatalogRecord::into_item).collect();
        let snapshot = InventorySnapshot::new(items, Utc::now()).map_err(|e| RemoteError::Parse(e.to_string()))?;
        tracing::debug!(items = snapshot.len(), "catalog fetched");
        Ok(snapshot)
    }

    async fn purchase(&self, credential: &Credential, item_id: &ItemId, quantity: u32) -> Result<Ack, RemoteError> {
        let req = self
            .http
            .post(self.item_url(item_id, Some("purchase"))?)
            .bearer_auth(credential.token())
            .json(&QuantityRequest { quantity });
        Self::ack(req, "Checkout failed").await
    }

    async fn create_item(&self, credential: &Credential, item: &NewItem) -> Result<Ack, RemoteError> {
        let req = self
            .http
            .post(self.url(&["catalog"]))
            .bearer_auth(credential.token())
            .json(item);
        Self::ack(req, "Unable to add item").await
    }

    async fn update_item(&self, credential: &Credential, item_id: &ItemId, patch: &ItemPatch) -> Result<Ack, RemoteError> {
        let req = self
            .http
            .put(self.item_url(item_id, None)?)
            .bearer_auth(credential.token())
            .json(patch);
        Self::ack(req, "Unable to update item").await
    }

    async fn delete_item(&self, credential: &Credential, item_id: &ItemId) -> Result<Ack, RemoteError> {
        let req = self
            .http
            .delete(self.item_url(item_id, None)?)
            .bearer_auth(credential.token());
        Self::ack(req, "Unable to delete item").await
    }

    async fn restock(&self, credential: &Credential, item_id: &ItemId, quantity: u32) -> Result<Ack, RemoteError> {
        let req = self
            .http
            .post(self.item_url(item_id, Some("restock"))?)
            .bearer_auth(credential.token())
            .json(&QuantityRequest { quantity });
        Self::ack(req, "Unable to restock item").await
    }
}
