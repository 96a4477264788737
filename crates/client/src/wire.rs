//! JSON shapes exchanged with the inventory service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sweetshop_core::ItemId;
use sweetshop_inventory::InventoryItem;

pub const PLACEHOLDER_IMAGE_BASE: &str = "https://via.placeholder.com/640x420.png";

/// One catalog record as the service returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogRecord {
    pub id: ItemId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, alias = "stock")]
    pub quantity: Option<i64>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
}

impl CatalogRecord {
    /// Normalize into an [`InventoryItem`]: missing numbers become zero,
    /// negatives are clamped, and a missing image gets a placeholder.
    ///
    /// Records without a non-blank name are skipped (`None`).
    pub fn into_item(self) -> Option<InventoryItem> {
        let Some(name) = self.name.filter(|n| !n.trim().is_empty()) else {
            tracing::warn!(item_id = %self.id, "skipping catalog record without a name");
            return None;
        };
        let stock = self.quantity.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32;
        let price = self.price.filter(|p| p.is_finite()).unwrap_or(0.0).max(0.0);
        let image_url = match self.image_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => placeholder_image_url(&name),
        };

        Some(
            InventoryItem::new(self.id, name, price, stock)
                .with_category(self.category.unwrap_or_default())
                .with_image_url(image_url),
        )
    }
}

/// Placeholder picture labelled with the item name.
pub fn placeholder_image_url(name: &str) -> String {
    let label = if name.trim().is_empty() { "Sweet" } else { name };
    reqwest::Url::parse_with_params(PLACEHOLDER_IMAGE_BASE, &[("text", label)])
        .map(|url| url.to_string())
        .unwrap_or_else(|_| PLACEHOLDER_IMAGE_BASE.to_string())
}

/// Body of `POST /catalog`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
    pub image_url: Option<String>,
}

/// Body of `PUT /catalog/{id}`; absent fields keep their server-side value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.image_url.is_none()
    }
}

/// Body of the purchase and restock calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityRequest {
    pub quantity: u32,
}

/// Human-readable reason from a failure body: `detail`, then `message`.
///
/// Non-JSON bodies and non-string fields yield `None`.
pub fn reason_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `message` from a success body, if any.
pub fn message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
