use serde::{Deserialize, Serialize};

use sweetshop_core::ItemId;

/// One catalog record.
///
/// Items are owned by an [`InventorySnapshot`](crate::InventorySnapshot) and
/// replaced wholesale on every refresh; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    category: String,
    price: f64,
    stock: u32,
    image_url: String,
}

impl InventoryItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            price,
            stock,
            image_url: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
