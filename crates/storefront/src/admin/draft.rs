use sweetshop_client::ItemPatch;
use sweetshop_core::{ItemId, ShopResult};
use sweetshop_inventory::InventoryItem;

use super::form::{ItemForm, non_blank, parse_price, parse_quantity};

/// Working copy of one row while it is being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminEditDraft {
    original: InventoryItem,
    pub form: ItemForm,
}

impl AdminEditDraft {
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            original: item.clone(),
            form: ItemForm::from_item(item),
        }
    }

    pub fn item_id(&self) -> &ItemId {
        self.original.id()
    }

    /// The item as it was when editing started.
    pub fn original(&self) -> &InventoryItem {
        &self.original
    }

    /// Update request holding only the fields that differ from the original.
    ///
    /// Blank fields are left out, so the server keeps its value for them.
    pub fn to_patch(&self) -> ShopResult<ItemPatch> {
        let original = &self.original;
        let price = parse_price(&self.form.price)?;
        let quantity = parse_quantity("quantity", &self.form.quantity)?;

        Ok(ItemPatch {
            name: non_blank(&self.form.name).filter(|v| v != original.name()),
            category: non_blank(&self.form.category).filter(|v| v != original.category()),
            price: price.filter(|v| *v != original.price()),
            quantity: quantity.filter(|v| *v != original.stock()),
            image_url: non_blank(&self.form.image_url).filter(|v| v != original.image_url()),
        })
    }
}
