//! Text-form input for admin item fields, and the parse step that turns it
//! into typed values.

use sweetshop_client::NewItem;
use sweetshop_core::{ShopError, ShopResult};
use sweetshop_inventory::InventoryItem;

/// Raw field text as typed by the admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub image_url: String,
}

impl ItemForm {
    /// Form prefilled with `item`'s current values.
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            name: item.name().to_string(),
            category: item.category().to_string(),
            price: item.price().to_string(),
            quantity: item.stock().to_string(),
            image_url: item.image_url().to_string(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate into a create request. Every field but category and image is required.
    pub fn to_new_item(&self) -> ShopResult<NewItem> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ShopError::validation("name", "Name is required"));
        }

        let price = parse_price(&self.price)?.ok_or_else(|| ShopError::validation("price", "Price is required"))?;
        let quantity = parse_quantity("quantity", &self.quantity)?
            .ok_or_else(|| ShopError::validation("quantity", "Quantity is required"))?;

        Ok(NewItem {
            name: name.to_string(),
            category: self.category.trim().to_string(),
            price,
            quantity,
            image_url: non_blank(&self.image_url),
        })
    }
}

pub(crate) fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Blank means "not provided".
pub fn parse_price(text: &str) -> ShopResult<Option<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let price: f64 = trimmed
        .parse()
        .map_err(|_| ShopError::validation("price", "Price must be a number"))?;
    if !price.is_finite() || price < 0.0 {
        return Err(ShopError::validation("price", "Price must be zero or more"));
    }
    Ok(Some(price))
}

/// Blank means "not provided"; otherwise a non-negative whole number.
pub fn parse_quantity(field: &'static str, text: &str) -> ShopResult<Option<u32>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ShopError::validation(field, "Quantity must be a whole number of zero or more"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, price: &str, quantity: &str) -> ItemForm {
        ItemForm {
            name: name.into(),
            category: " Syrup ".into(),
            price: price.into(),
            quantity: quantity.into(),
            image_url: "  ".into(),
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = form("   ", "10", "1").to_new_item().unwrap_err();
        assert_eq!(err, ShopError::validation("name", "Name is required"));
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn valid_form_is_trimmed() {
        let item = form(" Jalebi ", "120.5", "7").to_new_item().unwrap();
        assert_eq!(item.name, "Jalebi");
        assert_eq!(item.category, "Syrup");
        assert_eq!(item.price, 120.5);
        assert_eq!(item.quantity, 7);
        assert_eq!(item.image_url, None);
    }

    #[test]
    fn non_numeric_input_is_not_guessed() {
        assert!(matches!(
            form("Jalebi", "abc", "1").to_new_item(),
            Err(ShopError::ValidationFailed { field: "price", .. })
        ));
        assert!(matches!(
            form("Jalebi", "1", "2.5").to_new_item(),
            Err(ShopError::ValidationFailed { field: "quantity", .. })
        ));
        assert!(matches!(
            form("Jalebi", "", "1").to_new_item(),
            Err(ShopError::ValidationFailed { field: "price", .. })
        ));
    }

    #[test]
    fn price_rejects_negative_and_non_finite() {
        assert!(parse_price("-1").is_err());
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("inf").is_err());
        assert_eq!(parse_price(" 0 ").unwrap(), Some(0.0));
        assert_eq!(parse_price("").unwrap(), None);
    }

    #[test]
    fn quantity_rejects_negative() {
        assert!(parse_quantity("quantity", "-3").is_err());
        assert_eq!(parse_quantity("quantity", "12").unwrap(), Some(12));
    }
}
