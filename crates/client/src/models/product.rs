//! Catalog types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mangaba_core::{ProductId, ShopId};

/// A product in the marketplace catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current unit price.
    pub price: Decimal,
    /// Product description.
    #[serde(default)]
    pub description: String,
    /// Image reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Shop selling this product, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<ShopId>,
    /// Units sold, if the backend tracks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold: Option<u64>,
}

/// A shop (seller) in the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    /// Server-assigned shop ID.
    pub id: ShopId,
    /// Shop name.
    pub name: String,
    /// Shop description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Shop logo reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_minimal_shape() {
        let json = r#"{"id": "p-1", "name": "Caneca", "price": "39.90"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::new(3990, 2));
        assert!(product.description.is_empty());
        assert_eq!(product.shop_id, None);
    }
}
