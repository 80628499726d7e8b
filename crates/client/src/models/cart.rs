//! Cart line types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mangaba_core::{CartLineId, ProductId, UserId, line_subtotal};

/// One product line in the current user's server-side cart.
///
/// The server copy is authoritative: the client never trusts its own
/// projection of a line after a mutation, it re-reads instead. A quantity
/// mutation to zero or below is line removal, never a persisted
/// zero-quantity line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Server-assigned line ID.
    pub id: CartLineId,
    /// Owning user.
    pub user_id: UserId,
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product display name, denormalized into the line.
    pub name: String,
    /// Unit price at the time the line was added.
    pub unit_price: Decimal,
    /// Product image reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Quantity, always >= 1 server-side.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.unit_price, self.quantity)
    }
}

/// Payload for an explicit "add to cart" action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartLine {
    /// Owning user.
    pub user_id: UserId,
    /// Product being added.
    pub product_id: ProductId,
    /// Product display name.
    pub name: String,
    /// Unit price as shown to the user.
    pub unit_price: Decimal,
    /// Product image reference, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Initial quantity, >= 1.
    pub quantity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_line_wire_shape() {
        let json = r#"{
            "id": "line-1",
            "userId": "u-1",
            "productId": "p-9",
            "name": "Fone Bluetooth",
            "unitPrice": "129.90",
            "image": "https://cdn.example.com/p-9.jpg",
            "quantity": 2
        }"#;

        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.subtotal(), Decimal::new(25980, 2));
    }
}
