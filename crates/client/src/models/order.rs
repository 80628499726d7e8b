//! Order types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mangaba_core::{
    AddressId, OrderId, OrderStatus, PaymentIntentId, PaymentMethodKind, ProductId, UserId,
    cart_total,
};

use super::cart::CartLine;

/// One line item of an order, captured at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product this item refers to.
    pub product_id: ProductId,
    /// Product display name at purchase time.
    pub name: String,
    /// Unit price at purchase time.
    pub unit_price: Decimal,
    /// Quantity purchased.
    pub quantity: u32,
    /// Product image reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            image: line.image.clone(),
        }
    }
}

/// Client-constructed order creation payload.
///
/// Built entirely from the current cart lines and the selected address
/// immediately before submission; `total` must equal the sum of line
/// subtotals at that moment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Purchasing user.
    pub customer_id: UserId,
    /// Ordered line items.
    pub items: Vec<OrderItem>,
    /// Sum of line subtotals at submission time.
    pub total: Decimal,
    /// How the order was paid for.
    pub payment_method: PaymentMethodKind,
    /// Selected delivery address.
    pub address_id: AddressId,
    /// Client-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Build an order payload from the cart lines as they stand.
    #[must_use]
    pub fn from_lines(
        customer_id: UserId,
        lines: &[CartLine],
        payment_method: PaymentMethodKind,
        address_id: AddressId,
    ) -> Self {
        let total = cart_total(lines.iter().map(|l| (l.unit_price, l.quantity)));

        Self {
            customer_id,
            items: lines.iter().map(OrderItem::from).collect(),
            total,
            payment_method,
            address_id,
            created_at: Utc::now(),
        }
    }
}

/// A finalized purchase, as persisted by the backend.
///
/// Immutable once accepted: the client only creates new orders and reads
/// them back for history display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned order ID.
    pub id: OrderId,
    /// Purchasing user.
    pub customer_id: UserId,
    /// Ordered line items.
    pub items: Vec<OrderItem>,
    /// Order total.
    pub total: Decimal,
    /// How the order was paid for.
    pub payment_method: PaymentMethodKind,
    /// Delivery address reference, if the backend kept one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<AddressId>,
    /// Order lifecycle status.
    pub status: OrderStatus,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// A server-issued payment authorization for a given amount.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    /// Intent ID, used to confirm with the provider.
    pub id: PaymentIntentId,
    /// Amount the intent authorizes.
    pub amount: Decimal,
    /// Provider-side confirmation secret.
    pub client_secret: String,
}
