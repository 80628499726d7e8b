//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Order lifecycle status, as reported by the backend.
///
/// The client only ever reads this back for history display; orders are
/// immutable once accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

/// How an order is paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    /// Card payment, requires a provider-confirmed payment intent.
    Card,
    /// Instant bank transfer (PIX-style), approved immediately.
    Instant,
}

impl PaymentMethodKind {
    /// Whether this method goes through the payment provider.
    #[must_use]
    pub const fn requires_authorization(self) -> bool {
        matches!(self, Self::Card)
    }
}

impl std::fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Instant => write!(f, "instant"),
        }
    }
}

impl std::str::FromStr for PaymentMethodKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "instant" => Ok(Self::Instant),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
