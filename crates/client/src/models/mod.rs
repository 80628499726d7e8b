//! Domain models for the storefront client.
//!
//! Wire structs match the backend contract (`camelCase` JSON, decimal
//! amounts as strings). Server-assigned types (`Session`, `CartLine`,
//! `Order`, `Address`) are deserialized; `New*` counterparts are the
//! client-constructed creation payloads.

pub mod address;
pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use address::{Address, NewAddress};
pub use cart::{CartLine, NewCartLine};
pub use order::{NewOrder, Order, OrderItem, PaymentIntent};
pub use product::{Product, Shop};
pub use user::{RegisterProfile, Session};
