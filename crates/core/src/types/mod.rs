//! Core types for Mangaba.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod postal;
pub mod price;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use postal::{PostalCode, PostalCodeError};
pub use price::{cart_total, format_amount, line_subtotal};
pub use status::*;
