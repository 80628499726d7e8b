//! External service clients.
//!
//! - [`postal`] - postal-code lookup for address autofill
//! - [`payment`] - card confirmation provider

pub mod payment;
pub mod postal;

pub use payment::{CardDetails, Confirmation, PaymentClient, PaymentError, PaymentGateway};
pub use postal::{PostalAddress, PostalError, PostalLookupClient};
