//! Mangaba storefront client library.
//!
//! The mobile storefront is a thin presentation layer over a remote REST
//! backend; everything with real failure semantics lives here:
//!
//! - [`session`] - Session Manager: who is logged in, persisted across
//!   restarts, observable by the navigation gate
//! - [`cart`] - Cart Synchronizer: server-authoritative cart with a full
//!   re-read after every mutation
//! - [`checkout`] - Checkout Orchestrator: payment, order creation, and
//!   cart clearing as a sequential, guarded protocol
//!
//! External collaborators are consumed, never implemented:
//!
//! - [`api`] - the Mangaba REST backend (users, products, cart, orders,
//!   addresses, favorites, shops, payment intents)
//! - [`services::postal`] - postal-code lookup for address autofill
//! - [`services::payment`] - card confirmation provider
//! - [`session::store`] - durable local key-value storage for the session

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use state::{AppState, StateError};
