//! Mangaba Core - Shared types library.
//!
//! This crate provides common types used across all Mangaba components:
//! - `client` - Storefront client library (session, cart, checkout)
//! - `cli` - Command-line storefront front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, postal codes,
//!   money arithmetic, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
