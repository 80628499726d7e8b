//! Mangaba backend REST client.
//!
//! # Architecture
//!
//! - One [`BackendClient`] per process, cheaply cloneable via `Arc`
//! - The server is the source of truth - no local sync, direct API calls
//! - In-memory caching via `moka` for read-only catalog responses
//!   (5 minute TTL); cart, orders, and addresses are never cached
//!
//! The workflow components (session, cart, checkout) depend on the narrow
//! seam traits [`AuthApi`], [`CartApi`], and [`OrderApi`] rather than on the
//! concrete client, so their protocols can be exercised against in-memory
//! fakes. Everything else (addresses, favorites, catalog, users) is inherent
//! methods on [`BackendClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mangaba_client::api::BackendClient;
//!
//! let api = BackendClient::new(&config)?;
//! let products = api.products(Some("fone"), None).await?;
//! let lines = api.cart_lines(&user_id).await?;
//! ```

mod addresses;
mod auth;
mod cart;
mod catalog;
mod favorites;
mod orders;
mod users;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::de::DeserializeOwned;

use mangaba_core::{CartLineId, Email, UserId};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{CartLine, NewAddress, NewCartLine, NewOrder, Order, PaymentIntent, Session};

pub(crate) use catalog::CatalogEntry;

/// Catalog cache TTL.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(300);

/// Catalog cache capacity.
const CATALOG_CACHE_CAPACITY: u64 = 1000;

// =============================================================================
// Seam traits
// =============================================================================

/// Authentication operations consumed by the Session Manager.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a session record.
    async fn login(&self, email: &Email, password: &SecretString) -> Result<Session, ApiError>;

    /// Register a new user with one address in a single call.
    async fn register(
        &self,
        profile: &crate::models::RegisterProfile,
        address: &NewAddress,
    ) -> Result<Session, ApiError>;
}

/// Cart operations consumed by the Cart Synchronizer.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// All cart lines for a user.
    async fn cart_lines(&self, user: &UserId) -> Result<Vec<CartLine>, ApiError>;

    /// Create a new cart line.
    async fn add_cart_line(&self, line: &NewCartLine) -> Result<CartLine, ApiError>;

    /// Set the quantity of an existing line. Callers must not pass zero;
    /// removal is [`CartApi::delete_cart_line`].
    async fn set_cart_quantity(&self, line: &CartLineId, quantity: u32) -> Result<(), ApiError>;

    /// Delete a cart line.
    async fn delete_cart_line(&self, line: &CartLineId) -> Result<(), ApiError>;
}

/// Order and payment-intent operations consumed by the Checkout Orchestrator.
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Persist a client-constructed order.
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError>;

    /// Orders for a customer, most recent first.
    async fn orders_for_customer(&self, user: &UserId) -> Result<Vec<Order>, ApiError>;

    /// Request a server-issued payment authorization for an amount.
    async fn create_payment_intent(&self, amount: Decimal) -> Result<PaymentIntent, ApiError>;
}

// =============================================================================
// BackendClient
// =============================================================================

/// Client for the Mangaba REST backend.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
    catalog_cache: Cache<String, CatalogEntry>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let catalog_cache = Cache::builder()
            .max_capacity(CATALOG_CACHE_CAPACITY)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.api_url.trim_end_matches('/').to_owned(),
                catalog_cache,
            }),
        })
    }

    /// Build a full URL for a backend path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    fn catalog_cache(&self) -> &Cache<String, CatalogEntry> {
        &self.inner.catalog_cache
    }

    /// Decode a response body, mapping non-success statuses to
    /// [`ApiError::Rejected`] with the server's reason string.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: extract_reason(&body, status),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse backend response"
            );
            ApiError::Parse(e.to_string())
        })
    }

    /// Like [`Self::decode`] but for endpoints whose success body is ignored.
    async fn expect_success(response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: extract_reason(&body, status),
            });
        }

        Ok(())
    }
}

/// Pull the server's reason string out of an error body.
///
/// The backend reports failures as `{"error": "..."}`; fall back to the raw
/// body, then to the status text, so the user always sees something.
fn extract_reason(body: &str, status: reqwest::StatusCode) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request rejected")
            .to_owned()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reason_from_error_body() {
        let reason = extract_reason(
            r#"{"error": "email already registered"}"#,
            reqwest::StatusCode::CONFLICT,
        );
        assert_eq!(reason, "email already registered");
    }

    #[test]
    fn test_extract_reason_falls_back_to_raw_body() {
        let reason = extract_reason("plain text failure", reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(reason, "plain text failure");
    }

    #[test]
    fn test_extract_reason_falls_back_to_status() {
        let reason = extract_reason("", reqwest::StatusCode::NOT_FOUND);
        assert_eq!(reason, "Not Found");
    }
}
