//! Server-authoritative cart synchronization.
//!
//! The backend's cart is the source of truth. Every mutation is a write
//! followed by a full re-read; the published line list only ever changes on
//! a successful read, so a failed refresh leaves the last known good list
//! visible instead of an empty one.

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use mangaba_core::{UserId, cart_total};

use crate::api::CartApi;
use crate::error::ApiError;
use crate::models::{CartLine, NewCartLine, Product};
use crate::session::AuthState;

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Keeps the local view of the cart in sync with the backend.
///
/// Single writer of the observable line list; read the current lines with
/// [`lines`](Self::lines) or follow changes with
/// [`subscribe`](Self::subscribe).
pub struct CartSynchronizer<C> {
    api: C,
    auth: watch::Receiver<AuthState>,
    lines_tx: watch::Sender<Vec<CartLine>>,
    lines_rx: watch::Receiver<Vec<CartLine>>,
}

impl<C: CartApi> CartSynchronizer<C> {
    /// Create a synchronizer with an empty published cart.
    pub fn new(api: C, auth: watch::Receiver<AuthState>) -> Self {
        let (lines_tx, lines_rx) = watch::channel(Vec::new());
        Self {
            api,
            auth,
            lines_tx,
            lines_rx,
        }
    }

    /// A snapshot of the current lines.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines_rx.borrow().clone()
    }

    /// Subscribe to line-list changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.lines_rx.clone()
    }

    /// Sum of line subtotals for the current lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        cart_total(
            self.lines_rx
                .borrow()
                .iter()
                .map(|l| (l.unit_price, l.quantity)),
        )
    }

    /// Re-read the cart from the backend and publish the result.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotAuthenticated`] with no backend call when no
    /// user is signed in. On a backend failure the previously published
    /// lines stay visible.
    pub async fn fetch(&self) -> Result<Vec<CartLine>, CartError> {
        let user = self.user_id()?;
        let lines = self.api.cart_lines(&user).await?;

        debug!(lines = lines.len(), "cart fetched");
        self.lines_tx.send_replace(lines.clone());

        Ok(lines)
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotAuthenticated`] when no user is signed in,
    /// [`CartError::Api`] if the write or the follow-up read fails.
    pub async fn add(&self, product: &Product, quantity: u32) -> Result<(), CartError> {
        let user = self.user_id()?;
        let line = NewCartLine {
            user_id: user,
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            quantity: quantity.max(1),
        };

        self.api.add_cart_line(&line).await?;
        self.fetch().await?;
        Ok(())
    }

    /// Set the quantity of a line. Zero or below removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotAuthenticated`] when no user is signed in,
    /// [`CartError::Api`] if the write or the follow-up read fails.
    pub async fn set_quantity(&self, line: &CartLine, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove(line).await;
        }

        self.user_id()?;
        self.api
            .set_cart_quantity(&line.id, quantity.unsigned_abs())
            .await?;
        self.fetch().await?;
        Ok(())
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotAuthenticated`] when no user is signed in,
    /// [`CartError::Api`] if the write or the follow-up read fails.
    pub async fn remove(&self, line: &CartLine) -> Result<(), CartError> {
        self.user_id()?;
        self.api.delete_cart_line(&line.id).await?;
        self.fetch().await?;
        Ok(())
    }

    /// Delete the given lines one by one, then republish.
    ///
    /// Used by checkout to clear exactly the lines the order was built from.
    /// Stops at the first failed deletion; lines deleted before the failure
    /// stay deleted server-side.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Api`] for the first deletion that fails.
    pub async fn clear_lines(&self, lines: &[CartLine]) -> Result<(), CartError> {
        for line in lines {
            self.api.delete_cart_line(&line.id).await?;
        }

        // The deletions succeeded; a failed republish is recoverable later.
        if let Err(e) = self.fetch().await {
            warn!(error = %e, "cart cleared but refresh failed");
        }

        Ok(())
    }

    fn user_id(&self) -> Result<UserId, CartError> {
        self.auth
            .borrow()
            .session()
            .map(|s| s.id.clone())
            .ok_or(CartError::NotAuthenticated)
    }
}
