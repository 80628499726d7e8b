//! Favorites endpoints.

use serde::Deserialize;

use mangaba_core::{ProductId, UserId};

use crate::error::ApiError;
use crate::models::Product;

use super::BackendClient;

/// Response of a favorite toggle.
#[derive(Debug, Deserialize)]
struct ToggleResponse {
    favorited: bool,
}

impl BackendClient {
    /// Toggle a product in the user's favorites.
    ///
    /// Returns `true` if the product is favorited after the call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn toggle_favorite(
        &self,
        user: &UserId,
        product: &ProductId,
    ) -> Result<bool, ApiError> {
        let body = serde_json::json!({
            "userId": user,
            "productId": product,
        });

        let response = self
            .http()
            .post(self.url("/favorites/toggle"))
            .json(&body)
            .send()
            .await?;

        let toggled: ToggleResponse = Self::decode(response).await?;
        Ok(toggled.favorited)
    }

    /// IDs of the user's favorited products.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn favorite_ids(&self, user: &UserId) -> Result<Vec<ProductId>, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!("/favorites/{user}")))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Full product details for the user's favorites.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn favorite_products(&self, user: &UserId) -> Result<Vec<Product>, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!("/favorites/{user}/products")))
            .send()
            .await?;

        Self::decode(response).await
    }
}
