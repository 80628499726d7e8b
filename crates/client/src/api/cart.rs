//! Cart endpoints.

use async_trait::async_trait;

use mangaba_core::{CartLineId, UserId};

use crate::error::ApiError;
use crate::models::{CartLine, NewCartLine};

use super::{BackendClient, CartApi};

#[async_trait]
impl CartApi for BackendClient {
    async fn cart_lines(&self, user: &UserId) -> Result<Vec<CartLine>, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!("/cart/{user}")))
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn add_cart_line(&self, line: &NewCartLine) -> Result<CartLine, ApiError> {
        let response = self
            .http()
            .post(self.url("/cart"))
            .json(line)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn set_cart_quantity(&self, line: &CartLineId, quantity: u32) -> Result<(), ApiError> {
        let body = serde_json::json!({ "quantity": quantity });

        let response = self
            .http()
            .put(self.url(&format!("/cart/{line}")))
            .json(&body)
            .send()
            .await?;

        Self::expect_success(response).await
    }

    async fn delete_cart_line(&self, line: &CartLineId) -> Result<(), ApiError> {
        let response = self
            .http()
            .delete(self.url(&format!("/cart/{line}")))
            .send()
            .await?;

        Self::expect_success(response).await
    }
}
