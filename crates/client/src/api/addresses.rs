//! Address book endpoints.

use mangaba_core::{AddressId, UserId};

use crate::error::ApiError;
use crate::models::{Address, NewAddress};

use super::BackendClient;

impl BackendClient {
    /// All addresses belonging to a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn addresses(&self, user: &UserId) -> Result<Vec<Address>, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!(
                "/addresses?userId={}",
                urlencoding::encode(user.as_str())
            )))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Create an address for a user.
    ///
    /// The client sends the `primary` flag as entered; it does not clear the
    /// flag on the user's other addresses. Exclusivity is the backend's
    /// concern.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is refused.
    pub async fn create_address(
        &self,
        user: &UserId,
        address: &NewAddress,
    ) -> Result<Address, ApiError> {
        let mut body = serde_json::to_value(address).map_err(|e| ApiError::Parse(e.to_string()))?;
        body["userId"] = serde_json::Value::String(user.as_str().to_owned());

        let response = self
            .http()
            .post(self.url("/addresses"))
            .json(&body)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Replace an existing address.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is refused.
    pub async fn update_address(
        &self,
        id: &AddressId,
        address: &NewAddress,
    ) -> Result<Address, ApiError> {
        let response = self
            .http()
            .put(self.url(&format!("/addresses/{id}")))
            .json(address)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Delete an address.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is refused.
    pub async fn delete_address(&self, id: &AddressId) -> Result<(), ApiError> {
        let response = self
            .http()
            .delete(self.url(&format!("/addresses/{id}")))
            .send()
            .await?;

        Self::expect_success(response).await
    }
}
