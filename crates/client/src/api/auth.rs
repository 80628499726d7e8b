//! Authentication endpoints.
//!
//! Credentials travel in a POST body, never in the URL. Payloads are
//! assembled by hand so passwords are only exposed at the serialization
//! boundary.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use mangaba_core::Email;

use crate::error::ApiError;
use crate::models::{NewAddress, RegisterProfile, Session};

use super::{AuthApi, BackendClient};

#[async_trait]
impl AuthApi for BackendClient {
    async fn login(&self, email: &Email, password: &SecretString) -> Result<Session, ApiError> {
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let response = self
            .http()
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn register(
        &self,
        profile: &RegisterProfile,
        address: &NewAddress,
    ) -> Result<Session, ApiError> {
        let body = serde_json::json!({
            "userData": {
                "name": profile.name,
                "email": profile.email,
                "password": profile.password.expose_secret(),
                "taxId": profile.tax_id,
                "phone": profile.phone,
                "birthDate": profile.birth_date,
            },
            "addressData": address,
        });

        let response = self
            .http()
            .post(self.url("/auth/register"))
            .json(&body)
            .send()
            .await?;

        Self::decode(response).await
    }
}
