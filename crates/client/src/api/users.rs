//! User profile endpoints.

use mangaba_core::UserId;

use crate::error::ApiError;
use crate::models::Session;

use super::BackendClient;

impl BackendClient {
    /// Fetch the current server-side user record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the user is unknown.
    pub async fn user(&self, id: &UserId) -> Result<Session, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!("/users/{id}")))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Update the user's profile fields and return the new record.
    ///
    /// The caller is expected to feed the returned record into
    /// `SessionManager::apply_profile` so the persisted session stays in
    /// step with the server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or is refused.
    pub async fn update_user(&self, session: &Session) -> Result<Session, ApiError> {
        let response = self
            .http()
            .put(self.url(&format!("/users/{}", session.id)))
            .json(session)
            .send()
            .await?;

        Self::decode(response).await
    }
}
