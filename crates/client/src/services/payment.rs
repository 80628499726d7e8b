//! Payment provider client.
//!
//! Confirms server-issued payment intents with the card provider. A decline
//! is a first-class outcome with the provider's reason attached, distinct
//! from transport failure; the orchestrator aborts the whole checkout on
//! either.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use mangaba_core::PaymentIntentId;

use crate::config::ClientConfig;
use crate::models::PaymentIntent;

/// Errors that can occur when confirming a payment.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider declined the charge.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The provider returned an error response.
    #[error("provider error: {status} - {message}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Provider-supplied message.
        message: String,
    },

    /// Unexpected response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Card data collected client-side.
///
/// Number and CVV never appear in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct CardDetails {
    /// Name on the card.
    pub holder_name: String,
    /// Card number.
    pub number: SecretString,
    /// Expiry in `MM/YY` form.
    pub expiry: String,
    /// Security code.
    pub cvv: SecretString,
}

/// A successful charge confirmation.
#[derive(Debug, Clone)]
pub struct Confirmation {
    /// The intent that was confirmed.
    pub intent_id: PaymentIntentId,
}

/// Seam trait for the payment provider, faked in workflow tests.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Confirm a card charge for a server-issued intent.
    async fn confirm_card(
        &self,
        intent: &PaymentIntent,
        card: &CardDetails,
    ) -> Result<Confirmation, PaymentError>;
}

/// Wire shape of the provider's confirmation response.
#[derive(Debug, Deserialize)]
struct ConfirmBody {
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

/// HTTP payment provider client.
#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    base_url: String,
}

impl PaymentClient {
    /// Create a new payment provider client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is malformed or the HTTP client fails
    /// to build.
    pub fn new(config: &ClientConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.payment_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| PaymentError::Parse(format!("invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert("Authorization", auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.payment_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl PaymentGateway for PaymentClient {
    async fn confirm_card(
        &self,
        intent: &PaymentIntent,
        card: &CardDetails,
    ) -> Result<Confirmation, PaymentError> {
        let url = format!("{}/v1/intents/{}/confirm", self.base_url, intent.id);

        let body = serde_json::json!({
            "clientSecret": intent.client_secret,
            "card": {
                "holderName": card.holder_name,
                "number": card.number.expose_secret(),
                "expiry": card.expiry,
                "cvv": card.cvv.expose_secret(),
            },
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: ConfirmBody = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        outcome(intent.id.clone(), body)
    }
}

/// Map the provider's confirmation body to an outcome.
fn outcome(intent_id: PaymentIntentId, body: ConfirmBody) -> Result<Confirmation, PaymentError> {
    match body.status.as_str() {
        "succeeded" => Ok(Confirmation { intent_id }),
        "declined" => Err(PaymentError::Declined(
            body.reason
                .unwrap_or_else(|| "card declined".to_owned()),
        )),
        other => Err(PaymentError::Parse(format!(
            "unexpected confirmation status: {other}"
        ))),
    }
}
