//! Order and payment-intent endpoints.

use async_trait::async_trait;
use rust_decimal::Decimal;

use mangaba_core::UserId;

use crate::error::ApiError;
use crate::models::{NewOrder, Order, PaymentIntent};

use super::{BackendClient, OrderApi};

#[async_trait]
impl OrderApi for BackendClient {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let response = self
            .http()
            .post(self.url("/orders"))
            .json(order)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn orders_for_customer(&self, user: &UserId) -> Result<Vec<Order>, ApiError> {
        let response = self
            .http()
            .get(self.url(&format!("/orders/customer/{user}")))
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn create_payment_intent(&self, amount: Decimal) -> Result<PaymentIntent, ApiError> {
        let body = serde_json::json!({ "amount": amount });

        let response = self
            .http()
            .post(self.url("/payments/intents"))
            .json(&body)
            .send()
            .await?;

        Self::decode(response).await
    }
}
