//! Shared in-memory fakes and fixtures for workflow tests.
//!
//! The fakes implement the seam traits over a single locked state so a test
//! can drive the whole login → cart → checkout protocol without a network.
//! Failures are simulated as server rejections; the workflow components
//! treat every `ApiError` the same way for state-preservation purposes.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Notify;
use tokio::sync::watch;

use mangaba_core::{
    CartLineId, Email, OrderId, OrderStatus, PaymentIntentId, ProductId, UserId,
};

use crate::api::{AuthApi, CartApi, OrderApi};
use crate::error::ApiError;
use crate::models::{
    CartLine, NewAddress, NewCartLine, NewOrder, Order, PaymentIntent, RegisterProfile, Session,
};
use crate::services::{CardDetails, Confirmation, PaymentError, PaymentGateway};
use crate::session::AuthState;

// =============================================================================
// Fixtures
// =============================================================================

pub(crate) fn session_fixture(id: &str) -> Session {
    Session {
        id: UserId::new(id),
        name: format!("User {id}"),
        email: Email::parse(&format!("{id}@example.com")).expect("fixture email"),
        tax_id: None,
        phone: None,
        birth_date: None,
    }
}

pub(crate) fn line_fixture(id: &str, user: &str, cents: i64, quantity: u32) -> CartLine {
    CartLine {
        id: CartLineId::new(id),
        user_id: UserId::new(user),
        product_id: ProductId::new(format!("p-{id}")),
        name: format!("Product {id}"),
        unit_price: Decimal::new(cents, 2),
        image: None,
        quantity,
    }
}

/// A watch channel already in the authenticated state.
pub(crate) fn authenticated(id: &str) -> watch::Receiver<AuthState> {
    watch::channel(AuthState::Authenticated(session_fixture(id))).1
}

// =============================================================================
// FakeBackend
// =============================================================================

#[derive(Default)]
pub(crate) struct FakeState {
    /// Registered accounts: (email, password, session).
    pub users: Vec<(String, String, Session)>,
    pub lines: Vec<CartLine>,
    pub orders: Vec<Order>,
    pub next_id: u32,
    /// Simulate the backend refusing cart reads.
    pub fail_cart_reads: bool,
    /// Simulate the backend refusing cart mutations.
    pub fail_cart_mutations: bool,
    /// Simulate the backend refusing order creation.
    pub fail_orders: bool,
}

/// In-memory backend implementing the seam traits.
#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake state poisoned")
    }

    pub fn with_account(self, email: &str, password: &str, session: Session) -> Self {
        self.state()
            .users
            .push((email.to_owned(), password.to_owned(), session));
        self
    }

    pub fn with_lines(self, lines: Vec<CartLine>) -> Self {
        self.state().lines = lines;
        self
    }

    fn unavailable() -> ApiError {
        ApiError::Rejected {
            status: 503,
            message: "backend unavailable".to_owned(),
        }
    }
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn login(&self, email: &Email, password: &SecretString) -> Result<Session, ApiError> {
        let state = self.state();
        state
            .users
            .iter()
            .find(|(e, p, _)| e == email.as_str() && p == password.expose_secret())
            .map(|(_, _, session)| session.clone())
            .ok_or(ApiError::Rejected {
                status: 401,
                message: "invalid credentials".to_owned(),
            })
    }

    async fn register(
        &self,
        profile: &RegisterProfile,
        _address: &NewAddress,
    ) -> Result<Session, ApiError> {
        let mut state = self.state();

        if state.users.iter().any(|(e, _, _)| e == profile.email.as_str()) {
            return Err(ApiError::Rejected {
                status: 409,
                message: "email already registered".to_owned(),
            });
        }

        state.next_id += 1;
        let session = Session {
            id: UserId::new(format!("u-{}", state.next_id)),
            name: profile.name.clone(),
            email: profile.email.clone(),
            tax_id: profile.tax_id.clone(),
            phone: profile.phone.clone(),
            birth_date: profile.birth_date,
        };

        state.users.push((
            profile.email.as_str().to_owned(),
            profile.password.expose_secret().to_owned(),
            session.clone(),
        ));

        Ok(session)
    }
}

#[async_trait]
impl CartApi for FakeBackend {
    async fn cart_lines(&self, user: &UserId) -> Result<Vec<CartLine>, ApiError> {
        let state = self.state();
        if state.fail_cart_reads {
            return Err(Self::unavailable());
        }

        Ok(state
            .lines
            .iter()
            .filter(|l| &l.user_id == user)
            .cloned()
            .collect())
    }

    async fn add_cart_line(&self, line: &NewCartLine) -> Result<CartLine, ApiError> {
        let mut state = self.state();
        if state.fail_cart_mutations {
            return Err(Self::unavailable());
        }

        state.next_id += 1;
        let created = CartLine {
            id: CartLineId::new(format!("line-{}", state.next_id)),
            user_id: line.user_id.clone(),
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            image: line.image.clone(),
            quantity: line.quantity,
        };
        state.lines.push(created.clone());

        Ok(created)
    }

    async fn set_cart_quantity(&self, line: &CartLineId, quantity: u32) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.fail_cart_mutations {
            return Err(Self::unavailable());
        }

        match state.lines.iter_mut().find(|l| &l.id == line) {
            Some(existing) => {
                existing.quantity = quantity;
                Ok(())
            }
            None => Err(ApiError::Rejected {
                status: 404,
                message: "cart line not found".to_owned(),
            }),
        }
    }

    async fn delete_cart_line(&self, line: &CartLineId) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.fail_cart_mutations {
            return Err(Self::unavailable());
        }

        state.lines.retain(|l| &l.id != line);
        Ok(())
    }
}

#[async_trait]
impl OrderApi for FakeBackend {
    async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let mut state = self.state();
        if state.fail_orders {
            return Err(Self::unavailable());
        }

        state.next_id += 1;
        let created = Order {
            id: OrderId::new(format!("o-{}", state.next_id)),
            customer_id: order.customer_id.clone(),
            items: order.items.clone(),
            total: order.total,
            payment_method: order.payment_method,
            address_id: Some(order.address_id.clone()),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        state.orders.push(created.clone());

        Ok(created)
    }

    async fn orders_for_customer(&self, user: &UserId) -> Result<Vec<Order>, ApiError> {
        let state = self.state();
        let mut orders: Vec<Order> = state
            .orders
            .iter()
            .filter(|o| &o.customer_id == user)
            .cloned()
            .collect();
        orders.reverse();
        Ok(orders)
    }

    async fn create_payment_intent(&self, amount: Decimal) -> Result<PaymentIntent, ApiError> {
        let mut state = self.state();
        state.next_id += 1;

        Ok(PaymentIntent {
            id: PaymentIntentId::new(format!("pi-{}", state.next_id)),
            amount,
            client_secret: "secret".to_owned(),
        })
    }
}

// =============================================================================
// FakeGateway
// =============================================================================

/// Payment gateway fake: optionally declines, optionally parks the call
/// until released (for in-flight guard tests).
#[derive(Default)]
pub(crate) struct FakeGateway {
    pub decline: Option<String>,
    pub gate: Option<Arc<Notify>>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn confirm_card(
        &self,
        intent: &PaymentIntent,
        _card: &CardDetails,
    ) -> Result<Confirmation, PaymentError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.decline {
            Some(reason) => Err(PaymentError::Declined(reason.clone())),
            None => Ok(Confirmation {
                intent_id: intent.id.clone(),
            }),
        }
    }
}

pub(crate) fn card_fixture() -> CardDetails {
    CardDetails {
        holder_name: "ANA SOUZA".to_owned(),
        number: "4242424242424242".into(),
        expiry: "12/30".to_owned(),
        cvv: "123".into(),
    }
}
