//! Checkout orchestration.
//!
//! Turns the current cart into a paid order through a fixed sequence:
//! validate preconditions, authorize payment (card only), persist the
//! order, then clear exactly the lines the order was built from. An atomic
//! in-flight guard rejects concurrent attempts so a double tap cannot
//! produce two orders.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use mangaba_core::{AddressId, OrderId, PaymentMethodKind, UserId, cart_total};

use crate::api::{CartApi, OrderApi};
use crate::cart::{CartError, CartSynchronizer};
use crate::error::ApiError;
use crate::models::{NewOrder, Order};
use crate::services::{CardDetails, PaymentError, PaymentGateway};
use crate::session::AuthState;

/// The payment method chosen for a checkout attempt.
pub enum PaymentSelection {
    /// Card payment; requires provider authorization before the order is
    /// placed.
    Card(CardDetails),
    /// Instant transfer; the backend settles it, no pre-authorization.
    Instant,
}

impl PaymentSelection {
    /// The method kind recorded on the order.
    #[must_use]
    pub fn kind(&self) -> PaymentMethodKind {
        match self {
            Self::Card(_) => PaymentMethodKind::Card,
            Self::Instant => PaymentMethodKind::Instant,
        }
    }
}

/// One checkout attempt: what to pay with, where to deliver.
pub struct CheckoutRequest {
    /// Selected payment method.
    pub payment: PaymentSelection,
    /// Selected delivery address, if the user picked one.
    pub address: Option<AddressId>,
}

/// Errors a checkout attempt can end in.
///
/// The variants are ordered by protocol step; everything before
/// [`CheckoutError::CartNotCleared`] means no durable state was left
/// behind beyond what the variant names.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Another attempt is already running.
    #[error("a checkout is already in progress")]
    InProgress,

    /// No user is signed in.
    #[error("not signed in")]
    NotAuthenticated,

    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// No delivery address was selected.
    #[error("no delivery address selected")]
    MissingAddress,

    /// The backend failed to issue a payment intent. No charge was made,
    /// no order exists.
    #[error("payment authorization failed: {0}")]
    Authorization(#[source] ApiError),

    /// The provider declined or failed the charge. No order exists.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// The backend refused the order after payment succeeded.
    #[error("order could not be placed: {0}")]
    OrderNotPlaced(#[source] ApiError),

    /// The order exists but the purchased lines could not be cleared from
    /// the cart.
    #[error("order {order_id} was placed but the cart could not be cleared")]
    CartNotCleared {
        /// The order that was successfully placed.
        order_id: OrderId,
        /// The clearing failure.
        #[source]
        source: CartError,
    },
}

/// Releases the in-flight flag when the attempt ends, however it ends.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs the checkout protocol over the session, cart, backend, and payment
/// provider.
pub struct CheckoutOrchestrator<C, O, P> {
    auth: watch::Receiver<AuthState>,
    cart: Arc<CartSynchronizer<C>>,
    orders: O,
    payments: P,
    in_flight: AtomicBool,
}

impl<C, O, P> CheckoutOrchestrator<C, O, P>
where
    C: CartApi,
    O: OrderApi,
    P: PaymentGateway,
{
    /// Create an orchestrator over the given collaborators.
    pub fn new(
        auth: watch::Receiver<AuthState>,
        cart: Arc<CartSynchronizer<C>>,
        orders: O,
        payments: P,
    ) -> Self {
        Self {
            auth,
            cart,
            orders,
            payments,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one checkout attempt.
    ///
    /// The cart lines are snapshotted once, before payment; the order and
    /// the final clearing both operate on that snapshot, so lines added
    /// concurrently are not silently purchased or lost.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]; every failure before order creation leaves
    /// the cart untouched.
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<Order, CheckoutError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            return Err(CheckoutError::InProgress);
        };

        // Preconditions, before any network call.
        let user = self.user_id()?;
        let lines = self.cart.lines();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let address = request.address.ok_or(CheckoutError::MissingAddress)?;

        let total = cart_total(lines.iter().map(|l| (l.unit_price, l.quantity)));
        info!(%user, lines = lines.len(), %total, "checkout started");

        // Card payments are authorized before the order exists.
        if let PaymentSelection::Card(card) = &request.payment {
            let intent = self
                .orders
                .create_payment_intent(total)
                .await
                .map_err(CheckoutError::Authorization)?;

            let confirmation = self.payments.confirm_card(&intent, card).await?;
            debug!(intent = %confirmation.intent_id, "payment confirmed");
        }

        let new_order = NewOrder::from_lines(user, &lines, request.payment.kind(), address);
        let order = self
            .orders
            .create_order(&new_order)
            .await
            .map_err(CheckoutError::OrderNotPlaced)?;

        // Clear exactly the lines the order was built from.
        if let Err(source) = self.cart.clear_lines(&lines).await {
            warn!(order = %order.id, error = %source, "order placed but cart not cleared");
            return Err(CheckoutError::CartNotCleared {
                order_id: order.id.clone(),
                source,
            });
        }

        info!(order = %order.id, "checkout complete");
        Ok(order)
    }

    fn user_id(&self) -> Result<UserId, CheckoutError> {
        self.auth
            .borrow()
            .session()
            .map(|s| s.id.clone())
            .ok_or(CheckoutError::NotAuthenticated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tokio::sync::Notify;

    use crate::testing::{authenticated, card_fixture, line_fixture, FakeBackend, FakeGateway};

    fn two_line_backend() -> FakeBackend {
        FakeBackend::default().with_lines(vec![
            line_fixture("line-1", "u-1", 10000, 1),
            line_fixture("line-2", "u-1", 2500, 2),
        ])
    }

    async fn orchestrator(
        backend: FakeBackend,
        gateway: FakeGateway,
    ) -> CheckoutOrchestrator<FakeBackend, FakeBackend, FakeGateway> {
        let auth = authenticated("u-1");
        let cart = Arc::new(CartSynchronizer::new(backend.clone(), auth.clone()));
        cart.fetch().await.ok();
        CheckoutOrchestrator::new(auth, cart, backend, gateway)
    }

    fn card_request() -> CheckoutRequest {
        CheckoutRequest {
            payment: PaymentSelection::Card(card_fixture()),
            address: Some(AddressId::new("addr-1")),
        }
    }

    #[tokio::test]
    async fn test_successful_card_checkout_places_order_and_empties_cart() {
        let backend = two_line_backend();
        let flow = orchestrator(backend.clone(), FakeGateway::default()).await;

        let order = flow.checkout(card_request()).await.unwrap();

        // Total is the pre-checkout cart total, 100.00 + 2 * 25.00.
        assert_eq!(order.total, Decimal::new(15000, 2));
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.payment_method, PaymentMethodKind::Card);

        assert!(flow.cart.lines().is_empty());
        assert_eq!(backend.state().orders.len(), 1);
        assert!(backend.state().lines.is_empty());
    }

    #[tokio::test]
    async fn test_instant_checkout_skips_payment_authorization() {
        let backend = two_line_backend();
        // A declining gateway proves the gateway is never consulted.
        let gateway = FakeGateway {
            decline: Some("should not be called".to_owned()),
            gate: None,
        };
        let flow = orchestrator(backend, gateway).await;

        let order = flow
            .checkout(CheckoutRequest {
                payment: PaymentSelection::Instant,
                address: Some(AddressId::new("addr-1")),
            })
            .await
            .unwrap();

        assert_eq!(order.payment_method, PaymentMethodKind::Instant);
    }

    #[tokio::test]
    async fn test_declined_payment_leaves_cart_and_orders_untouched() {
        let backend = two_line_backend();
        let gateway = FakeGateway {
            decline: Some("insufficient funds".to_owned()),
            gate: None,
        };
        let flow = orchestrator(backend.clone(), gateway).await;

        let result = flow.checkout(card_request()).await;
        match result {
            Err(CheckoutError::Payment(PaymentError::Declined(reason))) => {
                assert_eq!(reason, "insufficient funds");
            }
            other => panic!("expected decline, got {other:?}"),
        }

        // No order, cart unchanged at 150.00.
        assert!(backend.state().orders.is_empty());
        assert_eq!(flow.cart.lines().len(), 2);
        assert_eq!(flow.cart.total(), Decimal::new(15000, 2));
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_before_any_call() {
        let backend = FakeBackend::default();
        let flow = orchestrator(backend.clone(), FakeGateway::default()).await;

        assert!(matches!(
            flow.checkout(card_request()).await,
            Err(CheckoutError::EmptyCart)
        ));
        assert!(backend.state().orders.is_empty());
    }

    #[tokio::test]
    async fn test_missing_address_is_rejected() {
        let flow = orchestrator(two_line_backend(), FakeGateway::default()).await;

        let request = CheckoutRequest {
            payment: PaymentSelection::Instant,
            address: None,
        };
        assert!(matches!(
            flow.checkout(request).await,
            Err(CheckoutError::MissingAddress)
        ));
    }

    #[tokio::test]
    async fn test_unauthenticated_checkout_is_rejected() {
        let backend = two_line_backend();
        let auth = watch::channel(AuthState::Unauthenticated).1;
        let cart = Arc::new(CartSynchronizer::new(backend.clone(), auth.clone()));
        let flow = CheckoutOrchestrator::new(auth, cart, backend, FakeGateway::default());

        assert!(matches!(
            flow.checkout(card_request()).await,
            Err(CheckoutError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_rejected_order_keeps_cart() {
        let backend = two_line_backend();
        let flow = orchestrator(backend.clone(), FakeGateway::default()).await;

        backend.state().fail_orders = true;
        assert!(matches!(
            flow.checkout(card_request()).await,
            Err(CheckoutError::OrderNotPlaced(_))
        ));

        assert_eq!(flow.cart.lines().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_checkout_is_rejected_while_first_is_in_flight() {
        let backend = two_line_backend();
        let gate = Arc::new(Notify::new());
        let gateway = FakeGateway {
            decline: None,
            gate: Some(gate.clone()),
        };
        let flow = Arc::new(orchestrator(backend, gateway).await);

        // First attempt parks inside payment confirmation.
        let first = tokio::spawn({
            let flow = flow.clone();
            async move { flow.checkout(card_request()).await }
        });
        tokio::task::yield_now().await;

        // Second attempt while the first holds the guard.
        assert!(matches!(
            flow.checkout(card_request()).await,
            Err(CheckoutError::InProgress)
        ));

        gate.notify_one();
        let order = first.await.unwrap().unwrap();
        assert_eq!(order.total, Decimal::new(15000, 2));

        // Guard released; a fresh attempt fails on the now-empty cart, not
        // on the in-flight guard.
        assert!(matches!(
            flow.checkout(card_request()).await,
            Err(CheckoutError::EmptyCart)
        ));
    }
}
