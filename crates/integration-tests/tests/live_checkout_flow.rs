//! Live cart and checkout flow.
//!
//! Drives the full purchase path against a running backend: login, add a
//! product, place an instant order, and verify the cart is empty and the
//! order shows up in the history.

#![allow(clippy::unwrap_used)]

use mangaba_client::api::OrderApi;
use mangaba_client::checkout::{CheckoutRequest, PaymentSelection};
use mangaba_core::Email;
use mangaba_integration_tests::test_state;

#[tokio::test]
#[ignore = "requires a running backend"]
async fn test_instant_checkout_flow() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir);
    state.session().restore().await;

    let email = Email::parse("integration@example.com").unwrap();
    let session = state
        .session()
        .login(&email, &"integration".into())
        .await
        .unwrap();

    // Any seeded product will do.
    let products = state.backend().products(None, None).await.unwrap();
    let product = products.first().expect("backend must be seeded").clone();

    state.cart().add(&product, 1).await.unwrap();
    let lines = state.cart().lines();
    assert!(!lines.is_empty());
    let expected_total = state.cart().total();

    let address = state
        .backend()
        .addresses(&session.id)
        .await
        .unwrap()
        .into_iter()
        .next()
        .expect("account must have an address");

    let order = state
        .checkout()
        .checkout(CheckoutRequest {
            payment: PaymentSelection::Instant,
            address: Some(address.id),
        })
        .await
        .unwrap();

    assert_eq!(order.total, expected_total);
    assert!(state.cart().lines().is_empty());

    let history = state
        .backend()
        .orders_for_customer(&session.id)
        .await
        .unwrap();
    assert!(history.iter().any(|o| o.id == order.id));
}

#[tokio::test]
#[ignore = "requires a running backend"]
async fn test_empty_cart_checkout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir);
    state.session().restore().await;

    let email = Email::parse("integration@example.com").unwrap();
    state
        .session()
        .login(&email, &"integration".into())
        .await
        .unwrap();

    // Cart never fetched, published list is empty.
    let result = state
        .checkout()
        .checkout(CheckoutRequest {
            payment: PaymentSelection::Instant,
            address: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(mangaba_client::checkout::CheckoutError::EmptyCart)
    ));
}
