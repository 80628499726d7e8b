//! Live session lifecycle tests.
//!
//! These tests require a running backend seeded with the account
//! `integration@example.com` / `integration`. Run with:
//!
//! ```bash
//! cargo test -p mangaba-integration-tests -- --ignored
//! ```

#![allow(clippy::unwrap_used)]

use mangaba_client::session::AuthState;
use mangaba_core::Email;
use mangaba_integration_tests::test_state;

fn credentials() -> (Email, secrecy::SecretString) {
    (
        Email::parse("integration@example.com").unwrap(),
        "integration".into(),
    )
}

#[tokio::test]
#[ignore = "requires a running backend"]
async fn test_login_logout_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir);
    state.session().restore().await;
    assert_eq!(state.session().state(), AuthState::Unauthenticated);

    let (email, password) = credentials();
    let session = state.session().login(&email, &password).await.unwrap();
    assert_eq!(session.email, email);

    // The server-side record matches what login returned.
    let record = state.backend().user(&session.id).await.unwrap();
    assert_eq!(record.id, session.id);

    state.session().logout().await;
    assert_eq!(state.session().state(), AuthState::Unauthenticated);
}

#[tokio::test]
#[ignore = "requires a running backend"]
async fn test_session_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (email, password) = credentials();
    {
        let state = test_state(&dir);
        state.session().restore().await;
        state.session().login(&email, &password).await.unwrap();
    }

    // A fresh state over the same session file restores the login.
    let state = test_state(&dir);
    state.session().restore().await;
    let session = state.session().session().expect("restored session");
    assert_eq!(session.email, email);
}

#[tokio::test]
#[ignore = "requires a running backend"]
async fn test_wrong_password_is_invalid_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir);
    state.session().restore().await;

    let (email, _) = credentials();
    let result = state.session().login(&email, &"wrong-password".into()).await;
    assert!(matches!(
        result,
        Err(mangaba_client::session::AuthError::InvalidCredentials)
    ));
}
