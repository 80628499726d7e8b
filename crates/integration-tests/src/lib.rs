//! Integration tests for the Mangaba storefront client.
//!
//! The tests in `tests/` drive the real [`mangaba_client::AppState`] against
//! a live backend and are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Point the client at a test backend
//! export MANGABA_API_URL=http://localhost:3000
//! export MANGABA_PAYMENT_URL=http://localhost:3100
//! export MANGABA_PAYMENT_KEY=test_key
//!
//! # Run the ignored live tests
//! cargo test -p mangaba-integration-tests -- --ignored
//! ```
//!
//! The backend must be seeded with the account
//! `integration@example.com` / `integration` and at least one product.

use mangaba_client::{AppState, ClientConfig};

/// Build an [`AppState`] from the environment, with the session persisted
/// to a per-run temp file so tests never share login state.
///
/// # Panics
///
/// Panics if required environment variables are missing or a client fails
/// to build; these tests only run when the environment is prepared.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_state(session_dir: &tempfile::TempDir) -> AppState {
    dotenvy::dotenv().ok();

    let session_file = session_dir.path().join("session.json");
    let config = ClientConfig::from_lookup(|key| match key {
        "MANGABA_SESSION_FILE" => Some(session_file.to_string_lossy().into_owned()),
        other => std::env::var(other).ok(),
    })
    .unwrap();

    AppState::new(config).unwrap()
}
