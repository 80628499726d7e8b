//! Live postal lookup against the real ViaCEP service.

#![allow(clippy::unwrap_used)]

use mangaba_client::services::PostalError;
use mangaba_core::PostalCode;
use mangaba_integration_tests::test_state;

#[tokio::test]
#[ignore = "requires network access"]
async fn test_known_postal_code_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir);

    let code = PostalCode::parse("01310-100").unwrap();
    let address = state.postal().lookup(&code).await.unwrap();

    assert_eq!(address.city, "São Paulo");
    assert_eq!(address.region, "SP");
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_unknown_postal_code_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&dir);

    // Structurally valid, unassigned.
    let code = PostalCode::parse("00000000").unwrap();
    let result = state.postal().lookup(&code).await;

    assert!(matches!(result, Err(PostalError::NotFound(_))));
}
