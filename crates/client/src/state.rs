//! Application state wiring the workflow components together.

use std::sync::Arc;

use crate::api::BackendClient;
use crate::cart::CartSynchronizer;
use crate::checkout::CheckoutOrchestrator;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::services::{PaymentClient, PaymentError, PostalError, PostalLookupClient};
use crate::session::{FileSessionStore, SessionManager};

/// Error assembling the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("backend client: {0}")]
    Backend(#[from] ApiError),
    #[error("payment client: {0}")]
    Payment(#[from] PaymentError),
    #[error("postal client: {0}")]
    Postal(#[from] PostalError),
}

/// Everything a frontend needs, wired once at startup.
///
/// Cheaply cloneable via `Arc`. The concrete HTTP clients share one
/// [`BackendClient`]; the workflow components observe the session state
/// through watch channels, so the manager must be created first and its
/// subscription handed to the cart and checkout.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    backend: BackendClient,
    session: SessionManager<BackendClient, FileSessionStore>,
    cart: Arc<CartSynchronizer<BackendClient>>,
    checkout: CheckoutOrchestrator<BackendClient, BackendClient, PaymentClient>,
    postal: PostalLookupClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the HTTP clients fails to build.
    pub fn new(config: ClientConfig) -> Result<Self, StateError> {
        let backend = BackendClient::new(&config)?;
        let payments = PaymentClient::new(&config)?;
        let postal = PostalLookupClient::new(&config)?;

        let store = FileSessionStore::new(&config.session_file);
        let session = SessionManager::new(backend.clone(), store);

        let cart = Arc::new(CartSynchronizer::new(backend.clone(), session.subscribe()));
        let checkout = CheckoutOrchestrator::new(
            session.subscribe(),
            Arc::clone(&cart),
            backend.clone(),
            payments,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                session,
                cart,
                checkout,
                postal,
            }),
        })
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Get a reference to the backend REST client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the session manager.
    #[must_use]
    pub fn session(&self) -> &SessionManager<BackendClient, FileSessionStore> {
        &self.inner.session
    }

    /// Get a reference to the cart synchronizer.
    #[must_use]
    pub fn cart(&self) -> &CartSynchronizer<BackendClient> {
        &self.inner.cart
    }

    /// Get a reference to the checkout orchestrator.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutOrchestrator<BackendClient, BackendClient, PaymentClient> {
        &self.inner.checkout
    }

    /// Get a reference to the postal lookup client.
    #[must_use]
    pub fn postal(&self) -> &PostalLookupClient {
        &self.inner.postal
    }
}
