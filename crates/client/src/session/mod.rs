//! Session lifecycle: authentication, persistence, and the observable
//! authentication state.
//!
//! The [`SessionManager`] is the single writer of [`AuthState`]. Observers
//! (the navigation gate, the cart, the checkout flow) hold a
//! [`tokio::sync::watch::Receiver`] and always see the latest state.

pub mod store;

use secrecy::SecretString;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use mangaba_core::Email;

use crate::api::AuthApi;
use crate::error::ApiError;
use crate::models::{NewAddress, RegisterProfile, Session};

pub use store::{FileSessionStore, SessionStore, StoreError};

/// The authentication state of the client.
///
/// `Loading` is entered exactly once, at startup, and left exactly once when
/// [`SessionManager::restore`] completes. Observers use it to hold rendering
/// until the answer to "who is logged in" is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Startup: the persisted session has not been read yet.
    Loading,
    /// No user is signed in.
    Unauthenticated,
    /// A user is signed in.
    Authenticated(Session),
}

impl AuthState {
    /// The signed-in session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Whether the startup restore has not completed yet.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Errors surfaced to the login and registration flows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the credentials.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The backend rejected the request; the reason is shown verbatim
    /// (duplicate email, validation failure).
    #[error("{reason}")]
    Rejected {
        /// Server-supplied reason.
        reason: String,
    },

    /// Transport or decoding failure.
    #[error(transparent)]
    Api(ApiError),
}

/// Owns the authentication lifecycle and the persisted session record.
///
/// All transitions of [`AuthState`] go through this type; everything else
/// only observes.
pub struct SessionManager<A, S> {
    api: A,
    store: S,
    state_tx: watch::Sender<AuthState>,
    state_rx: watch::Receiver<AuthState>,
}

impl<A, S> SessionManager<A, S>
where
    A: AuthApi,
    S: SessionStore,
{
    /// Create a manager in the `Loading` state.
    pub fn new(api: A, store: S) -> Self {
        let (state_tx, state_rx) = watch::channel(AuthState::Loading);
        Self {
            api,
            store,
            state_tx,
            state_rx,
        }
    }

    /// A snapshot of the current authentication state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to authentication state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state_rx.clone()
    }

    /// The signed-in session, if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.state_rx.borrow().session().cloned()
    }

    /// Read the persisted session and leave the `Loading` state.
    ///
    /// Storage failures degrade to the unauthenticated state; a corrupt or
    /// unreadable record never blocks startup.
    pub async fn restore(&self) {
        let state = match self.store.load().await {
            Ok(Some(session)) => {
                info!(user = %session.id, "session restored");
                AuthState::Authenticated(session)
            }
            Ok(None) => AuthState::Unauthenticated,
            Err(e) => {
                warn!(error = %e, "failed to read persisted session");
                AuthState::Unauthenticated
            }
        };

        self.state_tx.send_replace(state);
    }

    /// Sign in with email and password.
    ///
    /// On success the session is persisted and published; a persistence
    /// failure is logged and swallowed, the in-memory session stays
    /// authoritative for this run.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the backend refuses
    /// the credentials, [`AuthError::Api`] on transport failure. The
    /// published state is untouched on any failure.
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<Session, AuthError> {
        let session = self.api.login(email, password).await.map_err(|e| match e {
            ApiError::Rejected {
                status: 400 | 401 | 403,
                ..
            } => AuthError::InvalidCredentials,
            ApiError::Rejected { message, .. } => AuthError::Rejected { reason: message },
            other => AuthError::Api(other),
        })?;

        info!(user = %session.id, "login succeeded");
        self.persist(&session).await;
        self.state_tx
            .send_replace(AuthState::Authenticated(session.clone()));

        Ok(session)
    }

    /// Register a new account with its first delivery address.
    ///
    /// A successful registration signs the new user in directly.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with the server's reason verbatim
    /// (duplicate email, validation failure), [`AuthError::Api`] on
    /// transport failure. Any prior session is untouched on failure.
    pub async fn register(
        &self,
        profile: &RegisterProfile,
        address: &NewAddress,
    ) -> Result<Session, AuthError> {
        let session = self
            .api
            .register(profile, address)
            .await
            .map_err(|e| match e {
                ApiError::Rejected { message, .. } => AuthError::Rejected { reason: message },
                other => AuthError::Api(other),
            })?;

        info!(user = %session.id, "registration succeeded");
        self.persist(&session).await;
        self.state_tx
            .send_replace(AuthState::Authenticated(session.clone()));

        Ok(session)
    }

    /// Replace the published session after a profile update.
    ///
    /// The caller has already written the profile to the backend; this
    /// republishes and re-persists the result.
    pub async fn apply_profile(&self, session: Session) {
        self.persist(&session).await;
        self.state_tx.send_replace(AuthState::Authenticated(session));
    }

    /// Sign out. Idempotent; a storage failure still signs out in memory.
    pub async fn logout(&self) {
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to clear persisted session");
        }

        info!("logged out");
        self.state_tx.send_replace(AuthState::Unauthenticated);
    }

    async fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save(session).await {
            warn!(error = %e, "failed to persist session");
        }
    }
}
