//! Command implementations.

pub mod address;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod favorites;
pub mod orders;

use mangaba_client::AppState;
use mangaba_client::models::Session;
use thiserror::Error;

/// Errors raised by the commands themselves, before any client call.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command needs a signed-in user.
    #[error("not signed in; run `mangaba auth login` first")]
    NotSignedIn,

    /// An argument failed validation.
    #[error("{0}")]
    InvalidArgument(String),
}

/// The signed-in session, or a uniform error for commands that need one.
pub fn require_user(state: &AppState) -> Result<Session, CliError> {
    state.session().session().ok_or(CliError::NotSignedIn)
}
