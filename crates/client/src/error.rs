//! Backend API error type.
//!
//! Every remote call resolves to one of three outcomes: it never completed
//! (network), it completed but was refused (rejected, with the server's
//! reason surfaced verbatim), or its body could not be understood (parse).
//! Component-level errors ([`crate::session::AuthError`],
//! [`crate::cart::CartError`], [`crate::checkout::CheckoutError`]) wrap this
//! type; nothing propagates as a panic.

use thiserror::Error;

/// Errors that can occur when talking to the Mangaba backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not complete; prior state is preserved and the
    /// caller may retry.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server refused the request. `message` carries the server's
    /// reason string verbatim where one was provided.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided reason, or the status text when absent.
        message: String,
    },

    /// The response body could not be deserialized.
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether this failure came from the server refusing the call, as
    /// opposed to the call never completing.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
