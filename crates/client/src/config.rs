//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MANGABA_API_URL` - Base URL of the Mangaba backend
//! - `MANGABA_PAYMENT_URL` - Base URL of the payment provider
//! - `MANGABA_PAYMENT_KEY` - Payment provider API key
//!
//! ## Optional
//! - `MANGABA_POSTAL_URL` - Postal lookup base URL (default: ViaCEP)
//! - `MANGABA_SESSION_FILE` - Path of the persisted session record
//!   (default: `mangaba-session.json`)
//! - `MANGABA_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Default postal lookup service.
const DEFAULT_POSTAL_URL: &str = "https://viacep.com.br/ws";

/// Default path of the persisted session record.
const DEFAULT_SESSION_FILE: &str = "mangaba-session.json";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Mangaba backend.
    pub api_url: String,
    /// Base URL of the postal lookup service.
    pub postal_url: String,
    /// Base URL of the payment provider.
    pub payment_url: String,
    /// Payment provider API key.
    pub payment_key: SecretString,
    /// Where the session record is persisted.
    pub session_file: PathBuf,
    /// Per-request timeout for all HTTP calls.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    ///
    /// `from_env` is this with `std::env::var`; tests supply a map instead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = required(&lookup, "MANGABA_API_URL")?;
        let payment_url = required(&lookup, "MANGABA_PAYMENT_URL")?;
        let payment_key = SecretString::from(required(&lookup, "MANGABA_PAYMENT_KEY")?);

        let postal_url =
            lookup("MANGABA_POSTAL_URL").unwrap_or_else(|| DEFAULT_POSTAL_URL.to_owned());

        let session_file = lookup("MANGABA_SESSION_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        let request_timeout = match lookup("MANGABA_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        "MANGABA_REQUEST_TIMEOUT_SECS".to_owned(),
                        format!("not a number of seconds: {raw}"),
                    )
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            postal_url,
            payment_url,
            payment_key,
            session_file,
            request_timeout,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_owned()))
}
