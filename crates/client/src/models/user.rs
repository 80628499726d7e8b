//! User and session types.

use chrono::NaiveDate;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use mangaba_core::{Email, UserId};

/// The currently authenticated identity, as returned by the backend.
///
/// At most one `Session` is materialized client-side at a time; its absence
/// is the unauthenticated state. The `id` is server-assigned and immutable;
/// the record is replaced wholesale on profile update, never mutated field
/// by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Server-assigned user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: Email,
    /// Tax ID (CPF), if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    /// Phone number, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Birth date, if provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

/// Personal fields for registration.
///
/// The password never appears in `Debug` output; the registration payload is
/// assembled by hand in the API layer so the secret is only exposed at the
/// serialization boundary.
#[derive(Debug, Clone)]
pub struct RegisterProfile {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: Email,
    /// Plain-text password, sent once over the wire.
    pub password: SecretString,
    /// Tax ID (CPF), if provided.
    pub tax_id: Option<String>,
    /// Phone number, if provided.
    pub phone: Option<String>,
    /// Birth date, if provided.
    pub birth_date: Option<NaiveDate>,
}
