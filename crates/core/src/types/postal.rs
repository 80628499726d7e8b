//! Postal code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PostalCodeError {
    /// The input does not contain exactly eight digits.
    #[error("postal code must have exactly 8 digits, got {0}")]
    WrongLength(usize),
}

/// An 8-digit postal code (CEP).
///
/// Stored as bare digits; formatting input such as `"01310-100"` is accepted
/// and normalized. Whether the code actually exists is the lookup service's
/// call, not ours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Parse a `PostalCode`, stripping any non-digit characters.
    ///
    /// # Errors
    ///
    /// Returns [`PostalCodeError::WrongLength`] if the input does not contain
    /// exactly eight digits.
    pub fn parse(s: &str) -> Result<Self, PostalCodeError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.len() != 8 {
            return Err(PostalCodeError::WrongLength(digits.len()));
        }

        Ok(Self(digits))
    }

    /// Returns the bare digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the code formatted for display (`01310-100`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl std::str::FromStr for PostalCode {
    type Err = PostalCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
