//! Postal-code lookup client (ViaCEP contract).
//!
//! Resolves an 8-digit postal code to street/neighborhood/city/region for
//! address-form autofill. An unknown code is an explicit [`PostalError::NotFound`],
//! not an empty record, so callers never overwrite fields the user already
//! typed with blanks.

use serde::Deserialize;
use thiserror::Error;

use mangaba_core::PostalCode;

use crate::config::ClientConfig;

/// Errors that can occur during postal lookup.
#[derive(Debug, Error)]
pub enum PostalError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service does not know this postal code.
    #[error("postal code {0} not found")]
    NotFound(PostalCode),

    /// Unexpected response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A resolved postal address, ready to pre-fill the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    /// The code that was looked up.
    pub postal_code: PostalCode,
    /// Street name.
    pub street: String,
    /// Neighborhood.
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// Two-letter region/state code.
    pub region: String,
}

/// Wire shape of the lookup service response.
///
/// The service reports an unknown code as `{"erro": true}` with HTTP 200.
#[derive(Debug, Deserialize)]
struct LookupBody {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

/// Postal lookup client.
#[derive(Clone)]
pub struct PostalLookupClient {
    client: reqwest::Client,
    base_url: String,
}

impl PostalLookupClient {
    /// Create a new postal lookup client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, PostalError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.postal_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Resolve a postal code.
    ///
    /// # Errors
    ///
    /// Returns [`PostalError::NotFound`] for a code the service does not
    /// know, [`PostalError::Http`] if the request fails.
    pub async fn lookup(&self, code: &PostalCode) -> Result<PostalAddress, PostalError> {
        let url = format!("{}/{}/json/", self.base_url, code.as_str());

        let response = self.client.get(&url).send().await?;
        let body = response.text().await?;

        let parsed: LookupBody =
            serde_json::from_str(&body).map_err(|e| PostalError::Parse(e.to_string()))?;

        resolve(code, parsed)
    }
}

/// Map a lookup body to a result.
fn resolve(code: &PostalCode, body: LookupBody) -> Result<PostalAddress, PostalError> {
    if body.erro {
        return Err(PostalError::NotFound(code.clone()));
    }

    Ok(PostalAddress {
        postal_code: code.clone(),
        street: body.logradouro,
        neighborhood: body.bairro,
        city: body.localidade,
        region: body.uf,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn code(s: &str) -> PostalCode {
        PostalCode::parse(s).unwrap()
    }

    #[test]
    fn test_resolve_known_code() {
        let body: LookupBody = serde_json::from_str(
            r#"{
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP"
            }"#,
        )
        .unwrap();

        let address = resolve(&code("01310100"), body).unwrap();
        assert_eq!(address.street, "Avenida Paulista");
        assert_eq!(address.region, "SP");
    }

    #[test]
    fn test_resolve_unknown_code_is_not_found() {
        let body: LookupBody = serde_json::from_str(r#"{"erro": true}"#).unwrap();

        // "00000000" is structurally valid but unknown to the service
        assert!(matches!(
            resolve(&code("00000000"), body),
            Err(PostalError::NotFound(_))
        ));
    }
}
