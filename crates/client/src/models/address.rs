//! Delivery address types.

use serde::{Deserialize, Serialize};

use mangaba_core::{AddressId, PostalCode, UserId};

/// A delivery location belonging to a user.
///
/// Created and edited through a form pre-filled by postal-code lookup;
/// checkout only references it, never mutates it. The client sets `primary`
/// at creation time but does not enforce that only one address per user
/// carries the flag; exclusivity is the backend's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Server-assigned address ID.
    pub id: AddressId,
    /// Owning user.
    pub user_id: UserId,
    /// Postal code.
    pub postal_code: PostalCode,
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// Apartment, unit, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    /// Neighborhood.
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// Two-letter region/state code.
    pub region: String,
    /// Whether this is the user's primary address.
    #[serde(rename = "isPrimary", default)]
    pub primary: bool,
}

/// Address creation/update payload.
///
/// Used both on its own (address book) and embedded in the registration
/// payload, where the owning user does not exist yet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    /// Postal code.
    pub postal_code: PostalCode,
    /// Street name.
    pub street: String,
    /// Street number.
    pub number: String,
    /// Apartment, unit, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    /// Neighborhood.
    pub neighborhood: String,
    /// City.
    pub city: String,
    /// Two-letter region/state code.
    pub region: String,
    /// Whether this should be the user's primary address.
    #[serde(rename = "isPrimary")]
    pub primary: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_address_wire_shape() {
        let json = r#"{
            "id": "addr-1",
            "userId": "u-1",
            "postalCode": "01310100",
            "street": "Avenida Paulista",
            "number": "1000",
            "neighborhood": "Bela Vista",
            "city": "São Paulo",
            "region": "SP",
            "isPrimary": true
        }"#;

        let address: Address = serde_json::from_str(json).unwrap();
        assert!(address.primary);
        assert_eq!(address.complement, None);
        assert_eq!(address.postal_code.to_string(), "01310-100");
    }
}
