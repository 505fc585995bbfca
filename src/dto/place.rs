use serde::{Deserialize, Serialize};

use crate::models::place::{Address, PlaceType};
use crate::utils::validate::{
    check_member, check_nested, field_path, require_string, ValidateBody, Violations,
};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlacePayload {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    pub address: Option<AddressPayload>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddressPayload {
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub number_house: Option<String>,
    pub complement: Option<String>,
}

#[derive(Debug)]
pub struct PlaceDraft {
    pub name: String,
    pub place_type: PlaceType,
    pub address: Address,
}

impl ValidateBody for AddressPayload {
    type Output = Address;

    fn check(&self, prefix: &str, violations: &mut Violations) -> Option<Address> {
        let postal_code = require_string(violations, prefix, "postalCode", &self.postal_code)
            .and_then(|value| {
                if is_postal_code(value) {
                    Some(value)
                } else {
                    violations.add(
                        &field_path(prefix, "postalCode"),
                        "must be a valid postal code",
                    );
                    None
                }
            });
        let street = require_string(violations, prefix, "street", &self.street);
        let number_house = require_string(violations, prefix, "numberHouse", &self.number_house);

        let complement = self
            .complement
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Some(Address {
            postal_code: postal_code?.to_string(),
            street: street?.to_string(),
            number_house: number_house?.to_string(),
            complement,
        })
    }
}

impl ValidateBody for PlacePayload {
    type Output = PlaceDraft;

    fn check(&self, prefix: &str, violations: &mut Violations) -> Option<PlaceDraft> {
        let name = require_string(violations, prefix, "name", &self.name);
        let place_type = check_member(
            violations,
            prefix,
            "type",
            &self.place_type,
            &PlaceType::NAMES,
        )
        .and_then(|value| value.parse::<PlaceType>().ok());
        let address = check_nested(violations, prefix, "address", &self.address);

        Some(PlaceDraft {
            name: name?.to_string(),
            place_type: place_type?,
            address: address?,
        })
    }
}

/// Postal codes in the CEP form `NNNNN-NNN` (hyphen optional).
fn is_postal_code(value: &str) -> bool {
    let digits: Vec<char> = value.chars().filter(|c| c.is_ascii_digit()).collect();
    let separators_ok = value.chars().all(|c| c.is_ascii_digit() || c == '-');
    digits.len() == 8 && separators_ok
}
