use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "place_type")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    Touristic,
    Restaurant,
    Museum,
    Historic,
    Market,
}

impl PlaceType {
    pub const NAMES: [&'static str; 5] =
        ["touristic", "restaurant", "museum", "historic", "market"];
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlaceType::Touristic => "touristic",
            PlaceType::Restaurant => "restaurant",
            PlaceType::Museum => "museum",
            PlaceType::Historic => "historic",
            PlaceType::Market => "market",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PlaceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "touristic" => Ok(PlaceType::Touristic),
            "restaurant" => Ok(PlaceType::Restaurant),
            "museum" => Ok(PlaceType::Museum),
            "historic" => Ok(PlaceType::Historic),
            "market" => Ok(PlaceType::Market),
            _ => Err(()),
        }
    }
}

/// Postal address embedded in the place row (no table of its own).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub postal_code: String,
    pub street: String,
    pub number_house: String,
    pub complement: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub place_type: PlaceType,
    #[sqlx(flatten)]
    pub address: Address,
}

#[derive(Debug, Clone)]
pub struct NewPlace {
    pub name: String,
    pub place_type: PlaceType,
    pub address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_type_parses_every_listed_name() {
        for name in PlaceType::NAMES {
            assert!(name.parse::<PlaceType>().is_ok(), "{name} should parse");
        }
        assert!("stadium".parse::<PlaceType>().is_err());
    }

    #[test]
    fn place_serializes_with_nested_address_and_type_key() {
        let place = Place {
            id: Uuid::new_v4(),
            name: "Central Market".into(),
            place_type: PlaceType::Market,
            address: Address {
                postal_code: "01310-100".into(),
                street: "Av. Paulista".into(),
                number_house: "1578".into(),
                complement: None,
            },
        };

        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["type"], "market");
        assert_eq!(json["address"]["postalCode"], "01310-100");
        assert_eq!(json["address"]["numberHouse"], "1578");
    }
}
