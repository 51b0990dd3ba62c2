use crate::domain::money::Money;
use crate::error::RealtyError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Casa,
    Apartamento,
    Cobertura,
    Studio,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casa => "casa",
            Self::Apartamento => "apartamento",
            Self::Cobertura => "cobertura",
            Self::Studio => "studio",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = RealtyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casa" => Ok(Self::Casa),
            "apartamento" => Ok(Self::Apartamento),
            "cobertura" => Ok(Self::Cobertura),
            "studio" => Ok(Self::Studio),
            other => Err(RealtyError::validation(format!(
                "Unknown property type '{other}'"
            ))),
        }
    }
}

/// Slug identifying a region, e.g. `praia-bela` or `centro`.
///
/// Keys are stored trimmed and lower-cased, whichever way they are built.
#[derive(Debug, Serialize, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocationKey {
    type Err = RealtyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.is_empty() {
            return Err(RealtyError::validation("Location key must not be empty"));
        }
        Ok(Self(key.to_lowercase()))
    }
}

impl<'de> Deserialize<'de> for LocationKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A listing in the agency's catalog.
///
/// Listings are reference data: the engine reads them but never creates,
/// updates or deletes them.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Property {
    pub id: u32,
    pub title: String,
    /// Asking price in whole reais.
    pub price: u64,
    pub location: LocationKey,
    pub r#type: PropertyType,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Usable area in square meters.
    pub area: Decimal,
    pub garage: bool,
    pub pool: bool,
    pub furnished: bool,
    pub balcony: bool,
    pub featured: bool,
    pub created_at: NaiveDate,
}

impl Property {
    pub fn price_money(&self) -> Money {
        Money::from_units(self.price)
    }

    /// Price rendered without cents, matching the listing cards: `R$ 850.000`.
    pub fn price_formatted(&self) -> String {
        let full = self.price_money().format_brl();
        full.trim_end_matches(",00").to_string()
    }

    /// Checks the record invariants that the type system does not already enforce.
    pub fn validate(&self) -> Result<(), RealtyError> {
        if self.area.is_sign_negative() && !self.area.is_zero() {
            return Err(RealtyError::validation(format!(
                "Property {} has a negative area",
                self.id
            )));
        }
        Ok(())
    }
}
