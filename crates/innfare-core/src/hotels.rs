use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ConfigError;

/// A bookable room offer attached to a hotel after enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOffer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub booking_link: String,
    /// Always strictly positive.
    pub nightly_price: f64,
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refundable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_plan: Option<String>,
}

/// Nightly price shown on a hotel card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelPrice {
    pub amount: f64,
    pub currency: String,
    /// Whole-stay price, when the provider reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// A hotel record as served by the content store.
///
/// Fields the enrichment layer does not know about are kept in `extra`
/// and written back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(deserialize_with = "scalar_as_string")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        alias = "propertyToken",
        skip_serializing_if = "Option::is_none"
    )]
    pub property_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<HotelPrice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rooms: Vec<RoomOffer>,
    #[serde(
        default,
        alias = "officialBookingUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub official_booking_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Hotel {
    /// Creates a bare hotel record with no baseline price or rooms.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            property_token: None,
            price: None,
            rooms: Vec::new(),
            official_booking_url: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Returns the provider property token, ignoring blank values.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.property_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Uint(n) => n.to_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct HotelsFile {
    pub hotels: Vec<Hotel>,
}

/// Load and validate baseline hotel records from a YAML (or JSON) file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_hotels(path: &Path) -> Result<HotelsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::HotelsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_hotels(&content)
}

/// Parse and validate hotel records from an in-memory YAML/JSON document.
///
/// # Errors
///
/// Returns `ConfigError` if the document cannot be parsed or fails validation.
pub fn parse_hotels(content: &str) -> Result<HotelsFile, ConfigError> {
    let hotels_file: HotelsFile = serde_yaml::from_str(content)?;
    validate_hotels(&hotels_file)?;
    Ok(hotels_file)
}

fn validate_hotels(hotels_file: &HotelsFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for hotel in &hotels_file.hotels {
        let id = hotel.id.trim();
        if id.is_empty() {
            return Err(ConfigError::Validation(
                "hotel id must be non-empty".to_string(),
            ));
        }

        // Enrichment results are merged back by id.
        if !seen_ids.insert(id.to_string()) {
            return Err(ConfigError::Validation(format!(
                "duplicate hotel id: '{id}'"
            )));
        }

        if let Some(price) = &hotel.price {
            if !price.amount.is_finite() || price.amount < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "hotel '{id}' has invalid baseline price {}",
                    price.amount
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "hotels_test.rs"]
mod tests;
