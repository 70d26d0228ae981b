//! Raw quote payload returned by the hotel-rate provider.
//!
//! ## Observed shape
//!
//! The provider answers with a loosely-typed object. The parts this crate
//! reads are:
//!
//! - `featured_prices`: list of entries the provider highlights. Usually one
//!   of them is the hotel's own channel (`"official": true`).
//! - `prices`: the general list of channels quoting the property. Several
//!   entries may be flagged official.
//! - `currency`, `search_parameters.currency`: currency of every amount.
//! - `error`, `search_metadata.status`: set when the search failed even
//!   though HTTP returned 2xx.
//!
//! Prices show up as numbers, numeric strings or formatted strings
//! (`"$1,234"`), and any of the lists above may be missing. Nothing is
//! deserialized into fixed structs; see [`crate::lookup`].

use serde_json::Value;

use crate::lookup::{array_at, str_at};

/// Key of the featured (primary) candidate list.
pub const FEATURED_KEY: &str = "featured_prices";
/// Key of the general candidate list.
pub const GENERAL_KEY: &str = "prices";

/// An untrusted provider response. Always a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuotePayload(Value);

impl RawQuotePayload {
    /// Wraps `value` when it is a JSON object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        value.is_object().then_some(Self(value))
    }

    #[must_use]
    pub fn featured_entries(&self) -> &[Value] {
        array_at(&self.0, &[FEATURED_KEY])
    }

    #[must_use]
    pub fn general_entries(&self) -> &[Value] {
        array_at(&self.0, &[GENERAL_KEY])
    }

    /// Payload-level currency, if the provider reported one.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        str_at(&self.0, &["currency"]).or_else(|| str_at(&self.0, &["search_parameters", "currency"]))
    }

    /// Error message embedded in a 2xx response, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if let Some(msg) = str_at(&self.0, &["error"]) {
            return Some(msg.to_string());
        }
        match str_at(&self.0, &["search_metadata", "status"]) {
            Some(status) if status.eq_ignore_ascii_case("error") => {
                Some("search_metadata.status is Error".to_string())
            }
            _ => None,
        }
    }

    /// Presence flags used in debug traces.
    #[must_use]
    pub fn presence(&self) -> PayloadPresence {
        PayloadPresence {
            has_featured: !self.featured_entries().is_empty(),
            has_general: !self.general_entries().is_empty(),
            has_error: self.error_message().is_some(),
        }
    }
}

/// Which parts of a payload were present. Carries no prices or identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadPresence {
    pub has_featured: bool,
    pub has_general: bool,
    pub has_error: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_value_rejects_non_objects() {
        assert!(RawQuotePayload::from_value(json!([1, 2])).is_none());
        assert!(RawQuotePayload::from_value(json!("x")).is_none());
        assert!(RawQuotePayload::from_value(json!({})).is_some());
    }

    #[test]
    fn entries_default_to_empty() {
        let p = RawQuotePayload::from_value(json!({"prices": "oops"})).unwrap();
        assert!(p.featured_entries().is_empty());
        assert!(p.general_entries().is_empty());
    }

    #[test]
    fn currency_falls_back_to_search_parameters() {
        let p = RawQuotePayload::from_value(json!({"search_parameters": {"currency": "EUR"}}))
            .unwrap();
        assert_eq!(p.currency(), Some("EUR"));
    }

    #[test]
    fn error_message_from_error_field() {
        let p = RawQuotePayload::from_value(json!({"error": "Invalid API key."})).unwrap();
        assert_eq!(p.error_message().as_deref(), Some("Invalid API key."));
    }

    #[test]
    fn error_message_from_metadata_status() {
        let p = RawQuotePayload::from_value(json!({"search_metadata": {"status": "Error"}}))
            .unwrap();
        assert!(p.error_message().is_some());

        let ok = RawQuotePayload::from_value(json!({"search_metadata": {"status": "Success"}}))
            .unwrap();
        assert!(ok.error_message().is_none());
    }

    #[test]
    fn presence_flags() {
        let p = RawQuotePayload::from_value(json!({
            "featured_prices": [{"official": true}],
            "prices": []
        }))
        .unwrap();
        assert_eq!(
            p.presence(),
            PayloadPresence {
                has_featured: true,
                has_general: false,
                has_error: false
            }
        );
    }
}
