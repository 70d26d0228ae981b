use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stay parameters taken from the page request.
///
/// Dates are optional because the page can be rendered without a date
/// range; enrichment is skipped entirely in that case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayParams {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
}

impl Default for StayParams {
    fn default() -> Self {
        Self {
            check_in: None,
            check_out: None,
            adults: 2,
            children: 0,
            rooms: 1,
        }
    }
}

impl StayParams {
    /// Builds the upstream request for one property.
    ///
    /// Returns `None` when either date is missing or the range is empty
    /// (`check_out <= check_in`); no partial attempt is ever made.
    #[must_use]
    pub fn quote_request(&self, property_token: &str, query: Option<&str>) -> Option<QuoteRequest> {
        let check_in = self.check_in?;
        let check_out = self.check_out?;
        if check_out <= check_in {
            return None;
        }

        let property_token = property_token.trim();
        if property_token.is_empty() {
            return None;
        }

        Some(QuoteRequest {
            property_token: property_token.to_string(),
            check_in,
            check_out,
            adults: self.adults.max(1),
            children: self.children,
            rooms: self.rooms.max(1),
            query: query
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
        })
    }

    /// Number of nights in the stay, when both dates are present and ordered.
    #[must_use]
    pub fn nights(&self) -> Option<i64> {
        let days = (self.check_out? - self.check_in?).num_days();
        (days > 0).then_some(days)
    }
}

/// A fully-specified request for one property's quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub property_token: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
    /// Free-text hint (usually the hotel name) forwarded to the provider.
    pub query: Option<String>,
}
