//! Extract → reconcile → rooms, over one payload.

use innfare_core::{HotelPrice, RoomOffer};
use serde::Serialize;

use crate::extract::{extract_featured, extract_general};
use crate::payload::RawQuotePayload;
use crate::reconcile::{reconcile_with_trace, ReconcileTrace, ReconciledRate};
use crate::rooms::normalize_rooms;
use crate::types::CandidateSource;

/// A reconciled rate and the rooms derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedQuote {
    pub rate: ReconciledRate,
    pub rooms: Vec<RoomOffer>,
}

impl ResolvedQuote {
    /// Card price, when the winner carried a nightly price.
    #[must_use]
    pub fn hotel_price(&self) -> Option<HotelPrice> {
        let amount = self.rate.nightly_price()?;
        Some(HotelPrice {
            amount,
            currency: self.rate.currency().to_string(),
            total: self.rate.candidate.total_price,
        })
    }

    #[must_use]
    pub fn booking_link(&self) -> Option<&str> {
        self.rate.booking_link()
    }
}

/// Runs the full pure pipeline over `payload`.
#[must_use]
pub fn resolve_quote(payload: &RawQuotePayload, default_currency: &str) -> Option<ResolvedQuote> {
    resolve_quote_traced(payload, default_currency).0
}

/// Same as [`resolve_quote`], also returning the reconciliation trace.
#[must_use]
pub fn resolve_quote_traced(
    payload: &RawQuotePayload,
    default_currency: &str,
) -> (Option<ResolvedQuote>, ReconcileTrace) {
    let featured = extract_featured(payload, default_currency);
    let general = extract_general(payload, default_currency);

    let (rate, trace) = reconcile_with_trace(featured.as_ref(), general.as_ref());
    let Some(rate) = rate else {
        return (None, trace);
    };

    let other = match rate.candidate.source {
        CandidateSource::Featured => general.as_ref(),
        CandidateSource::General => featured.as_ref(),
    };
    let rooms = normalize_rooms(&rate, other);

    (Some(ResolvedQuote { rate, rooms }), trace)
}
