//! Rate extractors: one authoritative candidate per payload list.
//!
//! Both extractors are pure. They never fail; a list without an official
//! entry simply yields `None`.

use serde_json::Value;

use crate::lookup::{array_at, bool_at, first_price, first_str_at, str_at};
use crate::payload::RawQuotePayload;
use crate::types::{CandidateRoom, CandidateSource, PriceCandidate, RoomSummary};

/// Nightly price lookup order. The first path yielding a number wins.
const NIGHTLY_PRICE_PATHS: [&[&str]; 7] = [
    &["rate_per_night", "extracted_before_taxes_fees"],
    &["rate_per_night", "extracted_lowest"],
    &["total_rate", "extracted_before_taxes_fees"],
    &["total_rate", "extracted_lowest"],
    &["extracted_before_taxes_fees"],
    &["extracted_lowest"],
    &["extracted_total"],
];

const TOTAL_PRICE_PATHS: [&[&str]; 3] = [
    &["total_rate", "extracted_before_taxes_fees"],
    &["total_rate", "extracted_lowest"],
    &["extracted_total"],
];

/// Nightly price of an entry or room, per [`NIGHTLY_PRICE_PATHS`].
#[must_use]
pub fn nightly_price(entry: &Value) -> Option<f64> {
    first_price(entry, &NIGHTLY_PRICE_PATHS)
}

fn is_official(entry: &Value) -> bool {
    bool_at(entry, &["official"]).unwrap_or(false)
}

/// Featured extractor: the first official entry of `featured_prices`.
#[must_use]
pub fn extract_featured(payload: &RawQuotePayload, default_currency: &str) -> Option<PriceCandidate> {
    let entry = payload.featured_entries().iter().find(|e| is_official(e))?;
    Some(build_candidate(
        entry,
        payload,
        CandidateSource::Featured,
        default_currency,
    ))
}

/// List extractor: the cheapest official entry of `prices`.
///
/// Ties keep the first occurrence. When official entries exist but none
/// carries a usable price, the first official entry is returned unpriced.
#[must_use]
pub fn extract_general(payload: &RawQuotePayload, default_currency: &str) -> Option<PriceCandidate> {
    let mut first_official: Option<&Value> = None;
    let mut cheapest: Option<(&Value, f64)> = None;

    for entry in payload.general_entries().iter().filter(|e| is_official(e)) {
        first_official.get_or_insert(entry);
        if let Some(price) = nightly_price(entry) {
            match cheapest {
                Some((_, best)) if best <= price => {}
                _ => cheapest = Some((entry, price)),
            }
        }
    }

    let entry = cheapest.map(|(e, _)| e).or(first_official)?;
    Some(build_candidate(
        entry,
        payload,
        CandidateSource::General,
        default_currency,
    ))
}

fn build_candidate(
    entry: &Value,
    payload: &RawQuotePayload,
    source: CandidateSource,
    default_currency: &str,
) -> PriceCandidate {
    let currency = str_at(entry, &["currency"])
        .or_else(|| payload.currency())
        .unwrap_or(default_currency)
        .to_uppercase();
    let rooms = extract_rooms(entry);

    PriceCandidate {
        nightly_price: nightly_price(entry),
        total_price: first_price(entry, &TOTAL_PRICE_PATHS),
        currency,
        booking_link: str_at(entry, &["link"]).map(str::to_string),
        room: rooms.first().map(RoomSummary::from),
        rooms,
        source,
    }
}

/// Rooms of an entry, keeping only those priced strictly above zero.
fn extract_rooms(entry: &Value) -> Vec<CandidateRoom> {
    array_at(entry, &["rooms"])
        .iter()
        .filter_map(|room| {
            let price = nightly_price(room).filter(|p| *p > 0.0)?;
            Some(CandidateRoom {
                name: str_at(room, &["name"])
                    .or_else(|| str_at(room, &["room", "name"]))
                    .map(str::to_string),
                image: room_image(room).map(str::to_string),
                booking_link: str_at(room, &["link"]).map(str::to_string),
                nightly_price: price,
                rate_plan: str_at(room, &["rate_plan"])
                    .or_else(|| str_at(room, &["plan"]))
                    .map(str::to_string),
                refundable: bool_at(room, &["refundable"])
                    .or_else(|| bool_at(room, &["free_cancellation"])),
                cancellable: bool_at(room, &["cancellable"]),
            })
        })
        .collect()
}

/// `images[0]`, then `image`, then `room.image`, then `room.images[0]`.
fn room_image(room: &Value) -> Option<&str> {
    first_str_at(room, &["images"])
        .or_else(|| str_at(room, &["image"]))
        .or_else(|| str_at(room, &["room", "image"]))
        .or_else(|| first_str_at(room, &["room", "images"]))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
