//! Normalization from candidate rooms to [`innfare_core::RoomOffer`].

use innfare_core::RoomOffer;

use crate::reconcile::ReconciledRate;
use crate::types::{CandidateRoom, CandidateSource, PriceCandidate};

/// Name used when the provider gave a room no name.
pub const DEFAULT_ROOM_NAME: &str = "Standard Room";

/// Builds the room list shown for a reconciled rate.
///
/// The winner's own rooms are used when any survive normalization. Only a
/// general-list winner with no rooms of its own borrows from `other`, and
/// then only the rooms that carry a name or an image.
#[must_use]
pub fn normalize_rooms(rate: &ReconciledRate, other: Option<&PriceCandidate>) -> Vec<RoomOffer> {
    let fallback_link = rate.booking_link();
    let own = to_offers(
        rate.candidate.rooms.iter(),
        &rate.candidate.currency,
        fallback_link,
    );
    if !own.is_empty() {
        return own;
    }

    if rate.candidate.source != CandidateSource::General {
        return own;
    }

    let Some(other) = other else {
        return own;
    };

    let detailed = other.rooms.iter().filter(|room| room.has_detail());
    to_offers(detailed, &other.currency, fallback_link)
}

fn to_offers<'a>(
    rooms: impl Iterator<Item = &'a CandidateRoom>,
    currency: &str,
    fallback_link: Option<&str>,
) -> Vec<RoomOffer> {
    rooms
        .filter_map(|room| normalize_room(room, currency, fallback_link))
        .collect()
}

/// Normalizes one room, or `None` when it lacks a positive price or any
/// booking link.
fn normalize_room(
    room: &CandidateRoom,
    currency: &str,
    fallback_link: Option<&str>,
) -> Option<RoomOffer> {
    if !(room.nightly_price.is_finite() && room.nightly_price > 0.0) {
        return None;
    }

    let booking_link = room
        .booking_link
        .as_deref()
        .or(fallback_link)
        .map(str::trim)
        .filter(|l| !l.is_empty())?
        .to_string();

    let name = room
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_ROOM_NAME)
        .to_string();

    let currency = currency.trim();
    if currency.is_empty() {
        return None;
    }

    Some(RoomOffer {
        name,
        image: room.image.clone(),
        booking_link,
        nightly_price: room.nightly_price,
        currency: currency.to_string(),
        refundable: room.refundable,
        cancellable: room.cancellable,
        rate_plan: room.rate_plan.clone(),
    })
}

#[cfg(test)]
#[path = "rooms_test.rs"]
mod tests;
