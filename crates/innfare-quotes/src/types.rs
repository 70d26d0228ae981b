//! Normalized price candidates produced by the extractors.

use serde::Serialize;

/// Which candidate list of the payload a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Featured,
    General,
}

impl std::fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateSource::Featured => write!(f, "featured"),
            CandidateSource::General => write!(f, "general"),
        }
    }
}

/// One room listed under a candidate entry.
///
/// Only rooms with a strictly positive nightly price are ever constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRoom {
    /// Raw name, `None` when the provider gave none.
    pub name: Option<String>,
    pub image: Option<String>,
    pub booking_link: Option<String>,
    pub nightly_price: f64,
    pub rate_plan: Option<String>,
    pub refundable: Option<bool>,
    pub cancellable: Option<bool>,
}

impl CandidateRoom {
    /// `true` when the provider described the room beyond its price.
    #[must_use]
    pub fn has_detail(&self) -> bool {
        self.name.is_some() || self.image.is_some()
    }
}

/// Headline room of a candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummary {
    pub name: Option<String>,
    pub rate_plan: Option<String>,
    pub refundable: Option<bool>,
    pub cancellable: Option<bool>,
    pub image: Option<String>,
}

impl From<&CandidateRoom> for RoomSummary {
    fn from(room: &CandidateRoom) -> Self {
        Self {
            name: room.name.clone(),
            rate_plan: room.rate_plan.clone(),
            refundable: room.refundable,
            cancellable: room.cancellable,
            image: room.image.clone(),
        }
    }
}

/// A normalized price taken from one authoritative payload entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCandidate {
    /// Finite and non-negative when present.
    pub nightly_price: Option<f64>,
    pub total_price: Option<f64>,
    pub currency: String,
    pub booking_link: Option<String>,
    pub room: Option<RoomSummary>,
    pub rooms: Vec<CandidateRoom>,
    pub source: CandidateSource,
}
