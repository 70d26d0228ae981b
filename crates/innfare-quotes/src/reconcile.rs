//! Picks one winning candidate from the featured and general extractors.

use serde::Serialize;

use crate::types::{CandidateSource, PriceCandidate};

/// Where the reconciled rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Featured,
    General,
    /// Both sources present but neither priced; the featured entry is kept.
    Merged,
}

impl From<CandidateSource> for ResolutionSource {
    fn from(source: CandidateSource) -> Self {
        match source {
            CandidateSource::Featured => ResolutionSource::Featured,
            CandidateSource::General => ResolutionSource::General,
        }
    }
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionSource::Featured => write!(f, "featured"),
            ResolutionSource::General => write!(f, "general"),
            ResolutionSource::Merged => write!(f, "merged"),
        }
    }
}

/// Debug record of one reconciliation. Holds flags and prices only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReconcileTrace {
    pub winner: Option<ResolutionSource>,
    pub featured_present: bool,
    pub general_present: bool,
    pub featured_price: Option<f64>,
    pub general_price: Option<f64>,
}

/// The winning candidate plus how it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledRate {
    pub candidate: PriceCandidate,
    pub resolution_source: ResolutionSource,
    pub trace: ReconcileTrace,
}

impl ReconciledRate {
    #[must_use]
    pub fn nightly_price(&self) -> Option<f64> {
        self.candidate.nightly_price
    }

    #[must_use]
    pub fn booking_link(&self) -> Option<&str> {
        self.candidate.booking_link.as_deref()
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.candidate.currency
    }
}

/// Reconciles the two extractor outputs.
///
/// - neither present: `None`
/// - one present: that one
/// - both priced: the lower price; an exact tie goes to `featured`
/// - one priced: the priced one
/// - neither priced: `featured`, marked [`ResolutionSource::Merged`]
#[must_use]
pub fn reconcile(
    featured: Option<&PriceCandidate>,
    general: Option<&PriceCandidate>,
) -> Option<ReconciledRate> {
    reconcile_with_trace(featured, general).0
}

/// Same as [`reconcile`], also returning the trace when nothing won.
#[must_use]
pub fn reconcile_with_trace(
    featured: Option<&PriceCandidate>,
    general: Option<&PriceCandidate>,
) -> (Option<ReconciledRate>, ReconcileTrace) {
    let featured_price = featured.and_then(|c| c.nightly_price);
    let general_price = general.and_then(|c| c.nightly_price);

    let picked: Option<(&PriceCandidate, ResolutionSource)> = match (featured, general) {
        (None, None) => None,
        (Some(f), None) => Some((f, ResolutionSource::Featured)),
        (None, Some(g)) => Some((g, ResolutionSource::General)),
        (Some(f), Some(g)) => Some(match (featured_price, general_price) {
            (Some(fp), Some(gp)) if fp <= gp => (f, ResolutionSource::Featured),
            (Some(_), Some(_)) | (None, Some(_)) => (g, ResolutionSource::General),
            (Some(_), None) => (f, ResolutionSource::Featured),
            (None, None) => (f, ResolutionSource::Merged),
        }),
    };

    let trace = ReconcileTrace {
        winner: picked.map(|(_, source)| source),
        featured_present: featured.is_some(),
        general_present: general.is_some(),
        featured_price,
        general_price,
    };

    let rate = picked.map(|(candidate, resolution_source)| ReconciledRate {
        candidate: candidate.clone(),
        resolution_source,
        trace,
    });

    (rate, trace)
}
