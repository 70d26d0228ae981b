//! Single- and multi-hotel enrichment.

use innfare_core::{AppConfig, Hotel, QuoteRequest, StayParams};
use innfare_quotes::{resolve_quote_traced, QuoteClient, QuoteError, ResolvedQuote};

use crate::error::EnrichError;
use crate::fanout::{fan_out, ItemOutcome};
use crate::source::QuoteSource;

/// Enriches hotel records with live quotes.
///
/// Never fails: every error path returns the hotel exactly as it was passed
/// in. A disabled enricher (no quote source) returns everything untouched.
pub struct Enricher<S> {
    source: Option<S>,
    max_concurrent: usize,
    debug: bool,
}

impl Enricher<QuoteClient> {
    /// Builds an enricher backed by the HTTP quote client.
    ///
    /// A configuration error (most commonly a missing API key) is logged
    /// once and yields a disabled enricher.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        match QuoteClient::from_app_config(config) {
            Ok(client) => {
                Self::new(client, config.enrich_max_concurrent).with_debug(config.quote_debug)
            }
            Err(e) => {
                tracing::error!(error = %e, "quote client unavailable; enrichment disabled");
                Self::disabled()
            }
        }
    }
}

impl<S: QuoteSource> Enricher<S> {
    #[must_use]
    pub fn new(source: S, max_concurrent: usize) -> Self {
        Self {
            source: Some(source),
            max_concurrent: max_concurrent.max(1),
            debug: false,
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            source: None,
            max_concurrent: 1,
            debug: false,
        }
    }

    /// Emit a trace of presence and resolution flags for every quote.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Fetches and resolves one quote.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::Quote`] when the fetch failed, including
    ///   [`QuoteError::MissingApiKey`] on a disabled enricher.
    /// - [`EnrichError::NoRate`] when the payload held no authoritative rate.
    pub async fn quote(&self, req: &QuoteRequest) -> Result<ResolvedQuote, EnrichError> {
        let source = self.source.as_ref().ok_or(QuoteError::MissingApiKey)?;
        let payload = source.fetch_quote(req).await?;
        let (resolved, trace) = resolve_quote_traced(&payload, source.default_currency());

        if self.debug {
            tracing::debug!(
                property_token = %req.property_token,
                winner = ?trace.winner,
                featured_present = trace.featured_present,
                general_present = trace.general_present,
                rooms = resolved.as_ref().map_or(0, |q| q.rooms.len()),
                "quote resolved"
            );
        }

        resolved.ok_or(EnrichError::NoRate)
    }

    /// Enriches one hotel.
    ///
    /// Skipped (hotel returned untouched) when the enricher is disabled, the
    /// hotel has no property token, or either date is missing or the range
    /// is empty.
    pub async fn enrich_one(&self, hotel: Hotel, params: &StayParams) -> Hotel {
        if !self.is_enabled() {
            return hotel;
        }
        let Some(req) = request_for(&hotel, params) else {
            tracing::debug!(hotel_id = %hotel.id, "hotel not eligible for enrichment");
            return hotel;
        };

        match self.quote(&req).await {
            Ok(quote) => apply_quote(hotel, &quote),
            Err(e) => {
                log_failure(&hotel.id, &e);
                hotel
            }
        }
    }

    /// Enriches every eligible hotel, at most `max_concurrent` at a time.
    ///
    /// The output has the same length and order as `hotels`. Each result is
    /// merged back into the hotel at the position it was fetched for, so
    /// repeated ids never share a quote. Hotels without a token are untouched.
    pub async fn enrich_many(&self, hotels: Vec<Hotel>, params: &StayParams) -> Vec<Hotel> {
        if !self.is_enabled() {
            return hotels;
        }

        let eligible: Vec<(usize, String, QuoteRequest)> = hotels
            .iter()
            .enumerate()
            .filter_map(|(pos, h)| request_for(h, params).map(|req| (pos, h.id.clone(), req)))
            .collect();
        if eligible.is_empty() {
            return hotels;
        }

        tracing::debug!(
            eligible = eligible.len(),
            total = hotels.len(),
            max_concurrent = self.max_concurrent,
            "enriching hotels"
        );

        let outcomes = fan_out(
            eligible.iter().collect(),
            self.max_concurrent,
            |(_, id, req)| async move {
                let result = self.quote(req).await;
                if let Err(e) = &result {
                    log_failure(id, e);
                }
                result
            },
        )
        .await;

        let mut quotes: Vec<Option<ResolvedQuote>> = vec![None; hotels.len()];
        for ((pos, id, _), outcome) in eligible.iter().zip(outcomes) {
            match outcome {
                ItemOutcome::Completed(quote) => quotes[*pos] = Some(quote),
                ItemOutcome::Panicked { reason, .. } => {
                    tracing::warn!(hotel_id = %id, reason = %reason, "hotel enrichment panicked");
                }
                // Already logged inside the fan-out.
                ItemOutcome::Failed { .. } => {}
            }
        }

        hotels
            .into_iter()
            .zip(quotes)
            .map(|(hotel, quote)| match quote {
                Some(quote) => apply_quote(hotel, &quote),
                None => hotel,
            })
            .collect()
    }
}

/// Merges a resolved quote into `hotel` without removing anything.
///
/// `price` is replaced only when the rate carries a nightly price, `rooms`
/// only by a non-empty list, and `official_booking_url` only when a link
/// exists. All other fields pass through unchanged.
#[must_use]
pub fn apply_quote(mut hotel: Hotel, quote: &ResolvedQuote) -> Hotel {
    if let Some(price) = quote.hotel_price() {
        hotel.price = Some(price);
    }
    if !quote.rooms.is_empty() {
        hotel.rooms.clone_from(&quote.rooms);
    }
    if let Some(link) = quote.booking_link() {
        hotel.official_booking_url = Some(link.to_owned());
    }
    hotel
}

fn request_for(hotel: &Hotel, params: &StayParams) -> Option<QuoteRequest> {
    params.quote_request(hotel.token()?, hotel.name.as_deref())
}

fn log_failure(hotel_id: &str, err: &EnrichError) {
    if err.is_no_data() {
        tracing::debug!(hotel_id, error = %err, "no quote data for hotel");
    } else {
        tracing::warn!(hotel_id, error = %err, "hotel enrichment failed");
    }
}

#[cfg(test)]
#[path = "enricher_test.rs"]
mod tests;
