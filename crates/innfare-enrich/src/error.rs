use innfare_quotes::QuoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// The payload was fetched but held no authoritative rate.
    #[error("no authoritative rate in quote payload")]
    NoRate,
}

impl EnrichError {
    /// `true` when the provider answered but had nothing usable.
    ///
    /// These end in a `debug` event; everything else is a `warn`.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        match self {
            EnrichError::NoRate => true,
            EnrichError::Quote(e) => e.is_no_data(),
        }
    }
}
