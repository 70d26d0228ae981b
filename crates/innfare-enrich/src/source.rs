//! The seam between the orchestrator and whatever produces quote payloads.

use std::future::Future;

use innfare_core::QuoteRequest;
use innfare_quotes::{QuoteClient, QuoteError, RawQuotePayload};

/// Produces raw quote payloads for single properties.
///
/// [`QuoteClient`] is the production implementation; tests substitute
/// scripted sources.
pub trait QuoteSource: Send + Sync {
    fn fetch_quote(
        &self,
        req: &QuoteRequest,
    ) -> impl Future<Output = Result<RawQuotePayload, QuoteError>> + Send;

    /// Currency assumed when a payload does not name one.
    fn default_currency(&self) -> &str;
}

impl QuoteSource for QuoteClient {
    fn fetch_quote(
        &self,
        req: &QuoteRequest,
    ) -> impl Future<Output = Result<RawQuotePayload, QuoteError>> + Send {
        self.try_fetch_quote(req)
    }

    fn default_currency(&self) -> &str {
        self.currency()
    }
}
