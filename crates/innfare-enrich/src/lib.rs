//! Additive hotel enrichment: bounded, fault-isolated quote lookups merged
//! back into baseline hotel records.

pub mod enricher;
pub mod error;
pub mod fanout;
pub mod source;

pub use enricher::{apply_quote, Enricher};
pub use error::EnrichError;
pub use fanout::{fan_out, ItemOutcome};
pub use source::QuoteSource;
