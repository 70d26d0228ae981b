//! Hotel-rate quotes: fetching provider payloads and turning them into one
//! reconciled nightly rate plus its rooms.

pub mod client;
pub mod error;
pub mod extract;
mod lookup;
pub mod payload;
pub mod reconcile;
pub mod resolve;
pub mod retry;
pub mod rooms;
pub mod types;

pub use client::{QuoteClient, QuoteClientConfig};
pub use error::QuoteError;
pub use extract::{extract_featured, extract_general, nightly_price};
pub use payload::{PayloadPresence, RawQuotePayload};
pub use reconcile::{reconcile, reconcile_with_trace, ReconcileTrace, ReconciledRate, ResolutionSource};
pub use resolve::{resolve_quote, resolve_quote_traced, ResolvedQuote};
pub use retry::RetryPolicy;
pub use rooms::{normalize_rooms, DEFAULT_ROOM_NAME};
pub use types::{CandidateRoom, CandidateSource, PriceCandidate, RoomSummary};
