use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// No credential configured for the quote provider.
    #[error("quote provider API key is not configured")]
    MissingApiKey,

    #[error("invalid quote base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quote request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("unexpected HTTP status {status} from quote provider")]
    UnexpectedStatus { status: u16 },

    /// The provider answered 2xx but reported an error inside the payload.
    #[error("quote provider error: {0}")]
    Upstream(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("quote payload is not a JSON object")]
    NotAnObject,
}

impl QuoteError {
    /// `true` when the provider answered but had nothing usable: an error
    /// inside the payload or a non-2xx status.
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            QuoteError::Upstream(_) | QuoteError::UnexpectedStatus { .. }
        )
    }
}
