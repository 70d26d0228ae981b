use std::path::PathBuf;

/// Delay schedule applied between quote attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffKind {
    /// Same delay before every retry.
    Fixed,
    /// `base * 2^(n-1)` with ±25% jitter.
    Exponential,
}

impl std::fmt::Display for BackoffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackoffKind::Fixed => write!(f, "fixed"),
            BackoffKind::Exponential => write!(f, "exponential"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub hotels_path: PathBuf,
    /// Credential for the upstream quote provider. `None` disables enrichment.
    pub quote_api_key: Option<String>,
    pub quote_base_url: String,
    pub quote_engine: String,
    /// Fallback currency requested from, and assumed for, the quote provider.
    pub quote_currency: String,
    pub quote_timeout_ms: u64,
    pub quote_max_retries: u32,
    pub quote_retry_backoff_ms: u64,
    pub quote_backoff: BackoffKind,
    pub quote_user_agent: String,
    /// Emits presence/resolution traces for every quote when set.
    pub quote_debug: bool,
    pub enrich_max_concurrent: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("hotels_path", &self.hotels_path)
            .field(
                "quote_api_key",
                &self.quote_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("quote_base_url", &self.quote_base_url)
            .field("quote_engine", &self.quote_engine)
            .field("quote_currency", &self.quote_currency)
            .field("quote_timeout_ms", &self.quote_timeout_ms)
            .field("quote_max_retries", &self.quote_max_retries)
            .field("quote_retry_backoff_ms", &self.quote_retry_backoff_ms)
            .field("quote_backoff", &self.quote_backoff)
            .field("quote_user_agent", &self.quote_user_agent)
            .field("quote_debug", &self.quote_debug)
            .field("enrich_max_concurrent", &self.enrich_max_concurrent)
            .finish()
    }
}
