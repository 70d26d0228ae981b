//! HTTP client for the hotel-rate provider's search endpoint.

mod url;

use std::time::Duration;

use innfare_core::{AppConfig, QuoteRequest};
use reqwest::Client;
use serde_json::Value;

use crate::error::QuoteError;
use crate::payload::RawQuotePayload;
use crate::retry::{retry_with_backoff, RetryPolicy};

use self::url::{quote_url, redacted, search_endpoint, QueryDefaults};

/// Upper bound on TCP/TLS connect time. The per-attempt timeout still
/// applies on top of this.
const CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Settings for one [`QuoteClient`].
#[derive(Clone)]
pub struct QuoteClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub engine: String,
    /// Requested currency, also the fallback when a payload names none.
    pub currency: String,
    /// Per-attempt deadline covering send and body read.
    pub timeout_ms: u64,
    pub user_agent: String,
    pub retry: RetryPolicy,
    /// Emit request and payload-presence traces.
    pub debug: bool,
}

impl std::fmt::Debug for QuoteClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteClientConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("engine", &self.engine)
            .field("currency", &self.currency)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .field("debug", &self.debug)
            .finish()
    }
}

impl QuoteClientConfig {
    /// Derives client settings from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::MissingApiKey`] when no key is configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, QuoteError> {
        let api_key = config
            .quote_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(QuoteError::MissingApiKey)?;

        Ok(Self {
            api_key: api_key.to_owned(),
            base_url: config.quote_base_url.clone(),
            engine: config.quote_engine.clone(),
            currency: config.quote_currency.clone(),
            timeout_ms: config.quote_timeout_ms,
            user_agent: config.quote_user_agent.clone(),
            retry: RetryPolicy {
                max_retries: config.quote_max_retries,
                backoff_ms: config.quote_retry_backoff_ms,
                kind: config.quote_backoff,
            },
            debug: config.quote_debug,
        })
    }
}

/// Fetches raw quote payloads for single properties.
///
/// Each attempt runs under its own deadline. Timeouts and transport
/// failures are retried per the configured [`RetryPolicy`]; non-2xx
/// statuses, malformed bodies and provider-reported errors are not.
#[derive(Debug)]
pub struct QuoteClient {
    client: Client,
    endpoint: reqwest::Url,
    config: QuoteClientConfig,
}

impl QuoteClient {
    /// Builds a client from explicit settings.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::MissingApiKey`] if `api_key` is blank.
    /// - [`QuoteError::InvalidBaseUrl`] if `base_url` is not an http(s) URL.
    /// - [`QuoteError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(config: QuoteClientConfig) -> Result<Self, QuoteError> {
        if config.api_key.trim().is_empty() {
            return Err(QuoteError::MissingApiKey);
        }
        let endpoint = search_endpoint(&config.base_url)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(
                CONNECT_TIMEOUT_MS.min(config.timeout_ms.max(1)),
            ))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`QuoteClientConfig::from_app_config`] and [`QuoteClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, QuoteError> {
        Self::new(QuoteClientConfig::from_app_config(config)?)
    }

    /// Currency requested from the provider.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    /// Fetches one payload, or `None` on any failure.
    ///
    /// Failures are logged and swallowed; callers treat `None` as "no data
    /// for this property". Provider answers without data log at `debug`,
    /// transport and parse failures at `warn`.
    pub async fn fetch_quote(&self, req: &QuoteRequest) -> Option<RawQuotePayload> {
        match self.try_fetch_quote(req).await {
            Ok(payload) => Some(payload),
            Err(e) if e.is_no_data() => {
                tracing::debug!(
                    property_token = %req.property_token,
                    error = %e,
                    "no quote data for property"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    property_token = %req.property_token,
                    error = %e,
                    "quote fetch failed"
                );
                None
            }
        }
    }

    /// Fetches one payload, surfacing the failure reason.
    ///
    /// # Errors
    ///
    /// - [`QuoteError::Timeout`]: every attempt exceeded the deadline.
    /// - [`QuoteError::Http`]: transport failure after all retries.
    /// - [`QuoteError::UnexpectedStatus`]: non-2xx response (not retried).
    /// - [`QuoteError::Deserialize`] / [`QuoteError::NotAnObject`]: unusable body.
    /// - [`QuoteError::Upstream`]: the payload reported an error.
    pub async fn try_fetch_quote(&self, req: &QuoteRequest) -> Result<RawQuotePayload, QuoteError> {
        let defaults = QueryDefaults {
            engine: &self.config.engine,
            currency: &self.config.currency,
            api_key: &self.config.api_key,
        };
        let url = quote_url(&self.endpoint, &defaults, req);

        if self.config.debug {
            tracing::debug!(url = %redacted(&url), "quote request");
        }

        let timeout_ms = self.config.timeout_ms;
        let body = retry_with_backoff(self.config.retry, || {
            let url = url.clone();
            async move {
                let attempt = async {
                    let response = self
                        .client
                        .get(url)
                        .header(reqwest::header::ACCEPT, "application/json")
                        .send()
                        .await
                        .map_err(|e| QuoteError::Http(e.without_url()))?;

                    let status = response.status();
                    if !status.is_success() {
                        return Err(QuoteError::UnexpectedStatus {
                            status: status.as_u16(),
                        });
                    }

                    response
                        .text()
                        .await
                        .map_err(|e| QuoteError::Http(e.without_url()))
                };

                tokio::time::timeout(Duration::from_millis(timeout_ms), attempt)
                    .await
                    .map_err(|_| QuoteError::Timeout { timeout_ms })?
            }
        })
        .await?;

        let payload = parse_payload(&body)?;

        if self.config.debug {
            let presence = payload.presence();
            tracing::debug!(
                has_featured = presence.has_featured,
                has_general = presence.has_general,
                has_error = presence.has_error,
                "quote payload received"
            );
        }

        if let Some(message) = payload.error_message() {
            return Err(QuoteError::Upstream(message));
        }

        Ok(payload)
    }
}

/// Parses a response body into a payload object.
fn parse_payload(body: &str) -> Result<RawQuotePayload, QuoteError> {
    let value: Value = serde_json::from_str(body).map_err(|e| QuoteError::Deserialize {
        context: "quote payload".to_owned(),
        source: e,
    })?;
    RawQuotePayload::from_value(value).ok_or(QuoteError::NotAnObject)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
