//! Quote endpoint URL construction and redaction.

use innfare_core::QuoteRequest;
use reqwest::Url;

use crate::error::QuoteError;

const SEARCH_PATH: &str = "search.json";
const API_KEY_PARAM: &str = "api_key";
const REDACTED: &str = "REDACTED";

/// Parses `base_url` and appends the search path.
///
/// Any path already on the base is kept, so a provider mounted under a
/// prefix (`https://proxy.internal/serp`) resolves to
/// `https://proxy.internal/serp/search.json`.
///
/// # Errors
///
/// Returns [`QuoteError::InvalidBaseUrl`] when the base does not parse or
/// is not `http`/`https`.
pub(crate) fn search_endpoint(base_url: &str) -> Result<Url, QuoteError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{trimmed}/{SEARCH_PATH}")).map_err(|e| {
        QuoteError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        }
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(QuoteError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: format!("unsupported scheme \"{other}\""),
        }),
    }
}

/// Query parameters shared by every request from one client.
pub(crate) struct QueryDefaults<'a> {
    pub engine: &'a str,
    pub currency: &'a str,
    pub api_key: &'a str,
}

/// Full request URL for one property.
pub(crate) fn quote_url(endpoint: &Url, defaults: &QueryDefaults<'_>, req: &QuoteRequest) -> Url {
    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("engine", defaults.engine)
            .append_pair("property_token", &req.property_token)
            .append_pair("check_in_date", &req.check_in.format("%Y-%m-%d").to_string())
            .append_pair("check_out_date", &req.check_out.format("%Y-%m-%d").to_string())
            .append_pair("adults", &req.adults.to_string())
            .append_pair("children", &req.children.to_string())
            .append_pair("rooms", &req.rooms.to_string())
            .append_pair("currency", defaults.currency);
        if let Some(q) = &req.query {
            pairs.append_pair("q", q);
        }
        pairs.append_pair(API_KEY_PARAM, defaults.api_key);
    }
    url
}

/// Renders `url` with the API key replaced, for logging.
pub(crate) fn redacted(url: &Url) -> String {
    let mut out = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM {
                REDACTED.to_owned()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out.to_string()
}
