use crate::app_config::{AppConfig, BackoffKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("INNFARE_LOG_LEVEL", "info");
    let hotels_path = PathBuf::from(or_default("INNFARE_HOTELS_PATH", "./config/hotels.yaml"));

    // An empty key is as good as no key: the provider rejects both.
    let quote_api_key = lookup("INNFARE_QUOTE_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let quote_base_url = or_default("INNFARE_QUOTE_BASE_URL", "https://serpapi.com");
    let quote_engine = or_default("INNFARE_QUOTE_ENGINE", "google_hotels");
    let quote_currency = or_default("INNFARE_QUOTE_CURRENCY", "USD").to_uppercase();

    let quote_timeout_ms = parse_u64("INNFARE_QUOTE_TIMEOUT_MS", "8000")?;
    if quote_timeout_ms == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "INNFARE_QUOTE_TIMEOUT_MS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let quote_max_retries = parse_u32("INNFARE_QUOTE_MAX_RETRIES", "1")?;
    let quote_retry_backoff_ms = parse_u64("INNFARE_QUOTE_RETRY_BACKOFF_MS", "1000")?;
    let quote_backoff = parse_backoff(&or_default("INNFARE_QUOTE_BACKOFF", "fixed"))?;
    let quote_user_agent = or_default("INNFARE_QUOTE_USER_AGENT", "innfare/0.1 (hotel-rates)");
    let quote_debug = parse_flag("INNFARE_QUOTE_DEBUG", &or_default("INNFARE_QUOTE_DEBUG", "false"))?;

    let enrich_max_concurrent = parse_usize("INNFARE_ENRICH_MAX_CONCURRENT", "4")?;
    if enrich_max_concurrent == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "INNFARE_ENRICH_MAX_CONCURRENT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        log_level,
        hotels_path,
        quote_api_key,
        quote_base_url,
        quote_engine,
        quote_currency,
        quote_timeout_ms,
        quote_max_retries,
        quote_retry_backoff_ms,
        quote_backoff,
        quote_user_agent,
        quote_debug,
        enrich_max_concurrent,
    })
}

fn parse_backoff(s: &str) -> Result<BackoffKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "fixed" => Ok(BackoffKind::Fixed),
        "exponential" => Ok(BackoffKind::Exponential),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INNFARE_QUOTE_BACKOFF".to_string(),
            reason: format!("expected 'fixed' or 'exponential', got '{other}'"),
        }),
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
