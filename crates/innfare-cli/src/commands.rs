//! Subcommand handlers. Each prints JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use innfare_core::{AppConfig, StayParams};
use innfare_enrich::{EnrichError, Enricher};
use innfare_quotes::QuoteClient;

pub(crate) async fn run_enrich(
    mut config: AppConfig,
    hotels_path: Option<PathBuf>,
    stay: StayParams,
    max_concurrent: Option<usize>,
) -> anyhow::Result<()> {
    if let Some(n) = max_concurrent {
        config.enrich_max_concurrent = n.max(1);
    }
    let path = hotels_path.unwrap_or_else(|| config.hotels_path.clone());
    let file = innfare_core::load_hotels(&path)
        .with_context(|| format!("loading hotels from {}", path.display()))?;

    if stay.nights().is_none() {
        tracing::info!("no valid stay dates; hotels are returned without live rates");
    }

    let enricher = Enricher::from_config(&config);
    let total = file.hotels.len();
    let hotels = enricher.enrich_many(file.hotels, &stay).await;
    let priced = hotels.iter().filter(|h| h.price.is_some()).count();
    tracing::info!(total, priced, "enrichment finished");

    println!("{}", serde_json::to_string_pretty(&hotels)?);
    Ok(())
}

pub(crate) async fn run_quote(
    config: &AppConfig,
    token: &str,
    name: Option<&str>,
    stay: &StayParams,
) -> anyhow::Result<()> {
    let req = stay
        .quote_request(token, name)
        .context("quote needs a non-empty --token and --check-in before --check-out")?;

    let client = QuoteClient::from_app_config(config)?;
    let enricher = Enricher::new(client, 1).with_debug(config.quote_debug);

    match enricher.quote(&req).await {
        Ok(quote) => println!("{}", serde_json::to_string_pretty(&quote)?),
        Err(EnrichError::NoRate) => println!("null"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
pub(crate) fn run_config(config: &AppConfig) -> anyhow::Result<()> {
    println!("{config:#?}");
    Ok(())
}
