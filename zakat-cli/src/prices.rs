//! Price resolution: command-line flag, then config file, then the live feed.

use rust_decimal::Decimal;
use tracing::{info, warn};
use zakat_rechner::ZakatConfig;

/// Merges flag prices over config-file prices. Flags win per metal.
pub fn merge_static(
    gold_flag: Option<Decimal>,
    silver_flag: Option<Decimal>,
    file: ZakatConfig,
) -> ZakatConfig {
    ZakatConfig {
        gold_price_per_gram: gold_flag,
        silver_price_per_gram: silver_flag,
    }
    .or(file)
}

/// Fills any still-missing price from the live feed unless `offline`.
///
/// A failed fetch leaves the prices as they were; the caller then reports
/// that price data is unavailable.
pub async fn resolve(configured: ZakatConfig, offline: bool) -> ZakatConfig {
    if configured.has_prices() {
        return configured;
    }
    if offline {
        info!("offline mode, live price feed skipped");
        return configured;
    }

    match fetch_live().await {
        Some(live) => configured.or(live),
        None => configured,
    }
}

#[cfg(feature = "live-pricing")]
async fn fetch_live() -> Option<ZakatConfig> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;
    use zakat_rechner::pricing::{MetalsLivePriceProvider, NetworkConfig};

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Fetching gold and silver prices...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = match MetalsLivePriceProvider::new(NetworkConfig::default()) {
        Ok(provider) => ZakatConfig::from_provider(&provider).await,
        Err(e) => Err(e),
    };
    spinner.finish_and_clear();

    match outcome {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Live pricing failed: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "live-pricing"))]
async fn fetch_live() -> Option<ZakatConfig> {
    warn!("compiled without 'live-pricing'; no live prices available");
    None
}
