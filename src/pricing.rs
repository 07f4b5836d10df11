//! Pricing module for Zakat calculations.
//!
//! The engine only needs two strictly positive per-gram prices, captured by
//! [`PriceQuote`]. Where they come from is the job of a [`PriceProvider`]:
//! static values for tests, a TTL cache around another provider, or the live
//! metals feed (feature `live-pricing`).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::inputs::IntoZakatDecimal;
use crate::types::{Metal, ZakatError};

/// 1 troy ounce in grams.
pub const TROY_OUNCE_GRAMS: Decimal = dec!(31.1034768);

/// Gold and silver spot prices per gram in the user's currency.
///
/// Both are strictly positive; a quote cannot be built otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    gold_per_gram: Decimal,
    silver_per_gram: Decimal,
}

impl PriceQuote {
    /// Creates a quote, refusing absent-equivalent (zero or negative) prices.
    pub fn new(
        gold_per_gram: impl IntoZakatDecimal,
        silver_per_gram: impl IntoZakatDecimal,
    ) -> Result<Self, ZakatError> {
        let gold = gold_per_gram.into_zakat_decimal()?;
        let silver = silver_per_gram.into_zakat_decimal()?;
        Self::from_options(Some(gold), Some(silver))
    }

    /// Creates a quote from prices that may not have arrived yet.
    ///
    /// Missing and non-positive prices are the same thing here: both yield
    /// `ZakatError::MissingPriceData`. Gold is checked first.
    pub fn from_options(gold: Option<Decimal>, silver: Option<Decimal>) -> Result<Self, ZakatError> {
        Ok(Self {
            gold_per_gram: require_positive(gold, Metal::Gold)?,
            silver_per_gram: require_positive(silver, Metal::Silver)?,
        })
    }

    pub fn gold_per_gram(&self) -> Decimal {
        self.gold_per_gram
    }

    pub fn silver_per_gram(&self) -> Decimal {
        self.silver_per_gram
    }

    pub fn price_per_gram(&self, metal: Metal) -> Decimal {
        match metal {
            Metal::Gold => self.gold_per_gram,
            Metal::Silver => self.silver_per_gram,
        }
    }
}

fn require_positive(price: Option<Decimal>, metal: Metal) -> Result<Decimal, ZakatError> {
    match price {
        Some(p) if p > Decimal::ZERO => Ok(p),
        _ => {
            tracing::warn!(%metal, ?price, "price missing or not positive");
            Err(ZakatError::MissingPriceData { metal })
        }
    }
}

/// Unit in which a feed quotes its prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteUnit {
    #[default]
    TroyOunce,
    Gram,
}

impl QuoteUnit {
    pub fn to_per_gram(&self, price: Decimal) -> Result<Decimal, ZakatError> {
        match self {
            QuoteUnit::Gram => Ok(price),
            QuoteUnit::TroyOunce => price.checked_div(TROY_OUNCE_GRAMS).ok_or_else(|| ZakatError::Overflow {
                operation: "div".to_string(),
                source_label: Some("troy ounce conversion".to_string()),
            }),
        }
    }
}

/// Extracts the price from a metals feed body: a JSON array whose first
/// element is a `[timestamp, price]` pair. The price may be a number or a
/// numeric string.
pub fn parse_spot_response(body: &str) -> Result<Decimal, ZakatError> {
    let data: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ZakatError::NetworkError(format!("Failed to parse spot response: {}", e)))?;

    let price = data
        .get(0)
        .and_then(|entry| entry.get(1))
        .ok_or_else(|| ZakatError::NetworkError("Spot response has no price entry".to_string()))?;

    let parsed = match price {
        serde_json::Value::Number(n) => n.to_string().as_str().into_zakat_decimal(),
        serde_json::Value::String(s) => s.as_str().into_zakat_decimal(),
        other => Err(ZakatError::invalid_input("spot price", other, "not a number")),
    };
    parsed.map_err(|e| ZakatError::NetworkError(format!("Invalid spot price: {}", e)))
}

/// Trait for fetching current metal prices.
///
/// Implementors can fetch prices from various sources:
/// - Static values for testing
/// - REST APIs
/// - A cache in front of another provider
#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches a complete quote. Partial data is an error.
    async fn get_prices(&self) -> Result<PriceQuote, ZakatError>;
}

/// A static price provider for testing and for user-supplied prices.
#[derive(Debug, Clone)]
pub struct StaticPriceProvider {
    prices: PriceQuote,
}

impl StaticPriceProvider {
    pub fn new(
        gold_per_gram: impl IntoZakatDecimal,
        silver_per_gram: impl IntoZakatDecimal,
    ) -> Result<Self, ZakatError> {
        Ok(Self {
            prices: PriceQuote::new(gold_per_gram, silver_per_gram)?,
        })
    }

    pub fn from_prices(prices: PriceQuote) -> Self {
        Self { prices }
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl PriceProvider for StaticPriceProvider {
    async fn get_prices(&self) -> Result<PriceQuote, ZakatError> {
        Ok(self.prices)
    }
}

#[cfg(feature = "async")]
pub use cache::CachedPriceProvider;

#[cfg(feature = "async")]
mod cache {
    use std::sync::{Arc, RwLock};
    use std::time::{Duration, Instant};

    use super::{PriceProvider, PriceQuote};
    use crate::types::ZakatError;

    /// A decorator that reuses a fetched quote until its TTL expires.
    #[derive(Debug, Clone)]
    pub struct CachedPriceProvider<P> {
        inner: P,
        cache: Arc<RwLock<Option<(Instant, PriceQuote)>>>,
        ttl: Duration,
    }

    impl<P> CachedPriceProvider<P> {
        pub fn new(inner: P, ttl: Duration) -> Self {
            Self {
                inner,
                cache: Arc::new(RwLock::new(None)),
                ttl,
            }
        }

        fn fresh(&self) -> Option<PriceQuote> {
            let guard = self.cache.read().ok()?;
            match &*guard {
                Some((fetched_at, quote)) if fetched_at.elapsed() < self.ttl => Some(*quote),
                _ => None,
            }
        }

        /// Drops the cached quote so the next call refetches.
        pub fn invalidate(&self) {
            if let Ok(mut guard) = self.cache.write() {
                *guard = None;
            }
        }
    }

    #[async_trait::async_trait]
    impl<P: PriceProvider> PriceProvider for CachedPriceProvider<P> {
        async fn get_prices(&self) -> Result<PriceQuote, ZakatError> {
            if let Some(quote) = self.fresh() {
                tracing::debug!("serving cached price quote");
                return Ok(quote);
            }

            let quote = self.inner.get_prices().await?;
            if let Ok(mut guard) = self.cache.write() {
                *guard = Some((Instant::now(), quote));
            }
            Ok(quote)
        }
    }
}

/// Network configuration for the live metals feed.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub quote_unit: QuoteUnit,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: "https://metals.live".to_string(),
            timeout_seconds: 10,
            quote_unit: QuoteUnit::TroyOunce,
        }
    }
}

#[cfg(feature = "live-pricing")]
pub use live::MetalsLivePriceProvider;

#[cfg(feature = "live-pricing")]
mod live {
    use rust_decimal::Decimal;

    use super::{NetworkConfig, PriceProvider, PriceQuote, parse_spot_response};
    use crate::types::{Metal, ZakatError};

    /// Fetches gold and silver spot prices from a metals.live compatible feed.
    ///
    /// Both metals are requested concurrently; the quote is only returned
    /// when both arrive.
    pub struct MetalsLivePriceProvider {
        client: reqwest::Client,
        config: NetworkConfig,
    }

    impl MetalsLivePriceProvider {
        pub fn new(config: NetworkConfig) -> Result<Self, ZakatError> {
            let client = reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_seconds))
                .build()
                .map_err(|e| ZakatError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;
            Ok(Self { client, config })
        }

        async fn fetch_spot(&self, metal: Metal) -> Result<Decimal, ZakatError> {
            let url = format!("{}/api/spot/{}", self.config.base_url.trim_end_matches('/'), metal.key());
            tracing::debug!(%url, "fetching spot price");

            let body = self.client.get(&url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| ZakatError::NetworkError(format!("{} spot request failed: {}", metal, e)))?
                .text()
                .await
                .map_err(|e| ZakatError::NetworkError(format!("{} spot body unreadable: {}", metal, e)))?;

            let price = parse_spot_response(&body)?;
            self.config.quote_unit.to_per_gram(price)
        }
    }

    #[async_trait::async_trait]
    impl PriceProvider for MetalsLivePriceProvider {
        async fn get_prices(&self) -> Result<PriceQuote, ZakatError> {
            let (gold, silver) = futures::try_join!(
                self.fetch_spot(Metal::Gold),
                self.fetch_spot(Metal::Silver)
            )?;
            tracing::info!(%gold, %silver, "fetched live spot prices (per gram)");
            PriceQuote::new(gold, silver)
        }
    }
}


#[cfg(all(test, feature = "live-pricing"))]
mod live_tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Hits the public feed; run manually.
    async fn test_metals_live() {
        let provider = MetalsLivePriceProvider::new(NetworkConfig::default()).unwrap();
        let quote = provider.get_prices().await.expect("Failed to fetch live prices");
        assert!(quote.gold_per_gram() > quote.silver_per_gram());
    }
}
