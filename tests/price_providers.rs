#![cfg(feature = "async")]

use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use zakat_rechner::prelude::*;

/// Counts fetches and fails when told to.
struct CountingProvider {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl PriceProvider for CountingProvider {
    async fn get_prices(&self) -> Result<PriceQuote, ZakatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ZakatError::NetworkError("feed down".to_string()));
        }
        PriceQuote::new(60, dec!(0.8))
    }
}

#[tokio::test]
async fn test_config_from_static_provider() {
    let provider = StaticPriceProvider::new(60, dec!(0.8)).unwrap();
    let config = ZakatConfig::from_provider(&provider).await.unwrap();

    let decl = AssetDeclaration::new().with_amount(AssetCategory::Gold24, dec!(100));
    let result = decl.calculate_zakat(&config).unwrap();
    assert_eq!(result.payable, dec!(150));
}

#[tokio::test]
async fn test_cache_reuses_quote_within_ttl() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cached = CachedPriceProvider::new(
        CountingProvider { calls: calls.clone(), fail: false },
        Duration::from_secs(300),
    );

    cached.get_prices().await.unwrap();
    cached.get_prices().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    cached.invalidate();
    cached.get_prices().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_prices() {
    let mut config = ZakatConfig::new(70, 1).unwrap();
    let failing = CountingProvider { calls: Arc::new(AtomicUsize::new(0)), fail: true };

    let err = config.refresh_prices(&failing).await.unwrap_err();
    assert!(err.is_unavailable());
    assert_eq!(config.gold_price_per_gram, Some(dec!(70)));
}

#[tokio::test]
async fn test_feed_failure_renders_as_waiting() {
    let failing = CountingProvider { calls: Arc::new(AtomicUsize::new(0)), fail: true };
    let outcome = ZakatConfig::from_provider(&failing)
        .await
        .and_then(|config| AssetDeclaration::new().calculate_zakat(&config));

    assert_eq!(Verdict::from_outcome(&outcome).unwrap(), Verdict::AwaitingPrices);
}

#[tokio::test]
async fn test_provider_as_trait_object() {
    let providers: Vec<Box<dyn PriceProvider>> = vec![
        Box::new(StaticPriceProvider::new(60, dec!(0.8)).unwrap()),
        Box::new(CountingProvider { calls: Arc::new(AtomicUsize::new(0)), fail: false }),
    ];
    for provider in &providers {
        let config = ZakatConfig::from_provider(provider.as_ref()).await.unwrap();
        assert_eq!(nisab_threshold(config.gold_price_per_gram.unwrap()).unwrap(), dec!(5100));
    }
}
