use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::inputs::IntoZakatDecimal;
use crate::pricing::PriceQuote;
use crate::types::ZakatError;

pub const GOLD_PRICE_ENV: &str = "ZAKAT_GOLD_PRICE";
pub const SILVER_PRICE_ENV: &str = "ZAKAT_SILVER_PRICE";

/// Price inputs for a calculation, as delivered by the price collaborator.
///
/// Either price may still be missing. The engine refuses to run until
/// [`ZakatConfig::price_quote`] succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZakatConfig {
    pub gold_price_per_gram: Option<Decimal>,
    pub silver_price_per_gram: Option<Decimal>,
}

impl std::str::FromStr for ZakatConfig {
    type Err = ZakatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ZakatConfig = serde_json::from_str(s)
            .map_err(|e| ZakatError::ConfigurationError(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl ZakatConfig {
    pub fn builder() -> ZakatConfigBuilder {
        ZakatConfigBuilder::default()
    }

    /// Creates a config with both prices present and positive.
    pub fn new(gold_price: impl IntoZakatDecimal, silver_price: impl IntoZakatDecimal) -> Result<Self, ZakatError> {
        let quote = PriceQuote::new(gold_price, silver_price)?;
        Ok(Self::from(quote))
    }

    /// Validates what has been supplied so far.
    ///
    /// Absent prices are fine (they are still loading); a negative price is
    /// a configuration mistake.
    pub fn validate(&self) -> Result<(), ZakatError> {
        if self.gold_price_per_gram.is_some_and(|p| p < Decimal::ZERO) {
            return Err(ZakatError::ConfigurationError("Gold price must be non-negative".to_string()));
        }
        if self.silver_price_per_gram.is_some_and(|p| p < Decimal::ZERO) {
            return Err(ZakatError::ConfigurationError("Silver price must be non-negative".to_string()));
        }
        Ok(())
    }

    /// The validated quote, or `MissingPriceData` while a price is absent.
    pub fn price_quote(&self) -> Result<PriceQuote, ZakatError> {
        PriceQuote::from_options(self.gold_price_per_gram, self.silver_price_per_gram)
    }

    pub fn has_prices(&self) -> bool {
        self.price_quote().is_ok()
    }

    /// Reads `ZAKAT_GOLD_PRICE` and `ZAKAT_SILVER_PRICE`.
    ///
    /// An unset variable leaves that price missing; a set but malformed one is
    /// an error.
    pub fn from_env() -> Result<Self, ZakatError> {
        let config = Self {
            gold_price_per_gram: read_price_var(GOLD_PRICE_ENV)?,
            silver_price_per_gram: read_price_var(SILVER_PRICE_ENV)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Attempts to load configuration from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, ZakatError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ZakatError::ConfigurationError(format!("Failed to read config file: {}", e)))?;
        content.parse()
    }

    /// Fills in any price that is still missing from `other`.
    #[must_use]
    pub fn or(self, other: ZakatConfig) -> Self {
        Self {
            gold_price_per_gram: self.gold_price_per_gram.or(other.gold_price_per_gram),
            silver_price_per_gram: self.silver_price_per_gram.or(other.silver_price_per_gram),
        }
    }

    /// Creates a ZakatConfig from an async PriceProvider.
    #[cfg(feature = "async")]
    pub async fn from_provider<P: crate::pricing::PriceProvider + ?Sized>(provider: &P) -> Result<Self, ZakatError> {
        let quote = provider.get_prices().await?;
        Ok(Self::from(quote))
    }

    /// Refreshes the prices in this configuration using the given provider.
    ///
    /// On failure the previous prices are kept untouched.
    #[cfg(feature = "async")]
    pub async fn refresh_prices<P: crate::pricing::PriceProvider + ?Sized>(&mut self, provider: &P) -> Result<(), ZakatError> {
        let quote = provider.get_prices().await?;
        self.gold_price_per_gram = Some(quote.gold_per_gram());
        self.silver_price_per_gram = Some(quote.silver_per_gram());
        Ok(())
    }
}

fn read_price_var(name: &str) -> Result<Option<Decimal>, ZakatError> {
    match env::var(name) {
        Ok(raw) => raw
            .as_str()
            .into_zakat_decimal()
            .map(Some)
            .map_err(|e| ZakatError::ConfigurationError(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}

impl From<PriceQuote> for ZakatConfig {
    fn from(quote: PriceQuote) -> Self {
        Self {
            gold_price_per_gram: Some(quote.gold_per_gram()),
            silver_price_per_gram: Some(quote.silver_per_gram()),
        }
    }
}

// ========== ZakatConfigBuilder ==========

#[derive(Default)]
pub struct ZakatConfigBuilder {
    gold_price: Option<Decimal>,
    silver_price: Option<Decimal>,
    errors: Vec<ZakatError>,
}

impl ZakatConfigBuilder {
    pub fn gold_price(mut self, price: impl IntoZakatDecimal) -> Self {
        match price.into_zakat_decimal() {
            Ok(p) => self.gold_price = Some(p),
            Err(e) => self.errors.push(e),
        }
        self
    }

    pub fn silver_price(mut self, price: impl IntoZakatDecimal) -> Self {
        match price.into_zakat_decimal() {
            Ok(p) => self.silver_price = Some(p),
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Builds the config. Prices may be left unset; malformed ones fail.
    pub fn build(mut self) -> Result<ZakatConfig, ZakatError> {
        if !self.errors.is_empty() {
            return Err(self.errors.remove(0));
        }
        let config = ZakatConfig {
            gold_price_per_gram: self.gold_price,
            silver_price_per_gram: self.silver_price,
        };
        config.validate()?;
        Ok(config)
    }
}
