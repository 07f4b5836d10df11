//! Persistent CLI Configuration Loader
//!
//! Configuration is loaded from `~/.config/zakat/config.toml` on Linux,
//! `~/Library/Application Support/zakat/config.toml` on macOS and
//! `%APPDATA%\zakat\config.toml` on Windows.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};
use zakat_rechner::ZakatConfig;

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Fallback gold price per gram, used when no flag is given.
    pub gold_price: Option<Decimal>,
    /// Fallback silver price per gram.
    pub silver_price: Option<Decimal>,
    /// Skip the live price feed by default.
    pub offline: Option<bool>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
    /// Prefix for displayed amounts (e.g. "€").
    pub currency_symbol: Option<String>,
}

impl CliConfig {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zakat"))
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Loads the config file, falling back to defaults when it is absent or broken.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            debug!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<CliConfig>(&content) {
                Ok(config) => {
                    debug!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(&path, content)?;
        debug!("Saved configuration to {:?}", path);
        Ok(path)
    }

    pub fn sample() -> Self {
        CliConfig {
            gold_price: Some(dec!(60)),
            silver_price: Some(dec!(0.8)),
            offline: Some(false),
            enable_logging: Some(false),
            currency_symbol: Some("€".to_string()),
        }
    }

    /// Writes [`CliConfig::sample`] to the default location.
    pub fn create_sample() -> Result<PathBuf, std::io::Error> {
        Self::sample().save()
    }

    /// The configured prices as an engine price input (either may be missing).
    pub fn prices(&self) -> ZakatConfig {
        ZakatConfig {
            gold_price_per_gram: self.gold_price,
            silver_price_per_gram: self.silver_price,
        }
    }

    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol.as_deref().unwrap_or("")
    }
}
