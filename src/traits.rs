use crate::config::ZakatConfig;
use crate::declaration::AssetDeclaration;
use crate::engine::ZakatEngine;
use crate::types::{ZakatError, ZakatResult};

/// Trait to be implemented by everything that can be assessed for Zakat.
pub trait CalculateZakat {
    /// Calculate Zakat against the prices held in `config`.
    ///
    /// Fails with `ZakatError::MissingPriceData` while either price is absent.
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatResult, ZakatError>;
}

impl CalculateZakat for AssetDeclaration {
    fn calculate_zakat(&self, config: &ZakatConfig) -> Result<ZakatResult, ZakatError> {
        ZakatEngine.evaluate(self, config.gold_price_per_gram, config.silver_price_per_gram)
    }
}
