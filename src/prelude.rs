//! Prelude module for zakat-rechner
//!
//! This module re-exports commonly used structs, traits, and types to allow
//! for easier usage of the library.
//!
//! # Usage
//!
//! ```rust
//! use zakat_rechner::prelude::*;
//! ```

// Core exports
pub use crate::category::{AssetCategory, AssetGroup, Unit, Valuation};
pub use crate::config::ZakatConfig;
pub use crate::declaration::AssetDeclaration;
pub use crate::engine::{ZakatEngine, nisab_threshold};
pub use crate::inputs::{IntoAmount, IntoZakatDecimal};
pub use crate::pricing::{NetworkConfig, PriceQuote, QuoteUnit, StaticPriceProvider};
pub use crate::report::Verdict;
pub use crate::traits::CalculateZakat;
pub use crate::types::{AssetBreakdown, CalculationStep, Metal, ZakatError, ZakatResult};

#[cfg(feature = "async")]
pub use crate::pricing::{CachedPriceProvider, PriceProvider};

#[cfg(feature = "live-pricing")]
pub use crate::pricing::MetalsLivePriceProvider;
