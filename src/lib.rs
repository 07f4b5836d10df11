//! # zakat-rechner
//!
//! Zakat valuation-and-threshold engine: values a declaration of 27 asset
//! categories at current gold and silver prices, compares the total against
//! the gold Nisab and applies the 2.5% rate.
//!
//! ```rust
//! use zakat_rechner::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let declaration = AssetDeclaration::new()
//!     .with_amount(AssetCategory::Gold24, dec!(100))
//!     .with_amount(AssetCategory::Silver, dec!(200))
//!     .with_amount(AssetCategory::Cash, dec!(1000));
//!
//! let result = ZakatEngine::new()
//!     .evaluate(&declaration, Some(dec!(60)), Some(dec!(0.8)))
//!     .unwrap();
//! assert_eq!(result.payable, dec!(179));
//! ```

#[macro_use]
mod macros;

pub mod category;
pub mod config;
pub mod declaration;
pub mod engine;
pub mod inputs;
pub mod math;
pub mod prelude;
pub mod pricing;
pub mod report;
pub mod traits;
pub mod types;

pub use config::ZakatConfig;
pub use declaration::AssetDeclaration;
pub use engine::ZakatEngine;
pub use traits::CalculateZakat;
pub use types::{ZakatError, ZakatResult};
