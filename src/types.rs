use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::category::AssetGroup;

/// The two precious metals whose spot prices drive the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "camelCase")]
pub enum Metal {
    Gold,
    Silver,
}

impl Metal {
    /// Lowercase name, as used in feed URLs.
    pub fn key(&self) -> &'static str {
        match self {
            Metal::Gold => "gold",
            Metal::Silver => "silver",
        }
    }
}

/// Kind of arithmetic a [`CalculationStep`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initial,
    Add,
    Subtract,
    Compare,
    Rate,
    Result,
    Info,
}

impl Operation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Initial | Operation::Info => " ",
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Compare => "?",
            Operation::Rate => "x",
            Operation::Result => "=",
        }
    }
}

/// Represents a single step in the Zakat calculation process.
///
/// The trace lets a user verify every group subtotal that went into the
/// final amount, in the order the engine computed them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The value at this step (if applicable).
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn with(operation: Operation, description: impl Into<String>, amount: Option<Decimal>) -> Self {
        Self {
            description: description.into(),
            amount,
            operation,
        }
    }

    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Initial, description, Some(amount))
    }

    pub fn add(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Add, description, Some(amount))
    }

    pub fn subtract(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Subtract, description, Some(amount))
    }

    pub fn compare(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Compare, description, Some(amount))
    }

    pub fn rate(description: impl Into<String>, rate: Decimal) -> Self {
        Self::with(Operation::Rate, description, Some(rate))
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(Operation::Result, description, Some(amount))
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::with(Operation::Info, description, None)
    }
}

/// Subtotals of the eight asset groups, in currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBreakdown {
    pub gold: Decimal,
    pub silver: Decimal,
    pub gems: Decimal,
    pub liquid_funds: Decimal,
    pub capital_holdings: Decimal,
    pub property: Decimal,
    /// Inventory and receivables net of business liabilities. May be negative.
    pub trade_goods_net: Decimal,
    pub business_shares: Decimal,
}

impl AssetBreakdown {
    pub fn get(&self, group: AssetGroup) -> Decimal {
        match group {
            AssetGroup::Gold => self.gold,
            AssetGroup::Silver => self.silver,
            AssetGroup::Gems => self.gems,
            AssetGroup::LiquidFunds => self.liquid_funds,
            AssetGroup::CapitalHoldings => self.capital_holdings,
            AssetGroup::Property => self.property,
            AssetGroup::TradeGoods => self.trade_goods_net,
            AssetGroup::BusinessShares => self.business_shares,
        }
    }

    pub(crate) fn slot_mut(&mut self, group: AssetGroup) -> &mut Decimal {
        match group {
            AssetGroup::Gold => &mut self.gold,
            AssetGroup::Silver => &mut self.silver,
            AssetGroup::Gems => &mut self.gems,
            AssetGroup::LiquidFunds => &mut self.liquid_funds,
            AssetGroup::CapitalHoldings => &mut self.capital_holdings,
            AssetGroup::Property => &mut self.property,
            AssetGroup::TradeGoods => &mut self.trade_goods_net,
            AssetGroup::BusinessShares => &mut self.business_shares,
        }
    }

    /// Group subtotals in aggregation order.
    pub fn entries(&self) -> impl Iterator<Item = (AssetGroup, Decimal)> + '_ {
        AssetGroup::iter().map(move |g| (g, self.get(g)))
    }
}

/// Outcome of one engine invocation.
///
/// Never partially computed: either every field is filled or the engine
/// returned an error instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZakatResult {
    /// Sum of all group subtotals. Not clamped, so it can be negative.
    pub total_assets: Decimal,
    /// 85 g of gold at the current gold price.
    pub nisab_threshold: Decimal,
    /// Whether `total_assets >= nisab_threshold`.
    pub is_payable: bool,
    /// The Zakat due. Always >= 0.
    pub payable: Decimal,
    pub breakdown: AssetBreakdown,
    pub calculation_trace: Vec<CalculationStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
pub enum ZakatError {
    /// A spot price is absent or not strictly positive; no result can be produced.
    #[error("Price data unavailable: {metal} price is missing or not positive")]
    MissingPriceData { metal: Metal },

    #[error("Invalid input for '{field}' ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown asset category '{0}'")]
    UnknownCategory(String),

    #[error("Calculation overflow in '{operation}'")]
    Overflow {
        operation: String,
        source_label: Option<String>,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ZakatError {
    /// True when the error means "no price data yet", which callers present
    /// as a waiting state rather than a failure.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ZakatError::MissingPriceData { .. } | ZakatError::NetworkError(_))
    }

    pub fn invalid_input(field: impl Into<String>, value: impl ToString, reason: impl Into<String>) -> Self {
        ZakatError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
