//! The valuation-and-threshold engine.
//!
//! A pure function of (declaration, gold price, silver price). Each category
//! is valued by its [`Valuation`] rule, subtotals are collected per
//! [`AssetGroup`], and the grand total is compared against a gold-based Nisab.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::category::{AssetCategory, AssetGroup, Valuation};
use crate::declaration::AssetDeclaration;
use crate::math::{ZakatDecimal, checked_sum};
use crate::pricing::PriceQuote;
use crate::types::{AssetBreakdown, CalculationStep, Metal, ZakatError, ZakatResult};

/// Nisab expressed as a weight of pure gold.
pub const NISAB_GOLD_GRAMS: Decimal = dec!(85);

/// 2.5%
pub const ZAKAT_RATE: Decimal = dec!(0.025);

/// Stateless calculator. Holds no data, so one value can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZakatEngine;

impl ZakatEngine {
    pub fn new() -> Self {
        Self
    }

    /// Computes Zakat for prices that may not have arrived yet.
    ///
    /// Returns `ZakatError::MissingPriceData` (the "unavailable" state) when
    /// either price is absent or not strictly positive. No partial result is
    /// ever produced.
    pub fn evaluate(
        &self,
        declaration: &AssetDeclaration,
        gold_price_per_gram: Option<Decimal>,
        silver_price_per_gram: Option<Decimal>,
    ) -> Result<ZakatResult, ZakatError> {
        let prices = PriceQuote::from_options(gold_price_per_gram, silver_price_per_gram)?;
        self.compute(declaration, &prices)
    }

    /// Computes Zakat against a validated quote.
    pub fn compute(&self, declaration: &AssetDeclaration, prices: &PriceQuote) -> Result<ZakatResult, ZakatError> {
        let mut breakdown = AssetBreakdown::default();
        let mut trade_gross = ZakatDecimal::new(Decimal::ZERO).with_context("Trade Goods (gross)");
        let mut liabilities = ZakatDecimal::new(Decimal::ZERO).with_context("Business Liabilities");

        for (category, amount) in declaration.iter() {
            let value = category_value(category, amount, prices)?;
            let group = category.group();

            let slot = breakdown.slot_mut(group);
            *slot = ZakatDecimal::new(*slot)
                .with_context(group.to_string())
                .checked_add(value)?
                .into_inner();

            if category.is_deduction() {
                liabilities = liabilities.checked_add(amount)?;
            } else if group == AssetGroup::TradeGoods {
                trade_gross = trade_gross.checked_add(value)?;
            }
        }

        let total_assets = checked_sum(breakdown.entries().map(|(_, v)| v), "Total Assets")?;
        let nisab = nisab_threshold(prices.gold_per_gram())?;
        let is_payable = total_assets >= nisab;

        let payable = if is_payable {
            ZakatDecimal::new(total_assets)
                .with_context("Zakat Due")
                .checked_mul(ZAKAT_RATE)?
                .into_inner()
        } else {
            Decimal::ZERO
        };

        tracing::debug!(%total_assets, %nisab, is_payable, %payable, "zakat computed");

        let calculation_trace = build_trace(
            &breakdown,
            trade_gross.into_inner(),
            liabilities.into_inner(),
            total_assets,
            nisab,
            payable,
        );

        Ok(ZakatResult {
            total_assets,
            nisab_threshold: nisab,
            is_payable,
            payable,
            breakdown,
            calculation_trace,
        })
    }
}

/// The Nisab in currency: 85 g of gold at `gold_price_per_gram`.
///
/// Available as soon as the gold price is known, independently of silver.
pub fn nisab_threshold(gold_price_per_gram: Decimal) -> Result<Decimal, ZakatError> {
    if gold_price_per_gram <= Decimal::ZERO {
        return Err(ZakatError::MissingPriceData { metal: Metal::Gold });
    }
    ZakatDecimal::new(NISAB_GOLD_GRAMS)
        .with_context("Nisab")
        .checked_mul(gold_price_per_gram)
        .map(ZakatDecimal::into_inner)
}

fn category_value(category: AssetCategory, amount: Decimal, prices: &PriceQuote) -> Result<Decimal, ZakatError> {
    match category.valuation() {
        Valuation::Weighed { metal, purity } => ZakatDecimal::new(amount)
            .with_context(category.key())
            .checked_mul(prices.price_per_gram(metal))?
            .checked_mul(purity)
            .map(ZakatDecimal::into_inner),
        Valuation::Monetary => Ok(amount),
        Valuation::Liability => Ok(-amount),
    }
}

fn build_trace(
    breakdown: &AssetBreakdown,
    trade_gross: Decimal,
    liabilities: Decimal,
    total_assets: Decimal,
    nisab: Decimal,
    payable: Decimal,
) -> Vec<CalculationStep> {
    let mut trace = Vec::new();

    for (group, subtotal) in breakdown.entries() {
        match group {
            AssetGroup::Gold => trace.push(CalculationStep::initial(group.to_string(), subtotal)),
            AssetGroup::TradeGoods => {
                trace.push(CalculationStep::add("Trade Goods (gross)", trade_gross));
                trace.push(CalculationStep::subtract("Business Liabilities", liabilities));
            }
            _ => trace.push(CalculationStep::add(group.to_string(), subtotal)),
        }
    }

    trace.push(CalculationStep::result("Total Assets", total_assets));
    trace.push(CalculationStep::compare("Nisab (85 g gold)", nisab));

    if total_assets >= nisab {
        trace.push(CalculationStep::rate("Zakat Rate (2.5%)", ZAKAT_RATE));
        trace.push(CalculationStep::result("Zakat Due", payable));
    } else {
        trace.push(CalculationStep::info("Total Assets below Nisab - No Zakat Due"));
    }

    trace
}
