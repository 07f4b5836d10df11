//! Presentation helpers for engine outcomes.
//!
//! An outcome is shown in exactly one of three ways: the amount due, an
//! explicit "below Nisab" message, or a waiting message while prices are
//! unavailable. A stale or zero figure is never shown in place of the last.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

use crate::types::{Operation, ZakatError, ZakatResult};

pub const BELOW_NISAB_MESSAGE: &str = "Your assets are below the Nisab. No Zakat is due.";
pub const AWAITING_PRICES_MESSAGE: &str = "Waiting for gold and silver price data.";

/// Formats a currency amount with 2 decimal places, rounding half away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Verdict {
    Payable { amount: Decimal },
    BelowNisab,
    AwaitingPrices,
}

impl Verdict {
    pub fn from_result(result: &ZakatResult) -> Self {
        if result.is_payable {
            Verdict::Payable { amount: result.payable }
        } else {
            Verdict::BelowNisab
        }
    }

    /// Maps an engine outcome to what the user should see.
    ///
    /// Missing prices and feed failures both become `AwaitingPrices`; any
    /// other error is handed back to the caller.
    pub fn from_outcome(outcome: &Result<ZakatResult, ZakatError>) -> Result<Self, ZakatError> {
        match outcome {
            Ok(result) => Ok(Self::from_result(result)),
            Err(e) if e.is_unavailable() => Ok(Verdict::AwaitingPrices),
            Err(e) => Err(e.clone()),
        }
    }

    pub fn message(&self) -> String {
        self.message_with_currency("")
    }

    /// Like [`Verdict::message`], prefixing the amount with `symbol`.
    pub fn message_with_currency(&self, symbol: &str) -> String {
        match self {
            Verdict::Payable { amount } => format!("Your Zakat due is {}{}.", symbol, format_amount(*amount)),
            Verdict::BelowNisab => BELOW_NISAB_MESSAGE.to_string(),
            Verdict::AwaitingPrices => AWAITING_PRICES_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl ZakatResult {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_result(self)
    }

    /// Returns the Zakat due formatted with 2 decimal places.
    pub fn format_amount(&self) -> String {
        format_amount(self.payable)
    }

    /// One line: "{Payable/Exempt} - Total: {t} | Nisab: {n} | Due: {d}".
    pub fn summary(&self) -> String {
        let status = if self.is_payable { "Payable" } else { "Exempt" };
        format!(
            "{} - Total: {} | Nisab: {} | Due: {}",
            status,
            format_amount(self.total_assets),
            format_amount(self.nisab_threshold),
            self.format_amount()
        )
    }

    /// Step-by-step explanation of how the amount due was reached.
    pub fn explain(&self) -> String {
        Explanation(self).to_string()
    }
}

struct Explanation<'a>(&'a ZakatResult);

impl fmt::Display for Explanation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "Zakat calculation:")?;
        writeln!(f, "{:-<50}", "")?;

        let width = result
            .calculation_trace
            .iter()
            .map(|step| step.description.len())
            .max()
            .unwrap_or(20)
            .max(20);

        for step in &result.calculation_trace {
            match (step.operation, step.amount) {
                (Operation::Info, _) => writeln!(f, "  INFO: {}", step.description)?,
                (Operation::Rate, Some(rate)) => {
                    writeln!(f, "  {:<width$} : {} {:>12.3}", step.description, step.operation.symbol(), rate)?
                }
                (op, Some(amount)) => writeln!(
                    f,
                    "  {:<width$} : {} {:>12}",
                    step.description,
                    op.symbol(),
                    format_amount(amount)
                )?,
                (_, None) => writeln!(f, "  {:<width$} : [No Amount]", step.description)?,
            }
        }

        writeln!(f, "{:-<50}", "")?;
        writeln!(f, "Status: {}", if result.is_payable { "PAYABLE" } else { "EXEMPT" })?;
        writeln!(f, "{}", result.verdict())
    }
}

impl fmt::Display for ZakatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total Assets: {} | Nisab: {}",
            format_amount(self.total_assets),
            format_amount(self.nisab_threshold)
        )?;
        write!(f, "{}", self.verdict())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::AssetCategory;
    use crate::declaration::AssetDeclaration;
    use crate::engine::ZakatEngine;
    use crate::types::Metal;
    use rust_decimal_macros::dec;

    fn outcome(gold24: Decimal) -> Result<ZakatResult, ZakatError> {
        let decl = AssetDeclaration::new()
            .with_amount(AssetCategory::Gold24, gold24)
            .with_amount(AssetCategory::Silver, dec!(200))
            .with_amount(AssetCategory::Cash, dec!(1000));
        ZakatEngine.evaluate(&decl, Some(dec!(60)), Some(dec!(0.8)))
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(179.000)), "179.00");
        assert_eq!(format_amount(dec!(2.345)), "2.35");
        assert_eq!(format_amount(dec!(-2.345)), "-2.35");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_three_messages() {
        let payable = Verdict::from_outcome(&outcome(dec!(100))).unwrap();
        assert_eq!(payable, Verdict::Payable { amount: dec!(179) });
        assert_eq!(payable.message(), "Your Zakat due is 179.00.");
        assert_eq!(payable.message_with_currency("€"), "Your Zakat due is €179.00.");

        let below = Verdict::from_outcome(&outcome(dec!(50))).unwrap();
        assert_eq!(below.message(), BELOW_NISAB_MESSAGE);

        let waiting = Verdict::from_outcome(&Err(ZakatError::MissingPriceData { metal: Metal::Silver })).unwrap();
        assert_eq!(waiting.to_string(), AWAITING_PRICES_MESSAGE);
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = ZakatError::Overflow { operation: "add".to_string(), source_label: None };
        assert_eq!(Verdict::from_outcome(&Err(err.clone())).unwrap_err(), err);
    }

    #[test]
    fn test_verdict_json() {
        let json = serde_json::to_string(&Verdict::BelowNisab).unwrap();
        assert_eq!(json, r#"{"status":"belowNisab"}"#);
    }

    #[test]
    fn test_explain_lists_steps() {
        let result = outcome(dec!(100)).unwrap();
        let text = result.explain();
        assert!(text.contains("Gold"));
        assert!(text.contains("6000.00"));
        assert!(text.contains("Nisab (85 g gold)"));
        assert!(text.contains("0.025"));
        assert!(text.contains("Status: PAYABLE"));
        assert!(text.trim_end().ends_with("Your Zakat due is 179.00."));
    }

    #[test]
    fn test_summary_and_display() {
        let result = outcome(dec!(50)).unwrap();
        assert_eq!(result.summary(), "Exempt - Total: 4160.00 | Nisab: 5100.00 | Due: 0.00");
        assert!(result.to_string().ends_with(BELOW_NISAB_MESSAGE));
    }
}
