//! The closed set of 27 declarable asset categories and how each is valued.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::types::Metal;

/// Pure (24 karat) gold.
pub const PURITY_24K: Decimal = dec!(1);
/// 22 karat gold relative to pure gold.
pub const PURITY_22K: Decimal = dec!(0.92);
/// 18 karat gold relative to pure gold.
pub const PURITY_18K: Decimal = dec!(0.75);
pub const PURITY_SILVER: Decimal = dec!(1);

/// What a category's amount is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
pub enum Unit {
    #[strum(serialize = "g")]
    Grams,
    #[strum(serialize = "currency")]
    Currency,
}

/// The aggregation groups the engine subtotals before summing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "camelCase")]
pub enum AssetGroup {
    #[strum(serialize = "Gold")]
    Gold,
    #[strum(serialize = "Silver")]
    Silver,
    #[strum(serialize = "Gems")]
    Gems,
    #[strum(serialize = "Liquid Funds")]
    LiquidFunds,
    #[strum(serialize = "Capital Holdings")]
    CapitalHoldings,
    #[strum(serialize = "Property")]
    Property,
    #[strum(serialize = "Trade Goods (net)")]
    TradeGoods,
    #[strum(serialize = "Business Shares")]
    BusinessShares,
}

impl AssetGroup {
    /// Categories aggregated into this group, in declaration-form order.
    pub fn categories(self) -> impl Iterator<Item = AssetCategory> {
        AssetCategory::ALL.iter().copied().filter(move |c| c.group() == self)
    }
}

/// How a raw amount turns into a currency value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Valuation {
    /// Grams of metal: `amount × price(metal) × purity`.
    Weighed { metal: Metal, purity: Decimal },
    /// Already in currency: `amount`.
    Monetary,
    /// A business liability netted against trade goods: `−amount`.
    Liability,
}

impl Valuation {
    pub fn unit(&self) -> Unit {
        match self {
            Valuation::Weighed { .. } => Unit::Grams,
            Valuation::Monetary | Valuation::Liability => Unit::Currency,
        }
    }
}

const GOLD_24: Valuation = Valuation::Weighed { metal: Metal::Gold, purity: PURITY_24K };
const GOLD_22: Valuation = Valuation::Weighed { metal: Metal::Gold, purity: PURITY_22K };
const GOLD_18: Valuation = Valuation::Weighed { metal: Metal::Gold, purity: PURITY_18K };
const SILVER: Valuation = Valuation::Weighed { metal: Metal::Silver, purity: PURITY_SILVER };
const MONETARY: Valuation = Valuation::Monetary;
const LIABILITY: Valuation = Valuation::Liability;

asset_categories! {
    Gold24 => "gold24", Gold, GOLD_24, "Gold/jewellery 24 karat (g)";
    Gold22 => "gold22", Gold, GOLD_22, "Gold/jewellery 22 karat (g)";
    Gold18 => "gold18", Gold, GOLD_18, "Gold/jewellery 18 karat (g)";
    /// Gold items already valued in currency (mixed or unknown purity).
    GoldOther => "goldOther", Gold, MONETARY, "Other gold items (currency)";
    Gems => "gems", Gems, MONETARY, "Gemstones (currency)";
    Silver => "silver", Silver, SILVER, "Silver (g)";

    Cash => "cash", LiquidFunds, MONETARY, "Cash (currency)";
    SavingsAccount => "savingsAccount", LiquidFunds, MONETARY, "Savings account (currency)";
    CheckingAccount => "checkingAccount", LiquidFunds, MONETARY, "Checking account (currency)";
    TermDeposit => "termDeposit", LiquidFunds, MONETARY, "Term deposits (currency)";

    LoansGiven => "loansGiven", CapitalHoldings, MONETARY, "Loans given (currency)";
    Bonds => "bonds", CapitalHoldings, MONETARY, "Government bonds (currency)";
    PensionContributions => "pensionContributions", CapitalHoldings, MONETARY, "Pension contributions (currency)";
    InsurancePremiums => "insurancePremiums", CapitalHoldings, MONETARY, "Insurance premiums (currency)";
    Stocks => "stocks", CapitalHoldings, MONETARY, "Stock value (currency)";
    Securities => "securities", CapitalHoldings, MONETARY, "Securities (currency)";
    PrivateInvestments => "privateInvestments", CapitalHoldings, MONETARY, "Private investments (currency)";
    OtherCapital => "otherCapital", CapitalHoldings, MONETARY, "Other capital (currency)";

    /// Estimated value.
    RealEstate => "realEstate", Property, MONETARY, "Real estate, estimated (currency)";
    RentalIncome => "rentalIncome", Property, MONETARY, "Rental income (currency)";

    Inventory => "inventory", TradeGoods, MONETARY, "Inventory (currency)";
    DamagedGoods => "damagedGoods", TradeGoods, MONETARY, "Damaged goods (currency)";
    ReceivablesDue => "receivablesDue", TradeGoods, MONETARY, "Receivables due (currency)";
    SupplierDebts => "supplierDebts", TradeGoods, LIABILITY, "Supplier debts (currency)";
    UncollectibleReceivables => "uncollectibleReceivables", TradeGoods, LIABILITY, "Uncollectible receivables (currency)";

    PartnershipCapital => "partnershipCapital", BusinessShares, MONETARY, "Capital share in a company (currency)";
    LoansToCompany => "loansToCompany", BusinessShares, MONETARY, "Loans to a company (currency)";
}

impl AssetCategory {
    pub fn unit(&self) -> Unit {
        self.valuation().unit()
    }

    /// True for the two trade liabilities that reduce the total.
    pub fn is_deduction(&self) -> bool {
        self.valuation() == Valuation::Liability
    }

    /// Position of this category in [`AssetCategory::ALL`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_closed_set_of_27() {
        assert_eq!(AssetCategory::COUNT, 27);
        let keys: HashSet<_> = AssetCategory::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), 27, "keys must be unique");
    }

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, category) in AssetCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_key_round_trip_and_unknown() {
        for category in AssetCategory::ALL {
            assert_eq!(AssetCategory::from_str(category.key()).unwrap(), *category);
        }
        assert!(matches!(
            AssetCategory::from_str("platinum"),
            Err(crate::types::ZakatError::UnknownCategory(k)) if k == "platinum"
        ));
    }

    #[test]
    fn test_units() {
        let grams: Vec<_> = AssetCategory::ALL
            .iter()
            .filter(|c| c.unit() == Unit::Grams)
            .map(|c| c.key())
            .collect();
        assert_eq!(grams, vec!["gold24", "gold22", "gold18", "silver"]);
    }

    #[test]
    fn test_only_trade_liabilities_are_deductions() {
        let deductions: Vec<_> = AssetCategory::ALL.iter().filter(|c| c.is_deduction()).collect();
        assert_eq!(deductions, vec![&AssetCategory::SupplierDebts, &AssetCategory::UncollectibleReceivables]);
        assert!(deductions.iter().all(|c| c.group() == AssetGroup::TradeGoods));
    }

    #[test]
    fn test_group_sizes() {
        let count = |g: AssetGroup| g.categories().count();
        assert_eq!(count(AssetGroup::Gold), 4);
        assert_eq!(count(AssetGroup::Silver), 1);
        assert_eq!(count(AssetGroup::Gems), 1);
        assert_eq!(count(AssetGroup::LiquidFunds), 4);
        assert_eq!(count(AssetGroup::CapitalHoldings), 8);
        assert_eq!(count(AssetGroup::Property), 2);
        assert_eq!(count(AssetGroup::TradeGoods), 5);
        assert_eq!(count(AssetGroup::BusinessShares), 2);
    }

    #[test]
    fn test_serde_uses_keys() {
        let json = serde_json::to_string(&AssetCategory::SavingsAccount).unwrap();
        assert_eq!(json, r#""savingsAccount""#);
        let parsed: AssetCategory = serde_json::from_str(r#""loansToCompany""#).unwrap();
        assert_eq!(parsed, AssetCategory::LoansToCompany);
    }
}
