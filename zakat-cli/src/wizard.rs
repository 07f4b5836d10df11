use colored::Colorize;
use inquire::{Confirm, Text};
use rust_decimal::Decimal;
use strum::IntoEnumIterator;
use zakat_rechner::category::{AssetGroup, Unit};
use zakat_rechner::declaration::AssetDeclaration;
use zakat_rechner::inputs::parse_amount;

/// Runs the guided Zakat wizard.
///
/// Every entry is accepted as typed; text that is not a non-negative number
/// counts as 0.
pub fn run_wizard_mode() -> Result<AssetDeclaration, Box<dyn std::error::Error>> {
    let mut declaration = AssetDeclaration::new();

    println!("\n{}", "GUIDED ZAKAT WIZARD".bright_cyan().bold());
    println!("{}", "This wizard walks through each asset group. Leave a field blank for 0.".dimmed());
    println!("{}", "You can press Ctrl+C at any time to exit.".dimmed());
    println!();

    for group in AssetGroup::iter() {
        if !Confirm::new(&format!("Do you hold any {}?", group.to_string().to_lowercase()))
            .with_default(false)
            .with_help_message(group_help(group))
            .prompt()?
        {
            continue;
        }

        println!("\n{}", format!("--- {} ---", group).bright_yellow());
        for category in group.categories() {
            let raw = Text::new(&format!("{}:", category.label()))
                .with_placeholder(placeholder(category.unit()))
                .prompt()?;

            let amount = parse_amount(&raw);
            let typed = raw.trim();
            if amount.is_zero() && !typed.is_empty() && typed.parse::<Decimal>().map_or(true, |v| !v.is_zero()) {
                println!("{}", format!("'{}' is not a valid amount, counted as 0.", typed).dimmed());
            }
            declaration = declaration.with_amount(category, amount);
        }
    }

    println!("\n{}", "Wizard complete! Calculating...".bold());
    Ok(declaration)
}

fn placeholder(unit: Unit) -> &'static str {
    match unit {
        Unit::Grams => "grams, e.g. 85",
        Unit::Currency => "amount, e.g. 1000",
    }
}

fn group_help(group: AssetGroup) -> &'static str {
    match group {
        AssetGroup::Gold => "Jewellery, bars and coins by weight and purity.",
        AssetGroup::Silver => "Silver by weight in grams.",
        AssetGroup::Gems => "Gemstones at their current value.",
        AssetGroup::LiquidFunds => "Cash and bank balances.",
        AssetGroup::CapitalHoldings => "Loans given, bonds, pensions, insurance and investments.",
        AssetGroup::Property => "Real estate held for investment and rental income.",
        AssetGroup::TradeGoods => "Inventory and receivables; supplier debts are deducted.",
        AssetGroup::BusinessShares => "Your stake in a company and loans you made to it.",
    }
}
