//! Terminal rendering of results and the category list.

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use zakat_rechner::category::AssetCategory;
use zakat_rechner::report::{Verdict, format_amount};
use zakat_rechner::ZakatResult;

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Description")]
    label: &'static str,
}

pub fn breakdown_table(result: &ZakatResult, currency: &str) -> String {
    let mut rows: Vec<GroupRow> = result
        .breakdown
        .entries()
        .map(|(group, value)| GroupRow {
            group: group.to_string(),
            value: format!("{}{}", currency, format_amount(value)),
        })
        .collect();
    rows.push(GroupRow {
        group: "Total Assets".to_string(),
        value: format!("{}{}", currency, format_amount(result.total_assets)),
    });
    rows.push(GroupRow {
        group: "Nisab (85 g gold)".to_string(),
        value: format!("{}{}", currency, format_amount(result.nisab_threshold)),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn categories_table() -> String {
    let rows = AssetCategory::ALL.iter().map(|c| CategoryRow {
        key: c.key(),
        unit: c.unit().to_string(),
        group: c.group().to_string(),
        label: c.label(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// The verdict line, coloured by outcome.
pub fn verdict_line(verdict: &Verdict, currency: &str) -> String {
    let message = verdict.message_with_currency(currency);
    match verdict {
        Verdict::Payable { .. } => message.bright_green().bold().to_string(),
        Verdict::BelowNisab => message.bright_blue().to_string(),
        Verdict::AwaitingPrices => message.yellow().to_string(),
    }
}

pub fn print_result(result: &ZakatResult, currency: &str, explain: bool) {
    println!("{}", breakdown_table(result, currency));
    if explain {
        println!("{}", result.explain());
    }
    println!("{}", verdict_line(&result.verdict(), currency));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use zakat_rechner::{AssetDeclaration, ZakatEngine};

    #[test]
    fn test_categories_table_lists_all_keys() {
        let table = categories_table();
        for category in AssetCategory::ALL {
            assert!(table.contains(category.key()), "missing {}", category.key());
        }
    }

    #[test]
    fn test_breakdown_table_shows_totals() {
        let decl = AssetDeclaration::new().with_amount(AssetCategory::Cash, dec!(1000));
        let result = ZakatEngine.evaluate(&decl, Some(dec!(60)), Some(dec!(0.8))).unwrap();
        let table = breakdown_table(&result, "€");
        assert!(table.contains("Liquid Funds"));
        assert!(table.contains("€1000.00"));
        assert!(table.contains("€5100.00"));
    }

    #[test]
    fn test_verdict_line_text() {
        colored::control::set_override(false);
        let line = verdict_line(&Verdict::Payable { amount: dec!(179) }, "$");
        assert_eq!(line, "Your Zakat due is $179.00.");
    }
}
