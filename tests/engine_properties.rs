use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use zakat_rechner::prelude::*;

fn engine_result(decl: &AssetDeclaration, gold: Decimal, silver: Decimal) -> ZakatResult {
    ZakatEngine::new()
        .evaluate(decl, Some(gold), Some(silver))
        .unwrap()
}

#[test]
fn test_purity_multipliers_at_price_100() {
    let cases = [
        (AssetCategory::Gold24, dec!(100)),
        (AssetCategory::Gold22, dec!(92)),
        (AssetCategory::Gold18, dec!(75)),
        (AssetCategory::GoldOther, dec!(1)),
    ];
    for (category, expected) in cases {
        let decl = AssetDeclaration::new().with_amount(category, dec!(1));
        let result = engine_result(&decl, dec!(100), dec!(1));
        assert_eq!(result.total_assets, expected, "{}", category);
    }

    // goldOther ignores the gold price.
    let decl = AssetDeclaration::new().with_amount(AssetCategory::GoldOther, dec!(1));
    assert_eq!(engine_result(&decl, dec!(7), dec!(1)).total_assets, dec!(1));
}

#[test]
fn test_threshold_is_inclusive() {
    // nisab = 85 * 100 = 8500
    let decl = AssetDeclaration::new().with_amount(AssetCategory::Cash, dec!(8500));
    let result = engine_result(&decl, dec!(100), dec!(1));

    assert_eq!(result.total_assets, result.nisab_threshold);
    assert!(result.is_payable);
    assert_eq!(result.payable, dec!(212.5));
}

#[test]
fn test_below_threshold_pays_nothing() {
    let decl = AssetDeclaration::new().with_amount(AssetCategory::Cash, dec!(8499.99));
    let result = engine_result(&decl, dec!(100), dec!(1));

    assert!(!result.is_payable);
    assert_eq!(result.payable, Decimal::ZERO);
    assert_eq!(result.verdict(), Verdict::BelowNisab);
}

#[test]
fn test_trade_goods_can_go_negative() {
    let decl = AssetDeclaration::new()
        .with_amount(AssetCategory::Inventory, dec!(1000))
        .with_amount(AssetCategory::SupplierDebts, dec!(1200));
    let result = engine_result(&decl, dec!(50), dec!(1));

    assert_eq!(result.nisab_threshold, dec!(4250));
    assert_eq!(result.total_assets, dec!(-200));
    assert_eq!(result.payable, Decimal::ZERO);
}

#[test]
fn test_missing_price_is_unavailable() {
    let decl = AssetDeclaration::new()
        .with_amount(AssetCategory::Cash, dec!(1000000))
        .with_amount(AssetCategory::Gold24, dec!(500));
    let engine = ZakatEngine::new();

    let outcomes = [
        engine.evaluate(&decl, Some(Decimal::ZERO), Some(dec!(0.8))),
        engine.evaluate(&decl, Some(dec!(60)), None),
        engine.evaluate(&decl, None, None),
        engine.evaluate(&decl, Some(dec!(-1)), Some(dec!(0.8))),
    ];
    for outcome in &outcomes {
        assert!(matches!(outcome, Err(ZakatError::MissingPriceData { .. })));
        assert_eq!(Verdict::from_outcome(outcome).unwrap(), Verdict::AwaitingPrices);
    }
}

#[test]
fn test_monotonic_in_every_category() {
    let base = AssetDeclaration::new()
        .with_amount(AssetCategory::Cash, dec!(500))
        .with_amount(AssetCategory::Inventory, dec!(300))
        .with_amount(AssetCategory::SupplierDebts, dec!(100));
    let before = engine_result(&base, dec!(60), dec!(0.8)).total_assets;

    for &category in AssetCategory::ALL {
        let bumped = base.with_amount(category, base.get(category) + dec!(10));
        let after = engine_result(&bumped, dec!(60), dec!(0.8)).total_assets;

        if category.is_deduction() {
            assert!(after < before, "{} should lower the total", category);
        } else {
            assert!(after > before, "{} should raise the total", category);
        }
    }
}

#[test]
fn test_end_to_end_below_nisab() {
    let decl = AssetDeclaration::new()
        .with_amount(AssetCategory::Gold24, dec!(50))
        .with_amount(AssetCategory::Silver, dec!(200))
        .with_amount(AssetCategory::Cash, dec!(1000));
    let result = engine_result(&decl, dec!(60), dec!(0.8));

    assert_eq!(result.breakdown.gold, dec!(3000));
    assert_eq!(result.breakdown.silver, dec!(160));
    assert_eq!(result.breakdown.liquid_funds, dec!(1000));
    assert_eq!(result.total_assets, dec!(4160));
    assert_eq!(result.nisab_threshold, dec!(5100));
    assert_eq!(result.payable, Decimal::ZERO);
}

#[test]
fn test_end_to_end_liable() {
    let decl = AssetDeclaration::new()
        .with_amount(AssetCategory::Gold24, dec!(100))
        .with_amount(AssetCategory::Silver, dec!(200))
        .with_amount(AssetCategory::Cash, dec!(1000));
    let result = engine_result(&decl, dec!(60), dec!(0.8));

    assert_eq!(result.total_assets, dec!(7160));
    assert!(result.is_payable);
    assert_eq!(result.payable, dec!(179.00));
    assert_eq!(result.format_amount(), "179.00");
    assert_eq!(result.verdict().message(), "Your Zakat due is 179.00.");
}

#[test]
fn test_repeated_evaluation_is_identical() {
    let decl = AssetDeclaration::new()
        .with_amount(AssetCategory::Gold22, dec!(40))
        .with_amount(AssetCategory::RealEstate, dec!(20000));
    let first = engine_result(&decl, dec!(60), dec!(0.8));
    let second = engine_result(&decl, dec!(60), dec!(0.8));
    assert_eq!(first, second);
}

#[test]
fn test_result_json_is_camel_case() {
    let decl = AssetDeclaration::new().with_amount(AssetCategory::Cash, dec!(6000));
    let result = engine_result(&decl, dec!(60), dec!(0.8));
    let json = serde_json::to_value(&result).unwrap();
    let decimal_at = |value: &serde_json::Value| value.as_str().unwrap().parse::<Decimal>().unwrap();

    assert_eq!(decimal_at(&json["totalAssets"]), dec!(6000));
    assert_eq!(decimal_at(&json["nisabThreshold"]), dec!(5100));
    assert_eq!(json["isPayable"], serde_json::json!(true));
    assert_eq!(decimal_at(&json["breakdown"]["liquidFunds"]), dec!(6000));
    assert!(json["calculationTrace"].as_array().is_some_and(|t| !t.is_empty()));
}
