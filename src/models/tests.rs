#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_parse_predefined() {
    assert_eq!(Category::parse("food"), Category::Food);
    assert_eq!(Category::parse("travel"), Category::Travel);
    assert_eq!(Category::parse("other"), Category::Other);
}

#[test]
fn test_parse_predefined_case_insensitive() {
    assert_eq!(Category::parse("Food"), Category::Food);
    assert_eq!(Category::parse("TRAVEL"), Category::Travel);
    assert_eq!(Category::parse("OtHeR"), Category::Other);
}

#[test]
fn test_parse_custom_keeps_case() {
    assert_eq!(
        Category::parse("Vet Bills"),
        Category::Custom("Vet Bills".into())
    );
    assert_eq!(Category::parse("groceries").as_str(), "groceries");
}

#[test]
fn test_from_input_trims() {
    assert_eq!(Category::from_input("  snacks  ").as_str(), "snacks");
}

#[test]
fn test_from_input_empty_is_other() {
    assert_eq!(Category::from_input(""), Category::Other);
    assert_eq!(Category::from_input("   "), Category::Other);
}

#[test]
fn test_from_input_other_literal() {
    // Picking "other" with no custom text stores the literal token
    assert_eq!(Category::from_input("other").as_str(), "other");
    assert_eq!(Category::from_input("Other").as_str(), "other");
}

#[test]
fn test_stored_token_round_trip() {
    for cat in [
        Category::Food,
        Category::Travel,
        Category::Other,
        Category::Custom("Books".into()),
    ] {
        assert_eq!(Category::parse(cat.as_str()), cat);
    }
}

#[test]
fn test_display_name_capitalizes() {
    assert_eq!(Category::Food.display_name(), "Food");
    assert_eq!(Category::Custom("vet bills".into()).display_name(), "Vet bills");
    // Already-capitalized custom text is left alone
    assert_eq!(Category::Custom("Rent".into()).display_name(), "Rent");
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_validate_positive_amount() {
    let e = Expense::new(dec!(42.50), Category::Food, date(2025, 3, 10));
    assert!(e.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_and_negative() {
    let e = Expense::new(Decimal::ZERO, Category::Food, date(2025, 3, 10));
    assert!(e.validate().is_err());
    let e = Expense::new(dec!(-1.00), Category::Food, date(2025, 3, 10));
    assert!(e.validate().is_err());
}

// ── MonthKey ──────────────────────────────────────────────────

#[test]
fn test_month_parse() {
    assert_eq!(MonthKey::parse("2025-03"), MonthKey::new(2025, 3));
    assert_eq!(MonthKey::parse("2025-3"), MonthKey::new(2025, 3));
    assert_eq!(MonthKey::parse(" 2024-12 "), MonthKey::new(2024, 12));
}

#[test]
fn test_month_parse_rejects_garbage() {
    assert!(MonthKey::parse("2025").is_none());
    assert!(MonthKey::parse("2025-13").is_none());
    assert!(MonthKey::parse("2025-00").is_none());
    assert!(MonthKey::parse("not-a-month").is_none());
}

#[test]
fn test_month_display() {
    let m = MonthKey::new(2025, 3).unwrap();
    assert_eq!(m.to_string(), "2025-03");
}

#[test]
fn test_month_contains() {
    let m = MonthKey::new(2025, 3).unwrap();
    assert!(m.contains(date(2025, 3, 1)));
    assert!(m.contains(date(2025, 3, 31)));
    assert!(!m.contains(date(2025, 4, 1)));
    assert!(!m.contains(date(2024, 3, 15)));
}

#[test]
fn test_month_next_prev() {
    let m = MonthKey::new(2024, 12).unwrap();
    assert_eq!(m.next(), MonthKey::new(2025, 1).unwrap());
    assert_eq!(m.next().prev(), m);
    let jan = MonthKey::new(2025, 1).unwrap();
    assert_eq!(jan.prev(), MonthKey::new(2024, 12).unwrap());
}

#[test]
fn test_month_ordering_is_chronological() {
    let mut months = vec![
        MonthKey::new(2025, 1).unwrap(),
        MonthKey::new(2024, 12).unwrap(),
        MonthKey::new(2025, 2).unwrap(),
    ];
    months.sort();
    assert_eq!(
        months,
        vec![
            MonthKey::new(2024, 12).unwrap(),
            MonthKey::new(2025, 1).unwrap(),
            MonthKey::new(2025, 2).unwrap(),
        ]
    );
}

#[test]
fn test_month_label() {
    assert_eq!(MonthKey::new(2025, 1).unwrap().label(), "January 2025");
    assert_eq!(MonthKey::new(2024, 12).unwrap().label(), "December 2024");
}
