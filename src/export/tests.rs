#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Category;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(amount: Decimal, category: &str, d: NaiveDate) -> Expense {
    Expense::new(amount, Category::parse(category), d)
}

// ── CSV ───────────────────────────────────────────────────────

#[test]
fn test_csv_layout() {
    let es = vec![
        expense(dec!(10), "food", date(2025, 1, 5)),
        expense(dec!(20), "travel", date(2025, 1, 6)),
    ];
    let csv = to_csv(&es, "January 2025").unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Date,Amount,Category",
            "2025-01-05,10.00,Food",
            "2025-01-06,20.00,Travel",
        ]
    );
}

#[test]
fn test_csv_preserves_caller_order() {
    let es = vec![
        expense(dec!(20), "travel", date(2025, 1, 6)),
        expense(dec!(10), "food", date(2025, 1, 5)),
    ];
    let csv = to_csv(&es, "January 2025").unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[1].starts_with("2025-01-06"));
    assert!(lines[2].starts_with("2025-01-05"));
}

#[test]
fn test_csv_two_decimals_always() {
    let es = vec![
        expense(dec!(42.5), "food", date(2025, 3, 10)),
        expense(dec!(7), "other", date(2025, 3, 11)),
        expense(dec!(3.456), "other", date(2025, 3, 12)),
        expense(dec!(2.005), "other", date(2025, 3, 13)),
    ];
    let csv = to_csv(&es, "March 2025").unwrap();
    assert!(csv.contains(",42.50,"));
    assert!(csv.contains(",7.00,"));
    // Rounding happens only here, at format time: half away from zero,
    // never truncation
    assert!(csv.contains(",3.46,"));
    assert!(csv.contains(",2.01,"));
}

#[test]
fn test_csv_custom_category_display_cased() {
    let es = vec![expense(dec!(5), "vet bills", date(2025, 1, 5))];
    let csv = to_csv(&es, "January 2025").unwrap();
    assert!(csv.contains("Vet bills"));
}

#[test]
fn test_csv_empty_is_error() {
    let err = to_csv(&[], "January 2025").unwrap_err();
    assert!(err.to_string().contains("No expenses"));
}

#[test]
fn test_csv_quotes_comma_in_category() {
    let es = vec![expense(dec!(5), "books, music", date(2025, 1, 5))];
    let csv = to_csv(&es, "January 2025").unwrap();
    assert!(csv.contains("\"Books, music\""));
}

// ── XLSX ──────────────────────────────────────────────────────

#[test]
fn test_xlsx_produces_workbook_bytes() {
    let es = vec![
        expense(dec!(10), "food", date(2025, 1, 5)),
        expense(dec!(20), "travel", date(2025, 1, 6)),
    ];
    let bytes = to_xlsx(&es, "January 2025").unwrap();
    // XLSX is a ZIP container; check the magic number
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}

#[test]
fn test_xlsx_empty_is_error() {
    assert!(to_xlsx(&[], "January 2025").is_err());
}

#[test]
fn test_sheet_name_capped() {
    assert_eq!(sheet_name("January 2025"), "January 2025");
    let long = "a".repeat(40);
    assert_eq!(sheet_name(&long).chars().count(), 31);
}

// ── Filename convention ───────────────────────────────────────

#[test]
fn test_report_filename() {
    assert_eq!(
        report_filename("January 2025", "csv"),
        "expense_report_January_2025.csv"
    );
    assert_eq!(
        report_filename("All Expenses", "xlsx"),
        "expense_report_All_Expenses.xlsx"
    );
}
