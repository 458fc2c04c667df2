#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(amount: Decimal, category: &str, d: NaiveDate) -> Expense {
    Expense::new(amount, Category::parse(category), d)
}

fn month(y: i32, m: u32) -> MonthKey {
    MonthKey::new(y, m).unwrap()
}

// ── filter_by_month ───────────────────────────────────────────

#[test]
fn test_filter_absent_is_identity() {
    let es = vec![
        expense(dec!(10), "food", date(2025, 1, 5)),
        expense(dec!(20), "travel", date(2024, 12, 31)),
    ];
    let filtered = filter_by_month(&es, None);
    assert_eq!(filtered.len(), es.len());
    assert_eq!(filtered[0].date, es[0].date);
    assert_eq!(filtered[1].date, es[1].date);
}

#[test]
fn test_filter_by_month_exact_match() {
    let es = vec![
        expense(dec!(10), "food", date(2025, 1, 5)),
        expense(dec!(20), "travel", date(2025, 2, 1)),
        // Same month number, different year — must not match
        expense(dec!(30), "food", date(2024, 1, 5)),
    ];
    let filtered = filter_by_month(&es, Some(month(2025, 1)));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].amount, dec!(10));
}

#[test]
fn test_filter_is_idempotent() {
    let es = vec![
        expense(dec!(10), "food", date(2025, 1, 5)),
        expense(dec!(20), "travel", date(2025, 2, 1)),
    ];
    let once = filter_by_month(&es, Some(month(2025, 1)));
    let twice = filter_by_month(&once, Some(month(2025, 1)));
    assert_eq!(once.len(), twice.len());
    assert_eq!(once[0].amount, twice[0].amount);
}

#[test]
fn test_filter_empty_month() {
    let es = vec![expense(dec!(10), "food", date(2025, 1, 5))];
    assert!(filter_by_month(&es, Some(month(2025, 4))).is_empty());
}

// ── category_totals ───────────────────────────────────────────

#[test]
fn test_empty_input_all_zero() {
    let totals = category_totals(&[]);
    assert_eq!(totals.food, Decimal::ZERO);
    assert_eq!(totals.travel, Decimal::ZERO);
    assert_eq!(totals.other, Decimal::ZERO);
    assert!(totals.custom.is_empty());
    assert_eq!(totals.total, Decimal::ZERO);
}

#[test]
fn test_predefined_buckets_sum_to_total() {
    let es = vec![
        expense(dec!(10.25), "food", date(2025, 1, 5)),
        expense(dec!(4.75), "food", date(2025, 1, 6)),
        expense(dec!(20), "travel", date(2025, 1, 6)),
        expense(dec!(7.50), "other", date(2025, 1, 7)),
    ];
    let totals = category_totals(&es);
    assert_eq!(totals.food, dec!(15.00));
    assert_eq!(totals.travel, dec!(20));
    assert_eq!(totals.other, dec!(7.50));
    assert_eq!(totals.food + totals.travel + totals.other, totals.total);
}

#[test]
fn test_custom_buckets_per_distinct_value() {
    let es = vec![
        expense(dec!(5), "Gym", date(2025, 1, 5)),
        expense(dec!(15), "Gym", date(2025, 1, 8)),
        expense(dec!(3), "books", date(2025, 1, 9)),
        expense(dec!(10), "food", date(2025, 1, 9)),
    ];
    let totals = category_totals(&es);
    assert_eq!(totals.custom.get("Gym"), Some(&dec!(20)));
    assert_eq!(totals.custom.get("books"), Some(&dec!(3)));
    assert_eq!(totals.food, dec!(10));
    assert_eq!(totals.total, dec!(33));
}

#[test]
fn test_totals_order_independent() {
    let mut es = vec![
        expense(dec!(1.10), "food", date(2025, 1, 1)),
        expense(dec!(2.20), "travel", date(2025, 1, 2)),
        expense(dec!(3.30), "other", date(2025, 1, 3)),
    ];
    let forward = category_totals(&es);
    es.reverse();
    let backward = category_totals(&es);
    assert_eq!(forward, backward);
}

#[test]
fn test_rows_order_and_display_casing() {
    let es = vec![
        expense(dec!(1), "vet bills", date(2025, 1, 1)),
        expense(dec!(2), "food", date(2025, 1, 1)),
    ];
    let rows = category_totals(&es).rows();
    let names: Vec<&str> = rows.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Food", "Travel", "Other", "Vet bills"]);
}

// ── daily_totals ──────────────────────────────────────────────

#[test]
fn test_daily_totals_groups_and_sorts_descending() {
    let es = vec![
        expense(dec!(10), "food", date(2025, 1, 5)),
        expense(dec!(5), "travel", date(2025, 1, 5)),
        expense(dec!(20), "food", date(2025, 1, 6)),
        expense(dec!(1), "other", date(2024, 12, 31)),
    ];
    let daily = daily_totals(&es);
    assert_eq!(
        daily,
        vec![
            (date(2025, 1, 6), dec!(20)),
            (date(2025, 1, 5), dec!(15)),
            (date(2024, 12, 31), dec!(1)),
        ]
    );
}

#[test]
fn test_daily_totals_no_duplicate_dates() {
    let es = vec![
        expense(dec!(1), "food", date(2025, 1, 5)),
        expense(dec!(2), "food", date(2025, 1, 5)),
        expense(dec!(3), "food", date(2025, 1, 5)),
    ];
    let daily = daily_totals(&es);
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0], (date(2025, 1, 5), dec!(6)));
}

#[test]
fn test_daily_totals_empty() {
    assert!(daily_totals(&[]).is_empty());
}

// ── remaining_budget ──────────────────────────────────────────

#[test]
fn test_remaining_budget() {
    assert_eq!(remaining_budget(dec!(100), dec!(40)), dec!(60));
    assert_eq!(remaining_budget(dec!(100), Decimal::ZERO), dec!(100));
}

#[test]
fn test_remaining_budget_can_go_negative() {
    // Over budget is a displayable state, not an error
    assert_eq!(remaining_budget(dec!(100), dec!(150)), dec!(-50.00));
}

// ── enumerate_months ──────────────────────────────────────────

#[test]
fn test_enumerate_months_dedup_descending() {
    let es = vec![
        expense(dec!(1), "food", date(2024, 12, 5)),
        expense(dec!(2), "food", date(2025, 1, 10)),
        expense(dec!(3), "travel", date(2025, 1, 20)),
    ];
    let months: Vec<String> = enumerate_months(&es).iter().map(|m| m.to_string()).collect();
    assert_eq!(months, vec!["2025-01", "2024-12"]);
}

#[test]
fn test_enumerate_months_empty() {
    assert!(enumerate_months(&[]).is_empty());
}

// ── round-trip across filter + totals ─────────────────────────

#[test]
fn test_expense_visible_in_its_month_only() {
    let es = vec![expense(dec!(42.5), "food", date(2025, 3, 10))];

    let march = category_totals(&filter_by_month(&es, Some(month(2025, 3))));
    assert_eq!(march.food, dec!(42.5));
    assert_eq!(format!("{:.2}", march.food), "42.50");

    let april = category_totals(&filter_by_month(&es, Some(month(2025, 4))));
    assert_eq!(april.food, Decimal::ZERO);
    assert_eq!(april.total, Decimal::ZERO);
}
