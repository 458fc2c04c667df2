//! Aggregation over an expense collection: month filtering, category and
//! daily totals, remaining budget, and month enumeration. Everything here is
//! a pure function over `&[Expense]`; amounts stay exact `Decimal`s and are
//! rounded to two places only when formatted for display.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Category, Expense, MonthKey};

/// Per-bucket sums for a set of expenses. The three predefined buckets are
/// always present; custom categories accumulate per distinct stored value.
/// `total` covers every expense regardless of bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct CategoryTotals {
    pub(crate) food: Decimal,
    pub(crate) travel: Decimal,
    pub(crate) other: Decimal,
    pub(crate) custom: BTreeMap<String, Decimal>,
    pub(crate) total: Decimal,
}

impl CategoryTotals {
    /// Buckets as (display name, amount) rows, predefined first, custom
    /// sorted by name. Empty custom buckets never appear.
    pub(crate) fn rows(&self) -> Vec<(String, Decimal)> {
        let mut rows = vec![
            ("Food".to_string(), self.food),
            ("Travel".to_string(), self.travel),
            ("Other".to_string(), self.other),
        ];
        for (name, amount) in &self.custom {
            rows.push((Category::Custom(name.clone()).display_name(), *amount));
        }
        rows
    }
}

/// Identity when `month` is `None`; otherwise exactly the expenses whose
/// calendar date falls in the given (year, month). Idempotent.
pub(crate) fn filter_by_month(expenses: &[Expense], month: Option<MonthKey>) -> Vec<Expense> {
    match month {
        None => expenses.to_vec(),
        Some(m) => expenses
            .iter()
            .filter(|e| m.contains(e.date))
            .cloned()
            .collect(),
    }
}

/// Sum per category bucket plus the grand total. Order-independent; an empty
/// input yields all zeros.
pub(crate) fn category_totals(expenses: &[Expense]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for expense in expenses {
        match &expense.category {
            Category::Food => totals.food += expense.amount,
            Category::Travel => totals.travel += expense.amount,
            Category::Other => totals.other += expense.amount,
            Category::Custom(name) => {
                *totals.custom.entry(name.clone()).or_insert(Decimal::ZERO) += expense.amount;
            }
        }
        totals.total += expense.amount;
    }
    totals
}

/// Per-calendar-date sums, newest date first, one entry per date.
/// Recomputed from scratch on every call.
pub(crate) fn daily_totals(expenses: &[Expense]) -> Vec<(NaiveDate, Decimal)> {
    let mut daily: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for expense in expenses {
        *daily.entry(expense.date).or_insert(Decimal::ZERO) += expense.amount;
    }
    daily.into_iter().rev().collect()
}

/// `budget - spent`. Negative means over budget, which is a displayable
/// state, not an error.
pub(crate) fn remaining_budget(budget: Decimal, spent: Decimal) -> Decimal {
    budget - spent
}

/// Distinct months present across the (unfiltered) expense set, most recent
/// first.
pub(crate) fn enumerate_months(expenses: &[Expense]) -> Vec<MonthKey> {
    let months: BTreeSet<MonthKey> = expenses.iter().map(|e| MonthKey::of(e.date)).collect();
    months.into_iter().rev().collect()
}

#[cfg(test)]
mod tests;
