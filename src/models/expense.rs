use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Category;

/// One recorded transaction. Dates are naive local calendar dates; the same
/// date drives filtering, day-bucketing, and display.
#[derive(Debug, Clone)]
pub(crate) struct Expense {
    pub(crate) id: Option<i64>,
    pub(crate) amount: Decimal,
    pub(crate) category: Category,
    pub(crate) date: NaiveDate,
    pub(crate) created_at: String,
}

impl Expense {
    pub(crate) fn new(amount: Decimal, category: Category, date: NaiveDate) -> Self {
        Self {
            id: None,
            amount,
            category,
            date,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Amounts must be strictly positive. Checked before any store call.
    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        if self.amount <= Decimal::ZERO {
            anyhow::bail!("Amount must be greater than zero");
        }
        Ok(())
    }
}
