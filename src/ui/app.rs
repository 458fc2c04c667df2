use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::models::{Expense, MonthKey};
use crate::report::{self, CategoryTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Reports,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses, Self::Reports]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Reports => write!(f, "Reports"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending mutation that requires a y/N confirmation first.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, summary: String },
}

/// Session state: the in-memory expense collection, the budget figure, the
/// active month filter, and everything derived from them. Mutations go
/// through the store first; this state is recomputed only after the store
/// call succeeds.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) visible_rows: usize,

    /// Active month filter; `None` means all expenses are in scope.
    pub(crate) month: Option<MonthKey>,
    pub(crate) budget: Option<Decimal>,

    /// Month-scoped view of the expense collection, newest first.
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Derived aggregates for the current filter
    pub(crate) totals: CategoryTotals,
    pub(crate) daily: Vec<(NaiveDate, Decimal)>,

    // Reports screen: months with at least one expense, newest first
    pub(crate) months: Vec<MonthKey>,
    pub(crate) month_index: usize,

    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            visible_rows: 20,
            month: Some(MonthKey::current()),
            budget: None,
            expenses: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,
            totals: CategoryTotals::default(),
            daily: Vec::new(),
            months: Vec::new(),
            month_index: 0,
            pending_action: None,
            confirm_message: String::new(),
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Reload the collection and budget from the store and recompute every
    /// derived aggregate for the active month filter.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        let all = db.get_expenses()?;
        self.budget = db.get_budget()?;
        self.months = report::enumerate_months(&all);
        self.expenses = report::filter_by_month(&all, self.month);
        self.totals = report::category_totals(&self.expenses);
        self.daily = report::daily_totals(&self.expenses);

        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
        if self.month_index >= self.months.len() {
            self.month_index = self.months.len().saturating_sub(1);
        }
        Ok(())
    }

    /// The expense under the cursor on the Expenses screen.
    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    pub(crate) fn remaining_budget(&self) -> Option<Decimal> {
        self.budget
            .map(|b| report::remaining_budget(b, self.totals.total))
    }

    /// Human-readable name for the active period, used in report exports.
    pub(crate) fn period_label(&self) -> String {
        match self.month {
            Some(m) => m.label(),
            None => "All Expenses".to_string(),
        }
    }
}
