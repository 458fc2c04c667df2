use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::models::{Category, Expense, MonthKey};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("r", "Go to Reports", cmd_reports, r);
    register_command!("reports", "Go to Reports", cmd_reports, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "budget",
        "Set the monthly budget (e.g. :budget 500)",
        cmd_budget,
        r
    );
    register_command!(
        "b",
        "Set the monthly budget (e.g. :b 500)",
        cmd_budget,
        r
    );
    register_command!(
        "add",
        "Add expense (e.g. :add 42.50 food 2025-03-10; date defaults to today)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense (e.g. :a 42.50 food)",
        cmd_add,
        r
    );
    register_command!(
        "edit",
        "Edit selected expense (e.g. :edit 15.75 travel 2025-03-12)",
        cmd_edit,
        r
    );
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!(
        "month",
        "Set month filter (e.g. :month 2025-03; no args shows all)",
        cmd_month,
        r
    );
    register_command!(
        "m",
        "Set month filter (e.g. :m 2025-03)",
        cmd_month,
        r
    );
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "export",
        "Export current view to CSV (e.g. :export ~/march.csv)",
        cmd_export_csv,
        r
    );
    register_command!(
        "export-xlsx",
        "Export current view to XLSX",
        cmd_export_xlsx,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Parse `<amount> [category words...] [YYYY-MM-DD]` as used by :add and
/// :edit. A trailing token that parses as a date is the date; everything
/// between amount and date is the category text.
fn parse_expense_args(args: &str) -> Result<(Decimal, Option<Category>, Option<NaiveDate>), String> {
    let mut tokens: Vec<&str> = args.split_whitespace().collect();
    if tokens.is_empty() {
        return Err("Missing amount".into());
    }

    let amount_str = tokens.remove(0);
    let amount = Decimal::from_str(amount_str).map_err(|_| format!("Invalid amount: {amount_str}"))?;

    let date = match tokens.last() {
        Some(last) => match NaiveDate::parse_from_str(last, "%Y-%m-%d") {
            Ok(d) => {
                tokens.pop();
                Some(d)
            }
            Err(_) => None,
        },
        None => None,
    };

    let category = if tokens.is_empty() {
        None
    } else {
        Some(Category::from_input(&tokens.join(" ")))
    };

    Ok((amount, category, date))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(db)?;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(db)?;
    Ok(())
}

fn cmd_reports(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Reports;
    app.refresh(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :budget <amount>. Example: :budget 500");
        return Ok(());
    }

    let amount = match Decimal::from_str(args) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid budget amount: {args}"));
            return Ok(());
        }
    };
    if amount < Decimal::ZERO {
        app.set_status("Budget cannot be negative");
        return Ok(());
    }

    db.upsert_budget(amount)?;
    app.refresh(db)?;
    app.set_status(format!(
        "Budget set to {}",
        super::util::format_amount(amount)
    ));
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <amount> <category> [YYYY-MM-DD]");
        return Ok(());
    }

    let (amount, category, date) = match parse_expense_args(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    let category = match category {
        Some(c) => c,
        None => {
            app.set_status("Missing category. Usage: :add <amount> <category> [YYYY-MM-DD]");
            return Ok(());
        }
    };

    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let expense = Expense::new(amount, category, date);
    if let Err(e) = expense.validate() {
        app.set_status(e.to_string());
        return Ok(());
    }

    db.insert_expense(&expense)?;
    app.refresh(db)?;
    app.set_status(format!(
        "Added {} — {} on {}",
        super::util::format_amount(expense.amount),
        expense.category.display_name(),
        expense.date.format("%Y-%m-%d"),
    ));
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }
    if args.is_empty() {
        app.set_status("Usage: :edit <amount> [category] [YYYY-MM-DD]");
        return Ok(());
    }

    let (current_id, current_category, current_date) = match app.selected_expense() {
        Some(e) => match e.id {
            Some(id) => (id, e.category.clone(), e.date),
            None => return Ok(()),
        },
        None => return Ok(()),
    };

    let (amount, category, date) = match parse_expense_args(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    if amount <= Decimal::ZERO {
        app.set_status("Amount must be greater than zero");
        return Ok(());
    }

    // Omitted fields keep their current values
    let category = category.unwrap_or(current_category);
    let date = date.unwrap_or(current_date);

    db.update_expense(current_id, amount, &category, date)?;
    app.refresh(db)?;
    app.set_status(format!(
        "Updated expense: {} — {} on {}",
        super::util::format_amount(amount),
        category.display_name(),
        date.format("%Y-%m-%d"),
    ));
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if let Some(expense) = app.selected_expense() {
        if let Some(id) = expense.id {
            let summary = format!(
                "{} — {} on {}",
                super::util::format_amount(expense.amount),
                expense.category.display_name(),
                expense.date.format("%Y-%m-%d"),
            );
            app.confirm_message = format!("Delete {summary}?");
            app.pending_action = Some(PendingAction::DeleteExpense { id, summary });
            app.input_mode = InputMode::Confirm;
        }
    }

    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        // No args → all expenses in scope
        app.month = None;
        app.refresh(db)?;
        app.set_status("Showing all expenses");
        return Ok(());
    }

    match MonthKey::parse(args) {
        Some(m) => {
            app.month = Some(m);
            app.refresh(db)?;
            app.set_status(format!("Switched to {m}"));
        }
        None => {
            app.set_status("Invalid month format. Use YYYY-MM (e.g. 2025-03)");
        }
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let m = app.month.unwrap_or_else(MonthKey::current).next();
    app.month = Some(m);
    app.refresh(db)?;
    app.set_status(format!("Switched to {m}"));
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let m = app.month.unwrap_or_else(MonthKey::current).prev();
    app.month = Some(m);
    app.refresh(db)?;
    app.set_status(format!("Switched to {m}"));
    Ok(())
}

fn cmd_export_csv(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    export_report(args, app, db, "csv")
}

fn cmd_export_xlsx(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    export_report(args, app, db, "xlsx")
}

fn export_report(args: &str, app: &mut App, db: &mut Database, ext: &str) -> anyhow::Result<()> {
    app.refresh(db)?;
    let label = app.period_label();

    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{}", crate::export::report_filename(&label, ext))
    } else {
        crate::run::shellexpand(args)
    };

    let payload = if ext == "xlsx" {
        crate::export::to_xlsx(&app.expenses, &label)
    } else {
        crate::export::to_csv(&app.expenses, &label).map(String::into_bytes)
    };

    match payload.and_then(|bytes| {
        std::fs::write(&path, bytes).map_err(anyhow::Error::from)
    }) {
        Ok(()) => app.set_status(format!(
            "Exported {} expenses to {path}",
            app.expenses.len()
        )),
        Err(e) => app.set_status(format!("Export failed: {e}")),
    }
    Ok(())
}
