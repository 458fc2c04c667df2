use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::db::Database;
use crate::models::{Category, Expense, MonthKey};
use crate::report;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], db),
        "list" | "ls" => cli_list(&args[2..], db),
        "budget" => cli_budget(&args[2..], db),
        "summary" | "s" => cli_summary(&args[2..], db),
        "months" => cli_months(db),
        "export" => cli_export(&args[2..], db),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ExpenseTUI — local-only personal expense tracker");
    println!();
    println!("Usage: expensetui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <amount> <category> [date]  Record an expense (date YYYY-MM-DD, default today)");
    println!("  list [YYYY-MM]                List expenses (default: current month; 'all' for everything)");
    println!("  budget [amount]               Show or set the monthly budget");
    println!("  summary [YYYY-MM]             Print monthly spending summary");
    println!("  months                        List months that have expenses");
    println!("  export [path]                 Export expenses to a report file");
    println!("    --month <YYYY-MM>           Month to export (default: current)");
    println!("    --xlsx                      Write XLSX instead of CSV");
    println!("  delete <id>                   Delete an expense by id");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn parse_month_arg(arg: &str) -> Result<Option<MonthKey>> {
    if arg == "all" {
        return Ok(None);
    }
    match MonthKey::parse(arg) {
        Some(m) => Ok(Some(m)),
        None => anyhow::bail!("Invalid month: {arg} (expected YYYY-MM)"),
    }
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: expensetui add <amount> <category> [YYYY-MM-DD]");
    }

    let amount = Decimal::from_str(&args[0])
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", args[0]))?;

    // A trailing date token is optional; everything between is the category
    let (category_tokens, date) = match args.last() {
        Some(last) => match chrono::NaiveDate::parse_from_str(last, "%Y-%m-%d") {
            Ok(d) => (&args[1..args.len() - 1], d),
            Err(_) => (&args[1..], chrono::Local::now().date_naive()),
        },
        None => (&args[1..], chrono::Local::now().date_naive()),
    };
    if category_tokens.is_empty() {
        anyhow::bail!("Missing category");
    }
    let category = Category::from_input(&category_tokens.join(" "));

    let expense = Expense::new(amount, category, date);
    expense.validate()?;
    let id = db.insert_expense(&expense)?;

    println!(
        "Added expense {id}: {} — {} on {}",
        format_amount(expense.amount),
        expense.category.display_name(),
        expense.date.format("%Y-%m-%d"),
    );
    Ok(())
}

fn cli_list(args: &[String], db: &mut Database) -> Result<()> {
    let month = match args.first() {
        Some(arg) => parse_month_arg(arg)?,
        None => Some(MonthKey::current()),
    };

    let all = db.get_expenses()?;
    let expenses = report::filter_by_month(&all, month);
    if expenses.is_empty() {
        println!("No expenses for {}", period_name(month));
        return Ok(());
    }

    println!("{:<6} {:<12} {:<20} Amount", "ID", "Date", "Category");
    println!("{}", "─".repeat(55));
    for e in &expenses {
        println!(
            "{:<6} {:<12} {:<20} {}",
            e.id.unwrap_or(0),
            e.date.format("%Y-%m-%d"),
            e.category.display_name(),
            format_amount(e.amount),
        );
    }
    Ok(())
}

fn cli_budget(args: &[String], db: &mut Database) -> Result<()> {
    match args.first() {
        Some(arg) => {
            let amount = Decimal::from_str(arg)
                .map_err(|_| anyhow::anyhow!("Invalid budget amount: {arg}"))?;
            if amount < Decimal::ZERO {
                anyhow::bail!("Budget cannot be negative");
            }
            db.upsert_budget(amount)?;
            println!("Budget set to {}", format_amount(amount));
        }
        None => match db.get_budget()? {
            Some(amount) => println!("Budget: {}", format_amount(amount)),
            None => println!("No budget set. Use: expensetui budget <amount>"),
        },
    }
    Ok(())
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let month = match args.first().filter(|a| !a.starts_with('-')) {
        Some(arg) => parse_month_arg(arg)?,
        None => Some(MonthKey::current()),
    };

    let all = db.get_expenses()?;
    let expenses = report::filter_by_month(&all, month);
    let totals = report::category_totals(&expenses);
    let daily = report::daily_totals(&expenses);

    println!("ExpenseTUI — {}", period_name(month));
    println!("{}", "─".repeat(40));
    println!("  Total Spent:  {}", format_amount(totals.total));
    match db.get_budget()? {
        Some(budget) => {
            println!("  Budget:       {}", format_amount(budget));
            println!(
                "  Remaining:    {}",
                format_amount(report::remaining_budget(budget, totals.total))
            );
        }
        None => println!("  Budget:       not set"),
    }
    println!("  Expenses:     {}", expenses.len());

    println!();
    println!("By Category:");
    for (name, amount) in totals.rows() {
        println!("  {name:<24} {}", format_amount(amount));
    }

    if !daily.is_empty() {
        println!();
        println!("By Day:");
        for (date, amount) in &daily {
            println!("  {:<24} {}", date.format("%Y-%m-%d"), format_amount(*amount));
        }
    }

    Ok(())
}

fn cli_months(db: &mut Database) -> Result<()> {
    let all = db.get_expenses()?;
    let months = report::enumerate_months(&all);
    if months.is_empty() {
        println!("No expenses recorded yet");
        return Ok(());
    }
    for m in &months {
        let count = report::filter_by_month(&all, Some(*m)).len();
        println!(
            "{m}  {:<16} {count} expense{}",
            m.label(),
            if count == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let month = match args.windows(2).find(|w| w[0] == "--month") {
        Some(w) => parse_month_arg(&w[1])?,
        None => Some(MonthKey::current()),
    };
    let xlsx = args.iter().any(|a| a == "--xlsx");
    let ext = if xlsx { "xlsx" } else { "csv" };

    let all = db.get_expenses()?;
    let expenses = report::filter_by_month(&all, month);
    let label = period_name(month);

    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/{}", crate::export::report_filename(&label, ext))
        });

    let payload = if xlsx {
        crate::export::to_xlsx(&expenses, &label)?
    } else {
        crate::export::to_csv(&expenses, &label)?.into_bytes()
    };
    std::fs::write(&output_path, payload)?;

    println!("Exported {} expenses to {output_path}", expenses.len());
    Ok(())
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let id: i64 = match args.first() {
        Some(arg) => arg
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid expense id: {arg}"))?,
        None => anyhow::bail!("Usage: expensetui delete <id>"),
    };

    match db.get_expense_by_id(id)? {
        Some(e) => {
            db.delete_expense(id)?;
            println!(
                "Deleted expense {id}: {} — {} on {}",
                format_amount(e.amount),
                e.category.display_name(),
                e.date.format("%Y-%m-%d"),
            );
        }
        None => anyhow::bail!("No expense with id {id}"),
    }
    Ok(())
}

fn period_name(month: Option<MonthKey>) -> String {
    match month {
        Some(m) => m.label(),
        None => "All Expenses".to_string(),
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
