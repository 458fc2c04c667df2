//! Report formatters: a filtered expense set plus a period label in, a
//! CSV text or XLSX byte payload out. Writing the payload anywhere is the
//! caller's job.

use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::RoundingStrategy;
use rust_xlsxwriter::{Format, Workbook};

use crate::models::Expense;

const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d";

/// CSV with header `Date,Amount,Category`, one row per expense in caller
/// order. Amounts get exactly two decimals (midpoints round away from
/// zero), categories display casing. An empty set is a user-facing error,
/// not an empty file.
pub(crate) fn to_csv(expenses: &[Expense], period_label: &str) -> Result<String> {
    if expenses.is_empty() {
        anyhow::bail!("No expenses to export for {period_label}");
    }

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["Date", "Amount", "Category"])
        .context("Failed to write CSV header")?;
    for expense in expenses {
        let amount = expense
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        wtr.write_record([
            expense.date.format(DATE_DISPLAY_FORMAT).to_string(),
            format!("{amount:.2}"),
            expense.category.display_name(),
        ])
        .context("Failed to write CSV row")?;
    }

    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// XLSX workbook with one sheet named after the period. Amounts are written
/// as numeric cells, not text.
pub(crate) fn to_xlsx(expenses: &[Expense], period_label: &str) -> Result<Vec<u8>> {
    if expenses.is_empty() {
        anyhow::bail!("No expenses to export for {period_label}");
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(sheet_name(period_label))
        .context("Invalid sheet name")?;

    let header = Format::new().set_bold();
    sheet.write_string_with_format(0, 0, "Date", &header)?;
    sheet.write_string_with_format(0, 1, "Amount", &header)?;
    sheet.write_string_with_format(0, 2, "Category", &header)?;

    let money = Format::new().set_num_format("0.00");
    for (i, expense) in expenses.iter().enumerate() {
        let row = (i + 1) as u32;
        let amount = expense
            .amount
            .to_f64()
            .with_context(|| format!("Amount not representable: {}", expense.amount))?;
        sheet.write_string(row, 0, expense.date.format(DATE_DISPLAY_FORMAT).to_string())?;
        sheet.write_number_with_format(row, 1, amount, &money)?;
        sheet.write_string(row, 2, expense.category.display_name())?;
    }

    workbook
        .save_to_buffer()
        .context("Failed to build XLSX workbook")
}

/// `expense_report_<label with spaces as underscores>.<ext>`.
pub(crate) fn report_filename(period_label: &str, ext: &str) -> String {
    format!("expense_report_{}.{ext}", period_label.replace(' ', "_"))
}

// Sheet names are capped at 31 characters by the format.
fn sheet_name(period_label: &str) -> String {
    period_label.chars().take(31).collect()
}

#[cfg(test)]
mod tests;
