mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Category, Expense};

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &Expense) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO expenses (amount, category, date, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    expense.amount.to_string(),
                    expense.category.as_str(),
                    expense.date.format("%Y-%m-%d").to_string(),
                    expense.created_at,
                ],
            )
            .context("Failed to insert expense")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All expenses, newest first (date DESC, id DESC).
    pub(crate) fn get_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, category, date, created_at
             FROM expenses ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], row_to_expense)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        let result = self.conn.query_row(
            "SELECT id, amount, category, date, created_at FROM expenses WHERE id = ?1",
            params![id],
            row_to_expense,
        );
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace amount, category, and date of an existing expense.
    pub(crate) fn update_expense(
        &self,
        id: i64,
        amount: Decimal,
        category: &Category,
        date: NaiveDate,
    ) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE expenses SET amount = ?1, category = ?2, date = ?3 WHERE id = ?4",
                params![
                    amount.to_string(),
                    category.as_str(),
                    date.format("%Y-%m-%d").to_string(),
                    id,
                ],
            )
            .context("Failed to update expense")?;
        if changed == 0 {
            anyhow::bail!("No expense with id {id}");
        }
        Ok(())
    }

    pub(crate) fn delete_expense(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])
            .context("Failed to delete expense")?;
        if changed == 0 {
            anyhow::bail!("No expense with id {id}");
        }
        Ok(())
    }

    // ── Budget ────────────────────────────────────────────────

    /// The single budget figure, if one has been set.
    pub(crate) fn get_budget(&self) -> Result<Option<Decimal>> {
        let result = self
            .conn
            .query_row("SELECT amount FROM budgets WHERE id = 1", [], |row| {
                row.get::<_, String>(0)
            });
        match result {
            Ok(s) => Ok(Some(
                Decimal::from_str(&s).context("Corrupt budget amount in store")?,
            )),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create the budget row if absent, else replace its amount.
    pub(crate) fn upsert_budget(&self, amount: Decimal) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO budgets (id, amount) VALUES (1, ?1)
                 ON CONFLICT(id) DO UPDATE SET amount = ?1",
                params![amount.to_string()],
            )
            .context("Failed to set budget")?;
        Ok(())
    }
}

fn row_to_expense(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    let amount_str: String = row.get(1)?;
    let category_str: String = row.get(2)?;
    let date_str: String = row.get(3)?;
    let amount = Decimal::from_str(&amount_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Expense {
        id: Some(row.get(0)?),
        amount,
        category: Category::parse(&category_str),
        date,
        created_at: row.get(4)?,
    })
}
