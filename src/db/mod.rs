mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::allocation::{BudgetStyle, CategoryAllocation, SpendCategory};
use crate::models::{TripInputs, TripPlan};

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
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(version = schema::CURRENT_VERSION, "created database schema");
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
                tracing::info!(from_version, "applying migration");
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

    // ── Trips ─────────────────────────────────────────────────

    /// Insert the plan, or replace the stored plan whose name matches ignoring case.
    /// Sets `plan.id` and returns it.
    pub(crate) fn save_trip(&mut self, plan: &mut TripPlan) -> Result<i64> {
        plan.updated_at = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO trips (name, total_budget, style, duration_days, travelers, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(name) DO UPDATE SET
                name = ?1, total_budget = ?2, style = ?3, duration_days = ?4, travelers = ?5, updated_at = ?7",
            params![
                plan.name,
                plan.inputs.total_budget.to_string(),
                plan.inputs.style.as_str(),
                plan.inputs.duration_days,
                plan.inputs.travelers,
                plan.created_at,
                plan.updated_at,
            ],
        )?;
        let id: i64 = tx.query_row(
            "SELECT id FROM trips WHERE name = ?1",
            params![plan.name],
            |row| row.get(0),
        )?;

        tx.execute(
            "DELETE FROM trip_allocations WHERE trip_id = ?1",
            params![id],
        )?;
        for (position, alloc) in plan.allocations.iter().enumerate() {
            tx.execute(
                "INSERT INTO trip_allocations (trip_id, position, category, percentage, amount, min_amount, max_amount)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    id,
                    position as i64,
                    alloc.category.as_str(),
                    alloc.percentage.to_string(),
                    alloc.amount.to_string(),
                    alloc.min.to_string(),
                    alloc.max.to_string(),
                ],
            )?;
        }
        tx.commit()?;

        plan.id = Some(id);
        tracing::info!(id, name = %plan.name, "saved trip plan");
        Ok(id)
    }

    pub(crate) fn get_trips(&self) -> Result<Vec<TripPlan>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, total_budget, style, duration_days, travelers, created_at, updated_at
             FROM trips ORDER BY updated_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| Ok(TripRow::from_row(row)))?;
        let rows = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| row.and_then(|r| self.hydrate(r)))
            .collect()
    }

    pub(crate) fn get_trip_by_id(&self, id: i64) -> Result<Option<TripPlan>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, total_budget, style, duration_days, travelers, created_at, updated_at
                 FROM trips WHERE id = ?1",
                params![id],
                |row| Ok(TripRow::from_row(row)),
            )
            .optional()?;
        row.map(|r| r.and_then(|r| self.hydrate(r))).transpose()
    }

    /// Look up a plan by name. Names are unique ignoring ASCII case.
    pub(crate) fn get_trip_by_name(&self, name: &str) -> Result<Option<TripPlan>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, total_budget, style, duration_days, travelers, created_at, updated_at
                 FROM trips WHERE name = ?1",
                params![name],
                |row| Ok(TripRow::from_row(row)),
            )
            .optional()?;
        row.map(|r| r.and_then(|r| self.hydrate(r))).transpose()
    }

    pub(crate) fn delete_trip(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM trips WHERE id = ?1", params![id])?;
        if deleted > 0 {
            tracing::info!(id, "deleted trip plan");
        }
        Ok(deleted > 0)
    }

    pub(crate) fn get_trip_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM trips", [], |row| row.get(0))?)
    }

    fn get_allocations(&self, trip_id: i64) -> Result<Vec<CategoryAllocation>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, percentage, amount, min_amount, max_amount
             FROM trip_allocations WHERE trip_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![trip_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut allocations = Vec::new();
        for row in rows {
            let (category, percentage, amount, min, max) = row?;
            allocations.push(CategoryAllocation {
                category: SpendCategory::from_str(&category)?,
                percentage: parse_decimal(&percentage)?,
                amount: parse_decimal(&amount)?,
                min: parse_decimal(&min)?,
                max: parse_decimal(&max)?,
            });
        }
        Ok(allocations)
    }

    fn hydrate(&self, row: TripRow) -> Result<TripPlan> {
        let allocations = self.get_allocations(row.id)?;
        Ok(TripPlan {
            id: Some(row.id),
            name: row.name,
            inputs: row.inputs,
            allocations,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A `trips` row before its allocations are attached.
struct TripRow {
    id: i64,
    name: String,
    inputs: TripInputs,
    created_at: String,
    updated_at: String,
}

impl TripRow {
    fn from_row(row: &rusqlite::Row<'_>) -> Result<TripRow> {
        let total: String = row.get(2)?;
        let style: String = row.get(3)?;
        Ok(TripRow {
            id: row.get(0)?,
            name: row.get(1)?,
            inputs: TripInputs {
                total_budget: parse_decimal(&total)?,
                style: BudgetStyle::from_str(&style)?,
                duration_days: row.get(4)?,
                travelers: row.get(5)?,
            },
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

fn parse_decimal(s: &str) -> Result<Decimal> {
    Decimal::from_str(s).with_context(|| format!("Invalid amount in database: '{s}'"))
}
