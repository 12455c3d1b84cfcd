use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::models::Transaction;

/// Well-known key the whole transaction array is stored under.
const STORE_KEY: &str = "transactions";

/// Whether a save is a brand-new record or a full replacement of an
/// existing one. Passed explicitly so there is a single save path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SaveMode {
    Create,
    Update,
}

/// Owns the live transaction collection and its persistence. The engines
/// only ever read a snapshot slice; every mutation rewrites the full
/// serialized array under one key.
pub(crate) struct Store {
    conn: Connection,
    transactions: Vec<Transaction>,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set store pragmas")?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL);",
        )
        .context("Failed to create store schema")?;
        let transactions = load_collection(&conn)?;
        Ok(Self { conn, transactions })
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Next transaction id: the creation timestamp in milliseconds, bumped
    /// past the current maximum so ids stay unique and increasing even when
    /// two adds land in the same millisecond.
    pub(crate) fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let max = self.transactions.iter().map(|t| t.id).max().unwrap_or(0);
        now.max(max + 1)
    }

    /// Save a transaction. `Create` assigns a fresh id and appends;
    /// `Update` replaces the record with the same id in full. Updating an
    /// id that is not in the collection leaves it unchanged.
    /// Returns the id the record was saved under.
    pub(crate) fn upsert(&mut self, mut txn: Transaction, mode: SaveMode) -> Result<i64> {
        let id = match mode {
            SaveMode::Create => {
                txn.id = self.next_id();
                let id = txn.id;
                self.transactions.push(txn);
                id
            }
            SaveMode::Update => {
                let id = txn.id;
                let Some(existing) = self.transactions.iter_mut().find(|t| t.id == id)
                else {
                    return Ok(id);
                };
                *existing = txn;
                id
            }
        };
        self.persist()?;
        Ok(id)
    }

    /// Remove a transaction by id and persist. A missing id is a no-op.
    /// Returns whether anything was removed.
    pub(crate) fn remove(&mut self, id: i64) -> Result<bool> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        let value = serde_json::to_string(&self.transactions)
            .context("Failed to serialize transactions")?;
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![STORE_KEY, value],
            )
            .context("Failed to persist transactions")?;
        Ok(())
    }

    /// Export the collection to a CSV file, optionally restricted to one
    /// month (`YYYY-MM`). Rows are written newest first. Returns the number
    /// of rows exported.
    pub(crate) fn export_csv(&self, path: &str, month: Option<&str>) -> Result<usize> {
        let mut rows: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| month.is_none_or(|m| t.date.starts_with(m)))
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {path}"))?;
        writer.write_record(["id", "type", "amount", "category", "date", "description"])?;
        for txn in &rows {
            writer.write_record([
                txn.id.to_string(),
                txn.kind.to_string(),
                txn.amount.to_string(),
                txn.category.clone(),
                txn.date.clone(),
                txn.description.clone(),
            ])?;
        }
        writer.flush().context("Failed to write export file")?;
        Ok(rows.len())
    }
}

/// Load the stored array. An absent or unreadable value is an empty
/// collection, never an error; a corrupt value additionally warns on stderr.
fn load_collection(conn: &Connection) -> Result<Vec<Transaction>> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![STORE_KEY],
            |row| row.get(0),
        )
        .map(Some)
        .or_else(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => Ok(None),
            other => Err(other),
        })
        .context("Failed to read stored transactions")?;

    let Some(value) = stored else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&value) {
        Ok(txns) => Ok(txns),
        Err(e) => {
            eprintln!("Warning: stored transactions are unreadable ({e}); starting empty");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests;
