//! Relational store of historical observations.
//!
//! A thin query layer over SQLite: the serving path only lists series and
//! reads per-series history; the ingestion job replaces a series' rows
//! wholesale. No nontrivial invariants live here.

use chrono::NaiveDate;
use ferrocast_core::{Observation, SeriesId};
use rusqlite::{params, Connection};
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

/// Result type alias for history-store operations.
pub type HistoryResult<T> = std::result::Result<T, HistoryError>;

/// Errors from the historical-observation store.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Connection wrapper over the `raw_series` table.
///
/// Constructed once at startup and shared behind an `Arc`; the mutex is
/// held only for the duration of a synchronous query, never across awaits.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens (and if needed initializes) the database at `path`.
    pub fn open(path: &str) -> HistoryResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Opens an in-memory database for testing.
    pub fn open_in_memory() -> HistoryResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn init_schema(conn: &Connection) -> HistoryResult<()> {
        info!("initializing history schema");
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS raw_series (
                id INTEGER PRIMARY KEY,
                series_id TEXT NOT NULL,
                date TEXT NOT NULL,
                value REAL NOT NULL,
                source TEXT NOT NULL DEFAULT 'FRED'
            )
            "#,
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_raw_series_series_id ON raw_series (series_id)",
            [],
        )?;
        Ok(())
    }

    /// All series identifiers present in the store, sorted.
    pub fn distinct_series(&self) -> HistoryResult<Vec<String>> {
        let conn = self.conn.lock().expect("history lock poisoned");
        let mut stmt =
            conn.prepare("SELECT DISTINCT series_id FROM raw_series ORDER BY series_id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Date-ordered history for one series. Empty when the series is unknown.
    pub fn series_history(&self, id: &SeriesId) -> HistoryResult<Vec<Observation>> {
        let conn = self.conn.lock().expect("history lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT date, value FROM raw_series WHERE series_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![id.as_str()], |row| {
            Ok(Observation::new(row.get::<_, NaiveDate>(0)?, row.get::<_, f64>(1)?))
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Replaces a series' rows in one transaction (idempotent ingestion).
    ///
    /// Returns the number of rows inserted.
    pub fn replace_series(
        &self,
        id: &SeriesId,
        observations: &[Observation],
        source: &str,
    ) -> HistoryResult<usize> {
        let mut conn = self.conn.lock().expect("history lock poisoned");
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM raw_series WHERE series_id = ?1", params![id.as_str()])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO raw_series (series_id, date, value, source) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for obs in observations {
                stmt.execute(params![id.as_str(), obs.date, obs.value, source])?;
            }
        }
        tx.commit()?;
        Ok(observations.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(id: &str) -> SeriesId {
        SeriesId::new(id).unwrap()
    }

    fn obs(y: i32, m: u32, value: f64) -> Observation {
        Observation::new(NaiveDate::from_ymd_opt(y, m, 1).unwrap(), value)
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.distinct_series().unwrap().is_empty());
        assert!(db.series_history(&series("PPI_STEEL")).unwrap().is_empty());
    }

    #[test]
    fn test_history_comes_back_date_ordered() {
        let db = Database::open_in_memory().unwrap();
        let id = series("PPI_STEEL");
        // Inserted out of order on purpose.
        db.replace_series(
            &id,
            &[obs(2023, 3, 3.0), obs(2023, 1, 1.0), obs(2023, 2, 2.0)],
            "FRED",
        )
        .unwrap();

        let history = db.series_history(&id).unwrap();
        let values: Vec<f64> = history.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_replace_series_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let id = series("PPI_LUMBER");
        let rows = [obs(2023, 1, 10.0), obs(2023, 2, 11.0)];

        db.replace_series(&id, &rows, "FRED").unwrap();
        db.replace_series(&id, &rows, "FRED").unwrap();

        assert_eq!(db.series_history(&id).unwrap().len(), 2);
    }

    #[test]
    fn test_distinct_series_is_sorted_and_deduplicated() {
        let db = Database::open_in_memory().unwrap();
        db.replace_series(&series("PPI_STEEL"), &[obs(2023, 1, 1.0)], "FRED").unwrap();
        db.replace_series(&series("CPI_ALL"), &[obs(2023, 1, 2.0)], "FRED").unwrap();

        assert_eq!(db.distinct_series().unwrap(), vec!["CPI_ALL", "PPI_STEEL"]);
    }
}
