//! SQLite-backed watch-list.
//!
//! Symbols are read in the order they were added (`created_at` ascending).
//! A failed read is fatal to a scan: there is nothing to do without symbols.

use crate::error::Result;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Source of the symbols to scan.
pub trait WatchlistStore {
    /// All watched symbols, oldest first.
    fn symbols(&self) -> Result<Vec<String>>;
}

/// SQLite store for the `watched_symbols` table.
pub struct SqliteWatchlist {
    conn: Mutex<Connection>,
}

impl SqliteWatchlist {
    /// Open (or create) the store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        info!("Watch-list store initialized");
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        debug!("In-memory watch-list store initialized");
        Ok(store)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // a poisoned lock still holds a usable connection
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.lock();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS watched_symbols (
                symbol TEXT PRIMARY KEY,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_watched_symbols_created_at
             ON watched_symbols(created_at)",
            [],
        )?;

        Ok(())
    }

    /// Add a symbol. Re-adding keeps its original position.
    pub fn add_symbol(&self, symbol: &str, created_at: i64) -> Result<bool> {
        let conn = self.lock();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO watched_symbols (symbol, created_at) VALUES (?1, ?2)",
            params![symbol.trim().to_uppercase(), created_at],
        )?;
        Ok(inserted > 0)
    }

    /// Remove a symbol, returning whether it was present.
    pub fn remove_symbol(&self, symbol: &str) -> Result<bool> {
        let conn = self.lock();
        let removed = conn.execute(
            "DELETE FROM watched_symbols WHERE symbol = ?1",
            params![symbol.trim().to_uppercase()],
        )?;
        Ok(removed > 0)
    }
}

impl WatchlistStore for SqliteWatchlist {
    fn symbols(&self) -> Result<Vec<String>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT symbol FROM watched_symbols ORDER BY created_at ASC, rowid ASC",
        )?;
        let symbols = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Loaded {} watched symbols", symbols.len());
        Ok(symbols)
    }
}

/// Fixed in-memory watch-list, handy for one-off runs and tests.
impl WatchlistStore for Vec<String> {
    fn symbols(&self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}
