pub mod error;
pub mod migrations;
pub mod models;
pub mod pagination;
pub mod queries;

pub use error::{DbError, Result};

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Where the database lives. Built once at startup and handed to [`Database::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub path: PathBuf,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_memory() -> Self {
        Self::new(":memory:")
    }
}

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(config: &DbConfig) -> Result<Self> {
        let conn = Connection::open(&config.path)?;
        Self::init(conn, &config.path)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, Path::new(":memory:"))
    }

    fn init(conn: Connection, path: &Path) -> Result<Self> {
        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs `f` with the connection held for the duration of the call.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| DbError::LockPoisoned(e.to_string()))?;
        f(&conn)
    }

    /// Runs `f` inside an IMMEDIATE transaction. Commits when `f` succeeds;
    /// any error rolls the transaction back when it is dropped.
    pub fn with_tx<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|e| DbError::LockPoisoned(e.to_string()))?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
