//! SQLite engine session
//!
//! Enabled with the `sqlite` feature. Wraps a single `rusqlite` connection;
//! SQLite reports an open transaction as the connection leaving autocommit
//! mode.

use parking_lot::Mutex;
use std::path::Path;
use tessera_core::{EngineSession, Error, Result};

/// [`EngineSession`] over one embedded SQLite connection
pub struct SqliteSession {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteSession {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = rusqlite::Connection::open(path).map_err(Error::engine)?;
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = rusqlite::Connection::open_in_memory().map_err(Error::engine)?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        SqliteSession {
            conn: Mutex::new(conn),
        }
    }

    /// Run one or more semicolon-separated statements
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.lock().execute_batch(sql).map_err(Error::engine)
    }

    /// Enable or disable foreign-key enforcement
    pub fn set_fk_constraints(&self, enabled: bool) -> Result<()> {
        self.conn
            .lock()
            .pragma_update(None, "foreign_keys", enabled)
            .map_err(Error::engine)
    }

    /// Run a closure against the underlying connection
    ///
    /// The session lock is held for the duration of the closure. The closure
    /// must not call back into a [`Connection`](crate::Connection) built on
    /// this session: reconciliation takes the connection's transaction-state
    /// lock and then this lock, so reading `tx_started_at` (or running a
    /// [`TxStateChange`](crate::TxStateChange)) from inside the closure takes
    /// them in the opposite order and can deadlock. Read connection state
    /// after the closure returns.
    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn).map_err(Error::engine)
    }
}

impl EngineSession for SqliteSession {
    fn transaction_active(&self) -> bool {
        !self.conn.lock().is_autocommit()
    }

    fn fk_constraints(&self) -> Result<bool> {
        self.with_connection(|c| {
            c.query_row("PRAGMA foreign_keys", [], |row| row.get::<_, i64>(0))
        })
        .map(|v| v == 1)
    }
}

impl std::fmt::Debug for SqliteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSession").finish_non_exhaustive()
    }
}
