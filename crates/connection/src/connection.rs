//! Client connection handle
//!
//! A [`Connection`] wraps one engine session and the store that executes
//! statements against it. Its own state is a small envelope of timestamps,
//! split across two locks that are never held at the same time:
//!
//! - the time lock guards `last_used_at`
//! - the transaction-state lock guards `tx_started_at`, and is what
//!   [`TxStateChange::check_and_set`](crate::TxStateChange::check_and_set)
//!   holds for its whole compare-and-write
//!
//! `created_at` never changes after construction and needs no lock.

use crate::config::ConnectionConfig;
use crate::status::ConnectionStatus;
use crate::store::Store;
use crate::tx_state::TxStateChange;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::Duration;
use tessera_core::{
    ConnectionId, EngineSession, ExecuteRequest, ExecuteResponse, QueryRequest, QueryResponse,
    Result,
};
use tracing::{debug, warn};

/// A client's handle into the store
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct Connection {
    id: ConnectionId,
    created_at: DateTime<Utc>,
    config: ConnectionConfig,

    engine: Arc<dyn EngineSession>,
    store: Arc<dyn Store>,

    /// Time lock
    last_used_at: Mutex<Option<DateTime<Utc>>>,

    /// Transaction-state lock
    ///
    /// `Some` iff the engine reported an open transaction at the last
    /// reconciliation.
    pub(crate) tx_started_at: Mutex<Option<DateTime<Utc>>>,
}

impl Connection {
    /// Create a connection with default configuration
    pub fn new(id: ConnectionId, engine: Arc<dyn EngineSession>, store: Arc<dyn Store>) -> Self {
        Self::builder(id, engine, store).build()
    }

    /// Create a builder for a connection
    ///
    /// # Example
    ///
    /// ```ignore
    /// let conn = Connection::builder(ids.allocate()?, session, store)
    ///     .idle_timeout(Duration::from_secs(60))
    ///     .tx_timeout(Duration::from_secs(10))
    ///     .build();
    /// ```
    pub fn builder(
        id: ConnectionId,
        engine: Arc<dyn EngineSession>,
        store: Arc<dyn Store>,
    ) -> ConnectionBuilder {
        ConnectionBuilder {
            id,
            engine,
            store,
            created_at: None,
            config: ConnectionConfig::default(),
        }
    }

    /// Connection id
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Engine session behind this connection
    pub fn engine(&self) -> &Arc<dyn EngineSession> {
        &self.engine
    }

    /// Timeouts configured for this connection
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Execute statements that modify the database
    pub fn execute(&self, req: &ExecuteRequest) -> Result<ExecuteResponse> {
        self.store.execute(self, req)
    }

    /// Execute statements, aborting any active transaction on the engine
    /// session if an error occurs
    pub fn execute_or_abort(&self, req: &ExecuteRequest) -> Result<ExecuteResponse> {
        self.store.execute_or_abort(self, req)
    }

    /// Run statements that return rows and do not modify the database
    pub fn query(&self, req: &QueryRequest) -> Result<QueryResponse> {
        self.store.query(self, req)
    }

    /// Roll back any active transaction
    ///
    /// Issues `ROLLBACK` through the normal execute path. Intended for
    /// cleaning up dangling transactions after failures; the caller must know
    /// that discarding the transaction is what it wants.
    pub fn abort_transaction(&self) -> Result<()> {
        let req = ExecuteRequest::new(["ROLLBACK"]);
        match self.store.execute(self, &req) {
            Ok(_) => {
                debug!(conn = %self, "Transaction aborted");
                Ok(())
            }
            Err(e) => {
                warn!(conn = %self, error = %e, "Failed to abort transaction");
                Err(e)
            }
        }
    }

    /// Close the connection
    ///
    /// The store releases the engine session. The handle itself stays valid
    /// to read but should not be used for further requests.
    pub fn close(&self) -> Result<()> {
        debug!(conn = %self, "Closing connection");
        self.store.disconnect(self)
    }

    /// Start tracking a possible transaction state change
    ///
    /// Shorthand for [`TxStateChange::new`].
    pub fn tx_state_change(&self) -> TxStateChange<'_> {
        TxStateChange::new(self)
    }

    /// When the connection was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When a request last completed, if ever
    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        *self.last_used_at.lock()
    }

    /// Start of the transaction seen at the last reconciliation, if any
    pub fn tx_started_at(&self) -> Option<DateTime<Utc>> {
        *self.tx_started_at.lock()
    }

    /// Record that a request just completed on this connection
    pub fn touch(&self) {
        self.touch_at(Utc::now());
    }

    pub(crate) fn touch_at(&self, at: DateTime<Utc>) {
        *self.last_used_at.lock() = Some(at);
    }

    /// Time since the connection was last used, or since creation if never
    pub fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        let since = self.last_used_at().unwrap_or(self.created_at);
        elapsed(since, now)
    }

    /// Time the cached transaction has been open, if one is open
    pub fn tx_active_for(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.tx_started_at().map(|started| elapsed(started, now))
    }

    /// Whether the connection has been idle longer than its idle timeout
    pub fn is_idle_expired(&self, now: DateTime<Utc>) -> bool {
        match self.config.idle_timeout {
            Some(timeout) => self.idle_for(now) > timeout,
            None => false,
        }
    }

    /// Whether the cached transaction has been open longer than the
    /// transaction timeout
    pub fn is_tx_expired(&self, now: DateTime<Utc>) -> bool {
        match (self.config.tx_timeout, self.tx_active_for(now)) {
            (Some(timeout), Some(open_for)) => open_for > timeout,
            _ => false,
        }
    }

    /// Snapshot of the connection for observability tooling
    ///
    /// Fails only if the engine cannot report its constraint mode.
    pub fn status(&self) -> Result<ConnectionStatus> {
        let fk = self.engine.fk_constraints()?;
        Ok(ConnectionStatus {
            id: self.id,
            created_at: self.created_at,
            fk_constraints: fk.into(),
            tx_started_at: self.tx_started_at(),
            last_used_at: self.last_used_at(),
        })
    }
}

/// Clock skew can put `since` after `now`; report that as zero.
fn elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - since).to_std().unwrap_or(Duration::ZERO)
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "connection:{}", self.id)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("last_used_at", &self.last_used_at())
            .field("tx_started_at", &self.tx_started_at())
            .finish_non_exhaustive()
    }
}

impl Serialize for Connection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let status = self.status().map_err(serde::ser::Error::custom)?;
        status.serialize(serializer)
    }
}

/// Builder for [`Connection`]
pub struct ConnectionBuilder {
    id: ConnectionId,
    engine: Arc<dyn EngineSession>,
    store: Arc<dyn Store>,
    created_at: Option<DateTime<Utc>>,
    config: ConnectionConfig,
}

impl ConnectionBuilder {
    /// Override the creation time (defaults to now)
    ///
    /// Used when restoring connections a store persisted across restarts.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ConnectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the idle timeout
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = Some(timeout);
        self
    }

    /// Set the transaction timeout
    pub fn tx_timeout(mut self, timeout: Duration) -> Self {
        self.config.tx_timeout = Some(timeout);
        self
    }

    /// Build the connection
    pub fn build(self) -> Connection {
        let conn = Connection {
            id: self.id,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            config: self.config,
            engine: self.engine,
            store: self.store,
            last_used_at: Mutex::new(None),
            tx_started_at: Mutex::new(None),
        };
        debug!(conn = %conn, config = ?conn.config, "Connection created");
        conn
    }
}
