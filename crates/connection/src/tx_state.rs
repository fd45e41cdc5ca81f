//! Transaction state change detection
//!
//! The engine knows whether a session is inside a transaction; the
//! connection only caches when it last saw one begin. A [`TxStateChange`]
//! brackets a single operation: it captures the engine's transaction flag
//! before the operation and, in [`check_and_set`](TxStateChange::check_and_set),
//! compares it with the flag afterwards.
//!
//! ```text
//! before   after    cached start   action
//! ------   ------   ------------   -----------------
//! false    false    any            none
//! false    true     unset          record now
//! false    true     set            none (keep earlier start)
//! true     true     any            none
//! true     false    set            clear
//! true     false    unset          none (already cleared)
//! ```
//!
//! The guards on the cached start make reconciliation idempotent when
//! operations overlap on one connection: whichever detector reconciles first
//! records (or clears) the start, later ones leave it alone. The cached value
//! reflects the last reconciliation, not necessarily the operation that
//! caused the transition.

use crate::connection::Connection;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Outcome of [`TxStateChange::check_and_set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxReconciliation {
    /// The cached transaction-start time was left as it was
    Unchanged,
    /// A transaction began; the start time was recorded
    Started(DateTime<Utc>),
    /// The transaction ended; the start time was cleared
    Cleared,
}

/// One-shot detector for a transaction beginning or ending on a connection
///
/// Create one before issuing SQL through the engine session, then call
/// [`check_and_set`](Self::check_and_set) afterwards. The detector is
/// consumed by that call, so it can only reconcile once:
///
/// ```compile_fail
/// use tessera_connection::{Connection, TxStateChange};
///
/// fn reconcile_twice(conn: &Connection) {
///     let change = TxStateChange::new(conn);
///     change.check_and_set();
///     change.check_and_set();
/// }
/// ```
#[must_use = "a TxStateChange does nothing until check_and_set is called"]
#[derive(Debug)]
pub struct TxStateChange<'a> {
    conn: &'a Connection,
    tx: bool,
}

impl<'a> TxStateChange<'a> {
    /// Capture the engine's current transaction state for `conn`
    pub fn new(conn: &'a Connection) -> Self {
        TxStateChange {
            conn,
            tx: conn.engine().transaction_active(),
        }
    }

    /// Whether a transaction was active when the detector was created
    pub fn was_active(&self) -> bool {
        self.tx
    }

    /// Record whether a transaction began or ended since construction
    ///
    /// Holds the connection's transaction-state lock across reading the
    /// engine state, comparing and writing the cached start time, so no
    /// other reconciliation on the same connection interleaves.
    ///
    /// Lock order is transaction-state lock, then whatever lock the engine
    /// takes inside `transaction_active`. Engine code must not read the
    /// connection while holding its own lock.
    pub fn check_and_set(self) -> TxReconciliation {
        let mut started_at = self.conn.tx_started_at.lock();
        let active = self.conn.engine().transaction_active();

        match (self.tx, active) {
            (false, true) if started_at.is_none() => {
                let now = Utc::now();
                *started_at = Some(now);
                debug!(conn = %self.conn, started_at = %now, "Transaction started");
                TxReconciliation::Started(now)
            }
            (true, false) if started_at.is_some() => {
                *started_at = None;
                debug!(conn = %self.conn, "Transaction ended");
                TxReconciliation::Cleared
            }
            _ => TxReconciliation::Unchanged,
        }
    }
}
