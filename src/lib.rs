//! # Tessera
//!
//! Client connection handles for a replicated SQL store.
//!
//! A [`Connection`] is what a client holds between requests: an id, a few
//! timestamps, and the engine session and store its requests go to. The
//! store brackets every engine call with a [`TxStateChange`] so the
//! connection knows when a transaction began, which lets it report
//! long-running transactions and idle connections.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tessera::prelude::*;
//!
//! let ids = ConnectionIdAllocator::new();
//! let conn = Connection::builder(ids.allocate()?, session, store)
//!     .tx_timeout(Duration::from_secs(10))
//!     .build();
//!
//! // Inside the store, around each engine call
//! let change = TxStateChange::new(&conn);
//! session.execute_batch("BEGIN")?;
//! change.check_and_set();
//!
//! // Observability
//! println!("{}", serde_json::to_string(&conn.status()?)?);
//! ```
//!
//! ## Crates
//!
//! - `tessera-core` - errors, ids, request/response envelopes, [`EngineSession`]
//! - `tessera-connection` - [`Connection`], [`TxStateChange`], [`Store`]

#![warn(missing_docs)]

pub mod prelude;

pub use tessera_connection::{
    Connection, ConnectionBuilder, ConnectionConfig, ConnectionStatus, FkConstraints, Store,
    TxReconciliation, TxStateChange,
};
#[cfg(feature = "sqlite")]
pub use tessera_connection::SqliteSession;
pub use tessera_core::{
    BoxError, ConnectionId, ConnectionIdAllocator, ConsistencyLevel, EngineSession, Error,
    ExecuteRequest, ExecuteResponse, ExecuteResult, QueryRequest, QueryResponse, Result, Rows,
    Statement,
};
