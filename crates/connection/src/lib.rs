//! Connection layer for Tessera
//!
//! This crate implements the per-client handle into the replicated store:
//! - Connection: identity, timestamps and the store/engine it forwards to
//! - TxStateChange: one-shot detector that reconciles the cached
//!   transaction-start time against the engine's actual state
//! - ConnectionStatus: serializable view for observability tooling
//! - Store: the seam to whatever executes statements

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod connection;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod status;
pub mod store;
pub mod tx_state;

pub use config::ConnectionConfig;
pub use connection::{Connection, ConnectionBuilder};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSession;
pub use status::{ConnectionStatus, FkConstraints};
pub use store::Store;
pub use tx_state::{TxReconciliation, TxStateChange};

// Re-export core types callers need alongside a connection
pub use tessera_core::{ConnectionId, EngineSession, Error, Result};
