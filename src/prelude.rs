//! Convenient imports for Tessera.
//!
//! This module re-exports the most commonly used types so a store
//! implementation can get started with a single import:
//!
//! ```ignore
//! use tessera::prelude::*;
//!
//! let conn = Connection::new(ids.allocate()?, session, store);
//! let change = TxStateChange::new(&conn);
//! ```

// Connection handle
pub use crate::{Connection, ConnectionBuilder, ConnectionConfig, ConnectionStatus};

// Transaction tracking
pub use crate::{TxReconciliation, TxStateChange};

// Seams
pub use crate::{EngineSession, Store};

// Error handling
pub use crate::{Error, Result};

// Identity
pub use crate::{ConnectionId, ConnectionIdAllocator};

// Requests and responses
pub use crate::{
    ConsistencyLevel, ExecuteRequest, ExecuteResponse, QueryRequest, QueryResponse, Statement,
};

#[cfg(feature = "sqlite")]
pub use crate::SqliteSession;
