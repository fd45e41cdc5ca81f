//! Store seam
//!
//! The store owns statement execution, querying and connection teardown.
//! A connection forwards every such call to its store, passing itself so the
//! store can reach the engine session and the connection's bookkeeping.

use crate::connection::Connection;
use tessera_core::{ExecuteRequest, ExecuteResponse, QueryRequest, QueryResponse, Result};

/// Executes requests on behalf of connections
///
/// Implementations are expected to bracket engine calls with a
/// [`TxStateChange`](crate::TxStateChange) so the connection's cached
/// transaction-start time stays current, and to call
/// [`Connection::touch`] once a request has been serviced.
pub trait Store: Send + Sync {
    /// Execute statements that modify the database
    fn execute(&self, conn: &Connection, req: &ExecuteRequest) -> Result<ExecuteResponse>;

    /// Execute statements, rolling back any open transaction if one fails
    fn execute_or_abort(&self, conn: &Connection, req: &ExecuteRequest)
        -> Result<ExecuteResponse>;

    /// Run statements that return rows
    fn query(&self, conn: &Connection, req: &QueryRequest) -> Result<QueryResponse>;

    /// Release the engine session behind the connection
    fn disconnect(&self, conn: &Connection) -> Result<()>;
}
