//! Unified error type for Tessera.
//!
//! Errors raised by the engine or the store travel through connections
//! untouched: engine failures keep their original source error so callers
//! can downcast to the concrete engine type.

use crate::types::ConnectionId;
use thiserror::Error;

/// Boxed error from an engine implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All Tessera errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The embedded SQL engine reported a failure
    #[error("engine error: {0}")]
    Engine(#[source] BoxError),

    /// The store failed to service a request
    #[error("store error: {0}")]
    Store(String),

    /// The connection has been disconnected from its store
    #[error("connection {0} is closed")]
    ConnectionClosed(ConnectionId),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (exhausted id space, invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for Tessera operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an engine error, keeping it as the source.
    pub fn engine<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Engine(Box::new(err))
    }

    /// Check if this error came from the engine.
    pub fn is_engine(&self) -> bool {
        matches!(self, Error::Engine(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
