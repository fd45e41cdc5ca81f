//! Core types for Tessera
//!
//! This crate defines the vocabulary shared by every layer:
//! - [`Error`] / [`Result`]: the canonical error type
//! - [`ConnectionId`]: handle clients use to address a connection
//! - Request and response envelopes passed between connections and stores
//! - [`EngineSession`]: what a connection needs from the embedded SQL engine

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod error;
pub mod traits;
pub mod types;

pub use command::{
    ConsistencyLevel, ExecuteRequest, ExecuteResponse, ExecuteResult, QueryRequest,
    QueryResponse, Rows, Statement,
};
pub use error::{BoxError, Error, Result};
pub use traits::EngineSession;
pub use types::{ConnectionId, ConnectionIdAllocator};
