//! Engine seam
//!
//! A connection never runs SQL itself. It only asks the engine session two
//! questions: is a transaction open, and are foreign-key constraints on.

use crate::error::Result;

/// A session on the embedded SQL engine
///
/// Implementations must be thread-safe: several operations may query the
/// same session concurrently.
pub trait EngineSession: Send + Sync {
    /// Whether the session is currently inside an explicit transaction
    fn transaction_active(&self) -> bool;

    /// Whether foreign-key constraints are enforced on this session
    fn fk_constraints(&self) -> Result<bool>;
}
