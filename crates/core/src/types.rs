//! Identity types
//!
//! - [`ConnectionId`]: handle clients use to address a connection
//! - [`ConnectionIdAllocator`]: hands out unique ids for new connections

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a connection
///
/// Clients keep this value between requests and present it to the store to
/// route statements to the same underlying engine session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Create a ConnectionId from its raw value
    pub const fn new(id: u64) -> Self {
        ConnectionId(id)
    }

    /// Get the raw value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ConnectionId {
    fn from(id: u64) -> Self {
        ConnectionId(id)
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocates connection ids
///
/// Monotonically increasing. Ids are never reused for the lifetime of the
/// allocator, so a stale handle from a closed connection cannot address a
/// newer one. Once `u64::MAX` has been handed out the allocator is exhausted
/// and every further call fails.
#[derive(Debug)]
pub struct ConnectionIdAllocator {
    /// Last id handed out (or the id to continue after)
    last: AtomicU64,
}

impl ConnectionIdAllocator {
    /// Create an allocator whose first id is 1
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Create an allocator that continues after `max_seen`
    ///
    /// Used when a store restarts and must not hand out ids that clients may
    /// still hold.
    pub fn starting_after(max_seen: u64) -> Self {
        ConnectionIdAllocator {
            last: AtomicU64::new(max_seen),
        }
    }

    /// Allocate the next id
    ///
    /// Fails with [`Error::Internal`] once the id space is exhausted.
    pub fn allocate(&self) -> Result<ConnectionId> {
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|prev| ConnectionId(prev + 1))
            .map_err(|_| Error::Internal("connection id space exhausted".into()))
    }

    /// Peek at the id the next call to [`allocate`](Self::allocate) returns,
    /// or `None` if the allocator is exhausted
    pub fn peek(&self) -> Option<ConnectionId> {
        self.last.load(Ordering::SeqCst).checked_add(1).map(ConnectionId)
    }
}

impl Default for ConnectionIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
