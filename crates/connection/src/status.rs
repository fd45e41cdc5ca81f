//! Serializable connection status
//!
//! ```json
//! {
//!   "id": 12,
//!   "created_at": "2024-05-01T09:30:00.123456789Z",
//!   "fk_constraints": "enabled",
//!   "tx_started_at": "2024-05-01T09:31:02.000000001Z",
//!   "last_used_at": "2024-05-01T09:31:05.250000000Z"
//! }
//! ```
//!
//! `tx_started_at` and `last_used_at` are omitted while unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tessera_core::ConnectionId;

/// Foreign-key constraint enforcement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FkConstraints {
    /// Constraints are enforced
    Enabled,
    /// Constraints are not enforced
    Disabled,
}

impl From<bool> for FkConstraints {
    fn from(enabled: bool) -> Self {
        if enabled {
            FkConstraints::Enabled
        } else {
            FkConstraints::Disabled
        }
    }
}

impl std::fmt::Display for FkConstraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Point-in-time view of a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Connection id
    pub id: ConnectionId,
    /// When the connection was created
    pub created_at: DateTime<Utc>,
    /// Foreign-key constraint mode of the engine session
    pub fk_constraints: FkConstraints,
    /// Start of the transaction seen at the last reconciliation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_started_at: Option<DateTime<Utc>>,
    /// When a request last completed on the connection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}
