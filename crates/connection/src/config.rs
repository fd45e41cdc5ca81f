//! Per-connection configuration
//!
//! Timeouts are advisory: a connection only reports that it has exceeded
//! them. The store decides whether to abort the transaction or close the
//! connection.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts a store applies to a connection
///
/// Serialized with millisecond durations so it can be embedded in a store's
/// own configuration file. Missing fields take their defaults (no timeout).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Maximum time the connection may sit unused
    #[serde(rename = "idle_timeout_ms", with = "opt_millis")]
    pub idle_timeout: Option<Duration>,

    /// Maximum time a transaction may stay open
    #[serde(rename = "tx_timeout_ms", with = "opt_millis")]
    pub tx_timeout: Option<Duration>,
}

impl ConnectionConfig {
    /// Configuration with no timeouts
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the idle timeout
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Set the transaction timeout
    pub fn with_tx_timeout(mut self, timeout: Duration) -> Self {
        self.tx_timeout = Some(timeout);
        self
    }
}

mod opt_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}
