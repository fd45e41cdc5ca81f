//! Request and response envelopes
//!
//! These are the payloads a connection hands to its store. They carry SQL
//! text and results; nothing in this crate interprets them.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single SQL statement with positional parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// SQL text
    pub sql: String,
    /// Positional parameters bound to `?` placeholders
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<JsonValue>,
}

impl Statement {
    /// Create a statement without parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameters: Vec::new(),
        }
    }

    /// Create a statement with positional parameters
    pub fn with_parameters(sql: impl Into<String>, parameters: Vec<JsonValue>) -> Self {
        Self {
            sql: sql.into(),
            parameters,
        }
    }
}

impl From<&str> for Statement {
    fn from(sql: &str) -> Self {
        Statement::new(sql)
    }
}

impl From<String> for Statement {
    fn from(sql: String) -> Self {
        Statement::new(sql)
    }
}

/// Statements that modify the database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// Statements, executed in order
    pub statements: Vec<Statement>,
    /// Report per-statement execution time
    #[serde(default)]
    pub timings: bool,
    /// Wrap all statements in a single transaction
    #[serde(default)]
    pub transaction: bool,
}

impl ExecuteRequest {
    /// Create a request from SQL statements
    pub fn new<I, S>(statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Statement>,
    {
        Self {
            statements: statements.into_iter().map(Into::into).collect(),
            timings: false,
            transaction: false,
        }
    }

    /// Request per-statement timings
    pub fn with_timings(mut self) -> Self {
        self.timings = true;
        self
    }

    /// Execute all statements inside one transaction
    pub fn in_transaction(mut self) -> Self {
        self.transaction = true;
        self
    }
}

/// Read consistency requested for a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyLevel {
    /// Read local state without any leadership check
    None,
    /// Read only if this node believes it is the leader
    #[default]
    Weak,
    /// Read through the replicated log
    Strong,
}

impl std::fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Weak => write!(f, "weak"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// Statements that return rows and do not modify the database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Statements, executed in order
    pub statements: Vec<Statement>,
    /// Report per-statement execution time
    #[serde(default)]
    pub timings: bool,
    /// Wrap all statements in a single transaction
    #[serde(default)]
    pub transaction: bool,
    /// Requested read consistency
    #[serde(default)]
    pub level: ConsistencyLevel,
}

impl QueryRequest {
    /// Create a request from SQL statements at the default consistency level
    pub fn new<I, S>(statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Statement>,
    {
        Self {
            statements: statements.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the read consistency level
    pub fn with_level(mut self, level: ConsistencyLevel) -> Self {
        self.level = level;
        self
    }
}

/// Outcome of one executed statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteResult {
    /// Row id of the last inserted row
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_insert_id: i64,
    /// Number of rows changed by the statement
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rows_affected: i64,
    /// Statement-level error, if the statement failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Execution time in seconds, when timings were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

/// Response to an [`ExecuteRequest`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// One result per statement
    pub results: Vec<ExecuteResult>,
    /// Total time in seconds, when timings were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

impl ExecuteResponse {
    /// First statement-level error, if any statement failed
    pub fn first_error(&self) -> Option<&str> {
        self.results.iter().find_map(|r| r.error.as_deref())
    }
}

/// Rows returned by one query statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rows {
    /// Column names
    #[serde(default)]
    pub columns: Vec<String>,
    /// Declared column types
    #[serde(default)]
    pub types: Vec<String>,
    /// Row values, one inner vector per row
    #[serde(default)]
    pub values: Vec<Vec<JsonValue>>,
    /// Statement-level error, if the statement failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Execution time in seconds, when timings were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

/// Response to a [`QueryRequest`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// One row set per statement
    pub results: Vec<Rows>,
    /// Total time in seconds, when timings were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}
