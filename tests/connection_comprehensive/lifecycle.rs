//! Connection Lifecycle Tests
//!
//! Tests for a connection used through a store:
//! - Transactions opened and closed by executed statements
//! - Abort and execute-or-abort cleanup
//! - Last-used bookkeeping
//! - Close and use after close

use crate::*;
use std::time::Duration;
use tessera::prelude::*;

#[test]
fn test_begin_and_commit_through_store() {
    init_tracing();
    let store = ScriptStore::new();
    let (conn, engine) = store.connect();

    exec(&conn, "BEGIN");
    assert!(engine.transaction_active());
    let started = conn.tx_started_at().expect("transaction start recorded");
    assert!(started >= conn.created_at());

    exec(&conn, "INSERT INTO foo VALUES (1)");
    assert_eq!(conn.tx_started_at(), Some(started), "start must not move mid-transaction");

    exec(&conn, "COMMIT");
    assert_eq!(conn.tx_started_at(), None);
}

#[test]
fn test_transaction_within_single_request() {
    let store = ScriptStore::new();
    let (conn, _) = store.connect();

    let resp = conn
        .execute(&ExecuteRequest::new(["BEGIN", "INSERT INTO foo VALUES (1)", "COMMIT"]))
        .unwrap();
    assert_eq!(resp.results.len(), 3);
    assert_eq!(resp.first_error(), None);

    // Began and ended inside one bracket: nothing to record
    assert_eq!(conn.tx_started_at(), None);
}

#[test]
fn test_abort_transaction_clears_start() {
    let store = ScriptStore::new();
    let (conn, engine) = store.connect();

    exec(&conn, "BEGIN");
    assert!(conn.tx_started_at().is_some());

    conn.abort_transaction().unwrap();
    assert!(!engine.transaction_active());
    assert_eq!(conn.tx_started_at(), None);
}

#[test]
fn test_execute_or_abort_rolls_back_on_failure() {
    let store = ScriptStore::new();
    let (conn, engine) = store.connect();

    exec(&conn, "BEGIN");
    let resp = conn
        .execute_or_abort(&ExecuteRequest::new(["INSERT INTO foo VALUES (1)", "FAIL"]))
        .unwrap();

    assert_eq!(resp.first_error(), Some("scripted failure"));
    assert!(!engine.transaction_active());
    assert_eq!(conn.tx_started_at(), None);
}

#[test]
fn test_execute_or_abort_keeps_transaction_on_success() {
    let store = ScriptStore::new();
    let (conn, engine) = store.connect();

    exec(&conn, "BEGIN");
    let started = conn.tx_started_at();
    conn.execute_or_abort(&ExecuteRequest::new(["INSERT INTO foo VALUES (1)"]))
        .unwrap();

    assert!(engine.transaction_active());
    assert_eq!(conn.tx_started_at(), started);
}

#[test]
fn test_requests_touch_connection() {
    let store = ScriptStore::new();
    let (conn, _) = store.connect();
    assert_eq!(conn.last_used_at(), None);

    exec(&conn, "INSERT INTO foo VALUES (1)");
    let first = conn.last_used_at().expect("touched by execute");

    conn.query(&QueryRequest::new(["SELECT * FROM foo"])).unwrap();
    let second = conn.last_used_at().expect("touched by query");
    assert!(second >= first);
}

#[test]
fn test_query_returns_rows_per_statement() {
    let store = ScriptStore::new();
    let (conn, _) = store.connect();

    let resp = conn
        .query(&QueryRequest::new(["SELECT 1", "SELECT 2"]).with_level(ConsistencyLevel::Strong))
        .unwrap();
    assert_eq!(resp.results.len(), 2);
    assert_eq!(resp.results[1].values[0][0], "SELECT 2");
}

#[test]
fn test_close_releases_session() {
    let store = ScriptStore::new();
    let (conn, _) = store.connect();
    let (_other, _) = store.connect();
    assert_eq!(store.open_sessions(), 2);

    conn.close().unwrap();
    assert_eq!(store.open_sessions(), 1);
}

#[test]
fn test_use_after_close_surfaces_store_error() {
    let store = ScriptStore::new();
    let (conn, _) = store.connect();
    conn.close().unwrap();

    let id = conn.id();
    match conn.execute(&ExecuteRequest::new(["SELECT 1"])) {
        Err(Error::ConnectionClosed(closed)) => assert_eq!(closed, id),
        other => panic!("Expected ConnectionClosed, got {:?}", other),
    }
    assert!(matches!(conn.abort_transaction(), Err(Error::ConnectionClosed(_))));
    assert!(matches!(conn.close(), Err(Error::ConnectionClosed(_))));
}

#[test]
fn test_connection_ids_are_unique() {
    let store = ScriptStore::new();
    let (a, _) = store.connect();
    let (b, _) = store.connect();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.to_string(), format!("connection:{}", a.id()));
}

#[test]
fn test_tx_timeout_detects_long_transaction() {
    let store = ScriptStore::new();
    let config = ConnectionConfig::new().with_tx_timeout(Duration::from_secs(5));
    let (conn, _) = store.connect_with(config);

    exec(&conn, "BEGIN");
    let started = conn.tx_started_at().unwrap();

    assert!(!conn.is_tx_expired(started + chrono::Duration::seconds(5)));
    assert!(conn.is_tx_expired(started + chrono::Duration::seconds(6)));
    assert_eq!(
        conn.tx_active_for(started + chrono::Duration::seconds(6)),
        Some(Duration::from_secs(6))
    );

    exec(&conn, "COMMIT");
    assert!(!conn.is_tx_expired(started + chrono::Duration::hours(1)));
    assert_eq!(conn.tx_active_for(started), None);
}

#[test]
fn test_idle_timeout_measures_from_last_use() {
    let store = ScriptStore::new();
    let config = ConnectionConfig::new().with_idle_timeout(Duration::from_secs(30));
    let (conn, _) = store.connect_with(config);

    let created = conn.created_at();
    assert!(conn.is_idle_expired(created + chrono::Duration::seconds(31)));

    exec(&conn, "SELECT 1");
    let used = conn.last_used_at().unwrap();
    assert!(!conn.is_idle_expired(used + chrono::Duration::seconds(30)));
    assert!(conn.is_idle_expired(used + chrono::Duration::seconds(31)));
}
