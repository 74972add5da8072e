//! Tests for the key-value store adapters.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

use strictly_board::{KvStore, MemoryStore, SqliteStore, UpstashStore};

fn sqlite_store() -> (NamedTempFile, SqliteStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteStore::open(path).expect("Failed to open store");
    (db_file, store)
}

async fn check_round_trip(store: &dyn KvStore) {
    assert_eq!(store.get("board:x").await.expect("Get failed"), None);

    let value = json!({"squares": ["a", "b"], "createdAt": "2026-10-16T00:00:00Z"});
    store
        .set("board:x", value.clone(), 60)
        .await
        .expect("Set failed");
    assert_eq!(store.get("board:x").await.expect("Get failed"), Some(value));

    store
        .set("board:x", json!("replaced"), 60)
        .await
        .expect("Set failed");
    assert_eq!(
        store.get("board:x").await.expect("Get failed"),
        Some(json!("replaced"))
    );
}

#[tokio::test]
async fn test_memory_round_trip() {
    check_round_trip(&MemoryStore::new()).await;
}

#[tokio::test]
async fn test_sqlite_round_trip() {
    let (_db, store) = sqlite_store();
    check_round_trip(&store).await;
}

#[tokio::test]
async fn test_memory_zero_ttl_expires_immediately() {
    let store = MemoryStore::new();
    store.set("k", json!(1), 0).await.expect("Set failed");
    assert_eq!(store.get("k").await.expect("Get failed"), None);
    assert!(store.is_empty(), "Expired entry should be evicted on read");
}

#[tokio::test]
async fn test_sqlite_zero_ttl_expires_immediately() {
    let (_db, store) = sqlite_store();
    store.set("k", json!(1), 0).await.expect("Set failed");
    assert_eq!(store.get("k").await.expect("Get failed"), None);
    assert_eq!(store.purge_expired().await.expect("Purge failed"), 1);
}

#[tokio::test]
async fn test_memory_clones_share_entries() {
    let store = MemoryStore::new();
    let other = store.clone();
    store.set("k", json!("v"), 60).await.expect("Set failed");
    assert_eq!(other.get("k").await.expect("Get failed"), Some(json!("v")));
    assert_eq!(other.len(), 1);
}

#[tokio::test]
async fn test_huge_ttl_does_not_overflow() {
    let store = MemoryStore::new();
    store.set("k", json!(true), u64::MAX).await.expect("Set failed");
    assert_eq!(store.get("k").await.expect("Get failed"), Some(json!(true)));
}

#[tokio::test]
async fn test_arc_dyn_store_delegates() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    store.set("k", json!([1, 2]), 60).await.expect("Set failed");
    assert_eq!(store.get("k").await.expect("Get failed"), Some(json!([1, 2])));
}

/// Commands received by the Redis REST stand-in, with their auth header.
type CommandLog = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn redis_rest(
    State(log): State<CommandLog>,
    headers: HeaderMap,
    Json(command): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    log.lock().expect("Log poisoned").push((auth, command.clone()));

    match (command[0].as_str(), command[1].as_str()) {
        (Some("GET"), Some("board:missing")) => (StatusCode::OK, Json(json!({"result": null}))),
        (Some("GET"), Some(_)) => (
            StatusCode::OK,
            Json(json!({"result": "{\"squares\":[\"a\"],\"n\":1}"})),
        ),
        (_, Some("board:broken")) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "ERR wrong number of arguments"})),
        ),
        _ => (StatusCode::OK, Json(json!({"result": "OK"}))),
    }
}

/// Serves the stand-in on an ephemeral port; returns its URL and command log.
async fn spawn_redis_rest() -> (String, CommandLog) {
    let log = CommandLog::default();
    let app = Router::new()
        .route("/", post(redis_rest))
        .with_state(log.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move { axum::serve(listener, app).await });

    (format!("http://{}/", addr), log)
}

#[tokio::test]
async fn test_upstash_set_sends_ex_command_with_bearer_token() {
    let (url, log) = spawn_redis_rest().await;
    let store = UpstashStore::new(url, "tok3n".to_string());

    store
        .set("board:abc", json!({"squares": ["x"]}), 604_800)
        .await
        .expect("Set failed");

    let log = log.lock().expect("Log poisoned");
    let (auth, command) = &log[0];
    assert_eq!(auth.as_deref(), Some("Bearer tok3n"));
    assert_eq!(
        command,
        &json!(["SET", "board:abc", "{\"squares\":[\"x\"]}", "EX", 604_800])
    );
}

#[tokio::test]
async fn test_upstash_get_decodes_string_result() {
    let (url, log) = spawn_redis_rest().await;
    let store = UpstashStore::new(url, "tok3n".to_string());

    let value = store.get("board:abc").await.expect("Get failed");
    assert_eq!(value, Some(json!({"squares": ["a"], "n": 1})));
    assert_eq!(log.lock().expect("Log poisoned")[0].1, json!(["GET", "board:abc"]));
}

#[tokio::test]
async fn test_upstash_null_result_is_absent() {
    let (url, _log) = spawn_redis_rest().await;
    let store = UpstashStore::new(url, "tok3n".to_string());
    assert_eq!(store.get("board:missing").await.expect("Get failed"), None);
}

#[tokio::test]
async fn test_upstash_error_reply_is_store_error() {
    let (url, _log) = spawn_redis_rest().await;
    let store = UpstashStore::new(url, "tok3n".to_string());

    let err = store
        .set("board:broken", json!(1), 60)
        .await
        .expect_err("Error reply should fail");
    assert!(err.message.contains("ERR wrong number of arguments"));
}

#[tokio::test]
async fn test_upstash_zero_ttl_deletes_instead_of_ex_zero() {
    let (url, log) = spawn_redis_rest().await;
    let store = UpstashStore::new(url, "tok3n".to_string());

    store.set("board:brief", json!(1), 0).await.expect("Set failed");

    let log = log.lock().expect("Log poisoned");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].1, json!(["DEL", "board:brief"]));
}
