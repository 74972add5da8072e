//! Tests for the `/api/board` endpoint, driven through the router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use strictly_board::{BoardService, KvStore, MemoryStore, SharedBoardService, router};

fn service() -> (MemoryStore, SharedBoardService) {
    let store = MemoryStore::new();
    let shared: Arc<dyn KvStore> = Arc::new(store.clone());
    (store, BoardService::new(shared))
}

fn squares(tag: &str) -> Vec<String> {
    (0..25).map(|i| format!("{} {}", tag, i)).collect()
}

async fn send(service: &SharedBoardService, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(service.clone())
        .oneshot(request)
        .await
        .expect("Router failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Body failed")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/board")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Bad request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Bad request")
}

#[tokio::test]
async fn test_save_then_load() {
    let (_, service) = service();

    let (status, body) = send(
        &service,
        post(json!({"boardId": "abc", "squares": squares("cell")})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = send(&service, get("/api/board?id=abc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["squares"], json!(squares("cell")));
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_save_writes_prefixed_key_with_ttl() {
    let (store, service) = service();
    send(
        &service,
        post(json!({"boardId": "abc", "squares": squares("x")})),
    )
    .await;

    let stored = store
        .get("board:abc")
        .await
        .expect("Get failed")
        .expect("Record missing");
    assert_eq!(stored["squares"], json!(squares("x")));
    assert_eq!(service.ttl_seconds(), 604_800);
}

#[tokio::test]
async fn test_save_overwrites_same_id() {
    let (_, service) = service();
    send(&service, post(json!({"boardId": "abc", "squares": squares("old")}))).await;
    send(&service, post(json!({"boardId": "abc", "squares": squares("new")}))).await;

    let (_, body) = send(&service, get("/api/board?id=abc")).await;
    assert_eq!(body["squares"], json!(squares("new")));
}

#[tokio::test]
async fn test_load_without_id_is_bad_request() {
    let (_, service) = service();
    let (status, body) = send(&service, get("/api/board")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Board ID is required"}));

    let (status, _) = send(&service, get("/api/board?id=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_load_unknown_id_is_not_found() {
    let (_, service) = service();
    let (status, body) = send(&service, get("/api/board?id=missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Board not found"}));
}

#[tokio::test]
async fn test_expired_board_is_not_found() {
    let store = MemoryStore::new();
    let shared: Arc<dyn KvStore> = Arc::new(store);
    let service = BoardService::new(shared).with_ttl_seconds(0);

    send(&service, post(json!({"boardId": "brief", "squares": squares("s")}))).await;
    let (status, _) = send(&service, get("/api/board?id=brief")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_rejects_wrong_square_count() {
    let (store, service) = service();
    let mut short = squares("s");
    short.pop();

    let (status, body) = send(&service, post(json!({"boardId": "abc", "squares": short}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_save_rejects_missing_board_id() {
    let (store, service) = service();
    let (status, _) = send(&service, post(json!({"squares": squares("s")}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_save_rejects_non_string_squares_with_json_error() {
    let (store, service) = service();
    let numbers: Vec<u32> = (0..25).collect();

    let (status, body) = send(&service, post(json!({"boardId": "abc", "squares": numbers}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid board data"}));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_save_rejects_unparseable_body_with_json_error() {
    let (store, service) = service();
    let request = Request::builder()
        .method("POST")
        .uri("/api/board")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .expect("Bad request");

    let (status, body) = send(&service, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid board data"}));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_health() {
    let (_, service) = service();
    let response = router(service)
        .oneshot(get("/health"))
        .await
        .expect("Router failed");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Body failed")
        .to_bytes();
    assert_eq!(&bytes[..], b"ok");
}
