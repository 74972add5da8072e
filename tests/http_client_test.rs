//! End-to-end tests: HTTP client against a served board endpoint.

use std::sync::Arc;
use strictly_bingo::{Board, CellIndex};
use tokio::net::TcpListener;
use url::Url;

use strictly_board::{
    BingoApp, BoardId, BoardRemote, BoardService, GatewayError, HttpBoardClient, KvStore,
    MemoryStore, serve,
};

/// Starts a server on an ephemeral port and returns its base URL.
async fn spawn_server() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");

    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    tokio::spawn(serve(listener, BoardService::new(store)));

    Url::parse(&format!("http://{}/", addr)).expect("Bad URL")
}

fn cell(index: usize) -> CellIndex {
    CellIndex::from_index(index).expect("Bad cell")
}

#[tokio::test]
async fn test_client_save_and_load() {
    let base = spawn_server().await;
    let client = HttpBoardClient::new(base);
    let id = BoardId::mint();

    let mut board = Board::new();
    board.set(cell(5), "Over the wire");
    client.save(&id, board.clone()).await.expect("Save failed");

    let loaded = client.load(&id).await.expect("Load failed");
    assert_eq!(loaded, board);
}

#[tokio::test]
async fn test_client_maps_missing_board_to_not_found() {
    let base = spawn_server().await;
    let client = HttpBoardClient::new(base);
    let id = BoardId::mint();

    let result = client.load(&id).await;
    assert_eq!(result, Err(GatewayError::NotFound(id)));
}

#[tokio::test]
async fn test_share_link_opens_board_in_second_app() {
    let base = spawn_server().await;
    let page = Url::parse("https://bingo.example/").expect("Bad URL");

    let mut host = BingoApp::new(HttpBoardClient::new(base.clone()), page.clone());
    host.game_mut().edit_cell(cell(20), "Someone says synergy");
    host.save_remote().await.expect("Save failed");
    let link = host.share_url();

    let mut guest = BingoApp::new(HttpBoardClient::new(base), page);
    assert!(guest.resume_from_url(&link).await.expect("Resume failed"));
    assert_eq!(guest.board(), host.board());
    assert_eq!(guest.identity(), host.identity());
}

#[tokio::test]
async fn test_unreachable_server_is_remote_error() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);

    let base = Url::parse(&format!("http://{}/", addr)).expect("Bad URL");
    let mut app = BingoApp::new(HttpBoardClient::new(base), Url::parse("https://bingo.example/").expect("Bad URL"));

    let result = app.save_remote().await;
    assert!(matches!(result, Err(GatewayError::Remote(_))));
    assert!(!app.identity().is_bound());
}
