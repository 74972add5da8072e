//! Board endpoint over HTTP.
//!
//! - `POST /api/board` with `{ "boardId", "squares" }` upserts a board
//! - `GET /api/board?id=<id>` returns `{ "squares", "createdAt" }`
//! - `GET /health` answers `ok`

use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State, rejection::JsonRejection},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strictly_bingo::Board;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

use crate::{BoardId, BoardService, KvStore};

/// Board service shared by every request handler.
pub type SharedBoardService = BoardService<Arc<dyn KvStore>>;

/// Body of `POST /api/board`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBoardRequest {
    /// Id to store the board under.
    #[serde(default)]
    pub board_id: String,
    /// Cell texts in row-major order.
    #[serde(default)]
    pub squares: Vec<String>,
}

/// Reply to a successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveBoardResponse {
    /// Always true.
    pub success: bool,
}

/// Body of every failure reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong.
    pub error: String,
}

/// Query of `GET /api/board`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBoardQuery {
    /// Board id.
    pub id: Option<String>,
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Builds the router with request logging.
#[instrument(skip(service))]
pub fn router(service: SharedBoardService) -> Router {
    Router::new()
        .route("/api/board", get(load_board).post(save_board))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(service)
}

/// Serves the router on `listener` until the process stops.
///
/// # Errors
///
/// Returns the I/O error that ended the server.
#[instrument(skip_all)]
pub async fn serve(listener: TcpListener, service: SharedBoardService) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Board endpoint listening");
    }
    axum::serve(listener, router(service)).await
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip_all)]
async fn save_board(
    State(service): State<SharedBoardService>,
    body: Result<Json<SaveBoardRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Save rejected: unreadable body");
            return failure(StatusCode::BAD_REQUEST, "Invalid board data");
        }
    };
    debug!(board_id = %request.board_id, squares = request.squares.len(), "Save requested");
    let Some(id) = BoardId::parse(&request.board_id) else {
        warn!("Save rejected: missing board id");
        return failure(StatusCode::BAD_REQUEST, "Invalid board data");
    };

    let board = match Board::from_cells(request.squares) {
        Ok(board) => board,
        Err(e) => {
            warn!(error = %e, "Save rejected: bad squares");
            return failure(StatusCode::BAD_REQUEST, "Invalid board data");
        }
    };

    match service.save(&id, &board).await {
        Ok(_) => (StatusCode::OK, Json(SaveBoardResponse { success: true })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to save board");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save board")
        }
    }
}

#[instrument(skip_all)]
async fn load_board(
    State(service): State<SharedBoardService>,
    Query(query): Query<LoadBoardQuery>,
) -> Response {
    debug!(id = ?query.id, "Load requested");
    let Some(id) = query.id.as_deref().and_then(BoardId::parse) else {
        warn!("Load rejected: missing board id");
        return failure(StatusCode::BAD_REQUEST, "Board ID is required");
    };

    match service.load(&id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => {
            debug!(board_id = %id, "Board not found");
            failure(StatusCode::NOT_FOUND, "Board not found")
        }
        Err(e) => {
            error!(board_id = %id, error = %e, "Failed to load board");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load board")
        }
    }
}
