//! HTTP client for the board endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use strictly_bingo::Board;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::server::{ErrorResponse, SaveBoardRequest};
use crate::{BoardId, BoardRemote, GatewayError, StoredBoard};

/// Talks to a running board endpoint.
#[derive(Debug, Clone)]
pub struct HttpBoardClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBoardClient {
    /// Creates a client for the endpoint rooted at `base_url`.
    ///
    /// A path without a trailing slash is treated as a directory, so
    /// `http://host/bingo` sends to `http://host/bingo/api/board`.
    #[instrument(fields(base_url = %base_url))]
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Base address requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn board_url(&self) -> Result<Url, GatewayError> {
        self.base_url
            .join("api/board")
            .map_err(|e| GatewayError::Remote(format!("Bad endpoint address: {}", e)))
    }

    async fn failure(response: reqwest::Response) -> GatewayError {
        let status = response.status();
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        warn!(%status, %message, "Board endpoint refused request");
        GatewayError::Remote(message)
    }
}

#[async_trait]
impl BoardRemote for HttpBoardClient {
    #[instrument(skip(self, board), fields(board_id = %id))]
    async fn save(&self, id: &BoardId, board: Board) -> Result<(), GatewayError> {
        let request = SaveBoardRequest {
            board_id: id.to_string(),
            squares: board.into(),
        };

        debug!("Posting board");
        let response = self
            .client
            .post(self.board_url()?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        info!("Board posted");
        Ok(())
    }

    #[instrument(skip(self), fields(board_id = %id))]
    async fn load(&self, id: &BoardId) -> Result<Board, GatewayError> {
        let mut url = self.board_url()?;
        url.query_pairs_mut().append_pair("id", id.as_str());

        debug!(%url, "Fetching board");
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound(id.clone())),
            status if status.is_success() => {
                let record: StoredBoard = response.json().await?;
                info!(created_at = %record.created_at(), "Board fetched");
                Ok(record.into_board()?)
            }
            _ => Err(Self::failure(response).await),
        }
    }
}
