//! Persistence gateway: board files, remote saves and the board identity.

mod error;
mod file;

pub use error::GatewayError;
pub use file::{load_file, save_file};

use async_trait::async_trait;
use strictly_bingo::Board;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::share::{board_id_from_url, with_board_id, without_board_id};
use crate::{BoardId, IdentityBinding};

/// Remote side of the share path.
///
/// Implemented by the HTTP client for the board endpoint and by the
/// board service itself, so the gateway can run against either.
#[async_trait]
pub trait BoardRemote: Send + Sync {
    /// Upserts the board under `id`.
    async fn save(&self, id: &BoardId, board: Board) -> Result<(), GatewayError>;

    /// Fetches the board stored under `id`.
    ///
    /// Returns [`GatewayError::NotFound`] when nothing live is stored.
    async fn load(&self, id: &BoardId) -> Result<Board, GatewayError>;
}

/// Saves and loads boards, and tracks which stored record the board is tied to.
#[derive(Debug, Clone)]
pub struct PersistenceGateway<R> {
    remote: R,
    identity: IdentityBinding,
    page_url: Url,
}

impl<R: BoardRemote> PersistenceGateway<R> {
    /// Creates an unbound gateway. `page_url` is the address share links build on.
    #[instrument(skip(remote), fields(page_url = %page_url))]
    pub fn new(remote: R, page_url: Url) -> Self {
        Self {
            remote,
            identity: IdentityBinding::Unbound,
            page_url: without_board_id(&page_url),
        }
    }

    /// Current identity binding.
    pub fn identity(&self) -> &IdentityBinding {
        &self.identity
    }

    /// Bound board id, if any.
    pub fn board_id(&self) -> Option<&BoardId> {
        self.identity.board_id()
    }

    /// The remote this gateway talks to.
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Address to share: the page URL, plus `board=<id>` when bound.
    pub fn share_url(&self) -> Url {
        match &self.identity {
            IdentityBinding::Bound(id) => with_board_id(&self.page_url, id),
            IdentityBinding::Unbound => self.page_url.clone(),
        }
    }

    /// Saves the board remotely and returns the id it was stored under.
    ///
    /// Reuses the bound id if there is one, otherwise mints a new id and
    /// binds it once the save succeeds. The board is copied before the
    /// request goes out, so later edits are not part of this save.
    ///
    /// # Errors
    ///
    /// Returns the remote's error. A freshly minted id stays unbound.
    #[instrument(skip(self, board))]
    pub async fn save_remote(&mut self, board: &Board) -> Result<BoardId, GatewayError> {
        let snapshot = board.clone();
        let id = match self.identity.board_id() {
            Some(id) => {
                debug!(board_id = %id, "Saving to bound id");
                id.clone()
            }
            None => BoardId::mint(),
        };

        self.remote.save(&id, snapshot).await.map_err(|e| {
            warn!(board_id = %id, error = %e, "Remote save failed");
            e
        })?;

        if !self.identity.is_bound() {
            info!(board_id = %id, "Board identity bound");
            self.identity = IdentityBinding::Bound(id.clone());
        }
        info!(board_id = %id, "Board saved remotely");
        Ok(id)
    }

    /// Loads a stored board and binds its id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for unknown or expired ids, or
    /// the remote's error. The binding is unchanged on failure.
    #[instrument(skip(self), fields(board_id = %id))]
    pub async fn load_remote(&mut self, id: BoardId) -> Result<Board, GatewayError> {
        let board = self.remote.load(&id).await.map_err(|e| {
            warn!(error = %e, "Remote load failed");
            e
        })?;

        info!("Board loaded remotely, identity bound");
        self.identity = IdentityBinding::Bound(id);
        Ok(board)
    }

    /// Loads the board named by the address' `board` parameter, if any.
    ///
    /// # Errors
    ///
    /// Same as [`PersistenceGateway::load_remote`].
    #[instrument(skip(self), fields(url = %url))]
    pub async fn resume_from_url(&mut self, url: &Url) -> Result<Option<Board>, GatewayError> {
        match board_id_from_url(url) {
            Some(id) => self.load_remote(id).await.map(Some),
            None => {
                debug!("No board id in address");
                Ok(None)
            }
        }
    }

    /// Drops the binding; the next save mints a new id.
    #[instrument(skip(self))]
    pub fn unbind(&mut self) {
        if let IdentityBinding::Bound(id) = &self.identity {
            info!(board_id = %id, "Board identity unbound");
        }
        self.identity = IdentityBinding::Unbound;
    }
}
