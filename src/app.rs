//! A bingo game wired to persistence.

use std::path::Path;
use strictly_bingo::{BingoGame, Board};
use tracing::{info, instrument};
use url::Url;

use crate::gateway::{load_file, save_file};
use crate::{BoardId, BoardRemote, GatewayError, IdentityBinding, PersistenceGateway};

/// Game state plus the gateway that saves, loads and shares it.
///
/// A failed load never touches the board, and starting a new board drops
/// the identity so the next save creates a separate record.
#[derive(Debug)]
pub struct BingoApp<R> {
    game: BingoGame,
    gateway: PersistenceGateway<R>,
}

impl<R: BoardRemote> BingoApp<R> {
    /// Starts on the stock board, unbound.
    #[instrument(skip(remote), fields(page_url = %page_url))]
    pub fn new(remote: R, page_url: Url) -> Self {
        Self {
            game: BingoGame::new(),
            gateway: PersistenceGateway::new(remote, page_url),
        }
    }

    /// The game.
    pub fn game(&self) -> &BingoGame {
        &self.game
    }

    /// The game, for edits and play.
    pub fn game_mut(&mut self) -> &mut BingoGame {
        &mut self.game
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// The persistence gateway.
    pub fn gateway(&self) -> &PersistenceGateway<R> {
        &self.gateway
    }

    /// Current identity binding.
    pub fn identity(&self) -> &IdentityBinding {
        self.gateway.identity()
    }

    /// Address to share the board at.
    pub fn share_url(&self) -> Url {
        self.gateway.share_url()
    }

    /// Resets to the stock board and forgets the stored identity.
    #[instrument(skip(self))]
    pub fn new_board(&mut self) {
        self.game.new_board();
        self.gateway.unbind();
    }

    /// Saves the current board remotely.
    ///
    /// # Errors
    ///
    /// See [`PersistenceGateway::save_remote`].
    #[instrument(skip(self))]
    pub async fn save_remote(&mut self) -> Result<BoardId, GatewayError> {
        let board = self.game.board().clone();
        self.gateway.save_remote(&board).await
    }

    /// Replaces the board with the one stored under `id`.
    ///
    /// # Errors
    ///
    /// See [`PersistenceGateway::load_remote`]. The board is unchanged on error.
    #[instrument(skip(self), fields(board_id = %id))]
    pub async fn load_remote(&mut self, id: BoardId) -> Result<(), GatewayError> {
        let board = self.gateway.load_remote(id).await?;
        self.game.replace_board(board);
        Ok(())
    }

    /// Loads the board named in `url`, if it names one.
    ///
    /// Returns true when a board was loaded.
    ///
    /// # Errors
    ///
    /// See [`PersistenceGateway::load_remote`].
    #[instrument(skip(self), fields(url = %url))]
    pub async fn resume_from_url(&mut self, url: &Url) -> Result<bool, GatewayError> {
        match self.gateway.resume_from_url(url).await? {
            Some(board) => {
                self.game.replace_board(board);
                info!("Resumed board from address");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Writes the board to a local JSON file.
    ///
    /// # Errors
    ///
    /// See [`save_file`].
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), GatewayError> {
        save_file(self.game.board(), path)
    }

    /// Replaces the board with a local JSON file. The identity is kept.
    ///
    /// # Errors
    ///
    /// See [`load_file`]. The board is unchanged on error.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), GatewayError> {
        let board = load_file(path)?;
        self.game.replace_board(board);
        Ok(())
    }
}
