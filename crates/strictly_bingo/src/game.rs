//! Board state glue: editing, shuffling and play mode.

use crate::rules::shuffle;
use crate::session::{PlaySession, TriggerOutcome};
use crate::types::{Board, CellIndex};
use crate::{GameError, RandomSource};
use tracing::{debug, info, instrument, warn};

/// A bingo board together with its optional play session.
///
/// The play session exists only while play mode is on. Shuffling,
/// loading a different board or starting over all discard the marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BingoGame {
    board: Board,
    session: Option<PlaySession>,
}

impl BingoGame {
    /// Creates a game on the stock board, not in play mode.
    #[instrument]
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    /// Creates a game on the given board, not in play mode.
    #[instrument(skip(board))]
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            session: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the play session, if play mode is on.
    pub fn session(&self) -> Option<&PlaySession> {
        self.session.as_ref()
    }

    /// True while play mode is on.
    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// True if the session has been won.
    pub fn has_won(&self) -> bool {
        self.session.as_ref().is_some_and(PlaySession::has_won)
    }

    /// Replaces the text of one cell.
    #[instrument(skip(self, text), fields(cell = %cell))]
    pub fn edit_cell(&mut self, cell: CellIndex, text: impl Into<String>) {
        self.board.set(cell, text);
        debug!("Cell edited");
    }

    /// Turns play mode on. Does nothing if already playing.
    #[instrument(skip(self))]
    pub fn enter_play(&mut self) {
        if self.session.is_none() {
            info!("Entering play mode");
            self.session = Some(PlaySession::new());
        }
    }

    /// Turns play mode off, discarding marks and win state.
    #[instrument(skip(self))]
    pub fn leave_play(&mut self) {
        if self.session.take().is_some() {
            info!("Leaving play mode");
        }
    }

    /// Clears marks and win state while staying in play mode.
    #[instrument(skip(self))]
    pub fn reset_play(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset();
        }
    }

    /// Toggles a cell during play.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotPlaying`] outside play mode.
    #[instrument(skip(self, rng), fields(cell = %cell))]
    pub fn toggle<R: RandomSource + ?Sized>(
        &mut self,
        cell: CellIndex,
        rng: &mut R,
    ) -> Result<TriggerOutcome, GameError> {
        let session = self.session.as_mut().ok_or_else(|| {
            warn!("Toggle outside play mode");
            GameError::NotPlaying
        })?;
        Ok(session.toggle(cell, rng))
    }

    /// True when a shuffle would throw away marks or a win.
    pub fn needs_shuffle_confirmation(&self) -> bool {
        self.session.as_ref().is_some_and(PlaySession::is_active)
    }

    /// Shuffles the board around the free space.
    ///
    /// Pass `confirmed = true` once the player has agreed to lose the
    /// current session. A confirmed shuffle clears marks and win state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ConfirmationRequired`] if play is in progress
    /// and the shuffle was not confirmed. The board is left unchanged.
    #[instrument(skip(self, rng))]
    pub fn shuffle<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        confirmed: bool,
    ) -> Result<(), GameError> {
        if self.needs_shuffle_confirmation() && !confirmed {
            warn!("Shuffle refused without confirmation");
            return Err(GameError::ConfirmationRequired);
        }

        self.board = shuffle(&self.board, rng);
        self.reset_play();
        info!("Board shuffled");
        Ok(())
    }

    /// Replaces the whole board, clearing any play progress.
    #[instrument(skip(self, board))]
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.reset_play();
        info!("Board replaced");
    }

    /// Parses a board file and replaces the board with it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] if the file is malformed. The current
    /// board is left unchanged.
    #[instrument(skip(self, text))]
    pub fn load_json(&mut self, text: &str) -> Result<(), GameError> {
        let board = Board::from_json(text)?;
        self.replace_board(board);
        Ok(())
    }

    /// Starts over on the stock board with play mode off.
    #[instrument(skip(self))]
    pub fn new_board(&mut self) {
        info!("Starting a new board");
        self.board = Board::new();
        self.session = None;
    }
}
