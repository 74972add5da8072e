//! Board file interchange: a bare JSON array of 25 strings.

use crate::BoardError;
use crate::types::Board;
use tracing::{debug, instrument, warn};

/// Default file name for exported boards.
pub const BOARD_FILE_NAME: &str = "bingo-board.json";

impl Board {
    /// Encodes the board as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Encode`] if serialization fails.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, BoardError> {
        serde_json::to_string_pretty(self.cells()).map_err(|e| BoardError::Encode(e.to_string()))
    }

    /// Decodes a board from a JSON array of exactly 25 strings.
    ///
    /// # Errors
    ///
    /// - [`BoardError::Parse`] when the text is not JSON
    /// - [`BoardError::NotStringArray`] when it is not an array of strings
    /// - [`BoardError::InvalidFormat`] when the array length is not 25
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_json(text: &str) -> Result<Self, BoardError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, "Board file is not valid JSON");
            BoardError::Parse(e.to_string())
        })?;

        let entries = value.as_array().ok_or(BoardError::NotStringArray)?;
        let cells = entries
            .iter()
            .map(|entry| entry.as_str().map(str::to_string))
            .collect::<Option<Vec<String>>>()
            .ok_or(BoardError::NotStringArray)?;

        let board = Board::from_cells(cells)?;
        debug!("Board decoded");
        Ok(board)
    }
}
