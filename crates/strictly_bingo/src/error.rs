//! Error types for board validation and game actions.

use crate::types::CELL_COUNT;

/// Error raised when a board cannot be built or addressed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The payload is an array of the wrong length.
    #[display("invalid board format: expected {} squares, found {}", CELL_COUNT, found)]
    InvalidFormat {
        /// Number of entries actually present.
        found: usize,
    },

    /// The payload is not an array of strings.
    #[display("invalid board format: expected a JSON array of {} strings", CELL_COUNT)]
    NotStringArray,

    /// The payload is not valid JSON.
    #[display("board is not valid JSON: {}", _0)]
    Parse(String),

    /// The board could not be encoded.
    #[display("failed to encode board: {}", _0)]
    Encode(String),

    /// A cell index outside 0-24.
    #[display("cell index {} is out of bounds (must be 0-24)", _0)]
    CellOutOfBounds(usize),
}

impl std::error::Error for BoardError {}

/// Error raised when a game action is refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Shuffling would discard an active play session.
    #[display("shuffling discards the current play session; confirm to continue")]
    ConfirmationRequired,

    /// A play action was attempted outside play mode.
    #[display("play mode is not active")]
    NotPlaying,

    /// The board itself was rejected.
    #[display("{}", _0)]
    Board(BoardError),
}

impl std::error::Error for GameError {}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        Self::Board(err)
    }
}
