//! Gateway error type.

use strictly_bingo::BoardError;

use crate::{BoardId, StoreError};

/// Error that can occur when saving or loading a board.
///
/// Every variant is terminal for the action that raised it; the
/// local board is never modified by a failed save or load.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GatewayError {
    /// The file or payload is not a valid board.
    #[display("{}", _0)]
    Validation(BoardError),

    /// No live board is stored under this id.
    #[display("Board {} not found (it may have expired)", _0)]
    NotFound(BoardId),

    /// The remote side failed.
    #[display("Remote request failed: {}", _0)]
    Remote(String),

    /// Reading or writing a local file failed.
    #[display("File error: {}", _0)]
    Io(String),
}

impl std::error::Error for GatewayError {}

impl From<BoardError> for GatewayError {
    fn from(err: BoardError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        Self::Remote(err.message)
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(err.to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
