//! Board files on local disk.

use std::path::Path;
use strictly_bingo::Board;
use tracing::{info, instrument, warn};

use super::GatewayError;

/// Writes the board as a JSON array of 25 strings.
///
/// # Errors
///
/// Returns [`GatewayError::Io`] if the file cannot be written.
#[instrument(skip(board, path), fields(path = %path.as_ref().display()))]
pub fn save_file(board: &Board, path: impl AsRef<Path>) -> Result<(), GatewayError> {
    let text = board.to_json()?;
    std::fs::write(path.as_ref(), text)?;
    info!("Board file written");
    Ok(())
}

/// Reads a board file.
///
/// # Errors
///
/// Returns [`GatewayError::Io`] if the file cannot be read and
/// [`GatewayError::Validation`] if it is not a 25-entry JSON array.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_file(path: impl AsRef<Path>) -> Result<Board, GatewayError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let board = Board::from_json(&text).map_err(|e| {
        warn!(error = %e, "Rejected board file");
        GatewayError::Validation(e)
    })?;
    info!("Board file loaded");
    Ok(board)
}
