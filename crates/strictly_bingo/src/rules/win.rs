//! Win detection logic for bingo.

use crate::session::TriggeredSet;
use crate::types::{CellIndex, GRID_SIZE};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The twelve winning lines, each as five cell indices.
pub const WINNING_COMBOS: [[usize; GRID_SIZE]; 12] = [
    // Rows
    [0, 1, 2, 3, 4],
    [5, 6, 7, 8, 9],
    [10, 11, 12, 13, 14],
    [15, 16, 17, 18, 19],
    [20, 21, 22, 23, 24],
    // Columns
    [0, 5, 10, 15, 20],
    [1, 6, 11, 16, 21],
    [2, 7, 12, 17, 22],
    [3, 8, 13, 18, 23],
    [4, 9, 14, 19, 24],
    // Diagonals
    [0, 6, 12, 18, 24],
    [4, 8, 12, 16, 20],
];

/// Which kind of line a winning combination is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// A horizontal line (0-4 from the top).
    Row(usize),
    /// A vertical line (0-4 from the left).
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineKind::Row(row) => write!(f, "row {}", row + 1),
            LineKind::Column(col) => write!(f, "column {}", col + 1),
            LineKind::Diagonal => write!(f, "diagonal"),
            LineKind::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

impl LineKind {
    /// Maps a position in [`WINNING_COMBOS`] to its line kind.
    fn from_combo(position: usize) -> Self {
        match position {
            0..=4 => Self::Row(position),
            5..=9 => Self::Column(position - GRID_SIZE),
            10 => Self::Diagonal,
            _ => Self::AntiDiagonal,
        }
    }

    /// The five cells of this line.
    pub fn cells(self) -> [usize; GRID_SIZE] {
        let position = match self {
            Self::Row(row) => row,
            Self::Column(col) => GRID_SIZE + col,
            Self::Diagonal => 10,
            Self::AntiDiagonal => 11,
        };
        WINNING_COMBOS[position]
    }
}

fn is_complete(combo: &[usize; GRID_SIZE], triggered: &TriggeredSet) -> bool {
    combo.iter().all(|&index| {
        CellIndex::from_index(index).is_some_and(|cell| triggered.contains(&cell))
    })
}

/// Returns true if any winning line is fully triggered.
#[instrument(skip(triggered), fields(count = triggered.len()))]
pub fn check_win(triggered: &TriggeredSet) -> bool {
    WINNING_COMBOS
        .iter()
        .any(|combo| is_complete(combo, triggered))
}

/// Lists every winning line that is fully triggered.
#[instrument(skip(triggered), fields(count = triggered.len()))]
pub fn completed_lines(triggered: &TriggeredSet) -> Vec<LineKind> {
    WINNING_COMBOS
        .iter()
        .enumerate()
        .filter(|(_, combo)| is_complete(combo, triggered))
        .map(|(position, _)| LineKind::from_combo(position))
        .collect()
}
