//! Core domain types for bingo boards.

use crate::BoardError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Width and height of the grid.
pub const GRID_SIZE: usize = 5;

/// Number of cells on a board.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Index of the free space.
pub const CENTER: usize = 12;

const DEFAULT_SQUARES: [&str; CELL_COUNT] = [
    "So... getting married soon?",
    "Political argument at dinner",
    "Unsolicited parenting advice",
    "The bathtub story again",
    "'You've lost/gained weight!'",
    "Drama over who hosts next year",
    "Passive aggressive compliment",
    "Food critic strikes",
    "'Back in my day...'",
    "Phone at dinner",
    "Awkward relationship question",
    "Diet talk",
    "FREE SPACE",
    "Someone's late (again)",
    "Outdated career advice",
    "Kids running wild",
    "Someone falls asleep on couch",
    "'When are you having kids?'",
    "Old family drama resurfaces",
    "Backhanded compliment",
    "Someone takes too many photos",
    "Surprise dietary restriction",
    "'You should visit more often'",
    "Weather small talk",
    "Someone mentions the will",
];

/// A cell on the board (0-24, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct CellIndex(u8);

impl CellIndex {
    /// The free space in the middle of the grid.
    pub const CENTER: CellIndex = CellIndex(CENTER as u8);

    /// Converts a raw index, returning `None` when it is off the board.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then_some(Self(index as u8))
    }

    /// Returns the raw index.
    pub fn to_index(self) -> usize {
        self.0 as usize
    }

    /// Row of this cell (0-4).
    pub fn row(self) -> usize {
        self.to_index() / GRID_SIZE
    }

    /// Column of this cell (0-4).
    pub fn col(self) -> usize {
        self.to_index() % GRID_SIZE
    }

    /// Returns true for the free space.
    pub fn is_center(self) -> bool {
        self == Self::CENTER
    }

    /// The cell after this one, wrapping from 24 back to 0.
    ///
    /// Editing moves through the board in this order.
    pub fn next(self) -> Self {
        Self(((self.to_index() + 1) % CELL_COUNT) as u8)
    }

    /// All cells in row-major order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT as u8).map(CellIndex)
    }
}

impl TryFrom<usize> for CellIndex {
    type Error = BoardError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(BoardError::CellOutOfBounds(index))
    }
}

impl From<CellIndex> for usize {
    fn from(cell: CellIndex) -> Self {
        cell.to_index()
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 5x5 bingo board.
///
/// Serializes as a bare JSON array of 25 strings. Deserializing any other
/// length fails, so a `Board` value always has exactly 25 cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    /// Cell text in row-major order (0-24).
    cells: [String; CELL_COUNT],
}

impl Board {
    /// Creates a board with the stock family-gathering squares.
    pub fn new() -> Self {
        Self {
            cells: DEFAULT_SQUARES.map(String::from),
        }
    }

    /// Builds a board from a sequence of cell texts.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidFormat`] unless exactly 25 cells are given.
    #[instrument(skip(cells), fields(count = cells.len()))]
    pub fn from_cells(cells: Vec<String>) -> Result<Self, BoardError> {
        let found = cells.len();
        let cells: [String; CELL_COUNT] = cells
            .try_into()
            .map_err(|_| BoardError::InvalidFormat { found })?;
        Ok(Self { cells })
    }

    /// Gets the text of a cell.
    pub fn get(&self, cell: CellIndex) -> &str {
        &self.cells[cell.to_index()]
    }

    /// Replaces the text of a cell.
    pub fn set(&mut self, cell: CellIndex, text: impl Into<String>) {
        self.cells[cell.to_index()] = text.into();
    }

    /// Text of the free space.
    pub fn center(&self) -> &str {
        self.get(CellIndex::CENTER)
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[String; CELL_COUNT] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [String; CELL_COUNT] {
        &mut self.cells
    }

    /// Formats the board as a plain-text grid, truncating long squares.
    pub fn display(&self) -> String {
        const WIDTH: usize = 16;
        let rule = vec!["-".repeat(WIDTH); GRID_SIZE].join("+");
        let mut rows = Vec::with_capacity(GRID_SIZE);
        for row in self.cells.chunks(GRID_SIZE) {
            let line = row
                .iter()
                .map(|text| {
                    let clipped: String = text.chars().take(WIDTH).collect();
                    format!("{:<WIDTH$}", clipped)
                })
                .collect::<Vec<_>>()
                .join("|");
            rows.push(line);
        }
        rows.join(format!("\n{}\n", rule).as_str())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = BoardError;

    fn try_from(cells: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_cells(cells)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board.cells.into()
    }
}
