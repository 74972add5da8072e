//! Pure bingo board logic.
//!
//! A board is a 5x5 grid of free-text squares with a fixed center
//! "free space". This crate owns everything that has real invariants:
//!
//! - **Board**: exactly 25 cells, validated on every conversion
//! - **Shuffle**: permutes the 24 outer cells, the center never moves
//! - **Play session**: which cells are marked, and whether a line completed
//! - **Win detection**: the twelve fixed rows, columns and diagonals
//!
//! Randomness flows through [`RandomSource`] so tests can seed it.
//!
//! # Example
//!
//! ```
//! use strictly_bingo::{BingoGame, CellIndex, SeededRng, TriggerOutcome};
//!
//! let mut rng = SeededRng::from_seed(7);
//! let mut game = BingoGame::new();
//! game.enter_play();
//!
//! for index in [0, 1, 2, 3] {
//!     let cell = CellIndex::from_index(index).unwrap();
//!     game.toggle(cell, &mut rng).unwrap();
//! }
//! let last = CellIndex::from_index(4).unwrap();
//! let outcome = game.toggle(last, &mut rng).unwrap();
//! assert!(matches!(outcome, TriggerOutcome::Won { .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod error;
mod game;
mod rng;
mod rules;
mod session;
mod types;

pub use codec::BOARD_FILE_NAME;
pub use error::{BoardError, GameError};
pub use game::BingoGame;
pub use rng::{RandomSource, SeededRng, SystemRng};
pub use rules::{LineKind, WINNING_COMBOS, check_win, completed_lines, shuffle};
pub use session::{PRIZES, PlaySession, TriggerOutcome, TriggeredSet, WinState};
pub use types::{Board, CELL_COUNT, CENTER, CellIndex, GRID_SIZE};
