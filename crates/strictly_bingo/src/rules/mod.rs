//! Game rules for bingo.
//!
//! Pure functions over boards and triggered cells. Rules are kept
//! apart from board storage so the session and the game glue can
//! compose them.

mod shuffle;
mod win;

pub use shuffle::shuffle;
pub use win::{LineKind, WINNING_COMBOS, check_win, completed_lines};
