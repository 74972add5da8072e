//! Shuffle logic that keeps the free space in place.

use crate::RandomSource;
use crate::types::{Board, CENTER};
use tracing::{debug, instrument};

/// Returns a copy of `board` with the 24 outer cells permuted.
///
/// The center cell keeps its position and text. The other cells are
/// lifted out, shuffled as one 24-element sequence and written back
/// around the center.
#[instrument(skip_all)]
pub fn shuffle<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Board {
    let mut shuffled = board.clone();
    let cells = shuffled.cells_mut();

    let mut outer: Vec<String> = cells
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != CENTER)
        .map(|(_, text)| text.clone())
        .collect();
    rng.shuffle(&mut outer);

    let slots = (0..cells.len()).filter(|&index| index != CENTER);
    for (index, text) in slots.zip(outer) {
        cells[index] = text;
    }

    debug!(center = %shuffled.center(), "Board shuffled");
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellIndex, SeededRng};

    fn numbered_board() -> Board {
        Board::from_cells((0..25).map(|i| format!("square {i}")).collect()).unwrap()
    }

    fn outer_sorted(board: &Board) -> Vec<String> {
        let mut cells: Vec<String> = CellIndex::all()
            .filter(|cell| !cell.is_center())
            .map(|cell| board.get(cell).to_string())
            .collect();
        cells.sort();
        cells
    }

    #[test]
    fn test_center_is_preserved() {
        let board = numbered_board();
        for seed in 0..50 {
            let mut rng = SeededRng::from_seed(seed);
            let shuffled = shuffle(&board, &mut rng);
            assert_eq!(shuffled.center(), board.center());
        }
    }

    #[test]
    fn test_outer_cells_are_permuted_not_changed() {
        let board = numbered_board();
        for seed in 0..50 {
            let mut rng = SeededRng::from_seed(seed);
            let shuffled = shuffle(&board, &mut rng);
            assert_eq!(outer_sorted(&shuffled), outer_sorted(&board));
        }
    }

    #[test]
    fn test_shuffle_moves_something() {
        let board = numbered_board();
        let mut rng = SeededRng::from_seed(3);
        let moved = (0..10).any(|_| shuffle(&board, &mut rng) != board);
        assert!(moved);
    }

    #[test]
    fn test_duplicate_texts_survive() {
        let mut cells = vec!["same".to_string(); 25];
        cells[CENTER] = "FREE".to_string();
        cells[0] = "odd one".to_string();
        let board = Board::from_cells(cells).unwrap();
        let mut rng = SeededRng::from_seed(9);
        let shuffled = shuffle(&board, &mut rng);
        assert_eq!(outer_sorted(&shuffled), outer_sorted(&board));
        assert_eq!(shuffled.center(), "FREE");
    }

    #[test]
    fn test_same_seed_same_result() {
        let board = numbered_board();
        let a = shuffle(&board, &mut SeededRng::from_seed(11));
        let b = shuffle(&board, &mut SeededRng::from_seed(11));
        assert_eq!(a, b);
    }
}
