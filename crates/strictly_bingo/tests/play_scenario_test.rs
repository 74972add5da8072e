//! End-to-end play scenarios on a single board.

use strictly_bingo::{
    Board, BingoGame, CellIndex, GameError, LineKind, SeededRng, TriggerOutcome, check_win,
};

fn cell(index: usize) -> CellIndex {
    CellIndex::from_index(index).unwrap()
}

#[test]
fn test_top_row_wins_exactly_on_fifth_mark() {
    let mut rng = SeededRng::from_seed(2024);
    let mut game = BingoGame::new();
    game.enter_play();

    for index in 0..4 {
        let outcome = game.toggle(cell(index), &mut rng).unwrap();
        assert_eq!(outcome, TriggerOutcome::Marked);
        assert!(!game.has_won(), "won too early at cell {index}");
    }

    match game.toggle(cell(4), &mut rng).unwrap() {
        TriggerOutcome::Won { lines, prize } => {
            assert_eq!(lines, vec![LineKind::Row(0)]);
            assert!(!prize.is_empty());
        }
        other => panic!("expected a win, got {other:?}"),
    }
    assert!(game.has_won());
}

#[test]
fn test_center_counts_toward_diagonal() {
    let mut rng = SeededRng::from_seed(1);
    let mut game = BingoGame::new();
    game.enter_play();

    for index in [0, 6, 18, 24] {
        game.toggle(cell(index), &mut rng).unwrap();
    }
    assert!(!game.has_won());

    let outcome = game.toggle(CellIndex::CENTER, &mut rng).unwrap();
    assert!(matches!(outcome, TriggerOutcome::Won { .. }));
}

#[test]
fn test_shuffle_mid_game_needs_confirmation_then_resets() {
    let mut rng = SeededRng::from_seed(77);
    let mut game = BingoGame::new();
    game.enter_play();
    game.toggle(cell(10), &mut rng).unwrap();

    assert_eq!(
        game.shuffle(&mut rng, false),
        Err(GameError::ConfirmationRequired)
    );
    game.shuffle(&mut rng, true).unwrap();

    assert!(game.is_playing());
    assert!(!check_win(game.session().unwrap().triggered()));
    assert!(game.session().unwrap().triggered().is_empty());
    assert_eq!(game.board().center(), Board::new().center());
}

#[test]
fn test_edit_then_export_reimport() {
    let mut game = BingoGame::new();
    let mut current = cell(0);
    for text in ["Uncle's hot take", "Burnt rolls", "Dog steals ham"] {
        game.edit_cell(current, text);
        current = current.next();
    }
    let text = game.board().to_json().unwrap();

    let mut other = BingoGame::new();
    other.load_json(&text).unwrap();
    assert_eq!(other.board().get(cell(2)), "Dog steals ham");
    assert_eq!(other.board(), game.board());
}
