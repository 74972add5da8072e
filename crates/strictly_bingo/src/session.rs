//! Play session tracking: triggered cells and the win state.

use crate::RandomSource;
use crate::rules::{LineKind, check_win, completed_lines};
use crate::types::CellIndex;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Prizes handed out to the first player to complete a line.
pub const PRIZES: [&str; 6] = [
    "Choose the seating arrangement at the next gathering",
    "Exemption from dish duty",
    "First dibs on leftovers",
    "One \"family emergency\" escape card for next gathering",
    "Pick the restaurant for the next cousin meetup",
    "Custody of grandma's secret recipe",
];

/// Cells marked during the current play session.
pub type TriggeredSet = BTreeSet<CellIndex>;

/// Whether the session has been won, and what was won.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WinState {
    /// Set once, at the first completed line.
    has_won: bool,
    /// Prize drawn at the moment of the first win.
    prize: Option<String>,
}

/// What happened when a cell was toggled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerOutcome {
    /// The cell is now marked and no new win occurred.
    Marked,
    /// The cell is no longer marked.
    Unmarked,
    /// This mark completed the session's first line.
    Won {
        /// Prize drawn for the win.
        prize: String,
        /// Lines complete at the moment of the win.
        lines: Vec<LineKind>,
    },
}

/// Marks and win state for one play session.
///
/// The win is latched: once `has_won` is set it only clears through
/// [`PlaySession::reset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaySession {
    triggered: TriggeredSet,
    win: WinState,
}

impl PlaySession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells marked so far.
    pub fn triggered(&self) -> &TriggeredSet {
        &self.triggered
    }

    /// Current win state.
    pub fn win_state(&self) -> &WinState {
        &self.win
    }

    /// Shorthand for `win_state().has_won()`.
    pub fn has_won(&self) -> bool {
        self.win.has_won
    }

    /// True once anything has happened that a shuffle would throw away.
    pub fn is_active(&self) -> bool {
        !self.triggered.is_empty() || self.win.has_won
    }

    /// Marks a cell and checks for a win.
    ///
    /// Marking an already marked cell is a no-op that reports [`TriggerOutcome::Marked`].
    #[instrument(skip(self, rng), fields(cell = %cell))]
    pub fn trigger<R: RandomSource + ?Sized>(
        &mut self,
        cell: CellIndex,
        rng: &mut R,
    ) -> TriggerOutcome {
        self.triggered.insert(cell);
        debug!(count = self.triggered.len(), "Cell triggered");

        if self.win.has_won || !check_win(&self.triggered) {
            return TriggerOutcome::Marked;
        }

        let prize = PRIZES[rng.pick(PRIZES.len())].to_string();
        let lines = completed_lines(&self.triggered);
        info!(prize = %prize, lines = ?lines, "Bingo!");
        self.win = WinState {
            has_won: true,
            prize: Some(prize.clone()),
        };
        TriggerOutcome::Won { prize, lines }
    }

    /// Unmarks a cell. Returns false if it was not marked.
    ///
    /// An existing win is kept.
    #[instrument(skip(self), fields(cell = %cell))]
    pub fn untrigger(&mut self, cell: CellIndex) -> bool {
        let removed = self.triggered.remove(&cell);
        debug!(removed, count = self.triggered.len(), "Cell untriggered");
        removed
    }

    /// Flips a cell between marked and unmarked.
    #[instrument(skip(self, rng), fields(cell = %cell))]
    pub fn toggle<R: RandomSource + ?Sized>(
        &mut self,
        cell: CellIndex,
        rng: &mut R,
    ) -> TriggerOutcome {
        if self.untrigger(cell) {
            TriggerOutcome::Unmarked
        } else {
            self.trigger(cell, rng)
        }
    }

    /// Clears every mark and the win state.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(count = self.triggered.len(), had_won = self.win.has_won, "Resetting play session");
        self.triggered.clear();
        self.win = WinState::default();
    }
}
