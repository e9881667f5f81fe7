//! Opponent move selection.
//!
//! Two strengths share one contract: given a board and the pair of
//! markers in play, pick an empty square for the opponent. Randomness is
//! drawn from the caller's generator so that seeded runs repeat exactly.

mod strong;
mod weak;

pub use weak::{BLOCK_CHANCE, CENTER_CHANCE, RANDOM_CHANCE};

use super::rules::{Outcome, detect_outcome, empty_cells};
use super::{Board, Marker, Matchup, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Opponent strength, selecting which move policy answers the human.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Strength {
    /// Wins when it can, blocks when it must, then prefers center,
    /// corners and edges in that order.
    #[default]
    Strong,
    /// Blocks only half the time and otherwise plays mostly at random.
    Weak,
}

impl Strength {
    /// Selects the square the opponent marks next.
    ///
    /// Returns `None` when the board has no empty square. The board is
    /// never modified. `opponent` and `human` must differ; use
    /// [`Matchup::new`] to validate a pair coming from outside.
    #[instrument(skip(board, rng), fields(board = %board))]
    pub fn select_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        opponent: Marker,
        human: Marker,
        rng: &mut R,
    ) -> Option<Position> {
        debug_assert_ne!(opponent, human, "markers must be distinct");
        let choice = match self {
            Strength::Strong => strong::select(board, opponent, human, rng),
            Strength::Weak => weak::select(board, human, rng),
        };
        debug!(strength = %self, choice = ?choice, "Opponent chose square");
        choice
    }

    /// Same as [`Strength::select_move`] with a validated marker pair.
    pub fn select_for<R: Rng + ?Sized>(
        &self,
        board: &Board,
        matchup: Matchup,
        rng: &mut R,
    ) -> Option<Position> {
        self.select_move(board, matchup.opponent(), matchup.human(), rng)
    }
}

/// First empty square, in ascending order, where `marker` completes a line.
pub fn winning_move(board: &Board, marker: Marker) -> Option<Position> {
    empty_cells(board)
        .into_iter()
        .find(|&pos| detect_outcome(&board.with(pos, marker)) == Outcome::Win(marker))
}

/// Uniform pick among the empty squares of `candidates`.
fn random_among<R: Rng + ?Sized>(
    board: &Board,
    candidates: &[Position],
    rng: &mut R,
) -> Option<Position> {
    let open: Vec<Position> = candidates
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    open.choose(rng).copied()
}
