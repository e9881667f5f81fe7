//! Weak opponent: the strong priority list behind probability gates.
//!
//! It never looks for its own wins.

use super::{random_among, winning_move};
use crate::rules::empty_cells;
use crate::{Board, Marker, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

/// Chance of looking for a block against the human's immediate win.
pub const BLOCK_CHANCE: f64 = 0.5;

/// Chance of taking the free center once blocking was skipped.
pub const CENTER_CHANCE: f64 = 0.3;

/// Chance of a uniformly random move once the center was passed over.
pub const RANDOM_CHANCE: f64 = 0.7;

pub(super) fn select<R: Rng + ?Sized>(
    board: &Board,
    human: Marker,
    rng: &mut R,
) -> Option<Position> {
    let empty = empty_cells(board);
    if empty.is_empty() {
        return None;
    }

    if rng.gen_bool(BLOCK_CHANCE)
        && let Some(pos) = winning_move(board, human)
    {
        trace!(%pos, "Blocking");
        return Some(pos);
    }

    // The center roll only happens while the center is free.
    if board.is_empty(Position::Center) && rng.gen_bool(CENTER_CHANCE) {
        return Some(Position::Center);
    }

    if rng.gen_bool(RANDOM_CHANCE) {
        return empty.choose(rng).copied();
    }

    random_among(board, &Position::CORNERS, rng).or_else(|| empty.choose(rng).copied())
}
