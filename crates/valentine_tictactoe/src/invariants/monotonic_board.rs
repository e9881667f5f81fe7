//! Monotonic board invariant: squares never change once set.

use super::Invariant;
use crate::{Board, Square};

/// A board before and after one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardTransition {
    /// Board before the turn.
    pub before: Board,
    /// Board after the turn.
    pub after: Board,
}

/// Invariant: exactly one empty square became occupied and no other
/// square changed.
pub struct MonotonicBoardInvariant;

impl Invariant<BoardTransition> for MonotonicBoardInvariant {
    fn holds(transition: &BoardTransition) -> bool {
        let mut placed = 0;
        for (old, new) in transition
            .before
            .squares()
            .iter()
            .zip(transition.after.squares())
        {
            match (old, new) {
                (a, b) if a == b => {}
                (Square::Empty, Square::Occupied(_)) => placed += 1,
                _ => return false,
            }
        }
        placed == 1
    }

    fn description() -> &'static str {
        "Board squares are monotonic (one placement per turn, never overwritten)"
    }
}
