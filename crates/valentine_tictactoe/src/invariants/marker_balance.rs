//! Marker balance invariant: players alternate, so counts stay close.

use super::Invariant;
use crate::{Board, Marker};

/// Invariant: the two markers' counts differ by at most one.
pub struct MarkerBalanceInvariant;

impl Invariant<Board> for MarkerBalanceInvariant {
    fn holds(board: &Board) -> bool {
        board.count(Marker::X).abs_diff(board.count(Marker::O)) <= 1
    }

    fn description() -> &'static str {
        "Marker counts differ by at most one"
    }
}
