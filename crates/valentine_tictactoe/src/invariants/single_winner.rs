//! Single winner invariant: two markers never both hold a line.

use super::Invariant;
use crate::rules::LINES;
use crate::{Board, Square};

/// Invariant: at most one marker owns a complete line.
///
/// Detection reports the first complete line in scan order, so a board
/// breaking this invariant has no well-defined winner.
pub struct SingleWinnerInvariant;

impl Invariant<Board> for SingleWinnerInvariant {
    fn holds(board: &Board) -> bool {
        let mut winners = LINES.iter().filter_map(|&[a, b, c]| {
            let sq = board.get(a);
            (sq != Square::Empty && sq == board.get(b) && sq == board.get(c)).then_some(sq)
        });
        match winners.next() {
            Some(first) => winners.all(|sq| sq == first),
            None => true,
        }
    }

    fn description() -> &'static str {
        "At most one marker holds a complete line"
    }
}
