//! Win detection logic for tic-tac-toe.

use super::super::{Board, Marker, Position};
use tracing::instrument;

/// Three board positions that win when uniformly marked.
pub type Line = [Position; 3];

/// The eight winning lines in scan order: rows, then columns, then
/// diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first complete line in scan order with the marker holding it.
///
/// Boards with more than one complete line cannot come out of alternating
/// play; for those the first line in scan order is reported.
#[instrument]
pub fn winning_line(board: &Board) -> Option<(Line, Marker)> {
    LINES.into_iter().find_map(|line @ [a, b, c]| {
        let sq = board.get(a);
        let marker = sq.marker()?;
        (sq == board.get(b) && sq == board.get(c)).then_some((line, marker))
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(marker)` if the marker has three in a row,
/// `None` otherwise.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Marker> {
    winning_line(board).map(|(_, marker)| marker)
}
