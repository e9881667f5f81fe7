//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating board state.
//! Nothing here stores a board; every answer is recomputed from the
//! board passed in.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, Line, check_winner, winning_line};

use super::{Board, Marker, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line is complete and empty squares remain.
    Undecided,
    /// The marker holds a complete line.
    Win(Marker),
    /// The board is full with no complete line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Marker> {
        match self {
            Outcome::Win(marker) => Some(*marker),
            Outcome::Undecided | Outcome::Draw => None,
        }
    }

    /// Returns true once the game can no longer continue.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::Undecided)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Undecided => write!(f, "Undecided"),
            Outcome::Win(marker) => write!(f, "{} wins", marker),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Classifies a board as undecided, won or drawn.
///
/// Lines are scanned rows first, then columns, then diagonals, and the
/// first complete line decides the winner.
#[instrument]
pub fn detect_outcome(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Win(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Undecided
    }
}

/// Returns the empty positions of `board` in ascending index order.
#[instrument]
pub fn empty_cells(board: &Board) -> Vec<Position> {
    Position::valid_moves(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_undecided() {
        assert_eq!(detect_outcome(&Board::new()), Outcome::Undecided);
    }

    #[test]
    fn test_win_takes_precedence_over_full_board() {
        let board: Board = "OOO/XXO/XOX".parse().unwrap();
        assert_eq!(detect_outcome(&board), Outcome::Win(Marker::O));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(detect_outcome(&board), Outcome::Draw);
    }

    #[test]
    fn test_empty_cells_ascending() {
        let board: Board = "X_O/_X_/O__".parse().unwrap();
        let cells: Vec<usize> = empty_cells(&board).into_iter().map(usize::from).collect();
        assert_eq!(cells, vec![1, 3, 5, 7, 8]);
        assert_eq!(empty_cells(&board), empty_cells(&board));
    }

    #[test]
    fn test_outcome_helpers() {
        assert_eq!(Outcome::Win(Marker::X).winner(), Some(Marker::X));
        assert_eq!(Outcome::Draw.winner(), None);
        assert!(Outcome::Draw.is_decided());
        assert!(!Outcome::Undecided.is_decided());
        assert_eq!(Outcome::Win(Marker::O).to_string(), "O wins");
    }
}
