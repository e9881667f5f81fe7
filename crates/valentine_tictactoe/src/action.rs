//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They carry the marker and
//! the square it lands on, and can be validated before they are applied.

use super::{Marker, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move in tic-tac-toe: a marker placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The marker being placed.
    pub marker: Marker,
    /// The position where the marker lands.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(marker: Marker, position: Position) -> Self {
        Self { marker, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.marker, self.position.label())
    }
}

/// The validated pair of markers in a game: who the engine plays and who
/// the human plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matchup {
    opponent: Marker,
    human: Marker,
}

impl Matchup {
    /// Pairs two markers, rejecting a pair that uses the same marker twice.
    #[instrument]
    pub fn new(opponent: Marker, human: Marker) -> Result<Self, BoardError> {
        if opponent == human {
            return Err(BoardError::SameMarkers(opponent));
        }
        Ok(Self { opponent, human })
    }

    /// Builds the matchup in which the human plays `human` and the engine
    /// plays the other marker.
    pub fn for_human(human: Marker) -> Self {
        Self {
            opponent: human.opponent(),
            human,
        }
    }

    /// Marker played by the engine.
    pub fn opponent(&self) -> Marker {
        self.opponent
    }

    /// Marker played by the human.
    pub fn human(&self) -> Marker {
        self.human
    }
}

/// Error raised when a board or marker pair fails boundary validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The board did not have exactly nine cells.
    #[display("Board must have 9 cells, got {}", _0)]
    WrongLength(#[error(not(source))] usize),

    /// A cell symbol could not be read.
    #[display("Unknown cell symbol {:?}", _0)]
    UnknownSymbol(#[error(not(source))] char),

    /// Both players were given the same marker.
    #[display("Opponent and human both use marker {}", _0)]
    SameMarkers(#[error(not(source))] Marker),
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The index does not name a square on the board.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The opponent has not answered the previous move yet.
    #[display("Waiting for the opponent to move")]
    AwaitingOpponent,

    /// The opponent was asked to move when no human move is pending.
    #[display("No human move is waiting for a response")]
    NotAwaiting,

    /// The game the reply was meant for has since been reset.
    #[display("Game {} was reset before the opponent replied", _0)]
    GameReset(u64),
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchup_rejects_same_marker() {
        assert_eq!(
            Matchup::new(Marker::O, Marker::O),
            Err(BoardError::SameMarkers(Marker::O))
        );
    }

    #[test]
    fn test_matchup_for_human() {
        let matchup = Matchup::for_human(Marker::X);
        assert_eq!(matchup.human(), Marker::X);
        assert_eq!(matchup.opponent(), Marker::O);
        assert_eq!(Matchup::new(Marker::O, Marker::X), Ok(matchup));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MoveError::SquareOccupied(Position::Center).to_string(),
            "Square Center is already occupied"
        );
        assert_eq!(
            BoardError::WrongLength(4).to_string(),
            "Board must have 9 cells, got 4"
        );
        assert_eq!(
            MoveError::GameReset(2).to_string(),
            "Game 2 was reset before the opponent replied"
        );
    }

    #[test]
    fn test_move_display() {
        let mov = Move::new(Marker::O, Position::BottomLeft);
        assert_eq!(mov.to_string(), "O -> Bottom-left");
    }
}
