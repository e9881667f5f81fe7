//! Core domain types for tic-tac-toe.

use super::action::{BoardError, MoveError};
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// One of the two symbols a player occupies cells with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Marker {
    /// Marker X.
    X,
    /// Marker O.
    O,
}

impl Marker {
    /// Returns the other marker.
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a marker.
    Occupied(Marker),
}

impl Square {
    /// Returns the marker in this square, if any.
    pub fn marker(self) -> Option<Marker> {
        match self {
            Square::Empty => None,
            Square::Occupied(marker) => Some(marker),
        }
    }

    fn symbol(self) -> char {
        match self {
            Square::Empty => '_',
            Square::Occupied(Marker::X) => 'X',
            Square::Occupied(Marker::O) => 'O',
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Squares are stored in row-major order, index 0 at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from a slice of squares.
    ///
    /// This is the validation step for boards arriving from outside the
    /// engine; the slice must hold exactly nine squares.
    #[instrument(skip(cells), fields(len = cells.len()))]
    pub fn from_cells(cells: &[Square]) -> Result<Self, BoardError> {
        let squares: [Square; 9] = cells
            .try_into()
            .map_err(|_| BoardError::WrongLength(cells.len()))?;
        Ok(Self { squares })
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Places a marker on an empty square.
    ///
    /// Occupied squares are never overwritten.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: Position, marker: Marker) -> Result<(), MoveError> {
        if !self.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        self.squares[pos.to_index()] = Square::Occupied(marker);
        Ok(())
    }

    /// Returns a copy of this board with `marker` written at `pos`.
    ///
    /// Used for one-ply lookahead; the receiver is left untouched. `pos`
    /// must be empty.
    pub fn with(&self, pos: Position, marker: Marker) -> Self {
        debug_assert!(self.is_empty(pos), "{} is already occupied", pos);
        let mut next = *self;
        next.squares[pos.to_index()] = Square::Occupied(marker);
        next
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns true when no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Counts the squares occupied by `marker`.
    pub fn count(&self, marker: Marker) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(marker))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.squares.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
                writeln!(f, "-+-+-")?;
            }
            let line = cells
                .iter()
                .map(|s| s.symbol().to_string())
                .collect::<Vec<_>>()
                .join("|");
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses nine cells: `X`, `O`, and `_`, `.` or `-` for empty.
    ///
    /// Row separators (`|`, `/`, `,`) and whitespace are ignored, so
    /// `"OO_/XX_/___"` and `"O O _ X X _ _ _ _"` are equivalent. Divider
    /// lines such as `-+-+-` are skipped, so displayed boards parse back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .lines()
            .filter(|line| !is_divider(line))
            .flat_map(str::chars)
            .filter(|c| !c.is_whitespace() && !matches!(c, '|' | '/' | ','))
            .map(|c| match c {
                'x' | 'X' => Ok(Square::Occupied(Marker::X)),
                'o' | 'O' => Ok(Square::Occupied(Marker::O)),
                '_' | '.' | '-' => Ok(Square::Empty),
                other => Err(BoardError::UnknownSymbol(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(&cells)
    }
}

fn is_divider(line: &str) -> bool {
    let line = line.trim();
    line.contains('+') && line.chars().all(|c| matches!(c, '-' | '+'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(Position::ALL.iter().all(|p| board.is_empty(*p)));
        assert!(!board.is_full());
    }

    #[test]
    fn test_place_rejects_occupied_square() {
        let mut board = Board::new();
        board.place(Position::Center, Marker::X).unwrap();
        let err = board.place(Position::Center, Marker::O).unwrap_err();
        assert_eq!(err, MoveError::SquareOccupied(Position::Center));
        assert_eq!(board.get(Position::Center), Square::Occupied(Marker::X));
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with(Position::TopLeft, Marker::O);
        assert!(board.is_empty(Position::TopLeft));
        assert_eq!(next.get(Position::TopLeft), Square::Occupied(Marker::O));
        assert_eq!(next.get(Position::TopLeft).marker(), Some(Marker::O));
        assert_eq!(next.get(Position::Center).marker(), None);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already occupied")]
    fn test_with_refuses_occupied_square() {
        let board = Board::new().with(Position::Center, Marker::X);
        let _ = board.with(Position::Center, Marker::O);
    }

    #[test]
    fn test_parse_board() {
        let board: Board = "OO_/XX_/___".parse().unwrap();
        assert_eq!(board.get(Position::TopLeft), Square::Occupied(Marker::O));
        assert_eq!(board.get(Position::MiddleLeft), Square::Occupied(Marker::X));
        assert!(board.is_empty(Position::TopRight));
        assert_eq!(board.count(Marker::O), 2);
        assert_eq!(board.count(Marker::X), 2);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!("XO_".parse::<Board>(), Err(BoardError::WrongLength(3)));
        assert_eq!(
            "__________".parse::<Board>(),
            Err(BoardError::WrongLength(10))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        assert_eq!(
            "XO_Z_____".parse::<Board>(),
            Err(BoardError::UnknownSymbol('Z'))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let board: Board = "XO_/_X_/O__".parse().unwrap();
        let shown = board.to_string();
        assert_eq!(shown, "X|O|_\n-+-+-\n_|X|_\n-+-+-\nO|_|_");
        assert_eq!(shown.parse::<Board>(), Ok(board));
        assert_eq!("-X-/---/O--".parse::<Board>().map(|b| b.count(Marker::X)), Ok(1));
    }

    #[test]
    fn test_marker_parse_and_opponent() {
        assert_eq!("o".parse::<Marker>(), Ok(Marker::O));
        assert_eq!(Marker::X.opponent(), Marker::O);
        assert_eq!(Marker::O.opponent(), Marker::X);
    }
}
