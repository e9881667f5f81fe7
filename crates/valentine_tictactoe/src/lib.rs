//! Valentine tic-tac-toe engine.
//!
//! Pure game logic with no I/O: the board model, win and draw detection,
//! and the opponent's move policies. A presentation layer owns the game
//! session and calls in with a board on every turn.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use valentine_tictactoe::{Board, Marker, Outcome, Position, Strength, detect_outcome};
//!
//! let board: Board = "XX_/O__/___".parse().unwrap();
//! assert_eq!(detect_outcome(&board), Outcome::Undecided);
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let reply = Strength::Strong.select_move(&board, Marker::O, Marker::X, &mut rng);
//! assert_eq!(reply, Some(Position::TopRight));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod invariants;
mod policy;
mod position;
pub mod rules;
mod types;

pub use action::{BoardError, Matchup, Move, MoveError};
pub use policy::{BLOCK_CHANCE, CENTER_CHANCE, RANDOM_CHANCE, Strength, winning_move};
pub use position::Position;
pub use rules::{LINES, Line, Outcome, detect_outcome, empty_cells, winning_line};
pub use types::{Board, Marker, Square};
