//! Valentine tic-tac-toe session layer.
//!
//! Wraps the pure engine in `valentine_tictactoe` with what a front end
//! needs around it.
//!
//! # Architecture
//!
//! - **Session**: owns the board and the playing/won/lost/drawn state machine
//! - **Pacing**: thinking and reveal delays around the opponent's reply
//! - **Config**: TOML configuration with defaults
//! - **Simulate**: batch games against a random human, one-shot suggestions
//!
//! # Example
//!
//! ```
//! use valentine_session::{GameStatus, Session, SessionConfig};
//!
//! let config = SessionConfig::default().with_seed(7);
//! let mut session = Session::from_config(&config);
//! session.play_human(0)?;
//! let reply = session.respond()?;
//! assert_eq!(reply.status, GameStatus::Playing);
//! # Ok::<(), valentine_tictactoe::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod pacing;
mod session;
mod simulate;

pub use config::{ConfigError, PacingConfig, SessionConfig};
pub use pacing::{PacedSession, PacedTurn};
pub use session::{GameStatus, Session, TurnReport};
pub use simulate::{SimulationReport, Suggestion, simulate, simulate_paced, suggest};
