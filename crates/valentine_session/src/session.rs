//! Game session: board ownership and the win/lose/draw state machine.

use crate::config::SessionConfig;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use valentine_tictactoe::{
    Board, Matchup, Move, MoveError, Outcome, Position, Strength, detect_outcome, empty_cells,
};

/// Status of a session, seen from the human's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Game is ongoing.
    #[display("playing")]
    Playing,
    /// The human completed a line.
    #[display("won")]
    Won,
    /// The opponent completed a line.
    #[display("lost")]
    Lost,
    /// The board filled up with no line.
    #[display("drawn")]
    Drawn,
}

impl GameStatus {
    /// Returns true for the three terminal states.
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

/// What a single placement did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The move that was applied.
    pub applied: Move,
    /// Session status after the move.
    pub status: GameStatus,
}

/// One game between a human and the engine.
///
/// The human always moves first after a reset. Once the human has moved,
/// the session waits for [`Session::respond`] and refuses further human
/// moves until the opponent has answered.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    status: GameStatus,
    matchup: Matchup,
    strength: Strength,
    awaiting_opponent: bool,
    history: Vec<Move>,
    game: u64,
    rng: StdRng,
}

impl Session {
    /// Creates a new session with an empty board.
    #[instrument(skip(rng))]
    pub fn new(strength: Strength, matchup: Matchup, rng: StdRng) -> Self {
        info!(%strength, human = %matchup.human(), "Creating new game session");
        Self {
            board: Board::new(),
            status: GameStatus::Playing,
            matchup,
            strength,
            awaiting_opponent: false,
            history: Vec::new(),
            game: 0,
            rng,
        }
    }

    /// Creates a session from configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(*config.strength(), config.matchup(), config.rng())
    }

    /// Places the human's marker at `index` (0-8).
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn play_human(&mut self, index: usize) -> Result<TurnReport, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.awaiting_opponent {
            warn!("Human move refused while the opponent is thinking");
            return Err(MoveError::AwaitingOpponent);
        }
        let position = Position::try_from(index)?;
        let applied = self.place(Move::new(self.matchup.human(), position))?;

        self.status = match detect_outcome(&self.board) {
            Outcome::Win(marker) if marker == self.matchup.human() => GameStatus::Won,
            Outcome::Draw => GameStatus::Drawn,
            _ => {
                self.awaiting_opponent = true;
                GameStatus::Playing
            }
        };
        self.log_status();
        Ok(TurnReport {
            applied,
            status: self.status,
        })
    }

    /// Lets the opponent answer the pending human move.
    #[instrument(skip(self), fields(status = %self.status))]
    pub fn respond(&mut self) -> Result<TurnReport, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.awaiting_opponent {
            return Err(MoveError::NotAwaiting);
        }
        let position = self
            .strength
            .select_for(&self.board, self.matchup, &mut self.rng)
            .ok_or(MoveError::GameOver)?;
        let applied = self.place(Move::new(self.matchup.opponent(), position))?;
        self.awaiting_opponent = false;

        self.status = match detect_outcome(&self.board) {
            Outcome::Win(marker) if marker == self.matchup.opponent() => GameStatus::Lost,
            Outcome::Draw => GameStatus::Drawn,
            _ => GameStatus::Playing,
        };
        self.log_status();
        Ok(TurnReport {
            applied,
            status: self.status,
        })
    }

    /// Like [`Session::respond`], but only for the game numbered `game`.
    ///
    /// A reply computed for a game that has since been reset is refused,
    /// so it can never land on the next game's board.
    #[instrument(skip(self), fields(current = self.game))]
    pub fn respond_to(&mut self, game: u64) -> Result<TurnReport, MoveError> {
        if game != self.game {
            warn!("Dropping reply for a reset game");
            return Err(MoveError::GameReset(game));
        }
        self.respond()
    }

    /// Clears the board and returns to `Playing`, whatever the prior state.
    ///
    /// Starts a new game number.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(previous = %self.status, moves = self.history.len(), "Resetting session");
        self.game += 1;
        self.board = Board::new();
        self.status = GameStatus::Playing;
        self.awaiting_opponent = false;
        self.history.clear();
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of the current game, bumped by every reset.
    pub fn game(&self) -> u64 {
        self.game
    }

    /// Returns the session status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Recomputes the board outcome.
    pub fn outcome(&self) -> Outcome {
        detect_outcome(&self.board)
    }

    /// Returns true while the opponent owes a reply.
    pub fn awaiting_opponent(&self) -> bool {
        self.awaiting_opponent
    }

    /// Returns the most recent move.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Returns the moves played since the last reset.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the marker pair in play.
    pub fn matchup(&self) -> Matchup {
        self.matchup
    }

    /// Returns the opponent strength.
    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Returns the empty squares in ascending order.
    pub fn open_squares(&self) -> Vec<Position> {
        empty_cells(&self.board)
    }

    fn place(&mut self, action: Move) -> Result<Move, MoveError> {
        let before = self.board;
        self.board.place(action.position, action.marker)?;
        self.history.push(action);
        debug!(%action, "Move applied");

        if cfg!(debug_assertions) {
            self.check_invariants(before);
        }

        Ok(action)
    }

    fn check_invariants(&self, before: Board) {
        use valentine_tictactoe::invariants::{
            BoardInvariants, BoardTransition, Invariant, InvariantSet, MonotonicBoardInvariant,
        };

        let transition = BoardTransition {
            before,
            after: self.board,
        };
        if !MonotonicBoardInvariant::holds(&transition) {
            warn!(
                invariant = <MonotonicBoardInvariant as Invariant<BoardTransition>>::description(),
                "Invariant violated"
            );
        }
        if let Err(violations) = BoardInvariants::check_all(&self.board) {
            for v in &violations {
                warn!(invariant = %v, "Invariant violated");
            }
        }
    }

    fn log_status(&self) {
        if self.status.is_over() {
            info!(status = %self.status, board = %self.board, "Game over");
        }
    }
}
