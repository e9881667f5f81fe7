//! Presentation pacing around the opponent's reply.
//!
//! The opponent answers instantly; these delays only make it look like it
//! is thinking. While a reply is pending the session stays in its
//! awaiting state, so a human move arriving from another task is refused.

use crate::config::PacingConfig;
use crate::session::{GameStatus, Session, TurnReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument};
use valentine_tictactoe::MoveError;

/// Both halves of a paced turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacedTurn {
    /// The human's placement.
    pub human: TurnReport,
    /// The opponent's reply, absent when the human's move ended the game.
    pub reply: Option<TurnReport>,
}

impl PacedTurn {
    /// Session status after the whole turn.
    pub fn status(&self) -> GameStatus {
        self.reply.unwrap_or(self.human).status
    }
}

/// A session shared between tasks, with delays around the opponent's reply.
#[derive(Debug, Clone)]
pub struct PacedSession {
    session: Arc<Mutex<Session>>,
    pacing: PacingConfig,
}

impl PacedSession {
    /// Wraps a session.
    pub fn new(session: Session, pacing: PacingConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            pacing,
        }
    }

    /// Plays the human's move, waits, then lets the opponent reply.
    ///
    /// After an opponent win the reveal delay runs before returning. If the
    /// session is reset while the opponent is thinking, the reply is dropped
    /// and [`MoveError::GameReset`] is returned.
    #[instrument(skip(self))]
    pub async fn human_turn(&self, index: usize) -> Result<PacedTurn, MoveError> {
        let (human, game) = {
            let mut session = self.session.lock().await;
            (session.play_human(index)?, session.game())
        };
        if human.status.is_over() {
            return Ok(PacedTurn { human, reply: None });
        }

        debug!(ms = self.pacing.thinking_ms(), game, "Opponent thinking");
        tokio::time::sleep(Duration::from_millis(*self.pacing.thinking_ms())).await;
        let reply = self.session.lock().await.respond_to(game)?;

        if reply.status == GameStatus::Lost {
            tokio::time::sleep(Duration::from_millis(*self.pacing.reveal_ms())).await;
        }
        Ok(PacedTurn {
            human,
            reply: Some(reply),
        })
    }

    /// Resets the underlying session.
    pub async fn reset(&self) {
        self.session.lock().await.reset();
    }

    /// Runs `f` against the session under the lock.
    pub async fn inspect<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        f(&*self.session.lock().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tokio::time::Instant;
    use valentine_tictactoe::{Marker, Matchup, Position, Strength};

    fn paced() -> PacedSession {
        let session = Session::new(
            Strength::Strong,
            Matchup::for_human(Marker::X),
            StdRng::seed_from_u64(3),
        );
        PacedSession::new(session, PacingConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_thinking_delay() {
        let paced = paced();
        let start = Instant::now();
        let turn = paced.human_turn(0).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(start.elapsed() < Duration::from_millis(1500));
        assert_eq!(turn.reply.unwrap().applied.position, Position::Center);
        assert_eq!(turn.status(), GameStatus::Playing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_moves_refused_while_thinking() {
        let paced = paced();
        let first = tokio::spawn({
            let paced = paced.clone();
            async move { paced.human_turn(0).await }
        });
        // Let the spawned turn place its move and start sleeping.
        tokio::task::yield_now().await;
        while !paced.inspect(Session::awaiting_opponent).await {
            tokio::task::yield_now().await;
        }

        assert_eq!(paced.human_turn(1).await, Err(MoveError::AwaitingOpponent));
        assert!(first.await.unwrap().is_ok());
        assert!(paced.human_turn(1).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_delay_after_loss() {
        let paced = paced();
        paced.human_turn(8).await.unwrap();
        paced.human_turn(7).await.unwrap();
        let start = Instant::now();
        let turn = paced.human_turn(5).await.unwrap();
        assert_eq!(turn.status(), GameStatus::Lost);
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_while_thinking_drops_stale_reply() {
        let paced = paced();
        let abandoned = tokio::spawn({
            let paced = paced.clone();
            async move { paced.human_turn(0).await }
        });
        tokio::task::yield_now().await;
        while !paced.inspect(Session::awaiting_opponent).await {
            tokio::task::yield_now().await;
        }

        paced.reset().await;
        tokio::time::sleep(Duration::from_millis(400)).await;

        let start = Instant::now();
        let turn = paced.human_turn(8).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert_eq!(turn.human.applied.position, Position::BottomRight);
        assert_eq!(turn.reply.unwrap().applied.position, Position::Center);

        assert_eq!(abandoned.await.unwrap(), Err(MoveError::GameReset(0)));
        let history = paced.inspect(|s| s.history().to_vec()).await;
        assert_eq!(history, vec![turn.human.applied, turn.reply.unwrap().applied]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_board() {
        let paced = paced();
        paced.human_turn(0).await.unwrap();
        paced.reset().await;
        let empty = paced.inspect(|s| s.open_squares().len()).await;
        assert_eq!(empty, 9);
    }
}
