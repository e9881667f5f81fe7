//! Batch play against a uniformly random human.

use crate::config::SessionConfig;
use crate::pacing::PacedSession;
use crate::session::{GameStatus, Session};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use valentine_tictactoe::{Board, MoveError, Outcome, Strength, detect_outcome};

/// Tally of a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Opponent strength used.
    pub strength: Strength,
    /// Games played.
    pub games: usize,
    /// Games the random human won.
    pub human_wins: usize,
    /// Games the opponent won.
    pub opponent_wins: usize,
    /// Drawn games.
    pub draws: usize,
    /// Total moves by both sides.
    pub moves: usize,
}

impl SimulationReport {
    fn record(&mut self, status: GameStatus, moves: usize) {
        self.games += 1;
        self.moves += moves;
        match status {
            GameStatus::Won => self.human_wins += 1,
            GameStatus::Lost => self.opponent_wins += 1,
            GameStatus::Drawn => self.draws += 1,
            GameStatus::Playing => {}
        }
    }

    /// Fraction of games the opponent won.
    pub fn opponent_win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.opponent_wins as f64 / self.games as f64
        }
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "strength     {}", self.strength)?;
        writeln!(f, "games        {}", self.games)?;
        writeln!(f, "human wins   {}", self.human_wins)?;
        writeln!(
            f,
            "opponent     {} ({:.1}%)",
            self.opponent_wins,
            100.0 * self.opponent_win_rate()
        )?;
        writeln!(f, "draws        {}", self.draws)?;
        write!(f, "moves        {}", self.moves)
    }
}

/// Plays `games` sessions where the human picks a uniformly random empty
/// square and moves first.
///
/// The opponent's generator is split off `rng`, so one seed fixes the
/// whole batch.
#[instrument(skip(config, rng), fields(strength = %config.strength()))]
pub fn simulate<R: Rng + ?Sized>(
    config: &SessionConfig,
    games: usize,
    rng: &mut R,
) -> Result<SimulationReport, MoveError> {
    let mut session = Session::new(
        *config.strength(),
        config.matchup(),
        StdRng::seed_from_u64(rng.next_u64()),
    );
    let mut report = SimulationReport {
        strength: *config.strength(),
        ..Default::default()
    };

    for game in 0..games {
        session.reset();
        while !session.status().is_over() {
            let open = session.open_squares();
            let Some(pick) = open.choose(rng) else {
                break;
            };
            let human = session.play_human(pick.to_index())?;
            if !human.status.is_over() {
                session.respond()?;
            }
        }
        debug!(game, status = %session.status(), "Game finished");
        report.record(session.status(), session.history().len());
    }

    info!(
        games = report.games,
        human_wins = report.human_wins,
        opponent_wins = report.opponent_wins,
        draws = report.draws,
        "Simulation complete"
    );
    Ok(report)
}

/// Same as [`simulate`], but every turn goes through the pacing delays.
#[instrument(skip(config, rng), fields(strength = %config.strength()))]
pub async fn simulate_paced(
    config: &SessionConfig,
    games: usize,
    rng: &mut StdRng,
) -> Result<SimulationReport, MoveError> {
    let session = Session::new(
        *config.strength(),
        config.matchup(),
        StdRng::seed_from_u64(rng.next_u64()),
    );
    let paced = PacedSession::new(session, *config.pacing());
    let mut report = SimulationReport {
        strength: *config.strength(),
        ..Default::default()
    };

    for _ in 0..games {
        paced.reset().await;
        loop {
            let open = paced.inspect(Session::open_squares).await;
            let Some(pick) = open.choose(rng) else {
                break;
            };
            let turn = paced.human_turn(pick.to_index()).await?;
            if turn.status().is_over() {
                break;
            }
        }
        let (status, moves) = paced
            .inspect(|s| (s.status(), s.history().len()))
            .await;
        report.record(status, moves);
    }
    Ok(report)
}

/// A one-shot answer for a board supplied from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The board as given.
    pub board: Board,
    /// Outcome of the board as given.
    pub outcome: Outcome,
    /// Strength that chose the move.
    pub strength: Strength,
    /// Index (0-8) of the suggested square, absent for a decided board.
    pub index: Option<usize>,
}

/// Classifies `board` and, if it is still undecided, asks the policy for
/// the opponent's reply.
#[instrument(skip(config, rng), fields(board = %board))]
pub fn suggest<R: Rng + ?Sized>(config: &SessionConfig, board: Board, rng: &mut R) -> Suggestion {
    let outcome = detect_outcome(&board);
    let index = match outcome {
        Outcome::Undecided => config
            .strength()
            .select_for(&board, config.matchup(), rng)
            .map(usize::from),
        Outcome::Win(_) | Outcome::Draw => None,
    };
    Suggestion {
        board,
        outcome,
        strength: *config.strength(),
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PacingConfig;

    fn config(strength: Strength) -> SessionConfig {
        SessionConfig::default().with_strength(strength)
    }

    #[test]
    fn test_report_counts_add_up() {
        let mut rng = StdRng::seed_from_u64(8);
        let report = simulate(&config(Strength::Weak), 200, &mut rng).unwrap();
        assert_eq!(report.games, 200);
        assert_eq!(report.human_wins + report.opponent_wins + report.draws, 200);
        assert!(report.moves >= 200 * 5);
        assert!(report.moves <= 200 * 9);
    }

    #[test]
    fn test_same_seed_same_report() {
        let run = || {
            let mut rng = StdRng::seed_from_u64(21);
            simulate(&config(Strength::Strong), 100, &mut rng).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[tokio::test]
    async fn test_paced_simulation_with_immediate_pacing() {
        let config = config(Strength::Strong).with_pacing(PacingConfig::immediate());
        let mut rng = StdRng::seed_from_u64(13);
        let report = simulate_paced(&config, 20, &mut rng).await.unwrap();
        assert_eq!(report.games, 20);
        assert_eq!(report.human_wins + report.opponent_wins + report.draws, 20);
    }

    #[test]
    fn test_suggest_decided_board() {
        let mut rng = StdRng::seed_from_u64(0);
        let board: Board = "XXX/OO_/___".parse().unwrap();
        let s = suggest(&config(Strength::Strong), board, &mut rng);
        assert_eq!(s.outcome, Outcome::Win(valentine_tictactoe::Marker::X));
        assert_eq!(s.index, None);
    }

    #[test]
    fn test_suggest_blocks() {
        let mut rng = StdRng::seed_from_u64(0);
        let board: Board = "XX_/___/___".parse().unwrap();
        let s = suggest(&config(Strength::Strong), board, &mut rng);
        assert_eq!(s.outcome, Outcome::Undecided);
        assert_eq!(s.index, Some(2));
    }
}
