//! Strong opponent: fixed priority list, random only to break ties.

use super::{random_among, winning_move};
use crate::rules::empty_cells;
use crate::{Board, Marker, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

pub(super) fn select<R: Rng + ?Sized>(
    board: &Board,
    opponent: Marker,
    human: Marker,
    rng: &mut R,
) -> Option<Position> {
    let empty = empty_cells(board);
    if empty.is_empty() {
        return None;
    }

    if let Some(pos) = winning_move(board, opponent) {
        trace!(%pos, "Taking the win");
        return Some(pos);
    }

    if let Some(pos) = winning_move(board, human) {
        trace!(%pos, "Blocking");
        return Some(pos);
    }

    if board.is_empty(Position::Center) {
        return Some(Position::Center);
    }

    random_among(board, &Position::CORNERS, rng)
        .or_else(|| random_among(board, &Position::EDGES, rng))
        .or_else(|| empty.choose(rng).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pick(board: &str, seed: u64) -> Option<Position> {
        let board: Board = board.parse().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        select(&board, Marker::O, Marker::X, &mut rng)
    }

    #[test]
    fn test_takes_win_over_block() {
        // Both O and X threaten; O finishes its own row.
        assert_eq!(pick("OO_/XX_/___", 0), Some(Position::TopRight));
    }

    #[test]
    fn test_blocks_human_threat() {
        assert_eq!(pick("XX_/___/___", 0), Some(Position::TopRight));
    }

    #[test]
    fn test_takes_center_on_empty_board() {
        assert_eq!(pick("___/___/___", 0), Some(Position::Center));
    }

    #[test]
    fn test_prefers_corners_after_center() {
        for seed in 0..50 {
            let pos = pick("___/_X_/___", seed).unwrap();
            assert!(pos.is_corner(), "seed {} picked {}", seed, pos);
        }
    }

    #[test]
    fn test_falls_back_to_edges() {
        // Corners and center taken, no threats on either side.
        let mut seen = Vec::new();
        for seed in 0..50 {
            let pos = pick("O_X/XXO/O_X", seed).unwrap();
            assert!(pos.is_edge());
            seen.push(pos);
        }
        assert!(seen.contains(&Position::TopCenter));
        assert!(seen.contains(&Position::BottomCenter));
    }
}
