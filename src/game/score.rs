//! Score computation: base points for pairs plus time and move bonuses.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Points for every pair found.
pub const POINTS_PER_PAIR: u32 = 100;
/// Seconds of par time allotted per pair.
pub const PAR_SECONDS_PER_PAIR: u64 = 8;
/// Bonus per second finished under par.
pub const TIME_BONUS_PER_SECOND: u32 = 5;
/// Bonus per move saved against twice the pair count.
pub const MOVE_BONUS_PER_MOVE: u32 = 25;

/// Breakdown of a game's final score.
///
/// `total_score` is always `base_points + time_bonus + move_bonus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Points for pairs found.
    pub base_points: u32,
    /// Bonus for finishing under par time.
    pub time_bonus: u32,
    /// Bonus for finishing in few moves.
    pub move_bonus: u32,
    /// Sum of the three parts.
    pub total_score: u32,
}

impl ScoreBreakdown {
    /// Scores a game.
    ///
    /// Bonuses are only awarded when the board was cleared; a game that ran
    /// out of time keeps just its base points.
    #[instrument]
    pub fn calculate(
        pair_count: usize,
        matched_pairs: usize,
        moves: u32,
        elapsed_secs: u64,
        completed: bool,
    ) -> Self {
        let base_points = matched_pairs as u32 * POINTS_PER_PAIR;

        let (time_bonus, move_bonus) = if completed {
            let par = pair_count as u64 * PAR_SECONDS_PER_PAIR;
            let under_par = par.saturating_sub(elapsed_secs) as u32;
            let saved_moves = (2 * pair_count as u32).saturating_sub(moves);
            (
                under_par * TIME_BONUS_PER_SECOND,
                saved_moves * MOVE_BONUS_PER_MOVE,
            )
        } else {
            (0, 0)
        };

        let breakdown = Self {
            base_points,
            time_bonus,
            move_bonus,
            total_score: base_points + time_bonus + move_bonus,
        };
        debug!(?breakdown, "Score calculated");
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        let score = ScoreBreakdown::default();
        assert_eq!(score.base_points, 0);
        assert_eq!(score.time_bonus, 0);
        assert_eq!(score.move_bonus, 0);
        assert_eq!(score.total_score, 0);
    }

    #[test]
    fn perfect_medium_game() {
        // 8 pairs in 8 moves and 20 seconds: par is 64 s and 16 moves.
        let score = ScoreBreakdown::calculate(8, 8, 8, 20, true);
        assert_eq!(score.base_points, 800);
        assert_eq!(score.time_bonus, 44 * 5);
        assert_eq!(score.move_bonus, 8 * 25);
        assert_eq!(score.total_score, 800 + 220 + 200);
    }

    #[test]
    fn slow_sloppy_game_gets_no_bonus() {
        let score = ScoreBreakdown::calculate(6, 6, 30, 500, true);
        assert_eq!(score.time_bonus, 0);
        assert_eq!(score.move_bonus, 0);
        assert_eq!(score.total_score, 600);
    }

    #[test]
    fn unfinished_game_keeps_base_points_only() {
        let score = ScoreBreakdown::calculate(8, 3, 4, 5, false);
        assert_eq!(score.base_points, 300);
        assert_eq!(score.total_score, 300);
    }
}
