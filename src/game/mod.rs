//! Memory-match game engine: deck, board, scoring and timing.

mod board;
mod card;
mod deck;
mod difficulty;
mod score;
mod timer;

pub use board::{FlipOutcome, GameError, GameSnapshot, MatchGame, Phase};
pub use card::{Card, CardState};
pub use deck::{Deck, SeededRng, clock_seed, daily_seed};
pub use difficulty::Difficulty;
pub use score::{
    MOVE_BONUS_PER_MOVE, PAR_SECONDS_PER_PAIR, POINTS_PER_PAIR, ScoreBreakdown,
    TIME_BONUS_PER_SECOND,
};
pub use timer::{CRITICAL_SECS, Countdown, GameTimer, TimerFeedback, WARNING_SECS, format_time};
