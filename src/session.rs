//! A game in play: the board plus its clock, mode and mismatch delay.

use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::game::{
    Countdown, Difficulty, FlipOutcome, GameError, GameTimer, MatchGame, ScoreBreakdown,
    TimerFeedback, clock_seed,
};
use crate::repository::daily_game;

/// How long a mismatched pair stays face up before it is hidden.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(800);

/// Kind of game being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Untimed free play; the clock counts up.
    Casual,
    /// Free play against the difficulty's countdown.
    Timed,
    /// The daily challenge for a date; the clock counts up.
    Daily(NaiveDate),
}

/// Whether the session is still going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Cards can still be flipped.
    Playing,
    /// Every pair was found.
    Won,
    /// The countdown reached zero first.
    TimeUp,
}

#[derive(Debug, Clone, Copy)]
enum Clock {
    Elapsed(GameTimer),
    Countdown(Countdown),
}

/// A running game.
#[derive(Debug, Clone)]
pub struct GameSession {
    game: MatchGame,
    clock: Clock,
    mode: SessionMode,
    mismatch_age: Option<Duration>,
}

impl GameSession {
    /// Starts a free-play game with a clock-derived seed.
    #[instrument]
    pub fn start(difficulty: Difficulty, timed: bool) -> Self {
        Self::with_seed(difficulty, timed, clock_seed())
    }

    /// Starts a free-play game from an explicit seed.
    #[instrument]
    pub fn with_seed(difficulty: Difficulty, timed: bool, seed: u32) -> Self {
        let mode = if timed {
            SessionMode::Timed
        } else {
            SessionMode::Casual
        };
        Self::from_game(MatchGame::new(difficulty, seed), mode, 0)
    }

    /// Starts the daily challenge for `date`.
    #[instrument]
    pub fn daily(date: NaiveDate) -> Self {
        Self::from_game(daily_game(date), SessionMode::Daily(date), 0)
    }

    /// Wraps an existing board, e.g. one restored from the saved-game table.
    #[instrument(skip(game))]
    pub fn from_game(game: MatchGame, mode: SessionMode, elapsed_secs: u64) -> Self {
        let clock = match mode {
            SessionMode::Timed => Clock::Countdown(Countdown::resumed(
                game.difficulty().time_limit_secs(),
                elapsed_secs,
            )),
            SessionMode::Casual | SessionMode::Daily(_) => {
                Clock::Elapsed(GameTimer::from_elapsed(elapsed_secs))
            }
        };
        info!(difficulty = %game.difficulty(), ?mode, elapsed_secs, "Session started");
        Self {
            game,
            clock,
            mode,
            mismatch_age: None,
        }
    }

    /// The board.
    pub fn game(&self) -> &MatchGame {
        &self.game
    }

    /// Kind of game.
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Date of the daily challenge, if this is one.
    pub fn daily_date(&self) -> Option<NaiveDate> {
        match self.mode {
            SessionMode::Daily(date) => Some(date),
            _ => None,
        }
    }

    /// Current status.
    pub fn status(&self) -> SessionStatus {
        if self.game.is_completed() {
            SessionStatus::Won
        } else if matches!(self.clock, Clock::Countdown(c) if c.is_expired()) {
            SessionStatus::TimeUp
        } else {
            SessionStatus::Playing
        }
    }

    /// True once the session is won or out of time.
    pub fn is_over(&self) -> bool {
        self.status() != SessionStatus::Playing
    }

    /// Seconds spent playing.
    pub fn elapsed_secs(&self) -> u64 {
        match self.clock {
            Clock::Elapsed(t) => t.elapsed_secs(),
            Clock::Countdown(c) => c.elapsed_secs(),
        }
    }

    /// Seconds left in timed mode.
    pub fn remaining_secs(&self) -> Option<u64> {
        match self.clock {
            Clock::Countdown(c) => Some(c.remaining_secs()),
            Clock::Elapsed(_) => None,
        }
    }

    /// Countdown feedback in timed mode.
    pub fn feedback(&self) -> Option<TimerFeedback> {
        match self.clock {
            Clock::Countdown(c) => Some(c.feedback()),
            Clock::Elapsed(_) => None,
        }
    }

    /// Advances the clock and hides a mismatch once it has been shown long enough.
    ///
    /// Time stops once the session is over.
    pub fn tick(&mut self, delta: Duration) {
        if self.is_over() {
            return;
        }
        match &mut self.clock {
            Clock::Elapsed(t) => t.tick(delta),
            Clock::Countdown(c) => c.tick(delta),
        }
        if let Some(age) = self.mismatch_age.as_mut() {
            *age += delta;
            if *age >= MISMATCH_DELAY {
                debug!("Mismatch delay elapsed");
                self.game.resolve_mismatch();
                self.mismatch_age = None;
            }
        }
    }

    /// Pauses the clock.
    pub fn pause(&mut self) {
        match &mut self.clock {
            Clock::Elapsed(t) => t.pause(),
            Clock::Countdown(c) => c.pause(),
        }
    }

    /// Resumes the clock.
    pub fn resume(&mut self) {
        match &mut self.clock {
            Clock::Elapsed(t) => t.resume(),
            Clock::Countdown(c) => c.resume(),
        }
    }

    /// Flips a card.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::GameOver`] once time is up, otherwise whatever
    /// [`MatchGame::flip`] reports.
    #[instrument(skip(self))]
    pub fn flip(&mut self, index: usize) -> Result<FlipOutcome, GameError> {
        if self.status() == SessionStatus::TimeUp {
            return Err(GameError::GameOver);
        }
        let outcome = self.game.flip(index)?;
        self.mismatch_age = match outcome {
            FlipOutcome::Mismatched { .. } => Some(Duration::ZERO),
            _ => None,
        };
        Ok(outcome)
    }

    /// Score for the current state of the board.
    #[instrument(skip(self))]
    pub fn score(&self) -> ScoreBreakdown {
        ScoreBreakdown::calculate(
            self.game.pair_count(),
            self.game.matched_pairs(),
            self.game.moves(),
            self.elapsed_secs(),
            self.game.is_completed(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Card;

    /// Easy board with each symbol at `i` and `i + 6`.
    fn easy_board() -> MatchGame {
        let cards = (0..12).map(|i| Card::new(i, (i % 6) as u8)).collect();
        MatchGame::with_cards(Difficulty::Easy, cards).unwrap()
    }

    #[test]
    fn mismatch_hides_after_delay() {
        let mut session = GameSession::from_game(easy_board(), SessionMode::Casual, 0);
        session.flip(0).unwrap();
        session.flip(1).unwrap();
        assert!(session.game().has_pending_mismatch());

        session.tick(Duration::from_millis(500));
        assert!(session.game().has_pending_mismatch());
        session.tick(Duration::from_millis(300));
        assert!(!session.game().has_pending_mismatch());
    }

    #[test]
    fn countdown_expiry_ends_session() {
        let mut session = GameSession::from_game(easy_board(), SessionMode::Timed, 0);
        session.tick(Duration::from_secs(Difficulty::Easy.time_limit_secs()));
        assert_eq!(session.status(), SessionStatus::TimeUp);
        assert_eq!(session.flip(0), Err(GameError::GameOver));
        assert_eq!(session.feedback(), Some(TimerFeedback::Expired));
    }

    #[test]
    fn clock_stops_when_won() {
        let mut session = GameSession::from_game(easy_board(), SessionMode::Casual, 0);
        session.tick(Duration::from_secs(4));
        for i in [0, 2, 1, 3] {
            session.flip(i).unwrap();
        }
        assert_eq!(session.status(), SessionStatus::Won);
        session.tick(Duration::from_secs(100));
        assert_eq!(session.elapsed_secs(), 4);
        assert_eq!(session.score().total_score, session.score().base_points
            + session.score().time_bonus
            + session.score().move_bonus);
    }

    #[test]
    fn daily_sessions_share_a_layout() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let a = GameSession::daily(date);
        let b = GameSession::daily(date);
        assert_eq!(a.game(), b.game());
        assert_eq!(a.daily_date(), Some(date));
    }
}
