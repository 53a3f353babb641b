//! Business logic around finished and interrupted games.

use chrono::{Days, NaiveDate};
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

use crate::db::{DailyChallengeEntity, DbError, GameStats, Settings};
use crate::game::{MatchGame, Phase, ScoreBreakdown};
use crate::repository::{Repositories, SavedGame, daily_game};
use crate::session::{GameSession, SessionMode, SessionStatus};

/// How far back a stale saved daily is matched to its date.
const STALE_DAILY_LOOKBACK_DAYS: u64 = 31;

/// Everything produced by recording a finished game.
#[derive(Debug, Clone, Getters)]
pub struct GameReport {
    score: ScoreBreakdown,
    completed: bool,
    elapsed_secs: u64,
    moves: u32,
    stats: GameStats,
    new_best_score: bool,
    on_leaderboard: bool,
    daily: Option<DailyChallengeEntity>,
}

/// Service layer over the repositories.
///
/// Wraps [`Repositories`] with the steps a finished game goes through:
/// scoring, statistics, leaderboard and daily challenge bookkeeping.
#[derive(Debug)]
pub struct GameService {
    repositories: Repositories,
}

impl GameService {
    /// Creates a new service backed by the given repositories.
    #[instrument(skip(repositories))]
    pub fn new(repositories: Repositories) -> Self {
        info!("Creating GameService");
        Self { repositories }
    }

    /// Returns the underlying repositories.
    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    /// Current user settings, falling back to defaults on a read error.
    #[instrument(skip(self))]
    pub fn settings(&self) -> Settings {
        self.repositories.settings.load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load settings, using defaults");
            Settings::default()
        })
    }

    /// Records a session that has ended (won or out of time).
    ///
    /// Statistics are always updated. Daily sessions update the daily
    /// challenge table; free-play wins are submitted to the leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any write fails.
    #[instrument(skip(self, session), fields(mode = ?session.mode()))]
    pub fn record_finished(&self, session: &GameSession) -> Result<GameReport, DbError> {
        let game = session.game();
        let completed = session.status() == SessionStatus::Won;
        let score = session.score();
        let elapsed_secs = session.elapsed_secs();
        let moves = game.moves();
        let pair_count = game.pair_count();

        debug!(
            completed,
            total = score.total_score,
            elapsed_secs,
            moves,
            "Recording finished game"
        );

        let previous_best = *self.repositories.stats.get_stats(pair_count)?.best_score();
        let stats = self.repositories.stats.record_game(
            pair_count,
            score.total_score,
            elapsed_secs,
            moves,
            completed,
        )?;
        let new_best_score = completed && *stats.best_score() > previous_best;

        let mut on_leaderboard = false;
        let mut daily = None;
        match session.mode() {
            SessionMode::Daily(date) => {
                let entity = if completed {
                    self.repositories.daily.save_challenge_result(
                        date,
                        score.total_score,
                        elapsed_secs,
                        moves,
                    )?
                } else {
                    self.repositories.daily.record_failed_attempt(
                        date,
                        score.total_score,
                        elapsed_secs,
                        moves,
                    )?
                };
                daily = Some(entity);
            }
            SessionMode::Casual | SessionMode::Timed if completed => {
                if self
                    .repositories
                    .leaderboard
                    .qualifies(pair_count, score.total_score)?
                {
                    let player = self.settings().player_name().clone();
                    self.repositories.leaderboard.submit(
                        &player,
                        pair_count,
                        score.total_score,
                        elapsed_secs,
                        moves,
                    )?;
                    on_leaderboard = true;
                }
            }
            SessionMode::Casual | SessionMode::Timed => {}
        }

        self.repositories.saved_game.clear()?;

        info!(
            total = score.total_score,
            new_best_score,
            on_leaderboard,
            "Game recorded"
        );

        Ok(GameReport {
            score,
            completed,
            elapsed_secs,
            moves,
            stats,
            new_best_score,
            on_leaderboard,
            daily,
        })
    }

    /// Stores an unfinished session so it can be resumed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the write fails.
    #[instrument(skip(self, session))]
    pub fn save_progress(&self, session: &GameSession) -> Result<(), DbError> {
        if session.is_over() {
            debug!("Session is over; nothing to save");
            return self.repositories.saved_game.clear();
        }
        if session.game().moves() == 0 && session.game().phase() == Phase::AwaitingFirst {
            debug!("Untouched board; not saving");
            return Ok(());
        }
        self.repositories.saved_game.save(
            session.game(),
            session.elapsed_secs(),
            session.daily_date().is_some(),
        )
    }

    /// Restores the saved session, if any.
    ///
    /// Saved daily games resume as the challenge for `today`. A saved daily
    /// from an earlier date is abandoned: it counts as a failed attempt for
    /// its own date and nothing is resumed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the saved game cannot be read or an abandoned
    /// daily cannot be recorded.
    #[instrument(skip(self))]
    pub fn resume(&self, today: NaiveDate) -> Result<Option<GameSession>, DbError> {
        let Some(saved) = self.repositories.saved_game.load()? else {
            return Ok(None);
        };
        let (game, elapsed_secs, is_daily) = SavedGame::into_parts(saved);

        let mode = if is_daily {
            if !daily_game(today).same_layout(&game) {
                self.abandon_stale_daily(game, elapsed_secs, today)?;
                return Ok(None);
            }
            SessionMode::Daily(today)
        } else if *self.settings().timed_mode() {
            SessionMode::Timed
        } else {
            SessionMode::Casual
        };

        info!(?mode, elapsed_secs, "Resuming saved game");
        Ok(Some(GameSession::from_game(game, mode, elapsed_secs)))
    }

    /// Records a saved daily from an earlier day as a failed attempt.
    ///
    /// The date is recovered by matching the layout against recent daily
    /// deals; a daily older than that is only cleared.
    #[instrument(skip(self, game))]
    fn abandon_stale_daily(
        &self,
        game: MatchGame,
        elapsed_secs: u64,
        today: NaiveDate,
    ) -> Result<(), DbError> {
        let date = (1..=STALE_DAILY_LOOKBACK_DAYS)
            .filter_map(|days| today.checked_sub_days(Days::new(days)))
            .find(|date| daily_game(*date).same_layout(&game));

        match date {
            Some(date) => {
                info!(%date, "Saved daily challenge was abandoned; recording attempt");
                let session = GameSession::from_game(game, SessionMode::Daily(date), elapsed_secs);
                self.record_finished(&session)?;
                Ok(())
            }
            None => {
                info!("Saved daily challenge is too old to place; discarding");
                self.repositories.saved_game.clear()
            }
        }
    }
}
