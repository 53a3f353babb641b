//! Daily challenge repository.
//!
//! Every calendar date has one challenge: a board of fixed size dealt from
//! a seed derived from the date, so the layout is the same for everybody.

use chrono::{Days, NaiveDate};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::db::{DailyChallengeDao, DailyChallengeEntity, Database, DbError};
use crate::game::{Difficulty, MatchGame, daily_seed};
use crate::repository::to_db_int;

/// Board size of every daily challenge.
pub const DAILY_DIFFICULTY: Difficulty = Difficulty::Medium;

/// Results published to subscribers.
const RECENT_LIMIT: i64 = 30;

/// Deals the challenge board for `date`.
#[instrument]
pub fn daily_game(date: NaiveDate) -> MatchGame {
    MatchGame::new(DAILY_DIFFICULTY, daily_seed(date))
}

/// Daily challenge results with a live view of recent days.
#[derive(Debug)]
pub struct DailyChallengeRepository {
    dao: DailyChallengeDao,
    updates: watch::Sender<Vec<DailyChallengeEntity>>,
}

impl DailyChallengeRepository {
    /// Creates the repository and loads recent results.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the initial load fails.
    #[instrument(skip(database))]
    pub fn new(database: Database) -> Result<Self, DbError> {
        let dao = DailyChallengeDao::new(database);
        let (updates, _) = watch::channel(dao.recent(RECENT_LIMIT)?);
        info!("Creating DailyChallengeRepository");
        Ok(Self { dao, updates })
    }

    /// Whether the challenge for `date` has been completed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn is_challenge_completed(&self, date: NaiveDate) -> Result<bool, DbError> {
        self.dao.is_completed(date)
    }

    /// Records a completed challenge. If the date already has a result the
    /// better one is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn save_challenge_result(
        &self,
        date: NaiveDate,
        score: u32,
        time_seconds: u64,
        moves: u32,
    ) -> Result<DailyChallengeEntity, DbError> {
        self.store(date, true, score, time_seconds, moves)
    }

    /// Records an attempt that ran out of time or was abandoned. It never
    /// overwrites a completed result.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn record_failed_attempt(
        &self,
        date: NaiveDate,
        score: u32,
        time_seconds: u64,
        moves: u32,
    ) -> Result<DailyChallengeEntity, DbError> {
        self.store(date, false, score, time_seconds, moves)
    }

    /// Stored result for `date`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_challenge(&self, date: NaiveDate) -> Result<Option<DailyChallengeEntity>, DbError> {
        self.dao.find(date)
    }

    /// Consecutive completed days ending at `today`.
    ///
    /// An unfinished `today` does not break the streak yet; counting then
    /// starts from yesterday.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn current_streak(&self, today: NaiveDate) -> Result<u32, DbError> {
        let dates = self.dao.completed_dates(today)?;
        let mut expected = today;
        let mut streak = 0;
        for date in dates {
            if date != expected {
                if streak == 0 && Some(date) == today.checked_sub_days(Days::new(1)) {
                    expected = date;
                } else {
                    break;
                }
            }
            streak += 1;
            match expected.checked_sub_days(Days::new(1)) {
                Some(previous) => expected = previous,
                None => break,
            }
        }
        debug!(streak, "Streak computed");
        Ok(streak)
    }

    /// Total number of completed challenges.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn completed_count(&self) -> Result<i64, DbError> {
        self.dao.completed_count()
    }

    /// Receiver that sees the most recent results after each write.
    pub fn subscribe(&self) -> watch::Receiver<Vec<DailyChallengeEntity>> {
        self.updates.subscribe()
    }

    fn store(
        &self,
        date: NaiveDate,
        completed: bool,
        score: u32,
        time_seconds: u64,
        moves: u32,
    ) -> Result<DailyChallengeEntity, DbError> {
        let entity = DailyChallengeEntity::new(
            date,
            completed,
            to_db_int(u64::from(score)),
            to_db_int(time_seconds),
            to_db_int(u64::from(moves)),
        );
        let kept = self.dao.save(entity)?;
        self.updates.send_replace(self.dao.recent(RECENT_LIMIT)?);
        Ok(kept)
    }
}
