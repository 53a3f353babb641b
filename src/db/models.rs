//! Database models and domain records.

use chrono::{NaiveDate, NaiveDateTime};
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::game::Difficulty;

/// Row id used by the single-row tables (`settings`, `saved_game`).
pub const SINGLETON_ID: i32 = 1;

/// Per-board-size statistics, keyed by pair count.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset, Getters)]
#[diesel(table_name = schema::game_stats)]
#[diesel(primary_key(pair_count))]
#[diesel(treat_none_as_null = true)]
pub struct GameStats {
    pair_count: i32,
    games_played: i32,
    games_completed: i32,
    best_score: i32,
    best_time: Option<i32>,
    best_moves: Option<i32>,
}

impl GameStats {
    /// Statistics for a board size nobody has played yet.
    #[instrument]
    pub fn empty(pair_count: i32) -> Self {
        Self {
            pair_count,
            games_played: 0,
            games_completed: 0,
            best_score: 0,
            best_time: None,
            best_moves: None,
        }
    }

    /// Folds one finished game into these statistics.
    ///
    /// Best score is the maximum over every game; best time and best moves
    /// only consider games where the board was cleared.
    #[instrument(skip(self))]
    pub fn merged(&self, score: i32, time_seconds: i32, moves: i32, completed: bool) -> Self {
        let mut next = self.clone();
        next.games_played += 1;
        next.best_score = next.best_score.max(score);
        if completed {
            next.games_completed += 1;
            next.best_time = Some(next.best_time.map_or(time_seconds, |t| t.min(time_seconds)));
            next.best_moves = Some(next.best_moves.map_or(moves, |m| m.min(moves)));
        }
        next
    }

    /// Fraction of games cleared, as a percentage (0.0–100.0).
    #[instrument(skip(self))]
    pub fn completion_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            (self.games_completed as f64 / self.games_played as f64) * 100.0
        }
    }
}

/// Leaderboard row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::leaderboard)]
pub struct LeaderboardEntry {
    id: i32,
    player_name: String,
    pair_count: i32,
    score: i32,
    time_seconds: i32,
    moves: i32,
    played_at: NaiveDateTime,
}

/// Insertable leaderboard row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::leaderboard)]
pub struct NewLeaderboardEntry {
    player_name: String,
    pair_count: i32,
    score: i32,
    time_seconds: i32,
    moves: i32,
}

/// Stored in-progress game.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::saved_game)]
pub struct SavedGameRow {
    id: i32,
    difficulty: String,
    is_daily: bool,
    elapsed_seconds: i32,
    snapshot: String,
    saved_at: NaiveDateTime,
}

/// Insertable in-progress game; always targets the singleton row.
#[derive(Debug, Clone, Insertable, Getters)]
#[diesel(table_name = schema::saved_game)]
pub struct NewSavedGame {
    id: i32,
    difficulty: String,
    is_daily: bool,
    elapsed_seconds: i32,
    snapshot: String,
}

impl NewSavedGame {
    /// Creates the row for the singleton slot.
    #[instrument(skip(snapshot))]
    pub fn new(difficulty: Difficulty, is_daily: bool, elapsed_seconds: i32, snapshot: String) -> Self {
        Self {
            id: SINGLETON_ID,
            difficulty: difficulty.to_string(),
            is_daily,
            elapsed_seconds,
            snapshot,
        }
    }
}

/// Stored settings row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::settings)]
pub struct SettingsRow {
    id: i32,
    player_name: String,
    difficulty: String,
    timed_mode: bool,
    updated_at: NaiveDateTime,
}

/// Insertable settings row; always targets the singleton row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::settings)]
pub struct NewSettings {
    id: i32,
    player_name: String,
    difficulty: String,
    timed_mode: bool,
    updated_at: NaiveDateTime,
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Settings {
    player_name: String,
    difficulty: Difficulty,
    timed_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            difficulty: Difficulty::default(),
            timed_mode: false,
        }
    }
}

impl Settings {
    /// Returns a copy with a different player name.
    #[instrument(skip(self))]
    pub fn with_player_name(&self, player_name: String) -> Self {
        Self {
            player_name,
            ..self.clone()
        }
    }

    /// Returns a copy with a different default board size.
    #[instrument(skip(self))]
    pub fn with_difficulty(&self, difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..self.clone()
        }
    }

    /// Returns a copy with timed mode toggled.
    #[instrument(skip(self))]
    pub fn toggled_timed_mode(&self) -> Self {
        Self {
            timed_mode: !self.timed_mode,
            ..self.clone()
        }
    }

    /// Builds the row written to the settings table.
    #[instrument(skip(self))]
    pub fn to_row(&self) -> NewSettings {
        NewSettings {
            id: SINGLETON_ID,
            player_name: self.player_name.clone(),
            difficulty: self.difficulty.to_string(),
            timed_mode: self.timed_mode,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<SettingsRow> for Settings {
    type Error = DbError;

    #[track_caller]
    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            player_name: row.player_name,
            difficulty: row.difficulty.parse()?,
            timed_mode: row.timed_mode,
        })
    }
}

/// Result of one day's challenge.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset, Getters, new)]
#[diesel(table_name = schema::daily_challenge)]
#[diesel(primary_key(date))]
pub struct DailyChallengeEntity {
    date: NaiveDate,
    is_completed: bool,
    score: i32,
    time_seconds: i32,
    moves: i32,
}

impl DailyChallengeEntity {
    /// Picks the better of two results for the same date.
    ///
    /// A completed result beats an uncompleted one; between equals the
    /// higher score wins and ties keep `self`.
    #[instrument(skip(self, other))]
    pub fn better_of(self, other: Self) -> Self {
        match (self.is_completed, other.is_completed) {
            (false, true) => other,
            (true, false) => self,
            _ if other.score > self.score => other,
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_tracks_bests() {
        let stats = GameStats::empty(8)
            .merged(900, 40, 12, true)
            .merged(1200, 55, 10, true)
            .merged(300, 5, 3, false);

        assert_eq!(*stats.games_played(), 3);
        assert_eq!(*stats.games_completed(), 2);
        assert_eq!(*stats.best_score(), 1200);
        assert_eq!(*stats.best_time(), Some(40));
        assert_eq!(*stats.best_moves(), Some(10));
    }

    #[test]
    fn completion_rate_handles_no_games() {
        assert_eq!(GameStats::empty(6).completion_rate(), 0.0);
    }

    #[test]
    fn completed_daily_beats_higher_unfinished_score() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let done = DailyChallengeEntity::new(date, true, 500, 60, 12);
        let failed = DailyChallengeEntity::new(date, false, 700, 90, 20);
        assert_eq!(failed.clone().better_of(done.clone()), done);
        assert_eq!(done.clone().better_of(failed), done);
    }
}
