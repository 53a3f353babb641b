//! Tests for recording, saving and resuming games through the service layer.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use memory_match::{
    Card, DAILY_DIFFICULTY, Database, Difficulty, GameService, GameSession, MatchGame,
    Repositories, SessionMode, SessionStatus, Settings,
};

fn setup_service() -> (NamedTempFile, GameService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let database = Database::open(db_path).expect("Failed to open database");
    let repos = Repositories::open(database).expect("Failed to open repositories");
    (db_file, GameService::new(repos))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("Invalid date")
}

/// Easy board with each symbol at `i` and `i + 6`.
fn easy_game() -> MatchGame {
    let cards = (0..12).map(|i| Card::new(i, (i % 6) as u8)).collect();
    MatchGame::with_cards(Difficulty::Easy, cards).expect("Invalid layout")
}

/// Flips every pair in order, clearing the board without a mistake.
fn solve(session: &mut GameSession) {
    let mut by_symbol: HashMap<u8, Vec<usize>> = HashMap::new();
    for (i, card) in session.game().cards().iter().enumerate() {
        by_symbol.entry(*card.symbol()).or_default().push(i);
    }
    let mut pairs: Vec<Vec<usize>> = by_symbol.into_values().collect();
    pairs.sort();
    for pair in pairs {
        for index in pair {
            session.flip(index).expect("Flip failed");
        }
    }
}

#[test]
fn test_won_game_updates_stats_and_leaderboard() {
    let (_db, service) = setup_service();
    let mut session = GameSession::from_game(easy_game(), SessionMode::Casual, 0);
    session.tick(Duration::from_secs(5));
    solve(&mut session);
    assert_eq!(session.status(), SessionStatus::Won);

    let report = service.record_finished(&session).expect("Record failed");
    assert!(*report.completed());
    assert!(*report.new_best_score());
    assert!(*report.on_leaderboard());
    assert_eq!(*report.moves(), 6);
    assert_eq!(*report.elapsed_secs(), 5);
    assert_eq!(*report.stats().games_completed(), 1);

    let score = report.score();
    assert_eq!(score.base_points, 600);
    assert_eq!(score.time_bonus, (48 - 5) * 5);
    assert_eq!(score.move_bonus, (12 - 6) * 25);
    assert_eq!(
        score.total_score,
        score.base_points + score.time_bonus + score.move_bonus
    );

    let top = service.repositories().leaderboard.top(6, 10).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].player_name(), Settings::default().player_name());
    assert_eq!(*top[0].score(), score.total_score as i32);
}

#[test]
fn test_leaderboard_uses_saved_player_name() {
    let (_db, service) = setup_service();
    service
        .repositories()
        .settings
        .save(Settings::default().with_player_name("Eve".to_string()))
        .unwrap();

    let mut session = GameSession::from_game(easy_game(), SessionMode::Casual, 0);
    solve(&mut session);
    service.record_finished(&session).unwrap();

    let top = service.repositories().leaderboard.top(6, 10).unwrap();
    assert_eq!(top[0].player_name(), "Eve");
}

#[test]
fn test_time_up_counts_as_played_not_completed() {
    let (_db, service) = setup_service();
    let mut session = GameSession::from_game(easy_game(), SessionMode::Timed, 0);
    session.flip(0).unwrap();
    session.flip(6).unwrap();
    session.tick(Duration::from_secs(Difficulty::Easy.time_limit_secs()));
    assert_eq!(session.status(), SessionStatus::TimeUp);

    let report = service.record_finished(&session).unwrap();
    assert!(!*report.completed());
    assert!(!*report.on_leaderboard());
    assert_eq!(report.score().base_points, 100);
    assert_eq!(report.score().time_bonus, 0);
    assert_eq!(report.score().move_bonus, 0);

    let stats = service.repositories().stats.get_stats(6).unwrap();
    assert_eq!(*stats.games_played(), 1);
    assert_eq!(*stats.games_completed(), 0);
    assert_eq!(*stats.best_time(), None);
    assert!(service.repositories().leaderboard.top(6, 10).unwrap().is_empty());
}

#[test]
fn test_daily_win_marks_challenge_completed() {
    let (_db, service) = setup_service();
    let mut session = GameSession::daily(today());
    assert_eq!(session.game().difficulty(), DAILY_DIFFICULTY);
    solve(&mut session);

    let report = service.record_finished(&session).unwrap();
    let daily = report.daily().as_ref().expect("Daily result missing");
    assert!(*daily.is_completed());
    assert_eq!(*daily.date(), today());
    assert!(!*report.on_leaderboard());

    let daily_repo = &service.repositories().daily;
    assert!(daily_repo.is_challenge_completed(today()).unwrap());
    assert_eq!(daily_repo.current_streak(today()).unwrap(), 1);
}

#[test]
fn test_save_progress_skips_untouched_board() {
    let (_db, service) = setup_service();
    let session = GameSession::from_game(easy_game(), SessionMode::Casual, 0);
    service.save_progress(&session).unwrap();
    assert!(service.resume(today()).unwrap().is_none());
}

#[test]
fn test_save_and_resume_casual_game() {
    let (_db, service) = setup_service();
    let mut session = GameSession::from_game(easy_game(), SessionMode::Casual, 0);
    session.tick(Duration::from_secs(12));
    session.flip(0).unwrap();
    session.flip(2).unwrap();
    service.save_progress(&session).unwrap();

    let resumed = service.resume(today()).unwrap().expect("Nothing to resume");
    assert_eq!(resumed.game(), session.game());
    assert_eq!(resumed.elapsed_secs(), 12);
    assert_eq!(resumed.mode(), SessionMode::Casual);
}

#[test]
fn test_resume_uses_current_timed_setting() {
    let (_db, service) = setup_service();
    let mut session = GameSession::from_game(easy_game(), SessionMode::Casual, 0);
    session.tick(Duration::from_secs(20));
    session.flip(0).unwrap();
    service.save_progress(&session).unwrap();

    service
        .repositories()
        .settings
        .save(Settings::default().toggled_timed_mode())
        .unwrap();

    let resumed = service.resume(today()).unwrap().expect("Nothing to resume");
    assert_eq!(resumed.mode(), SessionMode::Timed);
    assert_eq!(
        resumed.remaining_secs(),
        Some(Difficulty::Easy.time_limit_secs() - 20)
    );
}

#[test]
fn test_stale_daily_is_not_resumed() {
    let (_db, service) = setup_service();
    let mut session = GameSession::daily(today());
    session.tick(Duration::from_secs(3));
    session.flip(0).unwrap();
    service.save_progress(&session).unwrap();

    let resumed = service.resume(today()).unwrap().expect("Nothing to resume");
    assert_eq!(resumed.mode(), SessionMode::Daily(today()));

    let tomorrow = today().succ_opt().expect("Invalid date");
    assert!(service.resume(tomorrow).unwrap().is_none());
    assert!(service.repositories().saved_game.load().unwrap().is_none());
}

#[test]
fn test_abandoned_daily_counts_as_failed_attempt() {
    let (_db, service) = setup_service();
    let mut session = GameSession::daily(today());
    session.tick(Duration::from_secs(30));
    session.flip(0).unwrap();
    service.save_progress(&session).unwrap();

    let next_week = today() + chrono::Days::new(7);
    assert!(service.resume(next_week).unwrap().is_none());

    let daily = &service.repositories().daily;
    let attempt = daily
        .get_challenge(today())
        .unwrap()
        .expect("Abandoned daily not recorded");
    assert!(!*attempt.is_completed());
    assert_eq!(*attempt.time_seconds(), 30);
    assert!(daily.get_challenge(next_week).unwrap().is_none());

    let pair_count = DAILY_DIFFICULTY.pair_count();
    let stats = service.repositories().stats.get_stats(pair_count).unwrap();
    assert_eq!(*stats.games_played(), 1);
    assert_eq!(*stats.games_completed(), 0);
}

#[test]
fn test_abandoned_daily_never_overwrites_completion() {
    let (_db, service) = setup_service();
    let mut won = GameSession::daily(today());
    solve(&mut won);
    service.record_finished(&won).unwrap();

    let mut replay = GameSession::daily(today());
    replay.flip(0).unwrap();
    service.save_progress(&replay).unwrap();

    let tomorrow = today().succ_opt().expect("Invalid date");
    assert!(service.resume(tomorrow).unwrap().is_none());
    assert!(service.repositories().daily.is_challenge_completed(today()).unwrap());
}

#[test]
fn test_finishing_clears_saved_game() {
    let (_db, service) = setup_service();
    let mut session = GameSession::from_game(easy_game(), SessionMode::Casual, 0);
    session.flip(0).unwrap();
    service.save_progress(&session).unwrap();
    assert!(*service.repositories().saved_game.subscribe().borrow());

    for i in [6, 1, 7, 2, 8, 3, 9, 4, 10, 5, 11] {
        session.flip(i).unwrap();
    }
    service.record_finished(&session).unwrap();
    assert!(!*service.repositories().saved_game.subscribe().borrow());
}
