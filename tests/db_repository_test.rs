//! Tests for database access and repository operations.

use tempfile::NamedTempFile;

use memory_match::{
    Card, Database, Difficulty, LEADERBOARD_SIZE, MatchGame, Repositories, Settings,
};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and the repositories.
fn setup_test_db() -> (NamedTempFile, Repositories) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let database = Database::open(db_path).expect("Failed to open database");
    let repos = Repositories::open(database).expect("Failed to open repositories");
    (db_file, repos)
}

/// Easy board with each symbol at `i` and `i + 6`.
fn easy_game() -> MatchGame {
    let cards = (0..12).map(|i| Card::new(i, (i % 6) as u8)).collect();
    MatchGame::with_cards(Difficulty::Easy, cards).expect("Invalid layout")
}

#[test]
fn test_memory_database_rejected() {
    assert!(Database::open(":memory:".to_string()).is_err());
}

#[test]
fn test_reopen_keeps_data() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    {
        let repos = Repositories::open(Database::open(db_path.clone()).unwrap()).unwrap();
        repos.stats.record_game(8, 900, 40, 12, true).unwrap();
    }

    let repos = Repositories::open(Database::open(db_path).unwrap()).unwrap();
    assert_eq!(*repos.stats.get_stats(8).unwrap().games_played(), 1);
}

#[test]
fn test_stats_empty_for_unplayed_size() {
    let (_db, repos) = setup_test_db();
    let stats = repos.stats.get_stats(12).expect("Query failed");
    assert_eq!(*stats.pair_count(), 12);
    assert_eq!(*stats.games_played(), 0);
    assert_eq!(*stats.best_score(), 0);
    assert_eq!(*stats.best_time(), None);
    assert_eq!(stats.completion_rate(), 0.0);
}

#[test]
fn test_stats_record_game_accumulates() {
    let (_db, repos) = setup_test_db();
    repos.stats.record_game(8, 900, 60, 14, true).unwrap();
    repos.stats.record_game(8, 1100, 45, 12, true).unwrap();
    let stats = repos.stats.record_game(8, 200, 90, 20, false).unwrap();

    assert_eq!(*stats.games_played(), 3);
    assert_eq!(*stats.games_completed(), 2);
    assert_eq!(*stats.best_score(), 1100);
    assert_eq!(*stats.best_time(), Some(45));
    assert_eq!(*stats.best_moves(), Some(12));
}

#[test]
fn test_stats_kept_per_board_size() {
    let (_db, repos) = setup_test_db();
    repos.stats.record_game(6, 700, 30, 8, true).unwrap();
    repos.stats.record_game(18, 2000, 200, 40, true).unwrap();

    assert_eq!(*repos.stats.get_stats(6).unwrap().best_score(), 700);
    assert_eq!(*repos.stats.get_stats(18).unwrap().best_score(), 2000);
    assert_eq!(repos.stats.all_stats().unwrap().len(), 2);
}

#[test]
fn test_stats_reset_clears_and_publishes() {
    let (_db, repos) = setup_test_db();
    let rx = repos.stats.subscribe();
    repos.stats.record_game(8, 900, 60, 14, true).unwrap();
    assert_eq!(rx.borrow().len(), 1);

    repos.stats.reset().unwrap();
    assert!(rx.borrow().is_empty());
    assert_eq!(*repos.stats.get_stats(8).unwrap().games_played(), 0);
}

#[test]
fn test_leaderboard_orders_by_score_then_time() {
    let (_db, repos) = setup_test_db();
    repos.leaderboard.submit("Alice", 8, 1000, 50, 10).unwrap();
    repos.leaderboard.submit("Bob", 8, 1200, 70, 12).unwrap();
    repos.leaderboard.submit("Carol", 8, 1000, 40, 11).unwrap();

    let top = repos.leaderboard.top(8, LEADERBOARD_SIZE).unwrap();
    let names: Vec<&str> = top.iter().map(|e| e.player_name().as_str()).collect();
    assert_eq!(names, ["Bob", "Carol", "Alice"]);
}

#[test]
fn test_leaderboard_separate_per_board_size() {
    let (_db, repos) = setup_test_db();
    repos.leaderboard.submit("Alice", 6, 800, 30, 8).unwrap();
    repos.leaderboard.submit("Bob", 12, 1500, 100, 25).unwrap();

    assert_eq!(repos.leaderboard.top(6, LEADERBOARD_SIZE).unwrap().len(), 1);
    assert_eq!(repos.leaderboard.top(12, LEADERBOARD_SIZE).unwrap().len(), 1);
    assert!(repos.leaderboard.top(8, LEADERBOARD_SIZE).unwrap().is_empty());

    let view = repos.leaderboard.subscribe();
    assert_eq!(view.borrow().get(&6).map(Vec::len), Some(1));
}

#[test]
fn test_leaderboard_qualifies_once_full() {
    let (_db, repos) = setup_test_db();
    for i in 0..LEADERBOARD_SIZE {
        assert!(repos.leaderboard.qualifies(8, 0).unwrap());
        repos
            .leaderboard
            .submit("Filler", 8, 500 + i as u32, 60, 16)
            .unwrap();
    }
    assert!(!repos.leaderboard.qualifies(8, 500).unwrap());
    assert!(repos.leaderboard.qualifies(8, 501).unwrap());
}

#[test]
fn test_leaderboard_keeps_only_top_entries() {
    let (_db, repos) = setup_test_db();
    for i in 0..LEADERBOARD_SIZE + 2 {
        repos
            .leaderboard
            .submit("Filler", 8, 500 + i as u32, 60, 16)
            .unwrap();
    }
    repos.leaderboard.submit("Other", 6, 100, 60, 16).unwrap();

    let all = repos.leaderboard.top(8, 100).unwrap();
    assert_eq!(all.len() as i64, LEADERBOARD_SIZE);
    assert_eq!(*all[0].score(), 511);
    assert_eq!(*all.last().unwrap().score(), 502);
    assert_eq!(repos.leaderboard.top(6, 100).unwrap().len(), 1);
}

#[test]
fn test_settings_default_then_saved() {
    let (_db, repos) = setup_test_db();
    assert_eq!(repos.settings.load().unwrap(), Settings::default());

    let updated = Settings::default()
        .with_player_name("Dana".to_string())
        .with_difficulty(Difficulty::Expert)
        .toggled_timed_mode();
    let rx = repos.settings.subscribe();
    repos.settings.save(updated.clone()).unwrap();

    assert_eq!(repos.settings.load().unwrap(), updated);
    assert_eq!(*rx.borrow(), updated);
}

#[test]
fn test_saved_game_round_trip() {
    let (_db, repos) = setup_test_db();
    assert!(repos.saved_game.load().unwrap().is_none());

    let mut game = easy_game();
    game.flip(0).unwrap();
    game.flip(2).unwrap();
    game.flip(1).unwrap();

    let present = repos.saved_game.subscribe();
    repos.saved_game.save(&game, 17, false).unwrap();
    assert!(*present.borrow());

    let saved = repos.saved_game.load().unwrap().expect("Saved game missing");
    assert_eq!(saved.game(), &game);
    assert_eq!(*saved.elapsed_secs(), 17);
    assert!(!*saved.is_daily());

    repos.saved_game.clear().unwrap();
    assert!(!*present.borrow());
    assert!(repos.saved_game.load().unwrap().is_none());
}

#[test]
fn test_saving_completed_game_clears_slot() {
    let (_db, repos) = setup_test_db();
    let mut game = easy_game();
    game.flip(0).unwrap();
    repos.saved_game.save(&game, 3, false).unwrap();

    for i in [6, 1, 7, 2, 8, 3, 9, 4, 10, 5, 11] {
        game.flip(i).unwrap();
    }
    assert!(game.is_completed());
    repos.saved_game.save(&game, 9, false).unwrap();
    assert!(repos.saved_game.load().unwrap().is_none());
}
