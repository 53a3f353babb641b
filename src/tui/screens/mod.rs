//! Screen implementations for the menu state machine.

mod daily_challenge;
mod game_board;
mod game_over;
mod leaderboard;
mod main_menu;
mod settings;
mod stats_view;

pub use daily_challenge::DailyChallengeScreen;
pub use game_board::GameBoardScreen;
pub use game_over::GameOverScreen;
pub use leaderboard::LeaderboardScreen;
pub use main_menu::MainMenuScreen;
pub use settings::SettingsScreen;
pub use stats_view::StatsViewScreen;
