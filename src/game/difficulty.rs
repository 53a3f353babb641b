//! Board sizes and their per-size constants.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::instrument;

/// Board size selected for a game.
///
/// The string form (`"easy"`, `"medium"`, ...) is what the settings and
/// saved-game tables store.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// 6 pairs on a 4×3 grid.
    Easy,
    /// 8 pairs on a 4×4 grid.
    #[default]
    Medium,
    /// 12 pairs on a 6×4 grid.
    Hard,
    /// 18 pairs on a 6×6 grid.
    Expert,
}

impl Difficulty {
    /// Number of distinct pairs in the deck.
    #[instrument]
    pub fn pair_count(self) -> usize {
        match self {
            Self::Easy => 6,
            Self::Medium => 8,
            Self::Hard => 12,
            Self::Expert => 18,
        }
    }

    /// Grid columns used when laying the cards out.
    #[instrument]
    pub fn columns(self) -> usize {
        match self {
            Self::Easy | Self::Medium => 4,
            Self::Hard | Self::Expert => 6,
        }
    }

    /// Grid rows used when laying the cards out.
    #[instrument]
    pub fn rows(self) -> usize {
        self.pair_count() * 2 / self.columns()
    }

    /// Countdown limit in timed mode, in seconds.
    #[instrument]
    pub fn time_limit_secs(self) -> u64 {
        match self {
            Self::Easy => 60,
            Self::Medium => 90,
            Self::Hard => 150,
            Self::Expert => 240,
        }
    }

    /// Human-readable label.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }

    /// Cycles to the next larger board, wrapping around to `Easy`.
    #[instrument]
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Expert,
            Self::Expert => Self::Easy,
        }
    }

    /// Cycles to the next smaller board, wrapping around to `Expert`.
    #[instrument]
    pub fn previous(self) -> Self {
        match self {
            Self::Easy => Self::Expert,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
            Self::Expert => Self::Hard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn grid_holds_every_card() {
        for d in Difficulty::iter() {
            assert_eq!(d.rows() * d.columns(), d.pair_count() * 2, "{d}");
        }
    }

    #[test]
    fn string_form_is_lowercase() {
        assert_eq!(Difficulty::Expert.to_string(), "expert");
        assert_eq!(Difficulty::from_str("hard").unwrap(), Difficulty::Hard);
        assert!(Difficulty::from_str("impossible").is_err());
    }

    #[test]
    fn next_and_previous_are_inverse() {
        for d in Difficulty::iter() {
            assert_eq!(d.next().previous(), d);
        }
    }
}
