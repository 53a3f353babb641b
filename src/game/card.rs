//! Cards and their face state.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Face state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face down.
    Hidden,
    /// Face up as part of the current attempt.
    Revealed,
    /// Face up for good; its pair has been found.
    Matched,
}

/// A single tile on the board.
///
/// Two cards form a pair when their symbols are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Card {
    id: usize,
    symbol: u8,
    #[getter(skip)]
    state: CardState,
}

impl Card {
    /// Creates a hidden card.
    pub fn new(id: usize, symbol: u8) -> Self {
        Self {
            id,
            symbol,
            state: CardState::Hidden,
        }
    }

    /// Current face state.
    pub fn state(&self) -> CardState {
        self.state
    }

    /// True unless the card is hidden.
    pub fn is_face_up(&self) -> bool {
        self.state != CardState::Hidden
    }

    /// Printable glyph for the symbol (`A`, `B`, ...).
    pub fn glyph(&self) -> char {
        char::from(b'A' + self.symbol % 26)
    }

    pub(super) fn set_state(&mut self, state: CardState) {
        self.state = state;
    }
}
