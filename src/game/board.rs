//! Board state machine: reveal two cards at a time and keep the pairs.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::card::{Card, CardState};
use super::deck::{Deck, SeededRng};
use super::difficulty::Difficulty;

/// Where the board is in the current attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No card of the current attempt is face up.
    AwaitingFirst,
    /// One card is face up, waiting for its partner.
    AwaitingSecond {
        /// Index of the face-up card.
        first: usize,
    },
    /// Two unequal cards are face up and will be turned back over.
    Mismatch {
        /// Index of the first card of the failed attempt.
        first: usize,
        /// Index of the second card of the failed attempt.
        second: usize,
    },
    /// Every pair has been found.
    Completed,
}

/// What a successful flip did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of an attempt turned face up.
    Revealed,
    /// Second card matched the first.
    Matched {
        /// Index of the first card.
        first: usize,
        /// Index of the second card.
        second: usize,
    },
    /// Second card did not match; both stay up until resolved.
    Mismatched {
        /// Index of the first card.
        first: usize,
        /// Index of the second card.
        second: usize,
    },
    /// Second card matched and it was the last pair.
    Completed {
        /// Index of the first card.
        first: usize,
        /// Index of the second card.
        second: usize,
    },
}

/// Errors from misusing the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Index does not address a card.
    #[display("Card index {index} is out of bounds ({len} cards)")]
    OutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of cards on the board.
        len: usize,
    },
    /// Card is already revealed or matched.
    #[display("Card {index} is already face up")]
    AlreadyFaceUp {
        /// Requested index.
        index: usize,
    },
    /// All pairs are already found.
    #[display("Game is already over")]
    GameOver,
    /// A layout does not hold the number of cards its board size deals.
    #[display("{difficulty} board needs {expected} cards, got {found}")]
    WrongCardCount {
        /// Board size the layout was built for.
        difficulty: Difficulty,
        /// Cards the board size deals.
        expected: usize,
        /// Cards in the layout.
        found: usize,
    },
}

/// Serializable copy of a board, stored in the saved-game table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    difficulty: Difficulty,
    cards: Vec<Card>,
    phase: Phase,
    moves: u32,
    matched_pairs: usize,
}

/// A single memory-match game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGame {
    difficulty: Difficulty,
    cards: Vec<Card>,
    phase: Phase,
    moves: u32,
    matched_pairs: usize,
}

impl MatchGame {
    /// Deals a freshly shuffled board for `difficulty`.
    #[instrument]
    pub fn new(difficulty: Difficulty, seed: u32) -> Self {
        let mut rng = SeededRng::new(seed);
        let cards = Deck::shuffled(difficulty.pair_count(), &mut rng);
        info!(cards = cards.len(), "New game dealt");
        Self::face_down(difficulty, cards)
    }

    /// Builds a game over an explicit card layout.
    ///
    /// All cards are turned face down.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::WrongCardCount`] unless the layout holds exactly
    /// the cards `difficulty` deals.
    #[instrument(skip(cards), fields(cards = cards.len()))]
    pub fn with_cards(difficulty: Difficulty, cards: Vec<Card>) -> Result<Self, GameError> {
        let expected = difficulty.pair_count() * 2;
        if cards.len() != expected {
            return Err(GameError::WrongCardCount {
                difficulty,
                expected,
                found: cards.len(),
            });
        }
        Ok(Self::face_down(difficulty, cards))
    }

    fn face_down(difficulty: Difficulty, mut cards: Vec<Card>) -> Self {
        for card in &mut cards {
            card.set_state(CardState::Hidden);
        }
        Self {
            difficulty,
            cards,
            phase: Phase::AwaitingFirst,
            moves: 0,
            matched_pairs: 0,
        }
    }

    /// Board size.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cards in board order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Current phase of the attempt.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed attempts (pairs of flips).
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Pairs found so far.
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Pairs on the board.
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// True once every pair is found.
    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// True while two unequal cards are waiting to be hidden.
    pub fn has_pending_mismatch(&self) -> bool {
        matches!(self.phase, Phase::Mismatch { .. })
    }

    /// Turns the card at `index` face up.
    ///
    /// A pending mismatch is hidden before the flip is applied, so the
    /// player never has to dismiss it explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the index is invalid, the card is already
    /// face up, or the game is over. The board is left unchanged.
    #[instrument(skip(self), fields(phase = ?self.phase, moves = self.moves))]
    pub fn flip(&mut self, index: usize) -> Result<FlipOutcome, GameError> {
        if index >= self.cards.len() {
            return Err(GameError::OutOfBounds {
                index,
                len: self.cards.len(),
            });
        }
        if self.is_completed() {
            return Err(GameError::GameOver);
        }
        if let Phase::Mismatch { first, second } = self.phase
            && (index == first || index == second)
        {
            // Flipping one of the pending pair would just show it again.
            return Err(GameError::AlreadyFaceUp { index });
        }
        if self.cards[index].is_face_up() {
            return Err(GameError::AlreadyFaceUp { index });
        }

        self.resolve_mismatch();

        match self.phase {
            Phase::AwaitingFirst => {
                self.cards[index].set_state(CardState::Revealed);
                self.phase = Phase::AwaitingSecond { first: index };
                debug!(index, "First card revealed");
                Ok(FlipOutcome::Revealed)
            }
            Phase::AwaitingSecond { first } => {
                self.cards[index].set_state(CardState::Revealed);
                self.moves += 1;
                Ok(self.settle(first, index))
            }
            // resolve_mismatch() left AwaitingFirst and completion returned early.
            Phase::Mismatch { .. } | Phase::Completed => Err(GameError::GameOver),
        }
    }

    fn settle(&mut self, first: usize, second: usize) -> FlipOutcome {
        if self.cards[first].symbol() != self.cards[second].symbol() {
            self.phase = Phase::Mismatch { first, second };
            debug!(first, second, "Mismatch");
            return FlipOutcome::Mismatched { first, second };
        }

        self.cards[first].set_state(CardState::Matched);
        self.cards[second].set_state(CardState::Matched);
        self.matched_pairs += 1;
        debug!(first, second, matched = self.matched_pairs, "Pair matched");

        if self.matched_pairs == self.pair_count() {
            self.phase = Phase::Completed;
            info!(moves = self.moves, "All pairs matched");
            FlipOutcome::Completed { first, second }
        } else {
            self.phase = Phase::AwaitingFirst;
            FlipOutcome::Matched { first, second }
        }
    }

    /// Hides a pending mismatched pair. Does nothing in any other phase.
    #[instrument(skip(self))]
    pub fn resolve_mismatch(&mut self) {
        if let Phase::Mismatch { first, second } = self.phase {
            self.cards[first].set_state(CardState::Hidden);
            self.cards[second].set_state(CardState::Hidden);
            self.phase = Phase::AwaitingFirst;
            debug!(first, second, "Mismatch hidden");
        }
    }

    /// True when both boards deal the same symbols in the same positions,
    /// regardless of which cards are face up.
    pub fn same_layout(&self, other: &MatchGame) -> bool {
        self.cards.len() == other.cards.len()
            && self
                .cards
                .iter()
                .zip(&other.cards)
                .all(|(a, b)| a.symbol() == b.symbol())
    }

    /// Copies the board into its serializable form.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            difficulty: self.difficulty,
            cards: self.cards.clone(),
            phase: self.phase,
            moves: self.moves,
            matched_pairs: self.matched_pairs,
        }
    }

    /// Rebuilds a board from a snapshot.
    #[instrument(skip(snapshot))]
    pub fn restore(snapshot: GameSnapshot) -> Self {
        Self {
            difficulty: snapshot.difficulty,
            cards: snapshot.cards,
            phase: snapshot.phase,
            moves: snapshot.moves,
            matched_pairs: snapshot.matched_pairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Easy board laid out as `A A B B C C ...` so tests can pick pairs by index.
    fn ordered() -> MatchGame {
        let cards = (0..6u8)
            .flat_map(|s| [s, s])
            .enumerate()
            .map(|(i, s)| Card::new(i, s))
            .collect();
        MatchGame::with_cards(Difficulty::Easy, cards).unwrap()
    }

    #[test]
    fn first_flip_reveals() {
        let mut game = ordered();
        assert_eq!(game.flip(0), Ok(FlipOutcome::Revealed));
        assert_eq!(game.phase(), Phase::AwaitingSecond { first: 0 });
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn pending_pair_is_hidden_by_next_flip() {
        let mut game = ordered();
        game.flip(0).unwrap();
        game.flip(2).unwrap();
        assert!(game.has_pending_mismatch());

        assert_eq!(game.flip(4), Ok(FlipOutcome::Revealed));
        assert_eq!(game.cards()[0].state(), CardState::Hidden);
        assert_eq!(game.cards()[2].state(), CardState::Hidden);
        assert_eq!(game.cards()[4].state(), CardState::Revealed);
    }

    #[test]
    fn flipping_pending_card_is_rejected() {
        let mut game = ordered();
        game.flip(0).unwrap();
        game.flip(2).unwrap();
        assert_eq!(game.flip(2), Err(GameError::AlreadyFaceUp { index: 2 }));
        assert!(game.has_pending_mismatch());
    }

    #[test]
    fn out_of_bounds_leaves_board_alone() {
        let mut game = ordered();
        let before = game.clone();
        assert_eq!(
            game.flip(12),
            Err(GameError::OutOfBounds { index: 12, len: 12 })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn snapshot_restores_mid_game() {
        let mut game = ordered();
        game.flip(0).unwrap();
        game.flip(1).unwrap();
        game.flip(2).unwrap();

        let restored = MatchGame::restore(game.snapshot());
        assert_eq!(restored, game);
    }

    #[test]
    fn layout_must_fill_the_board() {
        let cards: Vec<Card> = (0..4).map(|i| Card::new(i, (i % 2) as u8)).collect();
        assert_eq!(
            MatchGame::with_cards(Difficulty::Easy, cards),
            Err(GameError::WrongCardCount {
                difficulty: Difficulty::Easy,
                expected: 12,
                found: 4,
            })
        );
    }
}
