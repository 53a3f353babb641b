//! Deck construction and deterministic shuffling.
//!
//! Shuffles are driven by a small seedable LCG so that a given seed always
//! produces the same layout. The daily challenge relies on this: every
//! player gets the same board for the same calendar date.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, instrument};

use super::card::Card;

/// Linear congruential generator (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Creates a generator. A zero seed is replaced by 1.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Next raw value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Fisher–Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Builder for a shuffled set of paired cards.
#[derive(Debug)]
pub struct Deck;

impl Deck {
    /// Builds `2 * pairs` cards (symbols `0..pairs`, each twice) and shuffles them.
    ///
    /// Symbols are `u8`, so at most 256 pairs are dealt; larger requests are
    /// capped rather than reusing a symbol. Card ids are the positions after
    /// shuffling.
    #[instrument(skip(rng))]
    pub fn shuffled(pairs: usize, rng: &mut SeededRng) -> Vec<Card> {
        let mut symbols: Vec<u8> = (0..=u8::MAX)
            .take(pairs)
            .flat_map(|s| [s, s])
            .collect();
        rng.shuffle(&mut symbols);
        debug!(cards = symbols.len(), "Deck shuffled");
        symbols
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| Card::new(id, symbol))
            .collect()
    }
}

/// Seed shared by every daily challenge played on `date`.
#[instrument]
pub fn daily_seed(date: NaiveDate) -> u32 {
    date.year() as u32 * 10_000 + date.month() * 100 + date.day()
}

/// Seed for an ordinary game, taken from the wall clock.
#[instrument]
pub fn clock_seed() -> u32 {
    let now = chrono::Utc::now();
    now.timestamp_subsec_nanos() ^ (now.timestamp() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn zero_seed_is_not_degenerate() {
        let mut a = SeededRng::new(0);
        let mut b = SeededRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn next_range_stays_in_bounds() {
        let mut rng = SeededRng::new(42);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn every_symbol_appears_twice() {
        let mut rng = SeededRng::new(9);
        let cards = Deck::shuffled(8, &mut rng);
        assert_eq!(cards.len(), 16);

        let mut counts: HashMap<u8, usize> = HashMap::new();
        for card in &cards {
            *counts.entry(*card.symbol()).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn same_seed_same_layout() {
        let a = Deck::shuffled(12, &mut SeededRng::new(20260101));
        let b = Deck::shuffled(12, &mut SeededRng::new(20260101));
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_deck_never_repeats_a_symbol() {
        let cards = Deck::shuffled(300, &mut SeededRng::new(4));
        assert_eq!(cards.len(), 512);

        let mut counts: HashMap<u8, usize> = HashMap::new();
        for card in &cards {
            *counts.entry(*card.symbol()).or_default() += 1;
        }
        assert_eq!(counts.len(), 256);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn ids_follow_positions() {
        let cards = Deck::shuffled(6, &mut SeededRng::new(3));
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(*card.id(), i);
        }
    }

    #[test]
    fn daily_seed_encodes_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(daily_seed(date), 20261018);
    }
}
