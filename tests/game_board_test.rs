//! Tests for dealing and playing boards through the public API.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use memory_match::{CardState, Difficulty, FlipOutcome, GameError, MatchGame, Phase};

fn pairs_of(game: &MatchGame) -> Vec<[usize; 2]> {
    let mut by_symbol: HashMap<u8, Vec<usize>> = HashMap::new();
    for (i, card) in game.cards().iter().enumerate() {
        by_symbol.entry(*card.symbol()).or_default().push(i);
    }
    let mut pairs: Vec<[usize; 2]> = by_symbol
        .into_values()
        .map(|v| {
            assert_eq!(v.len(), 2, "every symbol appears exactly twice");
            [v[0], v[1]]
        })
        .collect();
    pairs.sort();
    pairs
}

#[test]
fn test_every_difficulty_deals_full_grid() {
    for difficulty in Difficulty::iter() {
        let game = MatchGame::new(difficulty, 42);
        assert_eq!(game.cards().len(), difficulty.columns() * difficulty.rows());
        assert_eq!(game.pair_count(), difficulty.pair_count());
        assert_eq!(pairs_of(&game).len(), difficulty.pair_count());
        assert!(game.cards().iter().all(|c| c.state() == CardState::Hidden));
    }
}

#[test]
fn test_same_seed_same_layout() {
    let a = MatchGame::new(Difficulty::Hard, 7);
    let b = MatchGame::new(Difficulty::Hard, 7);
    assert_eq!(a, b);
}

#[test]
fn test_perfect_game_completes_in_pair_count_moves() {
    let mut game = MatchGame::new(Difficulty::Medium, 1234);
    let pairs = pairs_of(&game);
    let last = pairs.len() - 1;

    for (n, [a, b]) in pairs.into_iter().enumerate() {
        assert_eq!(game.flip(a), Ok(FlipOutcome::Revealed));
        let outcome = game.flip(b).unwrap();
        if n == last {
            assert_eq!(outcome, FlipOutcome::Completed { first: a, second: b });
        } else {
            assert_eq!(outcome, FlipOutcome::Matched { first: a, second: b });
        }
    }

    assert!(game.is_completed());
    assert_eq!(game.moves(), 8);
    assert_eq!(game.matched_pairs(), 8);
    assert!(game.cards().iter().all(|c| c.state() == CardState::Matched));
    assert_eq!(game.flip(0), Err(GameError::GameOver));
}

#[test]
fn test_mismatch_then_next_flip_hides_pair() {
    let mut game = MatchGame::new(Difficulty::Easy, 99);
    let pairs = pairs_of(&game);
    let (a, b, c) = (pairs[0][0], pairs[1][0], pairs[2][0]);

    game.flip(a).unwrap();
    assert_eq!(
        game.flip(b),
        Ok(FlipOutcome::Mismatched { first: a, second: b })
    );
    assert_eq!(game.phase(), Phase::Mismatch { first: a, second: b });
    assert_eq!(game.flip(a), Err(GameError::AlreadyFaceUp { index: a }));

    game.flip(c).unwrap();
    assert_eq!(game.cards()[a].state(), CardState::Hidden);
    assert_eq!(game.cards()[b].state(), CardState::Hidden);
    assert_eq!(game.cards()[c].state(), CardState::Revealed);
    assert_eq!(game.moves(), 1);
}

#[test]
fn test_invalid_flips_leave_board_unchanged() {
    let mut game = MatchGame::new(Difficulty::Easy, 5);
    let before = game.clone();
    assert_eq!(
        game.flip(12),
        Err(GameError::OutOfBounds { index: 12, len: 12 })
    );
    assert_eq!(game, before);

    game.flip(3).unwrap();
    let before = game.clone();
    assert_eq!(game.flip(3), Err(GameError::AlreadyFaceUp { index: 3 }));
    assert_eq!(game, before);
}

#[test]
fn test_snapshot_restores_mid_game() {
    let mut game = MatchGame::new(Difficulty::Medium, 2026);
    let [a, b] = pairs_of(&game)[0];
    game.flip(a).unwrap();
    game.flip(b).unwrap();
    let other = (0..game.cards().len()).find(|i| *i != a && *i != b).unwrap();
    game.flip(other).unwrap();

    let json = serde_json::to_string(&game.snapshot()).unwrap();
    let restored = MatchGame::restore(serde_json::from_str(&json).unwrap());
    assert_eq!(restored, game);
}
