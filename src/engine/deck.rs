//! Deck construction and shuffling

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::card::{Card, Rank, Suit};
use crate::consts::DECK_SIZE;
use crate::error::GameError;

/// All 52 cards, suit-major (Hearts, Diamonds, Clubs, Spades), Ace first
pub fn new_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

/// Unbiased in-place Fisher-Yates shuffle
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// A full deck shuffled by a PCG stream seeded from `seed`
pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut deck = new_deck();
    shuffle(&mut deck, &mut rng);
    deck
}

/// Reject anything that is not exactly the 52 distinct cards
pub fn validate_deck(deck: &[Card]) -> Result<(), GameError> {
    let unique = deck.iter().collect::<HashSet<_>>().len();
    if deck.len() != DECK_SIZE || unique != DECK_SIZE {
        return Err(GameError::InvalidDeck {
            expected: DECK_SIZE,
            found: deck.len(),
            unique,
        });
    }
    Ok(())
}
