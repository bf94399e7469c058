//! Deterministic card dealing logic.

use crate::domain::cards::{Card, Rank, Suit};
use crate::domain::state::PLAYERS;
use crate::errors::domain::{DomainError, ValidationKind};

/// Generate a full 52-card deck in standard order.
fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Simple deterministic RNG for shuffling.
///
/// Uses a SplitMix64-style generator for good statistical properties while
/// remaining fast and deterministic given a seed.
struct SimpleLcg {
    state: u64,
}

impl SimpleLcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        // SplitMix64: well-distributed 64-bit generator.
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Largest multiple of m that fits in u64, to avoid modulo bias.
        // Values >= limit are discarded using rejection sampling.
        let limit = u64::MAX - (u64::MAX % m);

        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using deterministic RNG.
fn shuffle_with_seed(deck: &mut [Card], seed: u64) {
    let mut rng = SimpleLcg::new(seed);
    for i in (1..deck.len()).rev() {
        let j = rng.next_range(i + 1);
        deck.swap(i, j);
    }
}

/// Deal the full deck into four 13-card hands, deterministically per seed.
///
/// Hands are sorted for stable snapshots.
pub fn deal_hands(hand_size: u8, seed: u64) -> Result<[Vec<Card>; PLAYERS], DomainError> {
    if hand_size as usize * PLAYERS != 52 {
        return Err(DomainError::validation(
            ValidationKind::InvalidHandSize,
            "Hand size must cover the full deck",
        ));
    }

    let mut deck = full_deck();
    shuffle_with_seed(&mut deck, seed);

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for (seat, hand_slot) in hands.iter_mut().enumerate() {
        let start = seat * hand_size as usize;
        let end = start + hand_size as usize;
        let mut hand = deck[start..end].to_vec();
        hand.sort();
        *hand_slot = hand;
    }

    Ok(hands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_hands_is_deterministic() {
        let h1 = deal_hands(13, 12345).unwrap();
        let h2 = deal_hands(13, 12345).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn deal_hands_different_seeds_differ() {
        let h1 = deal_hands(13, 12345).unwrap();
        let h2 = deal_hands(13, 54321).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn deal_hands_validates_hand_size() {
        assert!(deal_hands(12, 12345).is_err());
        assert!(deal_hands(13, 12345).is_ok());
    }

    #[test]
    fn deal_hands_are_sorted() {
        let hands = deal_hands(13, 99999).unwrap();
        for hand in &hands {
            let mut sorted = hand.clone();
            sorted.sort();
            assert_eq!(hand, &sorted);
        }
    }

    #[test]
    fn deal_hands_cover_deck_without_duplicates() {
        let hands = deal_hands(13, 42).unwrap();
        let mut all_cards: Vec<&Card> = Vec::new();
        for hand in &hands {
            all_cards.extend(hand.iter());
        }
        assert_eq!(all_cards.len(), 52);
        for i in 0..all_cards.len() {
            for j in (i + 1)..all_cards.len() {
                assert_ne!(all_cards[i], all_cards[j], "Duplicate card found");
            }
        }
    }
}
