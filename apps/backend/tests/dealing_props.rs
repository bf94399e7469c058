//! Property tests for seeded dealing.

mod common;

use std::collections::HashSet;

use proptest::prelude::*;
use spades_backend::domain::{deal_hands, derive_dealing_seed, Card, HAND_SIZE};

proptest! {
    #![proptest_config(common::proptest_config())]

    #[test]
    fn dealt_hands_partition_the_deck(seed in any::<u64>()) {
        let hands = deal_hands(HAND_SIZE, seed).unwrap();

        let mut seen: HashSet<Card> = HashSet::new();
        for hand in &hands {
            prop_assert_eq!(hand.len(), HAND_SIZE as usize);
            for &card in hand {
                prop_assert!(seen.insert(card), "card dealt twice: {:?}", card);
            }
        }
        prop_assert_eq!(seen.len(), 52);
    }

    #[test]
    fn dealing_is_deterministic(seed in any::<u64>()) {
        let first = deal_hands(HAND_SIZE, seed).unwrap();
        let second = deal_hands(HAND_SIZE, seed).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn round_seeds_differ_between_rounds(game_seed in any::<i64>(), round_no in 1i16..50) {
        let this_round = derive_dealing_seed(game_seed, round_no);
        let next_round = derive_dealing_seed(game_seed, round_no + 1);
        prop_assert_ne!(this_round, next_round);
    }
}

#[test]
fn hand_size_must_cover_the_deck() {
    assert!(deal_hands(12, 0).is_err());
    assert!(deal_hands(14, 0).is_err());
}
