use proptest::prelude::*;

use crate::domain::cards::{Card, Rank, Suit};
use crate::domain::dealing::deal_hands;
use crate::domain::rules::SpecialRules;
use crate::domain::state::Seat;
use crate::domain::tricks::{legal_plays, trick_winner};

fn arb_card() -> impl Strategy<Value = Card> {
    (0usize..4, 0usize..13).prop_map(|(s, r)| Card::new(Suit::ALL[s], Rank::ALL[r]))
}

/// Four distinct cards forming a trick, seats 0..=3 in play order.
fn arb_trick() -> impl Strategy<Value = Vec<(Seat, Card)>> {
    proptest::collection::hash_set(arb_card(), 4).prop_map(|set| {
        set.into_iter()
            .enumerate()
            .map(|(seat, card)| (seat as Seat, card))
            .collect()
    })
}

fn arb_hand() -> impl Strategy<Value = Vec<Card>> {
    proptest::collection::hash_set(arb_card(), 1..=13)
        .prop_map(|set| set.into_iter().collect::<Vec<Card>>())
}

fn arb_special() -> impl Strategy<Value = SpecialRules> {
    (0u8..4, 0u8..3).prop_map(|(pressure, ball)| SpecialRules {
        assassin: pressure == 1,
        screamer: pressure == 2,
        lowball: ball == 1,
        highball: ball == 2,
    })
}

proptest! {
    #[test]
    fn trick_winner_played_into_the_trick(plays in arb_trick()) {
        let winner = trick_winner(&plays).unwrap();
        prop_assert!(plays.iter().any(|&(seat, _)| seat == winner));
    }

    #[test]
    fn trick_winner_holds_a_spade_when_any_was_played(plays in arb_trick()) {
        let winner = trick_winner(&plays).unwrap();
        let winner_card = plays.iter().find(|&&(s, _)| s == winner).unwrap().1;

        if plays.iter().any(|&(_, c)| c.is_spade()) {
            prop_assert!(winner_card.is_spade());
            let best_spade = plays
                .iter()
                .filter(|&&(_, c)| c.is_spade())
                .map(|&(_, c)| c.rank)
                .max()
                .unwrap();
            prop_assert_eq!(winner_card.rank, best_spade);
        } else {
            let lead = plays[0].1.suit;
            prop_assert_eq!(winner_card.suit, lead);
            let best_lead = plays
                .iter()
                .filter(|&&(_, c)| c.suit == lead)
                .map(|&(_, c)| c.rank)
                .max()
                .unwrap();
            prop_assert_eq!(winner_card.rank, best_lead);
        }
    }

    #[test]
    fn legal_plays_is_a_nonempty_subset_of_the_hand(
        hand in arb_hand(),
        trick in prop::option::of(arb_trick()),
        spades_broken in any::<bool>(),
        special in arb_special(),
    ) {
        let trick_slice: Vec<(Seat, Card)> = trick.unwrap_or_default();
        // A trick of 4 plays means the trick is over; only consider 0..=3.
        let trick_slice = &trick_slice[..trick_slice.len().min(3)];

        let legal = legal_plays(&hand, trick_slice, spades_broken, special);
        prop_assert!(!legal.is_empty());
        for card in &legal {
            prop_assert!(hand.contains(card));
        }
    }

    #[test]
    fn legal_plays_follow_suit_when_possible(
        hand in arb_hand(),
        lead in arb_card(),
        special in arb_special(),
    ) {
        let trick = vec![(0 as Seat, lead)];
        let legal = legal_plays(&hand, &trick, true, special);
        if hand.iter().any(|c| c.suit == lead.suit) {
            for card in &legal {
                prop_assert_eq!(card.suit, lead.suit);
            }
        }
    }

    #[test]
    fn dealt_hands_partition_the_deck(seed in any::<u64>()) {
        let hands = deal_hands(13, seed).unwrap();
        let mut seen = std::collections::HashSet::new();
        for hand in &hands {
            prop_assert_eq!(hand.len(), 13);
            for card in hand {
                prop_assert!(seen.insert(*card));
            }
        }
        prop_assert_eq!(seen.len(), 52);
    }
}
