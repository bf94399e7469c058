//! Bot decisions must be deterministic for a given seed and always legal.

mod common;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use spades_backend::ai::{choose_bid, choose_card, BotTurnContext};
use spades_backend::domain::{
    deal_hands, derive_decision_seed, legal_plays, validate_bid, RuleSet, Seat, HAND_SIZE, PLAYERS,
};

fn context_for(seat: Seat, hand: Vec<spades_backend::domain::Card>) -> BotTurnContext {
    BotTurnContext {
        seat,
        hand,
        rules: RuleSet::default_partners(),
        bids: [None; PLAYERS],
        tricks_won: [0; PLAYERS],
        trick: Vec::new(),
        spades_broken: false,
    }
}

proptest! {
    #![proptest_config(common::proptest_config())]

    #[test]
    fn chosen_bids_pass_validation(deal_seed in any::<u64>()) {
        let hands = deal_hands(HAND_SIZE, deal_seed).unwrap();
        for seat in 0..PLAYERS as Seat {
            let ctx = context_for(seat, hands[seat as usize].clone());
            let mut rng = ChaCha8Rng::seed_from_u64(deal_seed ^ seat as u64);
            let attempt = choose_bid(&ctx, &mut rng);
            prop_assert!(
                validate_bid(&ctx.rules, &ctx.hand, None, attempt).is_ok(),
                "seat {} produced invalid bid {:?}", seat, attempt
            );
        }
    }

    #[test]
    fn same_seed_picks_the_same_bid(game_seed in any::<i64>(), deal_seed in any::<u64>()) {
        let hands = deal_hands(HAND_SIZE, deal_seed).unwrap();
        let ctx = context_for(0, hands[0].clone());
        let seed = derive_decision_seed(game_seed, 1, 0);

        let first = choose_bid(&ctx, &mut ChaCha8Rng::seed_from_u64(seed));
        let second = choose_bid(&ctx, &mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn chosen_cards_are_always_legal(deal_seed in any::<u64>()) {
        let hands = deal_hands(HAND_SIZE, deal_seed).unwrap();
        for seat in 0..PLAYERS as Seat {
            let mut ctx = context_for(seat, hands[seat as usize].clone());
            ctx.bids = [Some(3), Some(3), Some(3), Some(4)];

            let mut rng = ChaCha8Rng::seed_from_u64(deal_seed);
            let card = choose_card(&ctx, &mut rng).unwrap();
            let legal = legal_plays(&ctx.hand, &ctx.trick, ctx.spades_broken, ctx.rules.special);
            prop_assert!(legal.contains(&card), "seat {} led illegal {:?}", seat, card);
        }
    }
}
