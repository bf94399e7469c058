//! Bid selection heuristics.

use rand::Rng;

use crate::domain::{
    bid_constraint, suit_count, whiz_nil_veto, BidAttempt, BidConstraint, Card, Suit,
};

use super::context::BotTurnContext;

/// Pick a bid for the context seat. The result always satisfies the seat's
/// resolved constraint, so validation cannot reject it.
pub fn choose_bid(ctx: &BotTurnContext, rng: &mut impl Rng) -> BidAttempt {
    let constraint = bid_constraint(&ctx.rules, &ctx.hand, ctx.partner_bid());

    match constraint {
        BidConstraint::Exactly(v) => BidAttempt::of(v),
        BidConstraint::ForcedNil => BidAttempt::nil(),
        BidConstraint::ValueOrNil(v) => {
            let partner_nil = ctx.partner_bid() == Some(0);
            if whiz_nil_veto(&ctx.hand, partner_nil).is_some() {
                return BidAttempt::of(v);
            }
            // Take nil when the forced value looks out of reach.
            if estimate_tricks(&ctx.hand) + 1.0 < v as f32 {
                BidAttempt::nil()
            } else {
                BidAttempt::of(v)
            }
        }
        BidConstraint::Range {
            min,
            max,
            nil_allowed,
        } => {
            let mut estimate = estimate_tricks(&ctx.hand);

            let bid_count = ctx.bids.iter().flatten().count();
            if bid_count == 0 {
                // First to speak, nothing known about the table.
                estimate -= 0.5;
            }
            if bid_count == 3 && ctx.table_bid_total() <= 7 {
                // Last to speak into an underbid table.
                estimate += 1.0;
            }

            if nil_allowed && estimate < 1.0 {
                return BidAttempt::nil();
            }

            let jitter = rng.random_range(-1i32..=1) as f32 * 0.25;
            let value = (estimate + jitter).round() as i32;
            BidAttempt::of(value.clamp(min as i32, max as i32) as u8)
        }
    }
}

/// Rough trick estimate for a 13-card hand.
///
/// High cards count by rank and suit depth, long spades are extra winners,
/// short off-suits with spade cover are cut chances.
pub fn estimate_tricks(hand: &[Card]) -> f32 {
    let mut estimate = 0.0f32;
    let spades = suit_count(hand, Suit::Spades);

    for suit in Suit::ALL {
        let depth = suit_count(hand, suit);
        for card in hand.iter().filter(|c| c.suit == suit) {
            estimate += match card.rank {
                crate::domain::Rank::Ace => 1.0,
                crate::domain::Rank::King => {
                    if depth >= 2 {
                        0.75
                    } else {
                        0.5
                    }
                }
                crate::domain::Rank::Queen => {
                    if depth >= 3 {
                        0.5
                    } else {
                        0.25
                    }
                }
                _ => 0.0,
            };
        }

        // Void or singleton off-suits are cut opportunities.
        if suit != Suit::Spades && spades >= 3 {
            estimate += match depth {
                0 => 1.0,
                1 => 0.5,
                _ => 0.0,
            };
        }
    }

    // Spade length beyond three is worth a trick apiece.
    if spades > 3 {
        estimate += (spades - 3) as f32;
    }

    estimate
}
