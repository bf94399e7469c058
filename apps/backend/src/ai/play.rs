//! Card selection heuristics.

use rand::Rng;

use crate::domain::{card_beats, legal_plays, Card};

use super::context::{BotScenario, BotTurnContext};

/// Pick a card for the context seat, always from the legal set.
///
/// Returns `None` only for an empty hand, which callers treat as a bug.
pub fn choose_card(ctx: &BotTurnContext, rng: &mut impl Rng) -> Option<Card> {
    let legal = legal_plays(&ctx.hand, &ctx.trick, ctx.spades_broken, ctx.rules.special);
    if legal.is_empty() {
        return None;
    }
    if legal.len() == 1 {
        return Some(legal[0]);
    }

    let card = match ctx.scenario() {
        BotScenario::SelfNil => duck(ctx, &legal),
        BotScenario::CoverNil => cover(ctx, &legal),
        BotScenario::HighPressure => contest(ctx, &legal),
        BotScenario::Normal => normal(ctx, &legal, rng),
    };
    Some(card)
}

/// Cards in `legal` that would take the lead of the current trick.
fn winning_options(ctx: &BotTurnContext, legal: &[Card]) -> Vec<Card> {
    match ctx.winning_so_far() {
        None => legal.to_vec(),
        Some((_, best)) => {
            let lead = ctx.trick[0].1.suit;
            legal
                .iter()
                .copied()
                .filter(|&c| card_beats(c, best, lead))
                .collect()
        }
    }
}

fn lowest(cards: &[Card]) -> Card {
    *cards
        .iter()
        .min_by_key(|c| (c.rank, c.is_spade()))
        .unwrap_or(&cards[0])
}

fn highest(cards: &[Card]) -> Card {
    *cards
        .iter()
        .max_by_key(|c| (c.rank, c.is_spade()))
        .unwrap_or(&cards[0])
}

/// Stay under every trick. Dump the biggest card that still loses; with no
/// losing card available, minimize the damage.
fn duck(ctx: &BotTurnContext, legal: &[Card]) -> Card {
    if ctx.is_leading() {
        return lowest(legal);
    }
    let winning = winning_options(ctx, legal);
    let losing: Vec<Card> = legal
        .iter()
        .copied()
        .filter(|c| !winning.contains(c))
        .collect();
    if losing.is_empty() {
        lowest(legal)
    } else {
        highest(&losing)
    }
}

/// Shield a nil partner: overtake whenever they are currently winning, win
/// cheaply while their card is still to come, and dump once an opponent has
/// them covered.
fn cover(ctx: &BotTurnContext, legal: &[Card]) -> Card {
    if ctx.is_leading() {
        return highest(legal);
    }
    let winning = winning_options(ctx, legal);
    if winning.is_empty() {
        return lowest(legal);
    }
    if ctx.partner_is_winning() {
        // Take the trick off the nil bidder.
        return lowest(&winning);
    }
    if ctx.partner_has_played() {
        // An opponent holds the trick over the nil card; save the winners.
        return lowest(legal);
    }
    lowest(&winning)
}

/// Overbid table: take every winnable trick at minimum cost.
fn contest(ctx: &BotTurnContext, legal: &[Card]) -> Card {
    if ctx.is_leading() {
        return highest(legal);
    }
    let winning = winning_options(ctx, legal);
    if winning.is_empty() {
        lowest(legal)
    } else {
        lowest(&winning)
    }
}

fn normal(ctx: &BotTurnContext, legal: &[Card], rng: &mut impl Rng) -> Card {
    if ctx.is_leading() {
        // Mostly probe with a low card, occasionally cash a high one.
        return if rng.random_range(0..4) == 0 {
            highest(legal)
        } else {
            lowest(legal)
        };
    }

    if ctx.partner_is_winning() && ctx.is_last_to_act() {
        return lowest(legal);
    }

    let winning = winning_options(ctx, legal);
    if winning.is_empty() {
        lowest(legal)
    } else {
        lowest(&winning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rank, RuleSet, Suit, PLAYERS};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn c(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    fn ctx(hand: Vec<Card>, bids: [Option<u8>; PLAYERS], trick: Vec<(u8, Card)>) -> BotTurnContext {
        BotTurnContext {
            seat: 0,
            hand,
            rules: RuleSet::default_partners(),
            bids,
            tricks_won: [0; 4],
            trick,
            spades_broken: false,
        }
    }

    #[test]
    fn nil_bidder_ducks_under_the_trick() {
        let hand = vec![
            c(Suit::Hearts, Rank::Three),
            c(Suit::Hearts, Rank::Jack),
            c(Suit::Hearts, Rank::Ace),
        ];
        let trick = vec![(3, c(Suit::Hearts, Rank::Queen))];
        let context = ctx(hand, [Some(0), Some(3), Some(4), Some(3)], trick);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        // Jack is the biggest heart that still loses to the queen.
        assert_eq!(
            choose_card(&context, &mut rng),
            Some(c(Suit::Hearts, Rank::Jack))
        );
    }

    #[test]
    fn cover_seat_overtakes_winning_nil_partner() {
        let hand = vec![c(Suit::Hearts, Rank::Five), c(Suit::Hearts, Rank::King)];
        // Partner (seat 2) bid nil and currently wins with the queen.
        let trick = vec![
            (1, c(Suit::Hearts, Rank::Four)),
            (2, c(Suit::Hearts, Rank::Queen)),
        ];
        let context = ctx(hand, [Some(4), Some(3), Some(0), Some(3)], trick);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(
            choose_card(&context, &mut rng),
            Some(c(Suit::Hearts, Rank::King))
        );
    }

    #[test]
    fn cover_seat_dumps_once_nil_partner_is_safe() {
        let hand = vec![c(Suit::Hearts, Rank::Five), c(Suit::Hearts, Rank::King)];
        // Partner (seat 2) bid nil, ducked under seat 1's queen; no reason
        // to spend the king.
        let trick = vec![
            (1, c(Suit::Hearts, Rank::Queen)),
            (2, c(Suit::Hearts, Rank::Two)),
        ];
        let context = ctx(hand, [Some(4), Some(3), Some(0), Some(3)], trick);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(
            choose_card(&context, &mut rng),
            Some(c(Suit::Hearts, Rank::Five))
        );
    }

    #[test]
    fn cover_seat_wins_cheaply_before_nil_partner_acts() {
        let hand = vec![c(Suit::Hearts, Rank::King), c(Suit::Hearts, Rank::Ace)];
        // Partner (seat 2) still to play behind seat 1's queen; claim the
        // trick with the cheaper honor.
        let trick = vec![(1, c(Suit::Hearts, Rank::Queen))];
        let context = ctx(hand, [Some(4), Some(3), Some(0), Some(3)], trick);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(
            choose_card(&context, &mut rng),
            Some(c(Suit::Hearts, Rank::King))
        );
    }

    #[test]
    fn chosen_card_is_always_legal() {
        let hand = vec![
            c(Suit::Hearts, Rank::Two),
            c(Suit::Hearts, Rank::Nine),
            c(Suit::Spades, Rank::Ace),
            c(Suit::Clubs, Rank::Four),
        ];
        let trick = vec![(3, c(Suit::Hearts, Rank::Queen))];
        for seed in 0..16u64 {
            let context = ctx(hand.clone(), [Some(3), Some(3), Some(3), Some(3)], trick.clone());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let card = choose_card(&context, &mut rng).unwrap();
            // Holding hearts, the bot must follow hearts.
            assert_eq!(card.suit, Suit::Hearts, "seed {seed}");
        }
    }

    #[test]
    fn single_legal_card_is_forced() {
        let hand = vec![c(Suit::Diamonds, Rank::Seven)];
        let trick = vec![(2, c(Suit::Clubs, Rank::Two))];
        let context = ctx(hand, [Some(3), Some(3), Some(3), Some(3)], trick);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            choose_card(&context, &mut rng),
            Some(c(Suit::Diamonds, Rank::Seven))
        );
    }
}
