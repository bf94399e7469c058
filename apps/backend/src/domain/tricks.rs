//! Play legality and trick resolution.
//!
//! `legal_plays` is the single legality predicate: human validation, bot
//! choice and timeout auto-play all filter through it with identical inputs.

use crate::domain::cards::{card_beats, cards_of_suit, hand_has_suit, Card, Suit};
use crate::domain::rules::SpecialRules;
use crate::domain::state::Seat;
use crate::errors::domain::{DomainError, ValidationKind};

/// Compute the set of cards a hand may legally play into the current trick.
///
/// `trick` holds the plays so far in play order; empty means this seat leads.
pub fn legal_plays(
    hand: &[Card],
    trick: &[(Seat, Card)],
    spades_broken: bool,
    special: SpecialRules,
) -> Vec<Card> {
    if hand.is_empty() {
        return Vec::new();
    }

    let base = match trick.first() {
        Some(&(_, lead_card)) => {
            let lead = lead_card.suit;
            if hand_has_suit(hand, lead) {
                cards_of_suit(hand, lead)
            } else {
                void_options(hand, special)
            }
        }
        None => lead_options(hand, spades_broken, special),
    };

    let mut result = apply_ball_rules(base, special);
    result.sort();
    result
}

/// Options when leading a trick.
fn lead_options(hand: &[Card], spades_broken: bool, special: SpecialRules) -> Vec<Card> {
    let non_spades: Vec<Card> = hand.iter().copied().filter(|c| !c.is_spade()).collect();
    if non_spades.is_empty() {
        // Only spades left: always allowed.
        return hand.to_vec();
    }
    if !spades_broken {
        return non_spades;
    }
    if special.assassin && hand_has_suit(hand, Suit::Spades) {
        // Assassin: once broken, must lead a spade when holding one.
        return cards_of_suit(hand, Suit::Spades);
    }
    if special.screamer {
        // Screamer: never lead a spade unless forced.
        return non_spades;
    }
    hand.to_vec()
}

/// Options when void in the lead suit.
fn void_options(hand: &[Card], special: SpecialRules) -> Vec<Card> {
    if special.assassin && hand_has_suit(hand, Suit::Spades) {
        // Assassin: must cut with a spade when void.
        return cards_of_suit(hand, Suit::Spades);
    }
    if special.screamer {
        let non_spades: Vec<Card> = hand.iter().copied().filter(|c| !c.is_spade()).collect();
        if !non_spades.is_empty() {
            return non_spades;
        }
    }
    hand.to_vec()
}

/// Lowball/highball keep only the lowest/highest card of each playable suit.
fn apply_ball_rules(cards: Vec<Card>, special: SpecialRules) -> Vec<Card> {
    if !special.lowball && !special.highball {
        return cards;
    }
    let mut kept: Vec<Card> = Vec::with_capacity(4);
    for suit in Suit::ALL {
        let of_suit = cards_of_suit(&cards, suit);
        let pick = if special.lowball {
            of_suit.iter().copied().min_by_key(|c| c.rank)
        } else {
            of_suit.iter().copied().max_by_key(|c| c.rank)
        };
        if let Some(card) = pick {
            kept.push(card);
        }
    }
    kept
}

/// Winner of a completed trick: highest spade if any was played, otherwise
/// the highest card of the lead suit.
pub fn trick_winner(plays: &[(Seat, Card)]) -> Result<Seat, DomainError> {
    let Some(&(lead_seat, lead_card)) = plays.first() else {
        return Err(DomainError::validation_other(
            "Cannot resolve an empty trick",
        ));
    };
    if plays.len() != 4 {
        return Err(DomainError::validation_other(
            "Cannot resolve an incomplete trick",
        ));
    }

    let lead = lead_card.suit;
    let mut best = (lead_seat, lead_card);
    for &(seat, card) in &plays[1..] {
        if card_beats(card, best.1, lead) {
            best = (seat, card);
        }
    }
    Ok(best.0)
}

/// Check a single play against the legal set, mapping the failure to a
/// specific rule violation for the rejection broadcast.
pub fn check_play(
    hand: &[Card],
    trick: &[(Seat, Card)],
    spades_broken: bool,
    special: SpecialRules,
    card: Card,
) -> Result<(), DomainError> {
    if !hand.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            "Card not in hand",
        ));
    }

    let legal = legal_plays(hand, trick, spades_broken, special);
    if legal.contains(&card) {
        return Ok(());
    }

    // Diagnose the most specific violated rule.
    if let Some(&(_, lead_card)) = trick.first() {
        let lead = lead_card.suit;
        if hand_has_suit(hand, lead) && card.suit != lead {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                "Must follow the lead suit",
            ));
        }
        if special.assassin && !card.is_spade() && hand_has_suit(hand, Suit::Spades) {
            return Err(DomainError::validation(
                ValidationKind::MustPlaySpade,
                "Assassin: must cut with a spade when void",
            ));
        }
        if special.screamer && card.is_spade() {
            return Err(DomainError::validation(
                ValidationKind::SpadeForbidden,
                "Screamer: spades only when no other option",
            ));
        }
    } else {
        if card.is_spade() && !spades_broken {
            return Err(DomainError::validation(
                ValidationKind::SpadesNotBroken,
                "Spades have not been broken",
            ));
        }
        if special.assassin && !card.is_spade() && spades_broken && hand_has_suit(hand, Suit::Spades)
        {
            return Err(DomainError::validation(
                ValidationKind::MustPlaySpade,
                "Assassin: must lead a spade once broken",
            ));
        }
        if special.screamer && card.is_spade() {
            return Err(DomainError::validation(
                ValidationKind::SpadeForbidden,
                "Screamer: spades only when no other option",
            ));
        }
    }

    if special.lowball {
        return Err(DomainError::validation(
            ValidationKind::NotLowestOfSuit,
            "Lowball: must play the lowest card of the suit",
        ));
    }
    if special.highball {
        return Err(DomainError::validation(
            ValidationKind::NotHighestOfSuit,
            "Highball: must play the highest card of the suit",
        ));
    }

    Err(DomainError::validation(
        ValidationKind::MustFollowSuit,
        "Card is not a legal play",
    ))
}
