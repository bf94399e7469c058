//! Bid validation against the resolved rule constraint.

use crate::domain::cards::{suit_count, Card, Rank, Suit};
use crate::domain::rules::{bid_constraint, GameFormat, RuleSet};
use crate::errors::domain::{DomainError, ValidationKind};

/// A bid as submitted by a seat (human, bot or auto-play alike).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidAttempt {
    pub value: u8,
    pub blind: bool,
}

impl BidAttempt {
    pub fn of(value: u8) -> Self {
        Self {
            value,
            blind: false,
        }
    }

    pub fn nil() -> Self {
        Self::of(0)
    }

    pub fn blind_nil() -> Self {
        Self {
            value: 0,
            blind: true,
        }
    }

    pub fn is_nil(&self) -> bool {
        self.value == 0
    }
}

/// Hand conditions that forbid a voluntary nil in the Whiz format.
///
/// Returns the first matching reason, or `None` when nil is safe. A hand
/// with no spades never reaches this check (nil is forced instead).
pub fn whiz_nil_veto(hand: &[Card], partner_bid_nil: bool) -> Option<&'static str> {
    if partner_bid_nil {
        return Some("partner already bid nil");
    }
    if hand
        .iter()
        .any(|c| c.suit == Suit::Spades && c.rank == Rank::Ace)
    {
        return Some("holds the ace of spades");
    }
    let has_ks = hand
        .iter()
        .any(|c| c.suit == Suit::Spades && c.rank == Rank::King);
    let has_qs = hand
        .iter()
        .any(|c| c.suit == Suit::Spades && c.rank == Rank::Queen);
    if has_ks && has_qs {
        return Some("holds the king and queen of spades");
    }
    if suit_count(hand, Suit::Spades) > 3 {
        return Some("holds more than three spades");
    }
    for suit in [Suit::Clubs, Suit::Diamonds, Suit::Hearts] {
        let len = suit_count(hand, suit);
        let has_ace = hand.iter().any(|c| c.suit == suit && c.rank == Rank::Ace);
        let has_king = hand.iter().any(|c| c.suit == suit && c.rank == Rank::King);
        if has_ace && len <= 3 {
            return Some("holds a poorly covered off-suit ace");
        }
        if has_king && len <= 2 {
            return Some("holds a poorly covered off-suit king");
        }
    }
    None
}

/// Validate a bid attempt for the given rule set and hand.
///
/// `partner_bid` is the partner's already-placed bid, if any.
pub fn validate_bid(
    rules: &RuleSet,
    hand: &[Card],
    partner_bid: Option<u8>,
    attempt: BidAttempt,
) -> Result<(), DomainError> {
    if attempt.value > 13 {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            format!("Bid {} out of range", attempt.value),
        ));
    }

    if attempt.blind {
        if !rules.allow_blind_nil {
            return Err(DomainError::validation(
                ValidationKind::BlindNilForbidden,
                "Blind nil is disabled for this game",
            ));
        }
        if !attempt.is_nil() {
            return Err(DomainError::validation(
                ValidationKind::InvalidBid,
                "Blind bids must be nil",
            ));
        }
    }

    let constraint = bid_constraint(rules, hand, partner_bid);
    if !constraint.allows(attempt.value) {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            format!("Bid {} not allowed by format", attempt.value),
        ));
    }

    // A voluntary Whiz nil must pass the veto list; a spadeless hand is a
    // forced nil and skips it.
    if rules.format == GameFormat::Whiz
        && attempt.is_nil()
        && suit_count(hand, Suit::Spades) > 0
    {
        if let Some(reason) = whiz_nil_veto(hand, partner_bid == Some(0)) {
            return Err(DomainError::validation(
                ValidationKind::NilForbidden,
                format!("Nil not allowed: {reason}"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::GimmickVariant;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    fn filler(suit: Suit, n: usize) -> Vec<Card> {
        Rank::ALL
            .iter()
            .take(n)
            .map(|r| card(suit, *r))
            .collect()
    }

    #[test]
    fn whiz_nil_rejected_with_ace_of_spades() {
        let rules = RuleSet {
            format: GameFormat::Whiz,
            ..RuleSet::default_partners()
        };
        let mut hand = vec![card(Suit::Spades, Rank::Ace)];
        hand.extend(filler(Suit::Clubs, 6));
        hand.extend(filler(Suit::Diamonds, 6));

        let err = validate_bid(&rules, &hand, None, BidAttempt::nil()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::NilForbidden, _)
        ));
    }

    #[test]
    fn whiz_nil_rejected_with_king_queen_of_spades() {
        let hand = vec![
            card(Suit::Spades, Rank::King),
            card(Suit::Spades, Rank::Queen),
        ];
        assert_eq!(
            whiz_nil_veto(&hand, false),
            Some("holds the king and queen of spades")
        );
    }

    #[test]
    fn whiz_nil_rejected_with_four_spades() {
        let mut hand = vec![
            card(Suit::Spades, Rank::Two),
            card(Suit::Spades, Rank::Three),
            card(Suit::Spades, Rank::Four),
            card(Suit::Spades, Rank::Five),
        ];
        hand.extend(filler(Suit::Hearts, 5));
        assert_eq!(whiz_nil_veto(&hand, false), Some("holds more than three spades"));
    }

    #[test]
    fn whiz_nil_rejected_with_short_off_suit_ace() {
        let hand = vec![
            card(Suit::Spades, Rank::Two),
            card(Suit::Hearts, Rank::Ace),
            card(Suit::Hearts, Rank::Two),
            card(Suit::Hearts, Rank::Three),
        ];
        assert_eq!(
            whiz_nil_veto(&hand, false),
            Some("holds a poorly covered off-suit ace")
        );
    }

    #[test]
    fn whiz_nil_rejected_when_partner_bid_nil() {
        let hand = vec![card(Suit::Spades, Rank::Two)];
        assert_eq!(whiz_nil_veto(&hand, true), Some("partner already bid nil"));
    }

    #[test]
    fn whiz_nil_allowed_on_safe_hand() {
        let mut hand = vec![card(Suit::Spades, Rank::Two)];
        hand.extend(filler(Suit::Clubs, 6));
        hand.extend(filler(Suit::Diamonds, 6));
        // Low spade, deep off-suits without bare honors
        assert_eq!(whiz_nil_veto(&hand, false), None);

        let rules = RuleSet {
            format: GameFormat::Whiz,
            ..RuleSet::default_partners()
        };
        assert!(validate_bid(&rules, &hand, None, BidAttempt::nil()).is_ok());
    }

    #[test]
    fn blind_nil_requires_setting() {
        let rules = RuleSet::default_partners();
        let hand = filler(Suit::Clubs, 13);
        let err = validate_bid(&rules, &hand, None, BidAttempt::blind_nil()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::BlindNilForbidden, _)
        ));

        let rules = RuleSet {
            allow_blind_nil: true,
            ..RuleSet::default_partners()
        };
        assert!(validate_bid(&rules, &hand, None, BidAttempt::blind_nil()).is_ok());
    }

    #[test]
    fn bid_above_thirteen_rejected() {
        let rules = RuleSet::default_partners();
        let hand = filler(Suit::Clubs, 13);
        assert!(validate_bid(&rules, &hand, None, BidAttempt::of(14)).is_err());
    }

    #[test]
    fn suicide_rejects_nil_once_partner_bid_nil() {
        let rules = RuleSet {
            format: GameFormat::Gimmick,
            gimmick: Some(GimmickVariant::Suicide),
            ..RuleSet::default_partners()
        };
        let hand = filler(Suit::Clubs, 13);

        let err = validate_bid(&rules, &hand, Some(0), BidAttempt::nil()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::InvalidBid, _)
        ));
        assert!(validate_bid(&rules, &hand, Some(0), BidAttempt::of(4)).is_ok());
        // Before the partner speaks, nil is still on the table.
        assert!(validate_bid(&rules, &hand, None, BidAttempt::nil()).is_ok());
    }

    #[test]
    fn bid_three_gimmick_only_accepts_three() {
        let rules = RuleSet {
            format: GameFormat::Gimmick,
            gimmick: Some(GimmickVariant::Bid3),
            ..RuleSet::default_partners()
        };
        let hand = filler(Suit::Clubs, 13);
        assert!(validate_bid(&rules, &hand, None, BidAttempt::of(3)).is_ok());
        assert!(validate_bid(&rules, &hand, None, BidAttempt::of(4)).is_err());
        assert!(validate_bid(&rules, &hand, None, BidAttempt::nil()).is_err());
    }
}
