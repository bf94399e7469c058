//! Rule descriptors: mode, format, gimmick and special-rule flags.
//!
//! The format/gimmick dispatch is resolved once per round into a
//! [`BidConstraint`] so human validation, bot bidding and timeout auto-play
//! all consult the same closed set of legality predicates.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{suit_count, Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_POINTS_FLOOR: i32 = -1000;
pub const MAX_POINTS_CEILING: i32 = 10000;
pub const DEFAULT_MIN_POINTS: i32 = -500;
pub const DEFAULT_MAX_POINTS: i32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    Partners,
    Solo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameFormat {
    Regular,
    Whiz,
    Mirrors,
    Gimmick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GimmickVariant {
    Suicide,
    #[serde(rename = "BID_4_OR_NIL")]
    Bid4OrNil,
    #[serde(rename = "BID_3")]
    Bid3,
    BidHearts,
    CrazyAces,
}

/// Play-constraining special rules. At most one of lowball/highball is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRules {
    pub assassin: bool,
    pub screamer: bool,
    pub lowball: bool,
    pub highball: bool,
}

/// Full rule set for a game, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub mode: GameMode,
    pub format: GameFormat,
    pub gimmick: Option<GimmickVariant>,
    pub special: SpecialRules,
    pub allow_nil: bool,
    pub allow_blind_nil: bool,
    pub min_points: i32,
    pub max_points: i32,
}

impl RuleSet {
    /// Check internal consistency of a rule set at game creation.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.format == GameFormat::Gimmick && self.gimmick.is_none() {
            return Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                "Gimmick format requires a gimmick variant",
            ));
        }
        if self.format != GameFormat::Gimmick && self.gimmick.is_some() {
            return Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                "Gimmick variant requires the gimmick format",
            ));
        }
        if self.special.lowball && self.special.highball {
            return Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                "Lowball and highball are mutually exclusive",
            ));
        }
        if self.special.assassin && self.special.screamer {
            return Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                "Assassin and screamer are mutually exclusive",
            ));
        }
        if self.min_points < MIN_POINTS_FLOOR
            || self.max_points > MAX_POINTS_CEILING
            || self.min_points >= self.max_points
        {
            return Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                "Point thresholds out of range",
            ));
        }
        if self.mode == GameMode::Solo && self.gimmick == Some(GimmickVariant::Suicide) {
            return Err(DomainError::validation(
                ValidationKind::InvalidSettings,
                "Suicide requires partners mode",
            ));
        }
        Ok(())
    }

    pub fn default_partners() -> Self {
        Self {
            mode: GameMode::Partners,
            format: GameFormat::Regular,
            gimmick: None,
            special: SpecialRules::default(),
            allow_nil: true,
            allow_blind_nil: false,
            min_points: DEFAULT_MIN_POINTS,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

/// What bid values a seat may submit, resolved from format, gimmick and hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidConstraint {
    /// Any value in `min..=max`, nil (0) allowed iff `nil_allowed`.
    Range { min: u8, max: u8, nil_allowed: bool },
    /// A single forced value.
    Exactly(u8),
    /// The forced value or nil.
    ValueOrNil(u8),
    /// Nil only (e.g. suicide with a committed partner).
    ForcedNil,
}

impl BidConstraint {
    pub fn allows(&self, bid: u8) -> bool {
        match *self {
            BidConstraint::Range {
                min,
                max,
                nil_allowed,
            } => (bid == 0 && nil_allowed) || (bid >= min && bid <= max),
            BidConstraint::Exactly(v) => bid == v,
            BidConstraint::ValueOrNil(v) => bid == v || bid == 0,
            BidConstraint::ForcedNil => bid == 0,
        }
    }

    /// A safe legal value, used as the last-resort fallback for auto-play.
    pub fn fallback(&self) -> u8 {
        match *self {
            BidConstraint::Range { min, .. } => min,
            BidConstraint::Exactly(v) => v,
            BidConstraint::ValueOrNil(v) => v,
            BidConstraint::ForcedNil => 0,
        }
    }
}

/// Resolve the bid constraint for a seat about to bid.
///
/// `partner_bid` is the partner's bid if already placed (`Some(0)` means the
/// partner bid nil). Whiz nil vetoes are handled by the bidding module on
/// top of this constraint.
pub fn bid_constraint(rules: &RuleSet, hand: &[Card], partner_bid: Option<u8>) -> BidConstraint {
    match rules.format {
        GameFormat::Regular => BidConstraint::Range {
            min: 1,
            max: 13,
            nil_allowed: rules.allow_nil,
        },
        GameFormat::Whiz => {
            let spades = suit_count(hand, Suit::Spades) as u8;
            if spades == 0 {
                BidConstraint::ForcedNil
            } else {
                BidConstraint::ValueOrNil(spades)
            }
        }
        GameFormat::Mirrors => {
            let spades = suit_count(hand, Suit::Spades) as u8;
            if spades == 0 {
                BidConstraint::ForcedNil
            } else {
                BidConstraint::Exactly(spades)
            }
        }
        GameFormat::Gimmick => match rules.gimmick {
            Some(GimmickVariant::Suicide) => match partner_bid {
                Some(p) if p > 0 => BidConstraint::ForcedNil,
                // Partner took the pair's nil; this seat must carry a contract.
                Some(_) => BidConstraint::Range {
                    min: 1,
                    max: 13,
                    nil_allowed: false,
                },
                None => BidConstraint::Range {
                    min: 1,
                    max: 13,
                    nil_allowed: true,
                },
            },
            Some(GimmickVariant::Bid4OrNil) => BidConstraint::ValueOrNil(4),
            Some(GimmickVariant::Bid3) => BidConstraint::Exactly(3),
            Some(GimmickVariant::BidHearts) => {
                let hearts = suit_count(hand, Suit::Hearts) as u8;
                BidConstraint::Exactly(hearts)
            }
            Some(GimmickVariant::CrazyAces) => {
                let aces = hand.iter().filter(|c| c.rank == Rank::Ace).count() as u8;
                BidConstraint::Exactly(aces * 3)
            }
            // validate() rejects this configuration
            None => BidConstraint::Range {
                min: 1,
                max: 13,
                nil_allowed: rules.allow_nil,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::Rank;

    fn hand_with_spades(n: usize) -> Vec<Card> {
        let mut hand = Vec::new();
        for rank in Rank::ALL.iter().take(n) {
            hand.push(Card::new(Suit::Spades, *rank));
        }
        for rank in Rank::ALL.iter().take(13 - n) {
            hand.push(Card::new(Suit::Clubs, *rank));
        }
        hand
    }

    #[test]
    fn regular_format_allows_full_range() {
        let rules = RuleSet::default_partners();
        let constraint = bid_constraint(&rules, &hand_with_spades(3), None);
        assert!(constraint.allows(1));
        assert!(constraint.allows(13));
        assert!(constraint.allows(0));
    }

    #[test]
    fn regular_format_respects_nil_toggle() {
        let rules = RuleSet {
            allow_nil: false,
            ..RuleSet::default_partners()
        };
        let constraint = bid_constraint(&rules, &hand_with_spades(3), None);
        assert!(!constraint.allows(0));
        assert!(constraint.allows(1));
    }

    #[test]
    fn whiz_bid_is_spade_count_or_nil() {
        let rules = RuleSet {
            format: GameFormat::Whiz,
            ..RuleSet::default_partners()
        };
        let constraint = bid_constraint(&rules, &hand_with_spades(4), None);
        assert_eq!(constraint, BidConstraint::ValueOrNil(4));
        assert!(constraint.allows(4));
        assert!(constraint.allows(0));
        assert!(!constraint.allows(3));
    }

    #[test]
    fn whiz_without_spades_forces_nil() {
        let rules = RuleSet {
            format: GameFormat::Whiz,
            ..RuleSet::default_partners()
        };
        let constraint = bid_constraint(&rules, &hand_with_spades(0), None);
        assert_eq!(constraint, BidConstraint::ForcedNil);
    }

    #[test]
    fn mirrors_bid_is_forced_spade_count() {
        let rules = RuleSet {
            format: GameFormat::Mirrors,
            ..RuleSet::default_partners()
        };
        let constraint = bid_constraint(&rules, &hand_with_spades(5), None);
        assert_eq!(constraint, BidConstraint::Exactly(5));
        assert!(!constraint.allows(0));
    }

    #[test]
    fn suicide_forces_nil_after_partner_commits() {
        let rules = RuleSet {
            format: GameFormat::Gimmick,
            gimmick: Some(GimmickVariant::Suicide),
            ..RuleSet::default_partners()
        };
        let hand = hand_with_spades(3);
        assert_eq!(
            bid_constraint(&rules, &hand, Some(5)),
            BidConstraint::ForcedNil
        );
        assert!(bid_constraint(&rules, &hand, Some(0)).allows(6));
        assert!(bid_constraint(&rules, &hand, None).allows(6));
    }

    #[test]
    fn suicide_forbids_a_second_nil() {
        let rules = RuleSet {
            format: GameFormat::Gimmick,
            gimmick: Some(GimmickVariant::Suicide),
            ..RuleSet::default_partners()
        };
        let hand = hand_with_spades(3);
        // Exactly one member of the pair may bid nil.
        assert!(!bid_constraint(&rules, &hand, Some(0)).allows(0));
        assert!(bid_constraint(&rules, &hand, None).allows(0));
    }

    #[test]
    fn crazy_aces_bids_three_per_ace() {
        let rules = RuleSet {
            format: GameFormat::Gimmick,
            gimmick: Some(GimmickVariant::CrazyAces),
            ..RuleSet::default_partners()
        };
        // hand_with_spades(13) is all spades Two..Ace: exactly one ace
        let constraint = bid_constraint(&rules, &hand_with_spades(13), None);
        assert_eq!(constraint, BidConstraint::Exactly(3));
    }

    #[test]
    fn validate_rejects_conflicting_specials() {
        let rules = RuleSet {
            special: SpecialRules {
                lowball: true,
                highball: true,
                ..SpecialRules::default()
            },
            ..RuleSet::default_partners()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn validate_rejects_gimmick_format_without_variant() {
        let rules = RuleSet {
            format: GameFormat::Gimmick,
            gimmick: None,
            ..RuleSet::default_partners()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let rules = RuleSet {
            min_points: 500,
            max_points: 500,
            ..RuleSet::default_partners()
        };
        assert!(rules.validate().is_err());
    }
}
