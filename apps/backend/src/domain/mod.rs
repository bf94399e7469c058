//! Pure game rules: no persistence, no async, no transport.

pub mod bidding;
pub mod cards;
pub mod dealing;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

pub use bidding::{validate_bid, whiz_nil_veto, BidAttempt};
pub use cards::{
    card_beats, cards_of_suit, hand_has_suit, highest_of, lowest_of, suit_count, Card, Rank, Suit,
};
pub use dealing::deal_hands;
pub use rules::{
    bid_constraint, BidConstraint, GameFormat, GameMode, GimmickVariant, RuleSet, SpecialRules,
};
pub use scoring::{
    apply_solo_bags, partners_completion, score_partners_round, score_solo_round, solo_completion,
    Completion, SeatLine, SoloLine, TeamDelta,
};
pub use seed_derivation::{derive_dealing_seed, derive_decision_seed};
pub use state::{
    dealer_for_round, expected_actor, expected_bidder, next_seat, nth_from, partner_of,
    round_start_seat, seat_offset, team_of, Seat, HAND_SIZE, PLAYERS, TRICKS_PER_ROUND,
};
pub use tricks::{check_play, legal_plays, trick_winner};
