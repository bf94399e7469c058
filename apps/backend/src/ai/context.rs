//! Per-turn view of the table from one seat.

use crate::domain::{
    card_beats, partner_of, Card, RuleSet, Seat, PLAYERS,
};

/// Strategic posture for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotScenario {
    /// This seat bid nil and must duck every trick.
    SelfNil,
    /// Partner bid nil; win tricks to shield them.
    CoverNil,
    /// Table bid total is 12+; tricks are scarce, fight for every one.
    HighPressure,
    Normal,
}

/// Everything a bot decision needs, assembled once per turn.
#[derive(Debug, Clone)]
pub struct BotTurnContext {
    pub seat: Seat,
    pub hand: Vec<Card>,
    pub rules: RuleSet,
    /// Placed bids by seat; `None` where a seat has not bid.
    pub bids: [Option<u8>; PLAYERS],
    pub tricks_won: [u8; PLAYERS],
    /// Plays so far in the current trick, in play order.
    pub trick: Vec<(Seat, Card)>,
    pub spades_broken: bool,
}

/// Table bid total threshold above which tricks are contested.
pub const HIGH_PRESSURE_TOTAL: u8 = 12;

impl BotTurnContext {
    pub fn partner_seat(&self) -> Seat {
        partner_of(self.seat)
    }

    pub fn partner_bid(&self) -> Option<u8> {
        self.bids[self.partner_seat() as usize]
    }

    pub fn table_bid_total(&self) -> u8 {
        self.bids.iter().flatten().sum()
    }

    pub fn is_leading(&self) -> bool {
        self.trick.is_empty()
    }

    pub fn is_last_to_act(&self) -> bool {
        self.trick.len() == PLAYERS - 1
    }

    /// Seat and card currently winning the (partial) trick.
    pub fn winning_so_far(&self) -> Option<(Seat, Card)> {
        let &(lead_seat, lead_card) = self.trick.first()?;
        let mut best = (lead_seat, lead_card);
        for &(seat, card) in &self.trick[1..] {
            if card_beats(card, best.1, lead_card.suit) {
                best = (seat, card);
            }
        }
        Some(best)
    }

    pub fn partner_is_winning(&self) -> bool {
        self.winning_so_far()
            .is_some_and(|(seat, _)| seat == self.partner_seat())
    }

    pub fn partner_has_played(&self) -> bool {
        let partner = self.partner_seat();
        self.trick.iter().any(|&(seat, _)| seat == partner)
    }

    pub fn scenario(&self) -> BotScenario {
        if self.bids[self.seat as usize] == Some(0) {
            return BotScenario::SelfNil;
        }
        if self.partner_bid() == Some(0) {
            return BotScenario::CoverNil;
        }
        if self.bids.iter().all(Option::is_some)
            && self.table_bid_total() >= HIGH_PRESSURE_TOTAL
        {
            return BotScenario::HighPressure;
        }
        BotScenario::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rank, Suit};

    fn base_ctx() -> BotTurnContext {
        BotTurnContext {
            seat: 0,
            hand: vec![],
            rules: RuleSet::default_partners(),
            bids: [Some(4), Some(3), Some(3), Some(2)],
            tricks_won: [0; 4],
            trick: vec![],
            spades_broken: false,
        }
    }

    #[test]
    fn self_nil_takes_priority_over_cover() {
        let mut ctx = base_ctx();
        ctx.bids = [Some(0), Some(3), Some(0), Some(2)];
        assert_eq!(ctx.scenario(), BotScenario::SelfNil);
    }

    #[test]
    fn partner_nil_means_cover() {
        let mut ctx = base_ctx();
        ctx.bids = [Some(4), Some(3), Some(0), Some(2)];
        assert_eq!(ctx.scenario(), BotScenario::CoverNil);
    }

    #[test]
    fn twelve_total_is_high_pressure() {
        let ctx = base_ctx();
        assert_eq!(ctx.table_bid_total(), 12);
        assert_eq!(ctx.scenario(), BotScenario::HighPressure);
    }

    #[test]
    fn incomplete_bidding_is_not_high_pressure() {
        let mut ctx = base_ctx();
        ctx.bids = [Some(6), Some(6), None, None];
        assert_eq!(ctx.scenario(), BotScenario::Normal);
    }

    #[test]
    fn winning_so_far_respects_spades() {
        let mut ctx = base_ctx();
        ctx.trick = vec![
            (1, Card::new(Suit::Hearts, Rank::Ace)),
            (2, Card::new(Suit::Spades, Rank::Two)),
        ];
        assert_eq!(
            ctx.winning_so_far(),
            Some((2, Card::new(Suit::Spades, Rank::Two)))
        );
        assert!(ctx.partner_is_winning());
    }
}
