//! Game flow service: bridges the pure rules in `domain` with persistence.
//!
//! Methods run inside a caller-owned transaction and return the events the
//! mutation produced. Broadcasting happens after commit, never from here.

mod bot_coordinator;
mod orchestration;
mod player_actions;
mod round_lifecycle;
pub mod seats;

use crate::domain::{Card, Seat, PLAYERS};
use crate::repos::results::Winner;

/// Game flow service, generic over the transaction for all operations.
#[derive(Default)]
pub struct GameFlowService;

pub use round_lifecycle::RoundScoreSummary;

/// State changes produced inside a transaction, broadcast after commit.
#[derive(Debug, Clone)]
pub enum FlowEvent {
    PlayerJoined {
        seat: Seat,
    },
    PlayerLeft {
        seat: Seat,
    },
    PlayerDisconnected {
        seat: Seat,
    },
    /// Readiness or occupancy changed without a join/leave.
    SeatsChanged,
    GameStarted,
    RoundStarted {
        round_no: u8,
        dealer_pos: Seat,
        first_bidder: Seat,
        hands: [Vec<Card>; PLAYERS],
    },
    BidPlaced {
        seat: Seat,
        value: u8,
        is_blind_nil: bool,
        /// All bids after this one, (value, is_blind_nil) per seat.
        bids: [Option<(u8, bool)>; PLAYERS],
        next_seat: Option<Seat>,
    },
    CardPlayed {
        seat: Seat,
        card: Card,
        next_seat: Option<Seat>,
        spades_broken: bool,
    },
    TrickComplete {
        trick_no: u8,
        winner_seat: Seat,
        tricks_won: [u8; PLAYERS],
    },
    RoundComplete(RoundScoreSummary),
    GameCompleted {
        winner: Winner,
        total_rounds: u8,
        team_totals: Option<[i32; 2]>,
        player_totals: Option<[i32; PLAYERS]>,
    },
    GameAbandoned,
    /// A finished game was reset to the lobby for another run.
    GameReset,
}
