//! Client-facing event types and the outbound delivery seam.
//!
//! Transport framing (websocket sessions, fan-out, reconnect redelivery)
//! lives outside this crate behind [`RoomBroadcaster`]. Everything here is
//! plain serde data.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Card, Seat, Suit};

/// One occupied seat as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub seat: Seat,
    pub username: String,
    pub is_bot: bool,
    pub is_ready: bool,
    pub is_connected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidView {
    pub value: u8,
    pub is_blind_nil: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayView {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickView {
    pub trick_no: u8,
    pub lead_seat: Seat,
    pub lead_suit: Option<Suit>,
    pub plays: Vec<PlayView>,
}

/// Cumulative standings after the most recent completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsView {
    /// Running team totals, partners mode only.
    pub team_totals: Option<[i32; 2]>,
    /// Cumulative team bags, partners mode only.
    pub team_bags: Option<[i16; 2]>,
    /// Per-seat running totals, solo mode only.
    pub player_totals: Option<[i32; 4]>,
}

impl StandingsView {
    pub fn empty() -> Self {
        Self {
            team_totals: None,
            team_bags: None,
            player_totals: None,
        }
    }
}

/// Full room snapshot sent on join and game start. The `hand` field is the
/// recipient's own cards; other hands never leave the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    pub game_id: i64,
    pub join_code: String,
    pub state: String,
    pub mode: String,
    pub format: String,
    pub gimmick: Option<String>,
    pub assassin: bool,
    pub screamer: bool,
    pub lowball: bool,
    pub highball: bool,
    pub min_points: i32,
    pub max_points: i32,
    pub players: Vec<SeatInfo>,
    pub dealer_pos: Seat,
    pub round_no: Option<u8>,
    pub current_player_seat: Option<Seat>,
    pub bids: [Option<BidView>; 4],
    pub tricks_won: [u8; 4],
    pub spades_broken: bool,
    pub trick: Option<TrickView>,
    pub standings: StandingsView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

/// One scored round as delivered in `round_complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScoreView {
    pub round_no: u8,
    pub team_deltas: Option<[i32; 2]>,
    pub team_bags: Option<[i16; 2]>,
    pub player_deltas: Option<[i32; 4]>,
    pub standings: StandingsView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    GameJoined {
        view: RoomView,
    },
    SeatUpdate {
        players: Vec<SeatInfo>,
    },
    GameStarted {
        view: RoomView,
    },
    RoundStarted {
        round_no: u8,
        dealer_pos: Seat,
        first_bidder: Seat,
        /// Recipient's dealt hand.
        hand: Vec<Card>,
    },
    BiddingUpdate {
        seat: Seat,
        bid: BidView,
        bids: [Option<BidView>; 4],
        next_seat: Option<Seat>,
    },
    CardPlayed {
        seat: Seat,
        card: Option<Card>,
        rejected: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        next_seat: Option<Seat>,
        spades_broken: bool,
    },
    TrickComplete {
        trick_no: u8,
        winner_seat: Seat,
        tricks_won: [u8; 4],
    },
    ClearTableCards {
        trick_no: u8,
    },
    RoundComplete {
        score: RoundScoreView,
    },
    GameComplete {
        winner: String,
        total_rounds: u8,
        standings: StandingsView,
    },
    PlayerDisconnected {
        seat: Seat,
    },
    PlayerLeft {
        seat: Seat,
    },
    CountdownStart {
        seat: Seat,
        seconds: u8,
    },
}

/// Outbound delivery seam implemented by the hosting transport.
#[async_trait]
pub trait RoomBroadcaster: Send + Sync {
    /// Deliver an event to every connected client in the room.
    async fn to_room(&self, game_id: i64, event: &ServerEvent);

    /// Deliver an event to one seat's client, if connected.
    async fn to_seat(&self, game_id: i64, seat: Seat, event: &ServerEvent);
}

/// Broadcaster that drops everything. Used by tests and batch tools.
pub struct NullBroadcaster;

#[async_trait]
impl RoomBroadcaster for NullBroadcaster {
    async fn to_room(&self, _game_id: i64, _event: &ServerEvent) {}
    async fn to_seat(&self, _game_id: i64, _seat: Seat, _event: &ServerEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rank;

    #[test]
    fn server_event_uses_snake_case_tag() {
        let event = ServerEvent::CountdownStart { seat: 2, seconds: 10 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "countdown_start");
        assert_eq!(json["seat"], 2);
        assert_eq!(json["seconds"], 10);
    }

    #[test]
    fn rejected_play_carries_reason() {
        let event = ServerEvent::CardPlayed {
            seat: 1,
            card: None,
            rejected: true,
            reason: Some("Must follow suit".to_string()),
            next_seat: Some(1),
            spades_broken: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "card_played");
        assert_eq!(json["rejected"], true);
        assert_eq!(json["reason"], "Must follow suit");
    }

    #[test]
    fn accepted_play_omits_reason() {
        let event = ServerEvent::CardPlayed {
            seat: 0,
            card: Some(Card::new(Suit::Hearts, Rank::Ace)),
            rejected: false,
            reason: None,
            next_seat: Some(1),
            spades_broken: false,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("reason").is_none());
    }

    #[test]
    fn room_view_hides_absent_hand() {
        let view = RoomView {
            game_id: 7,
            join_code: "ABCDEFGH23".to_string(),
            state: "WAITING".to_string(),
            mode: "PARTNERS".to_string(),
            format: "REGULAR".to_string(),
            gimmick: None,
            assassin: false,
            screamer: false,
            lowball: false,
            highball: false,
            min_points: -500,
            max_points: 500,
            players: vec![],
            dealer_pos: 0,
            round_no: None,
            current_player_seat: None,
            bids: [None; 4],
            tricks_won: [0; 4],
            spades_broken: false,
            trick: None,
            standings: StandingsView::empty(),
            hand: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("hand").is_none());
    }
}
