//! Room snapshot assembly.
//!
//! Reads go through the cache when possible; any miss falls back to the
//! relational store and repopulates the cache. The store is always the
//! source of truth.

use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::cache::GameCache;
use crate::domain::{Card, Seat, PLAYERS};
use crate::entities::games::{GameFormat, GameGimmick, GameMode, GameState};
use crate::entities::Game;
use crate::error::AppError;
use crate::protocol::{BidView, PlayView, RoomView, SeatInfo, StandingsView, TrickView};
use crate::repos::{games as games_repo, hands, players, plays, scores, stats, tricks};

/// Load the room view for one recipient. `viewer` selects which hand is
/// attached; `None` produces a spectator view with no hand.
pub async fn room_view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cache: &GameCache,
    game_id: i64,
    viewer: Option<Seat>,
) -> Result<RoomView, AppError> {
    let cached_base: Option<RoomView> = cache.read_state(game_id).await;
    let cached_hands: Option<[Vec<Card>; PLAYERS]> = cache.read_hands(game_id).await;
    let cached_bids: Option<[Option<BidView>; PLAYERS]> = cache.read_bids(game_id).await;
    let cached_trick: Option<Option<TrickView>> = cache.read_trick(game_id).await;

    let (base, all_hands) = match (cached_base, cached_hands, cached_bids, cached_trick) {
        (Some(base), Some(hands), Some(bids), Some(trick)) => {
            (overlay_live_sections(base, bids, trick), hands)
        }
        _ => {
            debug!(game_id, "Snapshot cache miss, rebuilding from store");
            rebuild_room_cache(conn, cache, game_id).await?
        }
    };

    let mut view = base;
    view.hand = viewer
        .filter(|&s| (s as usize) < PLAYERS)
        .map(|s| all_hands[s as usize].clone());
    Ok(view)
}

/// Splice the fine-grained bid and trick keys into a cached base view. The
/// fast path requires all four keys; expiry of any one forces a rebuild.
fn overlay_live_sections(
    mut base: RoomView,
    bids: [Option<BidView>; PLAYERS],
    trick: Option<TrickView>,
) -> RoomView {
    base.bids = bids;
    base.trick = trick;
    base
}

/// Attach one seat's hand to a shared base view.
pub fn view_for_seat(base: &RoomView, all_hands: &[Vec<Card>; PLAYERS], seat: Seat) -> RoomView {
    let mut view = base.clone();
    if (seat as usize) < PLAYERS {
        view.hand = Some(all_hands[seat as usize].clone());
    }
    view
}

/// Assemble the snapshot from the store and write every cache key.
pub async fn rebuild_room_cache<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    cache: &GameCache,
    game_id: i64,
) -> Result<(RoomView, [Vec<Card>; PLAYERS]), AppError> {
    let (base, all_hands) = assemble_from_store(conn, game_id).await?;

    cache.write_state(game_id, &base).await;
    cache.write_hands(game_id, &all_hands).await;
    cache.write_bids(game_id, &base.bids).await;
    cache.write_trick(game_id, &base.trick).await;

    Ok((base, all_hands))
}

async fn assemble_from_store<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<(RoomView, [Vec<Card>; PLAYERS]), AppError> {
    let game = games_repo::require_game(conn, game_id).await?;

    let seated = players::find_by_game(conn, game_id).await?;
    let seat_infos: Vec<SeatInfo> = seated
        .iter()
        .map(|p| SeatInfo {
            seat: p.seat as Seat,
            username: p.username.clone(),
            is_bot: p.is_bot,
            is_ready: p.is_ready,
            is_connected: p.is_connected,
        })
        .collect();

    let mut bids: [Option<BidView>; PLAYERS] = [None; PLAYERS];
    let mut tricks_won = [0u8; PLAYERS];
    let mut trick_view = None;
    let mut spades_broken = false;
    let mut all_hands: [Vec<Card>; PLAYERS] = Default::default();

    if let Some(round_id) = game.current_round_id {
        for (seat, record) in stats::bids_by_seat(conn, round_id).await?.iter().enumerate() {
            bids[seat] = record.map(|b| BidView {
                value: b.value,
                is_blind_nil: b.is_blind_nil,
            });
        }
        for row in stats::find_by_round(conn, round_id).await? {
            let seat = row.player_seat as usize;
            if seat < PLAYERS {
                tricks_won[seat] = row.tricks_won as u8;
            }
        }

        all_hands = hands::find_by_round(conn, round_id).await?;

        if game.state == GameState::Playing && game.current_trick_no > 0 {
            if let Some(trick) =
                tricks::find_by_round_and_no(conn, round_id, game.current_trick_no).await?
            {
                let trick_plays = plays::find_by_trick(conn, trick.id).await?;
                trick_view = Some(TrickView {
                    trick_no: trick.trick_no as u8,
                    lead_seat: trick.lead_seat as Seat,
                    lead_suit: trick.lead_suit.map(tricks::suit_from_db),
                    plays: trick_plays
                        .into_iter()
                        .map(|(seat, card)| PlayView { seat, card })
                        .collect(),
                });
            }
        }

        if let Some(round) = crate::repos::rounds::find_by_id(conn, round_id).await? {
            spades_broken = round.spades_broken;
        }
    }

    let standings = load_standings(conn, &game).await?;

    let base = RoomView {
        game_id: game.id,
        join_code: game.join_code.clone(),
        state: state_str(game.state).to_string(),
        mode: mode_str(game.mode).to_string(),
        format: format_str(game.format).to_string(),
        gimmick: game.gimmick.map(|g| gimmick_str(g).to_string()),
        assassin: game.assassin,
        screamer: game.screamer,
        lowball: game.lowball,
        highball: game.highball,
        min_points: game.min_points,
        max_points: game.max_points,
        players: seat_infos,
        dealer_pos: game.dealer_pos as Seat,
        round_no: game.current_round.map(|r| r as u8),
        current_player_seat: game.current_player_seat.map(|s| s as Seat),
        bids,
        tricks_won,
        spades_broken,
        trick: trick_view,
        standings,
        hand: None,
    };

    Ok((base, all_hands))
}

pub async fn load_standings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
) -> Result<StandingsView, AppError> {
    let Some(latest) = scores::find_latest_by_game(conn, game.id).await? else {
        return Ok(StandingsView::empty());
    };

    match game.mode {
        GameMode::Partners => Ok(StandingsView {
            team_totals: Some([latest.team0_total, latest.team1_total]),
            team_bags: Some([latest.team0_bags_total, latest.team1_bags_total]),
            player_totals: None,
        }),
        GameMode::Solo => {
            let lines = scores::solo_lines_of(&latest)?;
            let player_totals = lines.map(|l| {
                let mut totals = [0i32; PLAYERS];
                for line in &l {
                    let seat = line.seat as usize;
                    if seat < PLAYERS {
                        totals[seat] = line.running_total;
                    }
                }
                totals
            });
            Ok(StandingsView {
                team_totals: None,
                team_bags: None,
                player_totals,
            })
        }
    }
}

fn state_str(state: GameState) -> &'static str {
    match state {
        GameState::Waiting => "WAITING",
        GameState::Bidding => "BIDDING",
        GameState::Playing => "PLAYING",
        GameState::RoundSummary => "ROUND_SUMMARY",
        GameState::Finished => "FINISHED",
        GameState::Abandoned => "ABANDONED",
    }
}

fn mode_str(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Partners => "PARTNERS",
        GameMode::Solo => "SOLO",
    }
}

fn format_str(format: GameFormat) -> &'static str {
    match format {
        GameFormat::Regular => "REGULAR",
        GameFormat::Whiz => "WHIZ",
        GameFormat::Mirrors => "MIRRORS",
        GameFormat::Gimmick => "GIMMICK",
    }
}

fn gimmick_str(gimmick: GameGimmick) -> &'static str {
    match gimmick {
        GameGimmick::Suicide => "SUICIDE",
        GameGimmick::Bid4OrNil => "BID_4_OR_NIL",
        GameGimmick::Bid3 => "BID_3",
        GameGimmick::BidHearts => "BID_HEARTS",
        GameGimmick::CrazyAces => "CRAZY_ACES",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rank, Suit};
    use crate::protocol::StandingsView;

    fn base_view() -> RoomView {
        RoomView {
            game_id: 7,
            join_code: "ABCDEFGH23".to_string(),
            state: "BIDDING".to_string(),
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
            round_no: Some(1),
            current_player_seat: Some(1),
            bids: [None; 4],
            tricks_won: [0; 4],
            spades_broken: false,
            trick: None,
            standings: StandingsView::empty(),
            hand: None,
        }
    }

    #[test]
    fn overlay_replaces_bids_and_trick_from_their_own_keys() {
        let bids = [
            Some(BidView {
                value: 4,
                is_blind_nil: false,
            }),
            None,
            None,
            None,
        ];
        let trick = Some(TrickView {
            trick_no: 1,
            lead_seat: 0,
            lead_suit: Some(Suit::Clubs),
            plays: vec![PlayView {
                seat: 0,
                card: Card::new(Suit::Clubs, Rank::Nine),
            }],
        });

        let view = overlay_live_sections(base_view(), bids, trick.clone());
        assert_eq!(view.bids, bids);
        assert_eq!(view.trick, trick);
        // The rest of the base view is untouched.
        assert_eq!(view.state, "BIDDING");
        assert_eq!(view.current_player_seat, Some(1));
    }

    #[test]
    fn seat_view_attaches_only_that_hand() {
        let mut hands: [Vec<Card>; PLAYERS] = Default::default();
        hands[2] = vec![Card::new(Suit::Spades, Rank::Ace)];

        let view = view_for_seat(&base_view(), &hands, 2);
        assert_eq!(view.hand, Some(vec![Card::new(Suit::Spades, Rank::Ace)]));

        let other = view_for_seat(&base_view(), &hands, 0);
        assert_eq!(other.hand, Some(vec![]));
    }
}
