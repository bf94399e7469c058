//! Per-seat round stats: bids and trick counts.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::domain::{Seat, SeatLine, PLAYERS};
use crate::entities::player_round_stats::{self};
use crate::entities::PlayerRoundStat;
use crate::errors::domain::{DomainError, NotFoundKind};

/// A placed bid as read back from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidRecord {
    pub value: u8,
    pub is_nil: bool,
    pub is_blind_nil: bool,
}

pub async fn init_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<(), DomainError> {
    let now = OffsetDateTime::now_utc();
    for seat in 0..PLAYERS as i16 {
        let row = player_round_stats::ActiveModel {
            id: sea_orm::NotSet,
            round_id: Set(round_id),
            player_seat: Set(seat),
            bid: Set(None),
            bid_order: Set(None),
            is_nil: Set(false),
            is_blind_nil: Set(false),
            tricks_won: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        row.insert(conn).await?;
    }
    Ok(())
}

pub async fn find_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<PlayerRoundStat>, DomainError> {
    Ok(player_round_stats::Entity::find()
        .filter(player_round_stats::Column::RoundId.eq(round_id))
        .order_by(player_round_stats::Column::PlayerSeat, Order::Asc)
        .all(conn)
        .await?)
}

async fn require_by_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    seat: Seat,
) -> Result<PlayerRoundStat, DomainError> {
    player_round_stats::Entity::find()
        .filter(player_round_stats::Column::RoundId.eq(round_id))
        .filter(player_round_stats::Column::PlayerSeat.eq(seat as i16))
        .one(conn)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Round,
                format!("No stats row for seat {seat} in round {round_id}"),
            )
        })
}

/// Bids by seat; `None` where a seat has not bid yet.
pub async fn bids_by_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<[Option<BidRecord>; PLAYERS], DomainError> {
    let rows = find_by_round(conn, round_id).await?;
    let mut bids: [Option<BidRecord>; PLAYERS] = [None; PLAYERS];
    for row in rows {
        let seat = row.player_seat as usize;
        if seat >= PLAYERS {
            continue;
        }
        bids[seat] = row.bid.map(|value| BidRecord {
            value: value as u8,
            is_nil: row.is_nil,
            is_blind_nil: row.is_blind_nil,
        });
    }
    Ok(bids)
}

pub async fn record_bid<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    seat: Seat,
    value: u8,
    is_blind_nil: bool,
    bid_order: u8,
) -> Result<(), DomainError> {
    let row = require_by_seat(conn, round_id, seat).await?;
    let mut active: player_round_stats::ActiveModel = row.into();
    active.bid = Set(Some(value as i16));
    active.bid_order = Set(Some(bid_order as i16));
    active.is_nil = Set(value == 0);
    active.is_blind_nil = Set(is_blind_nil);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await?;
    Ok(())
}

pub async fn increment_tricks_won<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    seat: Seat,
) -> Result<(), DomainError> {
    let row = require_by_seat(conn, round_id, seat).await?;
    let tricks = row.tricks_won + 1;
    let mut active: player_round_stats::ActiveModel = row.into();
    active.tricks_won = Set(tricks);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await?;
    Ok(())
}

/// Assemble scoring input lines; errors if any seat is missing a bid.
pub async fn seat_lines<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<[SeatLine; PLAYERS], DomainError> {
    let rows = find_by_round(conn, round_id).await?;
    let mut lines = [SeatLine {
        bid: 0,
        is_nil: false,
        is_blind_nil: false,
        tricks_won: 0,
    }; PLAYERS];

    for row in rows {
        let seat = row.player_seat as usize;
        if seat >= PLAYERS {
            continue;
        }
        let bid = row.bid.ok_or_else(|| {
            DomainError::validation_other(format!(
                "Scoring requires all bids placed (seat {seat}, round {round_id})"
            ))
        })?;
        lines[seat] = SeatLine {
            bid: bid as u8,
            is_nil: row.is_nil,
            is_blind_nil: row.is_blind_nil,
            tricks_won: row.tricks_won as u8,
        };
    }
    Ok(lines)
}
