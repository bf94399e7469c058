//! Trick plays repository. Rows are immutable once written.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::domain::{Card, Seat};
use crate::entities::trick_plays::{self};
use crate::errors::domain::DomainError;
use crate::repos::{card_from_json, card_to_json};

pub async fn create_play<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trick_id: i64,
    seat: Seat,
    card: Card,
    play_order: u8,
) -> Result<(), DomainError> {
    let play = trick_plays::ActiveModel {
        id: sea_orm::NotSet,
        trick_id: Set(trick_id),
        player_seat: Set(seat as i16),
        card: Set(card_to_json(card)),
        play_order: Set(play_order as i16),
        played_at: Set(OffsetDateTime::now_utc()),
    };
    play.insert(conn).await?;
    Ok(())
}

/// Plays for a trick in play order as (seat, card) pairs.
pub async fn find_by_trick<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trick_id: i64,
) -> Result<Vec<(Seat, Card)>, DomainError> {
    let rows = trick_plays::Entity::find()
        .filter(trick_plays::Column::TrickId.eq(trick_id))
        .order_by(trick_plays::Column::PlayOrder, Order::Asc)
        .all(conn)
        .await?;

    let mut plays = Vec::with_capacity(rows.len());
    for row in rows {
        plays.push((row.player_seat as Seat, card_from_json(&row.card)?));
    }
    Ok(plays)
}

pub async fn count_by_trick<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trick_id: i64,
) -> Result<u64, DomainError> {
    Ok(trick_plays::Entity::find()
        .filter(trick_plays::Column::TrickId.eq(trick_id))
        .count(conn)
        .await?)
}
