//! Game players repository: seat occupancy and readiness.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    Set,
};
use time::OffsetDateTime;

use crate::domain::Seat;
use crate::entities::game_players::{self};
use crate::entities::GamePlayer;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

pub async fn add_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    seat: Seat,
    user_id: Option<i64>,
    username: &str,
    is_bot: bool,
) -> Result<GamePlayer, DomainError> {
    let now = OffsetDateTime::now_utc();
    let player = game_players::ActiveModel {
        id: sea_orm::NotSet,
        game_id: Set(game_id),
        seat: Set(seat as i16),
        user_id: Set(user_id),
        username: Set(username.to_owned()),
        is_bot: Set(is_bot),
        // Bots are always ready and always connected.
        is_ready: Set(is_bot),
        is_connected: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        left_at: Set(None),
    };

    player.insert(conn).await.map_err(|e| {
        if e.to_string().contains("game_seat") {
            DomainError::conflict(ConflictKind::SeatTaken, format!("Seat {seat} is taken"))
        } else {
            e.into()
        }
    })
}

pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<GamePlayer>, DomainError> {
    Ok(game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .filter(game_players::Column::LeftAt.is_null())
        .order_by(game_players::Column::Seat, Order::Asc)
        .all(conn)
        .await?)
}

pub async fn find_by_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    seat: Seat,
) -> Result<Option<GamePlayer>, DomainError> {
    Ok(game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .filter(game_players::Column::Seat.eq(seat as i16))
        .filter(game_players::Column::LeftAt.is_null())
        .one(conn)
        .await?)
}

pub async fn require_by_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    seat: Seat,
) -> Result<GamePlayer, DomainError> {
    find_by_seat(conn, game_id, seat).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("No player at seat {seat} in game {game_id}"),
        )
    })
}

pub async fn set_ready<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: GamePlayer,
    is_ready: bool,
) -> Result<GamePlayer, DomainError> {
    let mut active: game_players::ActiveModel = player.into();
    active.is_ready = Set(is_ready);
    active.updated_at = Set(OffsetDateTime::now_utc());
    Ok(active.update(conn).await?)
}

pub async fn set_connected<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: GamePlayer,
    is_connected: bool,
) -> Result<GamePlayer, DomainError> {
    let mut active: game_players::ActiveModel = player.into();
    active.is_connected = Set(is_connected);
    active.updated_at = Set(OffsetDateTime::now_utc());
    Ok(active.update(conn).await?)
}

/// Vacate a seat (lobby leave or bot removal); the row is kept for audit.
pub async fn vacate_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: GamePlayer,
) -> Result<(), DomainError> {
    let mut active: game_players::ActiveModel = player.into();
    let now = OffsetDateTime::now_utc();
    active.left_at = Set(Some(now));
    active.updated_at = Set(now);
    active.update(conn).await?;
    Ok(())
}

/// Connected human seats; an empty result in an active game triggers abandonment.
pub async fn connected_humans<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<GamePlayer>, DomainError> {
    let players = find_by_game(conn, game_id).await?;
    Ok(players
        .into_iter()
        .filter(|p| !p.is_bot && p.is_connected)
        .collect())
}
