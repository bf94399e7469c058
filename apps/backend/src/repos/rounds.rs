//! Game rounds repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::domain::Seat;
use crate::entities::game_rounds::{self};
use crate::entities::GameRound;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    round_no: i16,
    dealer_pos: Seat,
) -> Result<GameRound, DomainError> {
    let now = OffsetDateTime::now_utc();
    let round = game_rounds::ActiveModel {
        id: sea_orm::NotSet,
        game_id: Set(game_id),
        round_no: Set(round_no),
        dealer_pos: Set(dealer_pos as i16),
        spades_broken: Set(false),
        created_at: Set(now),
        completed_at: Set(None),
    };
    Ok(round.insert(conn).await?)
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<GameRound>, DomainError> {
    Ok(game_rounds::Entity::find_by_id(round_id).one(conn).await?)
}

pub async fn require_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<GameRound, DomainError> {
    find_by_id(conn, round_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
    })
}

pub async fn find_by_game_and_no<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    round_no: i16,
) -> Result<Option<GameRound>, DomainError> {
    Ok(game_rounds::Entity::find()
        .filter(game_rounds::Column::GameId.eq(game_id))
        .filter(game_rounds::Column::RoundNo.eq(round_no))
        .one(conn)
        .await?)
}

pub async fn set_spades_broken<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &GameRound,
) -> Result<(), DomainError> {
    if round.spades_broken {
        return Ok(());
    }
    let mut active: game_rounds::ActiveModel = round.clone().into();
    active.spades_broken = Set(true);
    active.update(conn).await?;
    Ok(())
}

pub async fn complete_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &GameRound,
) -> Result<(), DomainError> {
    let mut active: game_rounds::ActiveModel = round.clone().into();
    active.completed_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await?;
    Ok(())
}
