//! Round scores repository. Score rows are append-only; running totals live
//! in the latest row.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    Set,
};
use serde_json::json;
use time::OffsetDateTime;

use crate::domain::SoloLine;
use crate::entities::round_scores::{self};
use crate::entities::RoundScore;
use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Clone)]
pub struct ScoreInsert {
    pub game_id: i64,
    pub round_id: i64,
    pub team0_score: i32,
    pub team1_score: i32,
    pub team0_bags: i16,
    pub team1_bags: i16,
    pub team0_bags_total: i16,
    pub team1_bags_total: i16,
    pub team0_total: i32,
    pub team1_total: i32,
    pub solo_lines: Option<[SoloLine; 4]>,
}

pub async fn insert_round_score<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    insert: ScoreInsert,
) -> Result<RoundScore, DomainError> {
    let solo_lines = insert.solo_lines.as_ref().map(|lines| json!(lines));
    let row = round_scores::ActiveModel {
        id: sea_orm::NotSet,
        game_id: Set(insert.game_id),
        round_id: Set(insert.round_id),
        team0_score: Set(insert.team0_score),
        team1_score: Set(insert.team1_score),
        team0_bags: Set(insert.team0_bags),
        team1_bags: Set(insert.team1_bags),
        team0_bags_total: Set(insert.team0_bags_total),
        team1_bags_total: Set(insert.team1_bags_total),
        team0_total: Set(insert.team0_total),
        team1_total: Set(insert.team1_total),
        solo_lines: Set(solo_lines),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    Ok(row.insert(conn).await?)
}

/// Most recent score row for a game, or `None` before the first round ends.
pub async fn find_latest_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<RoundScore>, DomainError> {
    Ok(round_scores::Entity::find()
        .filter(round_scores::Column::GameId.eq(game_id))
        .order_by(round_scores::Column::Id, Order::Desc)
        .one(conn)
        .await?)
}

pub fn solo_lines_of(score: &RoundScore) -> Result<Option<[SoloLine; 4]>, DomainError> {
    match &score.solo_lines {
        None => Ok(None),
        Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Bad solo_lines payload for score {}: {e}", score.id),
            )
        }),
    }
}
