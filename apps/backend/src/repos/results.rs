//! Final game results repository.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use serde_json::json;
use time::OffsetDateTime;

use crate::domain::Seat;
use crate::entities::game_results::{self};
use crate::entities::GameResult;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Team(u8),
    Seat(Seat),
    None,
}

impl Winner {
    pub fn as_db(self) -> String {
        match self {
            Winner::Team(t) => format!("TEAM_{t}"),
            Winner::Seat(s) => format!("SEAT_{s}"),
            Winner::None => "NONE".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResultInsert {
    pub game_id: i64,
    pub winner: Winner,
    pub total_rounds: i16,
    pub team_finals: Option<(i32, i32)>,
    pub player_finals: Option<[i32; 4]>,
    pub abandoned: bool,
}

pub async fn insert_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    insert: ResultInsert,
) -> Result<GameResult, DomainError> {
    let (team0_final, team1_final) = match insert.team_finals {
        Some((a, b)) => (Some(a), Some(b)),
        None => (None, None),
    };
    let reason = if insert.abandoned {
        "ABANDONED"
    } else {
        "THRESHOLD"
    };
    let row = game_results::ActiveModel {
        id: sea_orm::NotSet,
        game_id: Set(insert.game_id),
        winner: Set(insert.winner.as_db()),
        total_rounds: Set(insert.total_rounds),
        team0_final: Set(team0_final),
        team1_final: Set(team1_final),
        player_finals: Set(insert.player_finals.map(|f| json!(f))),
        reason: Set(reason.to_string()),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    Ok(row.insert(conn).await?)
}

pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<GameResult>, DomainError> {
    Ok(game_results::Entity::find()
        .filter(game_results::Column::GameId.eq(game_id))
        .one(conn)
        .await?)
}
