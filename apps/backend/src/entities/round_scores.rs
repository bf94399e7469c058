use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One append-only row per completed round. Team columns carry partners
/// results; `solo_lines` carries the per-seat lines in solo mode.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "round_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    #[sea_orm(column_name = "team0_score")]
    pub team0_score: i32,
    #[sea_orm(column_name = "team1_score")]
    pub team1_score: i32,
    #[sea_orm(column_name = "team0_bags", column_type = "SmallInteger")]
    pub team0_bags: i16,
    #[sea_orm(column_name = "team1_bags", column_type = "SmallInteger")]
    pub team1_bags: i16,
    #[sea_orm(column_name = "team0_bags_total", column_type = "SmallInteger")]
    pub team0_bags_total: i16,
    #[sea_orm(column_name = "team1_bags_total", column_type = "SmallInteger")]
    pub team1_bags_total: i16,
    #[sea_orm(column_name = "team0_total")]
    pub team0_total: i32,
    #[sea_orm(column_name = "team1_total")]
    pub team1_total: i32,
    #[sea_orm(column_name = "solo_lines")]
    pub solo_lines: Option<Json>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
    #[sea_orm(
        belongs_to = "super::game_rounds::Entity",
        from = "Column::RoundId",
        to = "super::game_rounds::Column::Id"
    )]
    GameRound,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::game_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameRound.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
