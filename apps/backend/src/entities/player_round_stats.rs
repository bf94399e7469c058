use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "player_round_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    #[sea_orm(column_name = "player_seat", column_type = "SmallInteger")]
    pub player_seat: i16,
    /// Null until the seat has bid.
    #[sea_orm(column_type = "SmallInteger")]
    pub bid: Option<i16>,
    #[sea_orm(column_name = "bid_order", column_type = "SmallInteger")]
    pub bid_order: Option<i16>,
    #[sea_orm(column_name = "is_nil")]
    pub is_nil: bool,
    #[sea_orm(column_name = "is_blind_nil")]
    pub is_blind_nil: bool,
    #[sea_orm(column_name = "tricks_won", column_type = "SmallInteger")]
    pub tricks_won: i16,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_rounds::Entity",
        from = "Column::RoundId",
        to = "super::game_rounds::Column::Id"
    )]
    GameRound,
}

impl Related<super::game_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameRound.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
