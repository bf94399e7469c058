use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    #[sea_orm(column_name = "round_no", column_type = "SmallInteger")]
    pub round_no: i16,
    #[sea_orm(column_name = "dealer_pos", column_type = "SmallInteger")]
    pub dealer_pos: i16,
    #[sea_orm(column_name = "spades_broken")]
    pub spades_broken: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
    #[sea_orm(has_many = "super::round_tricks::Entity")]
    RoundTricks,
    #[sea_orm(has_many = "super::round_hands::Entity")]
    RoundHands,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::round_tricks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundTricks.def()
    }
}

impl Related<super::round_hands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundHands.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
