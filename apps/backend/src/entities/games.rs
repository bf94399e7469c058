use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "game_state")]
pub enum GameState {
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "BIDDING")]
    Bidding,
    #[sea_orm(string_value = "PLAYING")]
    Playing,
    #[sea_orm(string_value = "ROUND_SUMMARY")]
    RoundSummary,
    #[sea_orm(string_value = "FINISHED")]
    Finished,
    #[sea_orm(string_value = "ABANDONED")]
    Abandoned,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Finished | GameState::Abandoned)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "game_mode")]
pub enum GameMode {
    #[sea_orm(string_value = "PARTNERS")]
    Partners,
    #[sea_orm(string_value = "SOLO")]
    Solo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "game_format")]
pub enum GameFormat {
    #[sea_orm(string_value = "REGULAR")]
    Regular,
    #[sea_orm(string_value = "WHIZ")]
    Whiz,
    #[sea_orm(string_value = "MIRRORS")]
    Mirrors,
    #[sea_orm(string_value = "GIMMICK")]
    Gimmick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "game_gimmick")]
pub enum GameGimmick {
    #[sea_orm(string_value = "SUICIDE")]
    Suicide,
    #[sea_orm(string_value = "BID_4_OR_NIL")]
    Bid4OrNil,
    #[sea_orm(string_value = "BID_3")]
    Bid3,
    #[sea_orm(string_value = "BID_HEARTS")]
    BidHearts,
    #[sea_orm(string_value = "CRAZY_ACES")]
    CrazyAces,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "join_code")]
    pub join_code: String,
    pub mode: GameMode,
    pub format: GameFormat,
    pub gimmick: Option<GameGimmick>,
    pub assassin: bool,
    pub screamer: bool,
    pub lowball: bool,
    pub highball: bool,
    #[sea_orm(column_name = "allow_nil")]
    pub allow_nil: bool,
    #[sea_orm(column_name = "allow_blind_nil")]
    pub allow_blind_nil: bool,
    #[sea_orm(column_name = "min_points")]
    pub min_points: i32,
    #[sea_orm(column_name = "max_points")]
    pub max_points: i32,
    #[sea_orm(column_name = "is_rated")]
    pub is_rated: bool,
    pub state: GameState,
    #[sea_orm(column_name = "dealer_pos", column_type = "SmallInteger")]
    pub dealer_pos: i16,
    #[sea_orm(column_name = "current_round", column_type = "SmallInteger")]
    pub current_round: Option<i16>,
    #[sea_orm(column_name = "current_round_id")]
    pub current_round_id: Option<i64>,
    #[sea_orm(column_name = "current_trick_no", column_type = "SmallInteger")]
    pub current_trick_no: i16,
    #[sea_orm(column_name = "current_player_seat", column_type = "SmallInteger")]
    pub current_player_seat: Option<i16>,
    #[sea_orm(column_name = "rng_seed")]
    pub rng_seed: i64,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "started_at")]
    pub started_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "ended_at")]
    pub ended_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_players::Entity")]
    GamePlayers,
    #[sea_orm(has_many = "super::game_rounds::Entity")]
    GameRounds,
}

impl Related<super::game_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamePlayers.def()
    }
}

impl Related<super::game_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameRounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
