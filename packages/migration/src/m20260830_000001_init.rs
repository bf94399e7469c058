use sea_orm::Statement;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----

#[derive(Iden)]
enum Games {
    Table,
    Id,
    JoinCode,
    Mode,
    Format,
    Gimmick,
    Assassin,
    Screamer,
    Lowball,
    Highball,
    AllowNil,
    AllowBlindNil,
    MinPoints,
    MaxPoints,
    IsRated,
    State,
    DealerPos,
    CurrentRound,
    CurrentRoundId,
    CurrentTrickNo,
    CurrentPlayerSeat,
    RngSeed,
    LockVersion,
    CreatedAt,
    UpdatedAt,
    StartedAt,
    EndedAt,
}

#[derive(Iden)]
enum GameStateEnum {
    #[iden = "game_state"]
    Type,
}

#[derive(Iden)]
enum GameModeEnum {
    #[iden = "game_mode"]
    Type,
}

#[derive(Iden)]
enum GameFormatEnum {
    #[iden = "game_format"]
    Type,
}

#[derive(Iden)]
enum GameGimmickEnum {
    #[iden = "game_gimmick"]
    Type,
}

#[derive(Iden)]
enum CardSuitEnum {
    #[iden = "card_suit"]
    Type,
}

#[derive(Iden)]
enum GamePlayers {
    Table,
    Id,
    GameId,
    Seat,
    UserId,
    Username,
    IsBot,
    IsReady,
    IsConnected,
    CreatedAt,
    UpdatedAt,
    LeftAt,
}

#[derive(Iden)]
enum GameRounds {
    Table,
    Id,
    GameId,
    RoundNo,
    DealerPos,
    SpadesBroken,
    CreatedAt,
    CompletedAt,
}

#[derive(Iden)]
enum RoundHands {
    Table,
    Id,
    RoundId,
    PlayerSeat,
    Cards,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PlayerRoundStats {
    Table,
    Id,
    RoundId,
    PlayerSeat,
    Bid,
    BidOrder,
    IsNil,
    IsBlindNil,
    TricksWon,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum RoundTricks {
    Table,
    Id,
    RoundId,
    TrickNo,
    LeadSeat,
    LeadSuit,
    WinnerSeat,
    CreatedAt,
}

#[derive(Iden)]
enum TrickPlays {
    Table,
    Id,
    TrickId,
    PlayerSeat,
    Card,
    PlayOrder,
    PlayedAt,
}

#[derive(Iden)]
enum RoundScores {
    Table,
    Id,
    GameId,
    RoundId,
    Team0Score,
    Team1Score,
    Team0Bags,
    Team1Bags,
    Team0BagsTotal,
    Team1BagsTotal,
    Team0Total,
    Team1Total,
    SoloLines,
    CreatedAt,
}

#[derive(Iden)]
enum GameResults {
    Table,
    Id,
    GameId,
    Winner,
    TotalRounds,
    Team0Final,
    Team1Final,
    PlayerFinals,
    Reason,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Postgres enum types (stored as TEXT on SQLite)
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Postgres => {
                async fn enum_exists(
                    manager: &SchemaManager<'_>,
                    enum_name: &str,
                ) -> Result<bool, DbErr> {
                    let result = manager
                        .get_connection()
                        .query_one(Statement::from_string(
                            sea_orm::DatabaseBackend::Postgres,
                            format!("SELECT 1 FROM pg_type WHERE typname = '{}'", enum_name),
                        ))
                        .await?;
                    Ok(result.is_some())
                }

                if !enum_exists(manager, "game_state").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(GameStateEnum::Type)
                                .values([
                                    "WAITING",
                                    "BIDDING",
                                    "PLAYING",
                                    "ROUND_SUMMARY",
                                    "FINISHED",
                                    "ABANDONED",
                                ])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "game_mode").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(GameModeEnum::Type)
                                .values(["PARTNERS", "SOLO"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "game_format").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(GameFormatEnum::Type)
                                .values(["REGULAR", "WHIZ", "MIRRORS", "GIMMICK"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "game_gimmick").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(GameGimmickEnum::Type)
                                .values([
                                    "SUICIDE",
                                    "BID_4_OR_NIL",
                                    "BID_3",
                                    "BID_HEARTS",
                                    "CRAZY_ACES",
                                ])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "card_suit").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(CardSuitEnum::Type)
                                .values(["CLUBS", "DIAMONDS", "HEARTS", "SPADES"])
                                .to_owned(),
                        )
                        .await?;
                }
            }
            sea_orm::DatabaseBackend::Sqlite => {
                // SQLite doesn't need enum types - they're stored as TEXT
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Games::JoinCode)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Games::Mode)
                            .custom(GameModeEnum::Type)
                            .not_null()
                            .default("PARTNERS"),
                    )
                    .col(
                        ColumnDef::new(Games::Format)
                            .custom(GameFormatEnum::Type)
                            .not_null()
                            .default("REGULAR"),
                    )
                    .col(
                        ColumnDef::new(Games::Gimmick)
                            .custom(GameGimmickEnum::Type)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Games::Assassin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::Screamer)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::Lowball)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::Highball)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::AllowNil)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Games::AllowBlindNil)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::MinPoints)
                            .integer()
                            .not_null()
                            .default(-500),
                    )
                    .col(
                        ColumnDef::new(Games::MaxPoints)
                            .integer()
                            .not_null()
                            .default(500),
                    )
                    .col(
                        ColumnDef::new(Games::IsRated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::State)
                            .custom(GameStateEnum::Type)
                            .not_null()
                            .default("WAITING"),
                    )
                    .col(
                        ColumnDef::new(Games::DealerPos)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::CurrentRound).small_integer().null())
                    .col(ColumnDef::new(Games::CurrentRoundId).big_integer().null())
                    .col(
                        ColumnDef::new(Games::CurrentTrickNo)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::CurrentPlayerSeat)
                            .small_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Games::RngSeed).big_integer().not_null())
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::StartedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Games::EndedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // game_players
        manager
            .create_table(
                Table::create()
                    .table(GamePlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GamePlayers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(GamePlayers::GameId).big_integer().not_null())
                    .col(ColumnDef::new(GamePlayers::Seat).small_integer().not_null())
                    .col(ColumnDef::new(GamePlayers::UserId).big_integer().null())
                    .col(ColumnDef::new(GamePlayers::Username).string().not_null())
                    .col(
                        ColumnDef::new(GamePlayers::IsBot)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GamePlayers::IsReady)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GamePlayers::IsConnected)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(GamePlayers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GamePlayers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GamePlayers::LeftAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_players_game_id")
                            .from(GamePlayers::Table, GamePlayers::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_players_game_seat")
                    .table(GamePlayers::Table)
                    .col(GamePlayers::GameId)
                    .col(GamePlayers::Seat)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // game_rounds
        manager
            .create_table(
                Table::create()
                    .table(GameRounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameRounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(GameRounds::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(GameRounds::RoundNo)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameRounds::DealerPos)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameRounds::SpadesBroken)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(GameRounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameRounds::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_rounds_game_id")
                            .from(GameRounds::Table, GameRounds::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_rounds_game_round_no")
                    .table(GameRounds::Table)
                    .col(GameRounds::GameId)
                    .col(GameRounds::RoundNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // round_hands
        manager
            .create_table(
                Table::create()
                    .table(RoundHands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundHands::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(RoundHands::RoundId).big_integer().not_null())
                    .col(
                        ColumnDef::new(RoundHands::PlayerSeat)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoundHands::Cards).json_binary().not_null())
                    .col(
                        ColumnDef::new(RoundHands::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundHands::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_hands_round_id")
                            .from(RoundHands::Table, RoundHands::RoundId)
                            .to(GameRounds::Table, GameRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_hands_round_seat")
                    .table(RoundHands::Table)
                    .col(RoundHands::RoundId)
                    .col(RoundHands::PlayerSeat)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // player_round_stats
        manager
            .create_table(
                Table::create()
                    .table(PlayerRoundStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerRoundStats::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(PlayerRoundStats::RoundId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerRoundStats::PlayerSeat)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlayerRoundStats::Bid).small_integer().null())
                    .col(
                        ColumnDef::new(PlayerRoundStats::BidOrder)
                            .small_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PlayerRoundStats::IsNil)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PlayerRoundStats::IsBlindNil)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PlayerRoundStats::TricksWon)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PlayerRoundStats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerRoundStats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_round_stats_round_id")
                            .from(PlayerRoundStats::Table, PlayerRoundStats::RoundId)
                            .to(GameRounds::Table, GameRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_player_round_stats_round_seat")
                    .table(PlayerRoundStats::Table)
                    .col(PlayerRoundStats::RoundId)
                    .col(PlayerRoundStats::PlayerSeat)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // round_tricks
        manager
            .create_table(
                Table::create()
                    .table(RoundTricks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundTricks::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(RoundTricks::RoundId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundTricks::TrickNo)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundTricks::LeadSeat)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundTricks::LeadSuit)
                            .custom(CardSuitEnum::Type)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RoundTricks::WinnerSeat)
                            .small_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RoundTricks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_tricks_round_id")
                            .from(RoundTricks::Table, RoundTricks::RoundId)
                            .to(GameRounds::Table, GameRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_tricks_round_trick_no")
                    .table(RoundTricks::Table)
                    .col(RoundTricks::RoundId)
                    .col(RoundTricks::TrickNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // trick_plays
        manager
            .create_table(
                Table::create()
                    .table(TrickPlays::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrickPlays::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(TrickPlays::TrickId).big_integer().not_null())
                    .col(
                        ColumnDef::new(TrickPlays::PlayerSeat)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TrickPlays::Card).json_binary().not_null())
                    .col(
                        ColumnDef::new(TrickPlays::PlayOrder)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrickPlays::PlayedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trick_plays_trick_id")
                            .from(TrickPlays::Table, TrickPlays::TrickId)
                            .to(RoundTricks::Table, RoundTricks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_trick_plays_trick_order")
                    .table(TrickPlays::Table)
                    .col(TrickPlays::TrickId)
                    .col(TrickPlays::PlayOrder)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // round_scores
        manager
            .create_table(
                Table::create()
                    .table(RoundScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundScores::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(RoundScores::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(RoundScores::RoundId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RoundScores::Team0Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoundScores::Team1Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoundScores::Team0Bags)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoundScores::Team1Bags)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoundScores::Team0BagsTotal)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoundScores::Team1BagsTotal)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoundScores::Team0Total)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RoundScores::Team1Total)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(RoundScores::SoloLines).json_binary().null())
                    .col(
                        ColumnDef::new(RoundScores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_scores_game_id")
                            .from(RoundScores::Table, RoundScores::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_scores_round_id")
                            .from(RoundScores::Table, RoundScores::RoundId)
                            .to(GameRounds::Table, GameRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_round_scores_game_id")
                    .table(RoundScores::Table)
                    .col(RoundScores::GameId)
                    .to_owned(),
            )
            .await?;

        // game_results
        manager
            .create_table(
                Table::create()
                    .table(GameResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameResults::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(GameResults::GameId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GameResults::Winner).string_len(16).not_null())
                    .col(
                        ColumnDef::new(GameResults::TotalRounds)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameResults::Team0Final).integer().null())
                    .col(ColumnDef::new(GameResults::Team1Final).integer().null())
                    .col(
                        ColumnDef::new(GameResults::PlayerFinals)
                            .json_binary()
                            .null(),
                    )
                    .col(ColumnDef::new(GameResults::Reason).string_len(32).not_null())
                    .col(
                        ColumnDef::new(GameResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_results_game_id")
                            .from(GameResults::Table, GameResults::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GameResults::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoundScores::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrickPlays::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoundTricks::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(PlayerRoundStats::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(RoundHands::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameRounds::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GamePlayers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;

        if manager.get_database_backend() == sea_orm::DatabaseBackend::Postgres {
            manager
                .drop_type(PgType::drop().name(CardSuitEnum::Type).if_exists().to_owned())
                .await?;
            manager
                .drop_type(
                    PgType::drop()
                        .name(GameGimmickEnum::Type)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(
                    PgType::drop()
                        .name(GameFormatEnum::Type)
                        .if_exists()
                        .to_owned(),
                )
                .await?;
            manager
                .drop_type(PgType::drop().name(GameModeEnum::Type).if_exists().to_owned())
                .await?;
            manager
                .drop_type(PgType::drop().name(GameStateEnum::Type).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
