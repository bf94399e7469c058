//! Games repository: creation, lookup and guarded mutation.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::domain::rules::{GameFormat, GameMode, GimmickVariant, RuleSet, SpecialRules};
use crate::entities::games::{self, GameGimmick, GameState};
use crate::entities::Game;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Settings captured at game creation.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub join_code: String,
    pub rules: RuleSet,
    pub is_rated: bool,
    pub rng_seed: i64,
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<Game, DomainError> {
    let now = OffsetDateTime::now_utc();
    let rules = dto.rules;

    let game = games::ActiveModel {
        id: sea_orm::NotSet,
        join_code: Set(dto.join_code),
        mode: Set(mode_to_db(rules.mode)),
        format: Set(format_to_db(rules.format)),
        gimmick: Set(rules.gimmick.map(gimmick_to_db)),
        assassin: Set(rules.special.assassin),
        screamer: Set(rules.special.screamer),
        lowball: Set(rules.special.lowball),
        highball: Set(rules.special.highball),
        allow_nil: Set(rules.allow_nil),
        allow_blind_nil: Set(rules.allow_blind_nil),
        min_points: Set(rules.min_points),
        max_points: Set(rules.max_points),
        is_rated: Set(dto.is_rated),
        state: Set(GameState::Waiting),
        dealer_pos: Set(0),
        current_round: Set(None),
        current_round_id: Set(None),
        current_trick_no: Set(0),
        current_player_seat: Set(None),
        rng_seed: Set(dto.rng_seed),
        lock_version: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
        started_at: Set(None),
        ended_at: Set(None),
    };

    game.insert(conn).await.map_err(|e| {
        if e.to_string().contains("join_code") {
            DomainError::conflict(ConflictKind::JoinCodeConflict, "Join code already in use")
        } else {
            e.into()
        }
    })
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    Ok(games::Entity::find_by_id(game_id).one(conn).await?)
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
    })
}

pub async fn find_by_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    join_code: &str,
) -> Result<Option<Game>, DomainError> {
    Ok(games::Entity::find()
        .filter(games::Column::JoinCode.eq(join_code))
        .one(conn)
        .await?)
}

/// Apply a prepared update, bumping `lock_version` with an optimistic check
/// against the version the caller read.
pub async fn update_guarded<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game: &Game,
    mut changes: games::ActiveModel,
) -> Result<(), DomainError> {
    changes.lock_version = Set(game.lock_version + 1);
    changes.updated_at = Set(OffsetDateTime::now_utc());

    let result = games::Entity::update_many()
        .set(changes)
        .filter(games::Column::Id.eq(game.id))
        .filter(games::Column::LockVersion.eq(game.lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(DomainError::conflict(
            ConflictKind::OptimisticLock,
            format!("Game {} was modified concurrently", game.id),
        ));
    }
    Ok(())
}

/// Map entity columns back to the domain rule set.
pub fn rule_set(game: &Game) -> RuleSet {
    RuleSet {
        mode: mode_from_db(game.mode),
        format: format_from_db(game.format),
        gimmick: game.gimmick.map(gimmick_from_db),
        special: SpecialRules {
            assassin: game.assassin,
            screamer: game.screamer,
            lowball: game.lowball,
            highball: game.highball,
        },
        allow_nil: game.allow_nil,
        allow_blind_nil: game.allow_blind_nil,
        min_points: game.min_points,
        max_points: game.max_points,
    }
}

pub fn mode_to_db(mode: GameMode) -> games::GameMode {
    match mode {
        GameMode::Partners => games::GameMode::Partners,
        GameMode::Solo => games::GameMode::Solo,
    }
}

pub fn mode_from_db(mode: games::GameMode) -> GameMode {
    match mode {
        games::GameMode::Partners => GameMode::Partners,
        games::GameMode::Solo => GameMode::Solo,
    }
}

pub fn format_to_db(format: GameFormat) -> games::GameFormat {
    match format {
        GameFormat::Regular => games::GameFormat::Regular,
        GameFormat::Whiz => games::GameFormat::Whiz,
        GameFormat::Mirrors => games::GameFormat::Mirrors,
        GameFormat::Gimmick => games::GameFormat::Gimmick,
    }
}

pub fn format_from_db(format: games::GameFormat) -> GameFormat {
    match format {
        games::GameFormat::Regular => GameFormat::Regular,
        games::GameFormat::Whiz => GameFormat::Whiz,
        games::GameFormat::Mirrors => GameFormat::Mirrors,
        games::GameFormat::Gimmick => GameFormat::Gimmick,
    }
}

pub fn gimmick_to_db(gimmick: GimmickVariant) -> GameGimmick {
    match gimmick {
        GimmickVariant::Suicide => GameGimmick::Suicide,
        GimmickVariant::Bid4OrNil => GameGimmick::Bid4OrNil,
        GimmickVariant::Bid3 => GameGimmick::Bid3,
        GimmickVariant::BidHearts => GameGimmick::BidHearts,
        GimmickVariant::CrazyAces => GameGimmick::CrazyAces,
    }
}

pub fn gimmick_from_db(gimmick: GameGimmick) -> GimmickVariant {
    match gimmick {
        GameGimmick::Suicide => GimmickVariant::Suicide,
        GameGimmick::Bid4OrNil => GimmickVariant::Bid4OrNil,
        GameGimmick::Bid3 => GimmickVariant::Bid3,
        GameGimmick::BidHearts => GimmickVariant::BidHearts,
        GameGimmick::CrazyAces => GimmickVariant::CrazyAces,
    }
}
