use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

/// Application-level error surfaced to transport adapters.
///
/// Stable `code()` strings let callers map errors without matching variants.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: &'static str, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Cache error: {detail}")]
    Cache { detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. } => code,
            AppError::Db { .. } => "STORE_WRITE_FAILURE",
            AppError::Cache { .. } => "CACHE_ERROR",
            AppError::NotFound { code, .. } => code,
            AppError::Conflict { code, .. } => code,
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::Db { detail }
            | AppError::Cache { detail }
            | AppError::NotFound { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::Config { detail }
            | AppError::Internal { detail } => detail.clone(),
        }
    }

    pub fn invalid(code: &'static str, detail: String) -> Self {
        Self::Validation { code, detail }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }

    pub fn cache(detail: String) -> Self {
        Self::Cache { detail }
    }

    pub fn not_found(code: &'static str, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn conflict(code: &'static str, detail: String) -> Self {
        Self::Conflict { code, detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        // Turn races and rule violations get dedicated codes so the room
        // edge can drop the former and echo the latter back to the seat.
        let turn_race = e.is_turn_race();
        let illegal_move = e.is_illegal_move();
        match e {
            DomainError::Validation(_, detail) => {
                let code = if turn_race {
                    "INVALID_TURN"
                } else if illegal_move {
                    "ILLEGAL_MOVE"
                } else {
                    "INVALID_REQUEST"
                };
                AppError::Validation { code, detail }
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::OptimisticLock => "CONCURRENCY_CONFLICT",
                    ConflictKind::SeatTaken => "SEAT_TAKEN",
                    ConflictKind::JoinCodeConflict => "JOIN_CODE_CONFLICT",
                    _ => "CONFLICT",
                };
                AppError::Conflict { code, detail }
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Game => "GAME_NOT_FOUND",
                    NotFoundKind::Round => "ROUND_NOT_FOUND",
                    NotFoundKind::Trick => "TRICK_NOT_FOUND",
                    NotFoundKind::Hand => "HAND_NOT_FOUND",
                    NotFoundKind::Player => "PLAYER_NOT_FOUND",
                    _ => "NOT_FOUND",
                };
                AppError::NotFound { code, detail }
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::Db { detail },
                _ => AppError::Internal { detail },
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::cache(format!("redis error: {e}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::internal(format!("serialization error: {e}"))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
