//! Domain-level error type used across services and repos.
//!
//! This error type is HTTP- and DB-agnostic. Callers at the service edge
//! return `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation kinds, split into turn-ownership failures (dropped silently at
/// the room edge when they come from a stale timer or bot race) and rule
/// violations that are reported back to the acting seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    // Turn ownership
    PhaseMismatch,
    OutOfTurn,
    // Rule violations
    CardNotInHand,
    MustFollowSuit,
    SpadesNotBroken,
    MustPlaySpade,
    SpadeForbidden,
    NotLowestOfSuit,
    NotHighestOfSuit,
    InvalidBid,
    NilForbidden,
    BlindNilForbidden,
    // Seating / lifecycle
    SeatOccupied,
    GameFull,
    NotReady,
    InvalidSettings,
    // Dealing
    InvalidPlayerCount,
    InvalidHandSize,
    Other,
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Round,
    Trick,
    Hand,
    Player,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    SeatTaken,
    OptimisticLock,
    JoinCodeConflict,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::Other, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// A turn-ownership race: the actor no longer holds the turn or the game
    /// moved on. The room edge drops these without surfacing an error.
    pub fn is_turn_race(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(ValidationKind::PhaseMismatch, _)
                | DomainError::Validation(ValidationKind::OutOfTurn, _)
                | DomainError::Conflict(ConflictKind::OptimisticLock, _)
        )
    }

    /// A rule violation by the acting seat (reported back, turn retained).
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(
                ValidationKind::CardNotInHand
                    | ValidationKind::MustFollowSuit
                    | ValidationKind::SpadesNotBroken
                    | ValidationKind::MustPlaySpade
                    | ValidationKind::SpadeForbidden
                    | ValidationKind::NotLowestOfSuit
                    | ValidationKind::NotHighestOfSuit
                    | ValidationKind::InvalidBid
                    | ValidationKind::NilForbidden
                    | ValidationKind::BlindNilForbidden,
                _
            )
        )
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::infra(InfraErrorKind::Other("db".into()), e.to_string())
    }
}
