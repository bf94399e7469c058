// Unit tests for error mapping, no transport or database involved.
use crate::error::AppError;
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};

#[test]
fn turn_ownership_failures_map_to_invalid_turn() {
    for kind in [ValidationKind::PhaseMismatch, ValidationKind::OutOfTurn] {
        let de = DomainError::validation(kind, "not your turn");
        assert!(de.is_turn_race());
        let app: AppError = de.into();
        assert_eq!(app.code(), "INVALID_TURN");
    }
}

#[test]
fn rule_violations_map_to_illegal_move() {
    let kinds = [
        ValidationKind::CardNotInHand,
        ValidationKind::MustFollowSuit,
        ValidationKind::SpadesNotBroken,
        ValidationKind::SpadeForbidden,
        ValidationKind::NotLowestOfSuit,
        ValidationKind::InvalidBid,
        ValidationKind::NilForbidden,
    ];
    for kind in kinds {
        let de = DomainError::validation(kind, "bad move");
        assert!(de.is_illegal_move());
        assert!(!de.is_turn_race());
        let app: AppError = de.into();
        assert_eq!(app.code(), "ILLEGAL_MOVE");
    }
}

#[test]
fn lifecycle_validation_maps_to_invalid_request() {
    let kinds = [
        ValidationKind::SeatOccupied,
        ValidationKind::GameFull,
        ValidationKind::NotReady,
        ValidationKind::InvalidSettings,
    ];
    for kind in kinds {
        let de = DomainError::validation(kind, "bad request");
        assert!(!de.is_turn_race());
        assert!(!de.is_illegal_move());
        let app: AppError = de.into();
        assert_eq!(app.code(), "INVALID_REQUEST");
    }
}

#[test]
fn optimistic_lock_is_a_turn_race() {
    let de = DomainError::conflict(ConflictKind::OptimisticLock, "stale version");
    assert!(de.is_turn_race());
    let app: AppError = de.into();
    assert_eq!(app.code(), "CONCURRENCY_CONFLICT");
}

#[test]
fn maps_conflicts() {
    let seat: AppError = DomainError::conflict(ConflictKind::SeatTaken, "seat taken").into();
    assert_eq!(seat.code(), "SEAT_TAKEN");

    let code: AppError =
        DomainError::conflict(ConflictKind::JoinCodeConflict, "code in use").into();
    assert_eq!(code.code(), "JOIN_CODE_CONFLICT");
}

#[test]
fn maps_not_found_kinds() {
    let cases = [
        (NotFoundKind::Game, "GAME_NOT_FOUND"),
        (NotFoundKind::Round, "ROUND_NOT_FOUND"),
        (NotFoundKind::Trick, "TRICK_NOT_FOUND"),
        (NotFoundKind::Hand, "HAND_NOT_FOUND"),
        (NotFoundKind::Player, "PLAYER_NOT_FOUND"),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::not_found(kind, "missing").into();
        assert_eq!(app.code(), code);
    }
}

#[test]
fn maps_infra_kinds() {
    let db: AppError =
        DomainError::infra(InfraErrorKind::DbUnavailable, "connection refused").into();
    assert_eq!(db.code(), "STORE_WRITE_FAILURE");

    let corrupt: AppError =
        DomainError::infra(InfraErrorKind::DataCorruption, "bad payload").into();
    assert_eq!(corrupt.code(), "INTERNAL");
}

#[test]
fn detail_survives_the_mapping() {
    let app: AppError = DomainError::validation_other("specific detail").into();
    assert_eq!(app.detail(), "specific detail");
}
