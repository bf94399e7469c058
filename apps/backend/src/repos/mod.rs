//! Query layer: free async functions generic over `ConnectionTrait`,
//! converting between entity models and domain types at the boundary.

pub mod games;
pub mod hands;
pub mod players;
pub mod results;
pub mod rounds;
pub mod scores;
pub mod stats;
pub mod plays;
pub mod tricks;

use sea_orm::JsonValue;

use crate::domain::Card;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub(crate) fn cards_to_json(cards: &[Card]) -> JsonValue {
    serde_json::to_value(cards).unwrap_or(JsonValue::Null)
}

pub(crate) fn cards_from_json(value: &JsonValue) -> Result<Vec<Card>, DomainError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("bad card list json: {e}"),
        )
    })
}

pub(crate) fn card_to_json(card: Card) -> JsonValue {
    serde_json::to_value(card).unwrap_or(JsonValue::Null)
}

pub(crate) fn card_from_json(value: &JsonValue) -> Result<Card, DomainError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        DomainError::infra(InfraErrorKind::DataCorruption, format!("bad card json: {e}"))
    })
}
