//! Round hands repository. The stored JSON is the remaining-hand snapshot;
//! removing a played card is the only mutation.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::domain::{Card, Seat, PLAYERS};
use crate::entities::round_hands::{self};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::{cards_from_json, cards_to_json};

pub async fn create_hands<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    hands: &[Vec<Card>; PLAYERS],
) -> Result<(), DomainError> {
    let now = OffsetDateTime::now_utc();
    for (seat, hand) in hands.iter().enumerate() {
        let row = round_hands::ActiveModel {
            id: sea_orm::NotSet,
            round_id: Set(round_id),
            player_seat: Set(seat as i16),
            cards: Set(cards_to_json(hand)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        row.insert(conn).await?;
    }
    Ok(())
}

pub async fn find_by_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<[Vec<Card>; PLAYERS], DomainError> {
    let rows = round_hands::Entity::find()
        .filter(round_hands::Column::RoundId.eq(round_id))
        .all(conn)
        .await?;

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for row in rows {
        let seat = row.player_seat as usize;
        if seat >= PLAYERS {
            continue;
        }
        hands[seat] = cards_from_json(&row.cards)?;
    }
    Ok(hands)
}

pub async fn find_by_seat<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    seat: Seat,
) -> Result<Vec<Card>, DomainError> {
    let row = round_hands::Entity::find()
        .filter(round_hands::Column::RoundId.eq(round_id))
        .filter(round_hands::Column::PlayerSeat.eq(seat as i16))
        .one(conn)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Hand,
                format!("No hand for seat {seat} in round {round_id}"),
            )
        })?;
    cards_from_json(&row.cards)
}

/// Remove a played card from the stored hand snapshot.
pub async fn remove_card<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    seat: Seat,
    card: Card,
) -> Result<(), DomainError> {
    let row = round_hands::Entity::find()
        .filter(round_hands::Column::RoundId.eq(round_id))
        .filter(round_hands::Column::PlayerSeat.eq(seat as i16))
        .one(conn)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Hand,
                format!("No hand for seat {seat} in round {round_id}"),
            )
        })?;

    let mut cards = cards_from_json(&row.cards)?;
    let before = cards.len();
    cards.retain(|&c| c != card);
    if cards.len() == before {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            "Card not in stored hand",
        ));
    }

    let mut active: round_hands::ActiveModel = row.into();
    active.cards = Set(cards_to_json(&cards));
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await?;
    Ok(())
}
