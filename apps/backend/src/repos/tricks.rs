//! Round tricks repository.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;

use crate::domain::{Seat, Suit};
use crate::entities::round_tricks::{self, CardSuit};
use crate::entities::RoundTrick;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn create_trick<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    trick_no: i16,
    lead_seat: Seat,
) -> Result<RoundTrick, DomainError> {
    let trick = round_tricks::ActiveModel {
        id: sea_orm::NotSet,
        round_id: Set(round_id),
        trick_no: Set(trick_no),
        lead_seat: Set(lead_seat as i16),
        lead_suit: Set(None),
        winner_seat: Set(None),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    Ok(trick.insert(conn).await?)
}

pub async fn find_by_round_and_no<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    trick_no: i16,
) -> Result<Option<RoundTrick>, DomainError> {
    Ok(round_tricks::Entity::find()
        .filter(round_tricks::Column::RoundId.eq(round_id))
        .filter(round_tricks::Column::TrickNo.eq(trick_no))
        .one(conn)
        .await?)
}

pub async fn require_by_round_and_no<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    trick_no: i16,
) -> Result<RoundTrick, DomainError> {
    find_by_round_and_no(conn, round_id, trick_no)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Trick,
                format!("Trick {trick_no} of round {round_id} not found"),
            )
        })
}

pub async fn set_lead_suit<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trick: &RoundTrick,
    suit: Suit,
) -> Result<(), DomainError> {
    let mut active: round_tricks::ActiveModel = trick.clone().into();
    active.lead_suit = Set(Some(suit_to_db(suit)));
    active.update(conn).await?;
    Ok(())
}

pub async fn set_winner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    trick: &RoundTrick,
    winner_seat: Seat,
) -> Result<(), DomainError> {
    let mut active: round_tricks::ActiveModel = trick.clone().into();
    active.winner_seat = Set(Some(winner_seat as i16));
    active.update(conn).await?;
    Ok(())
}

pub fn suit_to_db(suit: Suit) -> CardSuit {
    match suit {
        Suit::Clubs => CardSuit::Clubs,
        Suit::Diamonds => CardSuit::Diamonds,
        Suit::Hearts => CardSuit::Hearts,
        Suit::Spades => CardSuit::Spades,
    }
}

pub fn suit_from_db(suit: CardSuit) -> Suit {
    match suit {
        CardSuit::Clubs => Suit::Clubs,
        CardSuit::Diamonds => Suit::Diamonds,
        CardSuit::Hearts => Suit::Hearts,
        CardSuit::Spades => Suit::Spades,
    }
}
