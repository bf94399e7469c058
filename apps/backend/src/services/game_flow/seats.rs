//! Seating: joins, leaves, bots, readiness and disconnects.

use sea_orm::DatabaseTransaction;
use tracing::info;

use super::{FlowEvent, GameFlowService};
use crate::domain::{Seat, PLAYERS};
use crate::entities::games::GameState;
use crate::entities::GamePlayer;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{games as games_repo, players};

impl GameFlowService {
    /// Seat a human in a WAITING game, or reconnect one that already holds
    /// a seat in a running game.
    pub async fn join_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        user_id: i64,
        username: &str,
        requested_seat: Option<Seat>,
    ) -> Result<(Seat, Vec<FlowEvent>), AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        let seated = players::find_by_game(txn, game_id).await?;

        if let Some(existing) = seated.iter().find(|p| p.user_id == Some(user_id)) {
            let seat = existing.seat as Seat;
            if !existing.is_connected {
                players::set_connected(txn, existing.clone(), true).await?;
                events.push(FlowEvent::SeatsChanged);
            }
            return Ok((seat, events));
        }

        if game.state != GameState::Waiting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game has already started",
            )
            .into());
        }

        let seat = pick_seat(&seated, requested_seat)?;
        players::add_player(txn, game_id, seat, Some(user_id), username, false).await?;
        info!(game_id, seat, user_id, "Player joined");
        events.push(FlowEvent::PlayerJoined { seat });
        Ok((seat, events))
    }

    /// Leave a lobby seat; the row is kept for audit but the seat frees up.
    pub async fn leave_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        seat: Seat,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        let player = players::require_by_seat(txn, game_id, seat).await?;

        if game.state == GameState::Waiting || game.state.is_terminal() {
            players::vacate_seat(txn, player).await?;
            info!(game_id, seat, "Player left");
            events.push(FlowEvent::PlayerLeft { seat });
            return Ok(events);
        }

        // Mid-game a leave is a disconnect; the seat stays owned so the
        // player can come back.
        self.mark_disconnected(txn, game_id, player, &mut events)
            .await?;
        Ok(events)
    }

    /// Fill a WAITING seat with a bot. Bots arrive ready.
    pub async fn invite_bot(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        requested_seat: Option<Seat>,
    ) -> Result<(Seat, Vec<FlowEvent>), AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        if game.state != GameState::Waiting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Bots can only be added in the lobby",
            )
            .into());
        }

        let seated = players::find_by_game(txn, game_id).await?;
        let seat = pick_seat(&seated, requested_seat)?;
        let name = format!("Bot {}", seat + 1);
        players::add_player(txn, game_id, seat, None, &name, true).await?;
        info!(game_id, seat, "Bot added");
        events.push(FlowEvent::PlayerJoined { seat });

        self.start_if_table_ready(txn, game_id, &mut events).await?;
        Ok((seat, events))
    }

    pub async fn remove_bot(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        seat: Seat,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        if game.state != GameState::Waiting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Bots can only be removed in the lobby",
            )
            .into());
        }

        let player = players::require_by_seat(txn, game_id, seat).await?;
        if !player.is_bot {
            return Err(DomainError::validation(
                ValidationKind::Other,
                format!("Seat {seat} is not a bot"),
            )
            .into());
        }
        players::vacate_seat(txn, player).await?;
        info!(game_id, seat, "Bot removed");
        events.push(FlowEvent::PlayerLeft { seat });
        Ok(events)
    }

    /// Flip a human seat's readiness. A full, all-ready table starts the
    /// game in the same transaction.
    pub async fn toggle_ready(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        seat: Seat,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        if game.state != GameState::Waiting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Readiness only applies in the lobby",
            )
            .into());
        }

        let player = players::require_by_seat(txn, game_id, seat).await?;
        if player.is_bot {
            return Err(DomainError::validation(
                ValidationKind::Other,
                "Bots are always ready",
            )
            .into());
        }
        let was_ready = player.is_ready;
        players::set_ready(txn, player, !was_ready).await?;
        events.push(FlowEvent::SeatsChanged);

        self.start_if_table_ready(txn, game_id, &mut events).await?;
        Ok(events)
    }

    /// Transport-level disconnect. In the lobby the seat is vacated; in a
    /// running game the seat is flagged and play continues (the turn timer
    /// will act for them). When the last human goes, the game is abandoned.
    pub async fn handle_disconnect(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        seat: Seat,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        let Some(player) = players::find_by_seat(txn, game_id, seat).await? else {
            return Ok(events);
        };

        if game.state == GameState::Waiting {
            players::vacate_seat(txn, player).await?;
            events.push(FlowEvent::PlayerLeft { seat });
            return Ok(events);
        }
        if game.state.is_terminal() {
            return Ok(events);
        }

        self.mark_disconnected(txn, game_id, player, &mut events)
            .await?;
        Ok(events)
    }

    async fn mark_disconnected(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        player: GamePlayer,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        let seat = player.seat as Seat;
        players::set_connected(txn, player, false).await?;
        info!(game_id, seat, "Player disconnected");
        events.push(FlowEvent::PlayerDisconnected { seat });

        if players::connected_humans(txn, game_id).await?.is_empty() {
            let game = games_repo::require_game(txn, game_id).await?;
            self.abandon_game_internal(txn, &game, events).await?;
        }
        Ok(())
    }

    async fn start_if_table_ready(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        let seated = players::find_by_game(txn, game_id).await?;
        if seated.len() != PLAYERS || !seated.iter().all(|p| p.is_ready) {
            return Ok(());
        }
        let game = games_repo::require_game(txn, game_id).await?;
        if game.state != GameState::Waiting {
            return Ok(());
        }
        self.launch_game_internal(txn, &game, events).await?;
        self.process_game_state(txn, game_id, events).await
    }
}

fn pick_seat(seated: &[GamePlayer], requested: Option<Seat>) -> Result<Seat, DomainError> {
    let taken: Vec<Seat> = seated.iter().map(|p| p.seat as Seat).collect();
    match requested {
        Some(seat) => {
            if seat as usize >= PLAYERS {
                return Err(DomainError::validation(
                    ValidationKind::Other,
                    format!("Seat {seat} does not exist"),
                ));
            }
            if taken.contains(&seat) {
                return Err(DomainError::validation(
                    ValidationKind::SeatOccupied,
                    format!("Seat {seat} is occupied"),
                ));
            }
            Ok(seat)
        }
        None => (0..PLAYERS as Seat)
            .find(|s| !taken.contains(s))
            .ok_or_else(|| {
                DomainError::validation(ValidationKind::GameFull, "All seats are occupied")
            }),
    }
}
