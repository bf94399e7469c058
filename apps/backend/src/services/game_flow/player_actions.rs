//! Bid and card-play entry points.
//!
//! Public methods record the action and then run the orchestration loop so
//! chained bot turns and state transitions happen in the same transaction.
//! The `_internal` variants record without processing; the bot loop calls
//! those to avoid re-entry.

use sea_orm::{DatabaseTransaction, Set};
use tracing::{debug, info};

use super::{FlowEvent, GameFlowService};
use crate::domain::{
    check_play, expected_bidder, next_seat, partner_of, round_start_seat, trick_winner,
    validate_bid, BidAttempt, Card, Seat, PLAYERS, TRICKS_PER_ROUND,
};
use crate::entities::games::{self, GameState};
use crate::entities::{Game, GameRound};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{games as games_repo, hands, plays, rounds, stats, tricks};

impl GameFlowService {
    /// Submit a bid, then process transitions and chained bot turns.
    pub async fn submit_bid(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        seat: Seat,
        attempt: BidAttempt,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        self.submit_bid_internal(txn, game_id, seat, attempt, &mut events)
            .await?;
        self.process_game_state(txn, game_id, &mut events).await?;
        Ok(events)
    }

    pub(super) async fn submit_bid_internal(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        seat: Seat,
        attempt: BidAttempt,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        debug!(game_id, seat, value = attempt.value, "Submitting bid");

        let game = games_repo::require_game(txn, game_id).await?;
        self.check_turn(&game, GameState::Bidding, seat)?;
        let round = self.current_round(txn, &game).await?;

        let hand = hands::find_by_seat(txn, round.id, seat).await?;
        let bids = stats::bids_by_seat(txn, round.id).await?;
        let partner_bid = bids[partner_of(seat) as usize].map(|b| b.value);

        let rules = games_repo::rule_set(&game);
        validate_bid(&rules, &hand, partner_bid, attempt)?;

        let bid_order = bids.iter().flatten().count() as u8;
        stats::record_bid(txn, round.id, seat, attempt.value, attempt.blind, bid_order).await?;

        let mut bids_after: [Option<(u8, bool)>; PLAYERS] = Default::default();
        for (s, bid) in bids.iter().enumerate() {
            bids_after[s] = bid.map(|b| (b.value, b.is_blind_nil));
        }
        bids_after[seat as usize] = Some((attempt.value, attempt.blind));

        let dealer = round.dealer_pos as Seat;
        let mut changes = games::ActiveModel::default();
        let next = if bid_order + 1 == PLAYERS as u8 {
            // Bidding closed. Trick 1 opens with the seat left of the dealer.
            let lead = round_start_seat(dealer);
            tricks::create_trick(txn, round.id, 1, lead).await?;
            changes.state = Set(GameState::Playing);
            changes.current_trick_no = Set(1);
            changes.current_player_seat = Set(Some(lead as i16));
            None
        } else {
            let next = expected_bidder(dealer, bid_order + 1);
            changes.current_player_seat = Set(Some(next as i16));
            Some(next)
        };
        games_repo::update_guarded(txn, &game, changes).await?;

        info!(
            game_id,
            seat,
            value = attempt.value,
            blind = attempt.blind,
            bid_order,
            "Bid persisted"
        );

        events.push(FlowEvent::BidPlaced {
            seat,
            value: attempt.value,
            is_blind_nil: attempt.blind,
            bids: bids_after,
            next_seat: next,
        });
        Ok(())
    }

    /// Play a card, then process transitions and chained bot turns.
    pub async fn play_card(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        seat: Seat,
        card: Card,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        self.play_card_internal(txn, game_id, seat, card, &mut events)
            .await?;
        self.process_game_state(txn, game_id, &mut events).await?;
        Ok(events)
    }

    pub(super) async fn play_card_internal(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        seat: Seat,
        card: Card,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        debug!(game_id, seat, "Playing card");

        let game = games_repo::require_game(txn, game_id).await?;
        self.check_turn(&game, GameState::Playing, seat)?;
        let round = self.current_round(txn, &game).await?;

        let trick = tricks::require_by_round_and_no(txn, round.id, game.current_trick_no).await?;
        let trick_plays = plays::find_by_trick(txn, trick.id).await?;
        let hand = hands::find_by_seat(txn, round.id, seat).await?;

        let rules = games_repo::rule_set(&game);
        check_play(&hand, &trick_plays, round.spades_broken, rules.special, card)?;

        hands::remove_card(txn, round.id, seat, card).await?;
        plays::create_play(txn, trick.id, seat, card, trick_plays.len() as u8).await?;
        if trick_plays.is_empty() {
            tricks::set_lead_suit(txn, &trick, card.suit).await?;
        }

        let mut spades_broken = round.spades_broken;
        if card.is_spade() && !spades_broken {
            rounds::set_spades_broken(txn, &round).await?;
            spades_broken = true;
        }

        let mut all_plays = trick_plays;
        all_plays.push((seat, card));
        let trick_no = game.current_trick_no;

        if all_plays.len() < PLAYERS {
            let next = next_seat(seat);
            let mut changes = games::ActiveModel::default();
            changes.current_player_seat = Set(Some(next as i16));
            games_repo::update_guarded(txn, &game, changes).await?;

            events.push(FlowEvent::CardPlayed {
                seat,
                card,
                next_seat: Some(next),
                spades_broken,
            });
            return Ok(());
        }

        // Fourth card: resolve the trick. The winner leads the next one.
        let winner = trick_winner(&all_plays)?;
        tricks::set_winner(txn, &trick, winner).await?;
        stats::increment_tricks_won(txn, round.id, winner).await?;

        events.push(FlowEvent::CardPlayed {
            seat,
            card,
            next_seat: None,
            spades_broken,
        });

        let tricks_won = self.tricks_won_by_seat(txn, round.id).await?;
        events.push(FlowEvent::TrickComplete {
            trick_no: trick_no as u8,
            winner_seat: winner,
            tricks_won,
        });

        info!(game_id, trick_no, winner, "Trick resolved");

        if trick_no as u8 == TRICKS_PER_ROUND {
            self.finish_round_internal(txn, &game, &round, events)
                .await?;
        } else {
            tricks::create_trick(txn, round.id, trick_no + 1, winner).await?;
            let mut changes = games::ActiveModel::default();
            changes.current_trick_no = Set(trick_no + 1);
            changes.current_player_seat = Set(Some(winner as i16));
            games_repo::update_guarded(txn, &game, changes).await?;
        }
        Ok(())
    }

    /// External continue signal out of the round summary: deal the next round.
    pub async fn continue_round(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        if game.state != GameState::RoundSummary {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game is not between rounds",
            )
            .into());
        }
        let next_round_no = game.current_round.unwrap_or(0) + 1;
        self.start_round_internal(txn, &game, next_round_no, &mut events)
            .await?;
        self.process_game_state(txn, game_id, &mut events).await?;
        Ok(events)
    }

    fn check_turn(&self, game: &Game, phase: GameState, seat: Seat) -> Result<(), DomainError> {
        if game.state != phase {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game is not in the required phase for this action",
            ));
        }
        if game.current_player_seat != Some(seat as i16) {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("Seat {seat} acted out of turn"),
            ));
        }
        Ok(())
    }

    pub(super) async fn current_round(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
    ) -> Result<GameRound, AppError> {
        let round_id = game.current_round_id.ok_or_else(|| {
            DomainError::validation_other(format!("Game {} has no current round", game.id))
        })?;
        Ok(rounds::require_round(txn, round_id).await?)
    }

    pub(super) async fn tricks_won_by_seat(
        &self,
        txn: &DatabaseTransaction,
        round_id: i64,
    ) -> Result<[u8; PLAYERS], AppError> {
        let rows = stats::find_by_round(txn, round_id).await?;
        let mut tricks_won = [0u8; PLAYERS];
        for row in rows {
            let seat = row.player_seat as usize;
            if seat < PLAYERS {
                tricks_won[seat] = row.tricks_won as u8;
            }
        }
        Ok(tricks_won)
    }
}
