//! Builds bot turn contexts and funnels decisions through the same entry
//! points human commands use.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sea_orm::DatabaseTransaction;

use super::{FlowEvent, GameFlowService};
use crate::ai::{self, BotTurnContext};
use crate::domain::{derive_decision_seed, Seat, PLAYERS};
use crate::entities::games::GameState;
use crate::entities::Game;
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{games as games_repo, hands, plays, stats, tricks};

impl GameFlowService {
    /// Act for a seat whose turn timer expired, then let any bot turns run.
    ///
    /// The acting seat must still hold the turn; a mismatch is a turn race
    /// the caller drops.
    pub async fn force_act(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        seat: Seat,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        if !matches!(game.state, GameState::Bidding | GameState::Playing) {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game is not awaiting an action",
            )
            .into());
        }
        if game.current_player_seat != Some(seat as i16) {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("Seat {seat} no longer holds the turn"),
            )
            .into());
        }

        self.run_bot_turn(txn, &game, seat, &mut events).await?;
        self.process_game_state(txn, game_id, &mut events).await?;
        Ok(events)
    }

    /// Decide and execute one bot action for the seat currently on turn.
    ///
    /// The decision RNG is seeded from (game seed, round, seat), so reruns
    /// of the same position pick the same action.
    pub(super) async fn run_bot_turn(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
        seat: Seat,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        let round = self.current_round(txn, game).await?;
        let ctx = self.build_turn_context(txn, game, seat).await?;
        let seed = derive_decision_seed(game.rng_seed, round.round_no, seat as i16);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        match game.state {
            GameState::Bidding => {
                let attempt = ai::choose_bid(&ctx, &mut rng);
                self.submit_bid_internal(txn, game.id, seat, attempt, events)
                    .await
            }
            GameState::Playing => {
                let card = ai::choose_card(&ctx, &mut rng).ok_or_else(|| {
                    DomainError::validation_other(format!(
                        "No legal play for seat {seat} in game {}",
                        game.id
                    ))
                })?;
                self.play_card_internal(txn, game.id, seat, card, events)
                    .await
            }
            _ => Ok(()),
        }
    }

    /// Assemble the per-turn table view a decision needs. Also used for
    /// timeout auto-play on behalf of a human seat.
    pub(super) async fn build_turn_context(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
        seat: Seat,
    ) -> Result<BotTurnContext, AppError> {
        let round = self.current_round(txn, game).await?;
        let hand = hands::find_by_seat(txn, round.id, seat).await?;

        let bid_records = stats::bids_by_seat(txn, round.id).await?;
        let mut bids = [None; PLAYERS];
        for (s, record) in bid_records.iter().enumerate() {
            bids[s] = record.map(|b| b.value);
        }

        let tricks_won = self.tricks_won_by_seat(txn, round.id).await?;

        let trick = if game.state == GameState::Playing && game.current_trick_no > 0 {
            let trick =
                tricks::require_by_round_and_no(txn, round.id, game.current_trick_no).await?;
            plays::find_by_trick(txn, trick.id).await?
        } else {
            Vec::new()
        };

        Ok(BotTurnContext {
            seat,
            hand,
            rules: games_repo::rule_set(game),
            bids,
            tricks_won,
            trick,
            spades_broken: round.spades_broken,
        })
    }
}
