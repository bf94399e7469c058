//! The processing loop run after every committed player action.
//!
//! Chained bot turns and automatic transitions are iterations of this loop,
//! never recursive calls, so a bot-only game cannot blow the stack.

use sea_orm::DatabaseTransaction;
use tracing::debug;

use super::{FlowEvent, GameFlowService};
use crate::domain::Seat;
use crate::entities::games::GameState;
use crate::error::AppError;
use crate::repos::{games as games_repo, players};

// A 4-bot game runs ~60 actions per round and games rarely pass 20 rounds;
// 2000 leaves a wide margin before we call it an infinite loop.
const MAX_ITERATIONS: usize = 2000;

impl GameFlowService {
    /// Drive the game forward until a human must act or the game ends.
    ///
    /// Each iteration reloads the game, then either executes one bot turn
    /// or deals the next round of a bot-only table.
    pub(super) async fn process_game_state(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        for iteration in 0..MAX_ITERATIONS {
            let game = games_repo::require_game(txn, game_id).await?;
            if game.state.is_terminal() {
                return Ok(());
            }

            match game.state {
                GameState::Bidding | GameState::Playing => {
                    let Some(seat) = game.current_player_seat else {
                        return Ok(());
                    };
                    let seat = seat as Seat;
                    let actor = players::find_by_seat(txn, game_id, seat).await?;
                    if !actor.is_some_and(|p| p.is_bot) {
                        // A human is up; the turn timer takes over from here.
                        return Ok(());
                    }
                    debug!(game_id, seat, iteration, "Bot turn");
                    self.run_bot_turn(txn, &game, seat, events).await?;
                }
                GameState::RoundSummary => {
                    // Tables without humans have nobody to press continue.
                    let seated = players::find_by_game(txn, game_id).await?;
                    if !seated.iter().all(|p| p.is_bot) {
                        return Ok(());
                    }
                    let next_round_no = game.current_round.unwrap_or(0) + 1;
                    debug!(game_id, next_round_no, "Bot-only table, dealing next round");
                    self.start_round_internal(txn, &game, next_round_no, events)
                        .await?;
                }
                GameState::Waiting | GameState::Finished | GameState::Abandoned => {
                    return Ok(());
                }
            }
        }

        Err(AppError::internal(format!(
            "Game {game_id} processing exceeded {MAX_ITERATIONS} iterations"
        )))
    }
}
