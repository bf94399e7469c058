//! Round and game lifecycle: dealing, scoring, completion, abandonment.

use rand::Rng;
use sea_orm::{DatabaseTransaction, Set};
use time::OffsetDateTime;
use tracing::{info, warn};

use super::{FlowEvent, GameFlowService};
use crate::domain::{
    apply_solo_bags, deal_hands, derive_dealing_seed, next_seat, partners_completion,
    round_start_seat, score_partners_round, score_solo_round, solo_completion, Completion,
    GameMode, Seat, SoloLine, HAND_SIZE, PLAYERS,
};
use crate::entities::games::{self, GameState};
use crate::entities::{Game, GameRound};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::results::{self, ResultInsert, Winner};
use crate::repos::scores::{self, ScoreInsert};
use crate::repos::{games as games_repo, hands, players, rounds, stats};

/// Scoring outcome of one round, in both event and cache-friendly form.
#[derive(Debug, Clone, Copy)]
pub struct RoundScoreSummary {
    pub round_no: u8,
    pub team_deltas: Option<[i32; 2]>,
    pub team_bags: Option<[i16; 2]>,
    pub team_totals: Option<[i32; 2]>,
    pub team_bags_total: Option<[i16; 2]>,
    pub player_deltas: Option<[i32; PLAYERS]>,
    pub player_totals: Option<[i32; PLAYERS]>,
}

impl GameFlowService {
    /// Start a WAITING game once all four seats are occupied and ready.
    pub async fn start_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        if game.state != GameState::Waiting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game has already started",
            )
            .into());
        }

        let seated = players::find_by_game(txn, game_id).await?;
        if seated.len() != PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("Need {PLAYERS} players, have {}", seated.len()),
            )
            .into());
        }
        if !seated.iter().all(|p| p.is_ready) {
            return Err(DomainError::validation(
                ValidationKind::NotReady,
                "All players must be ready",
            )
            .into());
        }

        self.launch_game_internal(txn, &game, &mut events).await?;
        self.process_game_state(txn, game_id, &mut events).await?;
        Ok(events)
    }

    /// Deal round 1 of a fully seated, all-ready lobby.
    pub(super) async fn launch_game_internal(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        let mut changes = games::ActiveModel::default();
        changes.started_at = Set(Some(OffsetDateTime::now_utc()));
        games_repo::update_guarded(txn, game, changes).await?;

        info!(game_id = game.id, "Game starting");
        events.push(FlowEvent::GameStarted);

        let game = games_repo::require_game(txn, game.id).await?;
        self.start_round_internal(txn, &game, 1, events).await
    }

    /// Deal a round and open bidding. Dealer rotates clockwise each round;
    /// the dealing seed is derived from (game seed, round number) so a
    /// crashed deal replays identically.
    pub(super) async fn start_round_internal(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
        round_no: i16,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        let dealer = if round_no == 1 {
            game.dealer_pos as Seat
        } else {
            next_seat(game.dealer_pos as Seat)
        };

        let round = rounds::create_round(txn, game.id, round_no, dealer).await?;
        stats::init_round(txn, round.id).await?;

        let seed = derive_dealing_seed(game.rng_seed, round_no);
        let dealt = deal_hands(HAND_SIZE, seed)?;
        hands::create_hands(txn, round.id, &dealt).await?;

        let first_bidder = round_start_seat(dealer);
        let mut changes = games::ActiveModel::default();
        changes.state = Set(GameState::Bidding);
        changes.dealer_pos = Set(dealer as i16);
        changes.current_round = Set(Some(round_no));
        changes.current_round_id = Set(Some(round.id));
        changes.current_trick_no = Set(0);
        changes.current_player_seat = Set(Some(first_bidder as i16));
        games_repo::update_guarded(txn, game, changes).await?;

        info!(
            game_id = game.id,
            round_no, dealer, first_bidder, "Round dealt, bidding open"
        );

        events.push(FlowEvent::RoundStarted {
            round_no: round_no as u8,
            dealer_pos: dealer,
            first_bidder,
            hands: dealt,
        });
        Ok(())
    }

    /// Score the finished round and either park the game in the round
    /// summary or finish it when a threshold was crossed.
    pub(super) async fn finish_round_internal(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
        round: &GameRound,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        let lines = stats::seat_lines(txn, round.id).await?;
        rounds::complete_round(txn, round).await?;

        let rules = games_repo::rule_set(game);
        let prev = scores::find_latest_by_game(txn, game.id).await?;
        let round_no = round.round_no as u8;

        let (summary, completion) = match rules.mode {
            GameMode::Partners => {
                let deltas = score_partners_round(&lines);
                let prev_totals = prev
                    .as_ref()
                    .map(|p| [p.team0_total, p.team1_total])
                    .unwrap_or([0, 0]);
                let prev_bags = prev
                    .as_ref()
                    .map(|p| [p.team0_bags_total, p.team1_bags_total])
                    .unwrap_or([0, 0]);

                let totals = [
                    prev_totals[0] + deltas[0].points,
                    prev_totals[1] + deltas[1].points,
                ];
                let bags_total = [
                    prev_bags[0] + deltas[0].bags as i16,
                    prev_bags[1] + deltas[1].bags as i16,
                ];

                scores::insert_round_score(
                    txn,
                    ScoreInsert {
                        game_id: game.id,
                        round_id: round.id,
                        team0_score: deltas[0].points,
                        team1_score: deltas[1].points,
                        team0_bags: deltas[0].bags as i16,
                        team1_bags: deltas[1].bags as i16,
                        team0_bags_total: bags_total[0],
                        team1_bags_total: bags_total[1],
                        team0_total: totals[0],
                        team1_total: totals[1],
                        solo_lines: None,
                    },
                )
                .await?;

                let summary = RoundScoreSummary {
                    round_no,
                    team_deltas: Some([deltas[0].points, deltas[1].points]),
                    team_bags: Some([deltas[0].bags as i16, deltas[1].bags as i16]),
                    team_totals: Some(totals),
                    team_bags_total: Some(bags_total),
                    player_deltas: None,
                    player_totals: None,
                };
                let completion =
                    partners_completion(totals, rules.min_points, rules.max_points);
                (summary, completion)
            }
            GameMode::Solo => {
                let prev_lines = match prev.as_ref() {
                    Some(row) => scores::solo_lines_of(row)?,
                    None => None,
                };

                let mut solo_lines = [SoloLine {
                    seat: 0,
                    round_score: 0,
                    running_total: 0,
                    bags_counter: 0,
                }; PLAYERS];
                let mut deltas = [0i32; PLAYERS];
                let mut totals = [0i32; PLAYERS];

                for seat in 0..PLAYERS {
                    let delta = score_solo_round(&lines[seat]);
                    let (prev_total, prev_counter) = prev_lines
                        .map(|l| (l[seat].running_total, l[seat].bags_counter))
                        .unwrap_or((0, 0));
                    let (penalty, counter) = apply_solo_bags(prev_counter, delta.bags);
                    let round_score = delta.points + penalty;
                    let running_total = prev_total + round_score;

                    solo_lines[seat] = SoloLine {
                        seat: seat as Seat,
                        round_score,
                        running_total,
                        bags_counter: counter,
                    };
                    deltas[seat] = round_score;
                    totals[seat] = running_total;
                }

                scores::insert_round_score(
                    txn,
                    ScoreInsert {
                        game_id: game.id,
                        round_id: round.id,
                        team0_score: 0,
                        team1_score: 0,
                        team0_bags: 0,
                        team1_bags: 0,
                        team0_bags_total: 0,
                        team1_bags_total: 0,
                        team0_total: 0,
                        team1_total: 0,
                        solo_lines: Some(solo_lines),
                    },
                )
                .await?;

                let summary = RoundScoreSummary {
                    round_no,
                    team_deltas: None,
                    team_bags: None,
                    team_totals: None,
                    team_bags_total: None,
                    player_deltas: Some(deltas),
                    player_totals: Some(totals),
                };
                let completion = solo_completion(totals, rules.min_points, rules.max_points);
                (summary, completion)
            }
        };

        events.push(FlowEvent::RoundComplete(summary));
        info!(game_id = game.id, round_no, "Round scored");

        match completion {
            Completion::Continue => {
                let mut changes = games::ActiveModel::default();
                changes.state = Set(GameState::RoundSummary);
                changes.current_player_seat = Set(None);
                games_repo::update_guarded(txn, game, changes).await?;
            }
            Completion::TeamWins(team) => {
                self.complete_game(txn, game, Winner::Team(team), &summary, events)
                    .await?;
            }
            Completion::SeatWins(seat) => {
                self.complete_game(txn, game, Winner::Seat(seat), &summary, events)
                    .await?;
            }
        }
        Ok(())
    }

    async fn complete_game(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
        winner: Winner,
        summary: &RoundScoreSummary,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        let total_rounds = summary.round_no as i16;
        results::insert_result(
            txn,
            ResultInsert {
                game_id: game.id,
                winner,
                total_rounds,
                team_finals: summary.team_totals.map(|t| (t[0], t[1])),
                player_finals: summary.player_totals,
                abandoned: false,
            },
        )
        .await?;

        let mut changes = games::ActiveModel::default();
        changes.state = Set(GameState::Finished);
        changes.current_player_seat = Set(None);
        changes.ended_at = Set(Some(OffsetDateTime::now_utc()));
        games_repo::update_guarded(txn, game, changes).await?;

        info!(game_id = game.id, winner = ?winner, total_rounds, "Game finished");
        events.push(FlowEvent::GameCompleted {
            winner,
            total_rounds: summary.round_no,
            team_totals: summary.team_totals,
            player_totals: summary.player_totals,
        });
        Ok(())
    }

    /// Mark an active game abandoned. No winner is recorded.
    pub(super) async fn abandon_game_internal(
        &self,
        txn: &DatabaseTransaction,
        game: &Game,
        events: &mut Vec<FlowEvent>,
    ) -> Result<(), AppError> {
        warn!(game_id = game.id, "All humans gone, abandoning game");

        let total_rounds = game.current_round.unwrap_or(0);
        results::insert_result(
            txn,
            ResultInsert {
                game_id: game.id,
                winner: Winner::None,
                total_rounds,
                team_finals: None,
                player_finals: None,
                abandoned: true,
            },
        )
        .await?;

        let mut changes = games::ActiveModel::default();
        changes.state = Set(GameState::Abandoned);
        changes.current_player_seat = Set(None);
        changes.ended_at = Set(Some(OffsetDateTime::now_utc()));
        games_repo::update_guarded(txn, game, changes).await?;

        events.push(FlowEvent::GameAbandoned);
        Ok(())
    }

    /// Reset a FINISHED game back to the lobby with the same seats and
    /// settings. Humans must ready up again; bots stay ready.
    pub async fn play_again(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
    ) -> Result<Vec<FlowEvent>, AppError> {
        let mut events = Vec::new();
        let game = games_repo::require_game(txn, game_id).await?;
        if game.state != GameState::Finished {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Only a finished game can be restarted",
            )
            .into());
        }

        for player in players::find_by_game(txn, game_id).await? {
            if !player.is_bot && player.is_ready {
                players::set_ready(txn, player, false).await?;
            }
        }

        // Fresh seed so the rematch is not a replay.
        let mut changes = games::ActiveModel::default();
        changes.state = Set(GameState::Waiting);
        changes.current_round = Set(None);
        changes.current_round_id = Set(None);
        changes.current_trick_no = Set(0);
        changes.current_player_seat = Set(None);
        changes.rng_seed = Set(rand::rng().random::<i64>());
        changes.started_at = Set(None);
        changes.ended_at = Set(None);
        games_repo::update_guarded(txn, &game, changes).await?;

        info!(game_id, "Game reset for another run");
        events.push(FlowEvent::GameReset);
        Ok(events)
    }
}
