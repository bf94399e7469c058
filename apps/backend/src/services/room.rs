//! Room command surface.
//!
//! Every mutating command takes the room's guard, runs the game flow inside
//! one transaction, commits, refreshes the cache, then fans events out to
//! clients. Nothing is broadcast for a transaction that rolled back.

use std::sync::Arc;

use dashmap::DashMap;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::GameCache;
use crate::config::EngineConfig;
use crate::domain::{BidAttempt, Card, RuleSet, Seat, PLAYERS};
use crate::entities::Game;
use crate::error::AppError;
use crate::protocol::{
    BidView, RoomBroadcaster, RoomView, RoundScoreView, ServerEvent, StandingsView,
};
use crate::repos::games::{self as games_repo, GameCreate};
use crate::services::game_flow::{FlowEvent, GameFlowService, RoundScoreSummary};
use crate::services::snapshot;
use crate::services::turn_timer::TurnTimerService;
use crate::utils::join_code::generate_join_code;

const JOIN_CODE_ATTEMPTS: usize = 5;

pub struct RoomService {
    db: DatabaseConnection,
    cache: GameCache,
    flow: GameFlowService,
    broadcaster: Arc<dyn RoomBroadcaster>,
    timer: Arc<TurnTimerService>,
    guards: DashMap<i64, Arc<Mutex<()>>>,
    trick_clear_delay: std::time::Duration,
    round_summary_delay: std::time::Duration,
}

impl RoomService {
    pub fn new(
        db: DatabaseConnection,
        cache: GameCache,
        broadcaster: Arc<dyn RoomBroadcaster>,
        config: &EngineConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            db,
            cache,
            flow: GameFlowService,
            broadcaster,
            timer: Arc::new(TurnTimerService::new(
                config.timer_grace,
                config.timer_countdown,
            )),
            guards: DashMap::new(),
            trick_clear_delay: config.trick_clear_delay,
            round_summary_delay: config.round_summary_delay,
        })
    }

    /// Create a room in the lobby state. Retries on join-code collision.
    pub async fn create_room(
        self: &Arc<Self>,
        rules: RuleSet,
        is_rated: bool,
    ) -> Result<Game, AppError> {
        rules.validate()?;

        let mut last_err = None;
        for _ in 0..JOIN_CODE_ATTEMPTS {
            let dto = GameCreate {
                join_code: generate_join_code(),
                rules: rules.clone(),
                is_rated,
                rng_seed: rand::random::<i64>(),
            };
            let txn = self.db.begin().await?;
            match games_repo::create_game(&txn, dto).await {
                Ok(game) => {
                    txn.commit().await?;
                    info!(game_id = game.id, join_code = %game.join_code, "Room created");
                    return Ok(game);
                }
                Err(err) => {
                    let _ = txn.rollback().await;
                    let err: AppError = err.into();
                    if err.code() != "JOIN_CODE_CONFLICT" {
                        return Err(err);
                    }
                    last_err = Some(err);
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| AppError::internal("Join code generation exhausted".to_string())))
    }

    pub async fn find_by_join_code(&self, join_code: &str) -> Result<Game, AppError> {
        games_repo::find_by_join_code(&self.db, join_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("GAME_NOT_FOUND", format!("No game with code {join_code}"))
            })
    }

    /// Snapshot for one recipient; `viewer` picks which hand is attached.
    pub async fn room_view(
        &self,
        game_id: i64,
        viewer: Option<Seat>,
    ) -> Result<RoomView, AppError> {
        snapshot::room_view(&self.db, &self.cache, game_id, viewer).await
    }

    pub async fn join_room(
        self: &Arc<Self>,
        game_id: i64,
        user_id: i64,
        username: &str,
        requested_seat: Option<Seat>,
    ) -> Result<(Seat, RoomView), AppError> {
        let _guard = self.guard(game_id).lock_owned().await;
        let txn = self.db.begin().await?;
        let (seat, events) = match self
            .flow
            .join_game(&txn, game_id, user_id, username, requested_seat)
            .await
        {
            Ok(result) => result,
            Err(err) => return self.rolled_back(txn, err).await,
        };
        let (base, hands) = self.commit_and_refresh(txn, game_id).await?;
        self.dispatch(game_id, &base, events).await;

        let view = snapshot::view_for_seat(&base, &hands, seat);
        self.broadcaster
            .to_seat(game_id, seat, &ServerEvent::GameJoined { view: view.clone() })
            .await;
        Ok((seat, view))
    }

    pub async fn leave_room(self: &Arc<Self>, game_id: i64, seat: Seat) -> Result<(), AppError> {
        self.run_command(game_id, |txn| async move {
            GameFlowService.leave_game(&txn, game_id, seat).await
        })
        .await
    }

    pub async fn invite_bot(
        self: &Arc<Self>,
        game_id: i64,
        requested_seat: Option<Seat>,
    ) -> Result<Seat, AppError> {
        let _guard = self.guard(game_id).lock_owned().await;
        let txn = self.db.begin().await?;
        let (seat, events) = match self.flow.invite_bot(&txn, game_id, requested_seat).await {
            Ok(result) => result,
            Err(err) => return self.rolled_back(txn, err).await,
        };
        let (base, _) = self.commit_and_refresh(txn, game_id).await?;
        self.dispatch(game_id, &base, events).await;
        Ok(seat)
    }

    pub async fn remove_bot(self: &Arc<Self>, game_id: i64, seat: Seat) -> Result<(), AppError> {
        self.run_command(game_id, |txn| async move {
            GameFlowService.remove_bot(&txn, game_id, seat).await
        })
        .await
    }

    pub async fn toggle_ready(self: &Arc<Self>, game_id: i64, seat: Seat) -> Result<(), AppError> {
        self.run_command(game_id, |txn| async move {
            GameFlowService.toggle_ready(&txn, game_id, seat).await
        })
        .await
    }

    pub async fn start_game(self: &Arc<Self>, game_id: i64) -> Result<(), AppError> {
        self.run_command(game_id, |txn| async move {
            GameFlowService.start_game(&txn, game_id).await
        })
        .await
    }

    pub async fn make_bid(
        self: &Arc<Self>,
        game_id: i64,
        seat: Seat,
        attempt: BidAttempt,
    ) -> Result<(), AppError> {
        self.run_command(game_id, |txn| async move {
            GameFlowService.submit_bid(&txn, game_id, seat, attempt).await
        })
        .await
    }

    /// Play a card. An illegal card is reported back to the acting seat as
    /// a rejected `card_played` and the turn stays with them.
    pub async fn play_card(
        self: &Arc<Self>,
        game_id: i64,
        seat: Seat,
        card: Card,
    ) -> Result<(), AppError> {
        let _guard = self.guard(game_id).lock_owned().await;
        let txn = self.db.begin().await?;
        match self.flow.play_card(&txn, game_id, seat, card).await {
            Ok(events) => {
                let (base, _) = self.commit_and_refresh(txn, game_id).await?;
                self.dispatch(game_id, &base, events).await;
                Ok(())
            }
            Err(err) if err.code() == "ILLEGAL_MOVE" => {
                let _ = txn.rollback().await;
                debug!(game_id, seat, reason = %err.detail(), "Play rejected");
                let spades_broken = snapshot::room_view(&self.db, &self.cache, game_id, None)
                    .await
                    .map(|view| view.spades_broken)
                    .unwrap_or(false);
                self.broadcaster
                    .to_seat(
                        game_id,
                        seat,
                        &ServerEvent::CardPlayed {
                            seat,
                            card: None,
                            rejected: true,
                            reason: Some(err.detail()),
                            next_seat: Some(seat),
                            spades_broken,
                        },
                    )
                    .await;
                Ok(())
            }
            Err(err) => self.rolled_back(txn, err).await,
        }
    }

    pub async fn continue_round(self: &Arc<Self>, game_id: i64) -> Result<(), AppError> {
        self.run_command(game_id, |txn| async move {
            GameFlowService.continue_round(&txn, game_id).await
        })
        .await
    }

    pub async fn play_again(self: &Arc<Self>, game_id: i64) -> Result<(), AppError> {
        self.run_command(game_id, |txn| async move {
            GameFlowService.play_again(&txn, game_id).await
        })
        .await
    }

    pub async fn handle_disconnect(
        self: &Arc<Self>,
        game_id: i64,
        seat: Seat,
    ) -> Result<(), AppError> {
        self.run_command(game_id, |txn| async move {
            GameFlowService.handle_disconnect(&txn, game_id, seat).await
        })
        .await
    }

    /// Timer expiry: act for the seat through the normal flow entry points.
    /// Losing the race to a real action is not an error.
    pub(crate) async fn auto_act(self: &Arc<Self>, game_id: i64, seat: Seat) -> Result<(), AppError> {
        let _guard = self.guard(game_id).lock_owned().await;
        let txn = self.db.begin().await?;
        match self.flow.force_act(&txn, game_id, seat).await {
            Ok(events) => {
                let (base, _) = self.commit_and_refresh(txn, game_id).await?;
                self.dispatch(game_id, &base, events).await;
                Ok(())
            }
            Err(err) if is_turn_race_code(err.code()) => {
                let _ = txn.rollback().await;
                debug!(game_id, seat, "Timer fired after the seat already acted");
                Ok(())
            }
            Err(err) => self.rolled_back(txn, err).await,
        }
    }

    pub(crate) async fn announce_countdown(&self, game_id: i64, seat: Seat, seconds: u64) {
        self.broadcaster
            .to_room(
                game_id,
                &ServerEvent::CountdownStart {
                    seat,
                    seconds: seconds.min(u8::MAX as u64) as u8,
                },
            )
            .await;
    }

    /// Standard command shape: guard, transaction, flow call, commit, fan-out.
    async fn run_command<F, Fut>(self: &Arc<Self>, game_id: i64, op: F) -> Result<(), AppError>
    where
        F: FnOnce(Arc<DatabaseTransaction>) -> Fut,
        Fut: std::future::Future<Output = Result<Vec<FlowEvent>, AppError>>,
    {
        let _guard = self.guard(game_id).lock_owned().await;
        let txn = Arc::new(self.db.begin().await?);
        let events = match op(Arc::clone(&txn)).await {
            Ok(events) => events,
            Err(err) => {
                if let Ok(txn) = Arc::try_unwrap(txn) {
                    let _ = txn.rollback().await;
                }
                return Err(err);
            }
        };
        let txn = Arc::try_unwrap(txn)
            .map_err(|_| AppError::internal("Transaction still borrowed at commit".to_string()))?;
        let (base, _) = self.commit_and_refresh(txn, game_id).await?;
        self.dispatch(game_id, &base, events).await;
        Ok(())
    }

    fn guard(&self, game_id: i64) -> Arc<Mutex<()>> {
        self.guards
            .entry(game_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn rolled_back<T>(&self, txn: DatabaseTransaction, err: AppError) -> Result<T, AppError> {
        let _ = txn.rollback().await;
        Err(err)
    }

    async fn commit_and_refresh(
        &self,
        txn: DatabaseTransaction,
        game_id: i64,
    ) -> Result<(RoomView, [Vec<Card>; PLAYERS]), AppError> {
        txn.commit().await?;
        snapshot::rebuild_room_cache(&self.db, &self.cache, game_id).await
    }

    /// Map committed flow events to client events, then re-arm or cancel
    /// the turn timer against the post-commit state.
    async fn dispatch(
        self: &Arc<Self>,
        game_id: i64,
        base: &RoomView,
        events: Vec<FlowEvent>,
    ) {
        let mut round_just_scored = false;

        for event in events {
            match event {
                FlowEvent::PlayerJoined { .. } | FlowEvent::SeatsChanged => {
                    self.to_room(game_id, ServerEvent::SeatUpdate {
                        players: base.players.clone(),
                    })
                    .await;
                }
                FlowEvent::PlayerLeft { seat } => {
                    self.to_room(game_id, ServerEvent::PlayerLeft { seat }).await;
                    self.to_room(game_id, ServerEvent::SeatUpdate {
                        players: base.players.clone(),
                    })
                    .await;
                }
                FlowEvent::PlayerDisconnected { seat } => {
                    self.to_room(game_id, ServerEvent::PlayerDisconnected { seat })
                        .await;
                }
                FlowEvent::GameStarted => {
                    // Hands follow in the round_started events; the shared
                    // view never carries one.
                    self.to_room(game_id, ServerEvent::GameStarted { view: base.clone() })
                        .await;
                }
                FlowEvent::RoundStarted {
                    round_no,
                    dealer_pos,
                    first_bidder,
                    hands: dealt,
                } => {
                    let delay = round_just_scored.then_some(self.round_summary_delay);
                    round_just_scored = false;
                    self.send_round_started(
                        game_id, base, round_no, dealer_pos, first_bidder, dealt, delay,
                    );
                }
                FlowEvent::BidPlaced {
                    seat,
                    value,
                    is_blind_nil,
                    bids,
                    next_seat,
                } => {
                    let bid_views = bids.map(|b| {
                        b.map(|(value, is_blind_nil)| BidView {
                            value,
                            is_blind_nil,
                        })
                    });
                    self.to_room(game_id, ServerEvent::BiddingUpdate {
                        seat,
                        bid: BidView {
                            value,
                            is_blind_nil,
                        },
                        bids: bid_views,
                        next_seat,
                    })
                    .await;
                }
                FlowEvent::CardPlayed {
                    seat,
                    card,
                    next_seat,
                    spades_broken,
                } => {
                    self.to_room(game_id, ServerEvent::CardPlayed {
                        seat,
                        card: Some(card),
                        rejected: false,
                        reason: None,
                        next_seat,
                        spades_broken,
                    })
                    .await;
                }
                FlowEvent::TrickComplete {
                    trick_no,
                    winner_seat,
                    tricks_won,
                } => {
                    self.to_room(game_id, ServerEvent::TrickComplete {
                        trick_no,
                        winner_seat,
                        tricks_won,
                    })
                    .await;
                    self.send_clear_table(game_id, trick_no);
                }
                FlowEvent::RoundComplete(summary) => {
                    round_just_scored = true;
                    self.to_room(game_id, ServerEvent::RoundComplete {
                        score: score_view(&summary),
                    })
                    .await;
                }
                FlowEvent::GameCompleted {
                    winner,
                    total_rounds,
                    team_totals,
                    player_totals,
                } => {
                    self.to_room(game_id, ServerEvent::GameComplete {
                        winner: winner.as_db(),
                        total_rounds,
                        standings: StandingsView {
                            team_totals,
                            team_bags: None,
                            player_totals,
                        },
                    })
                    .await;
                    self.room_closed(game_id);
                }
                FlowEvent::GameAbandoned => {
                    self.to_room(game_id, ServerEvent::GameComplete {
                        winner: "NONE".to_string(),
                        total_rounds: base.round_no.unwrap_or(0),
                        standings: base.standings.clone(),
                    })
                    .await;
                    self.room_closed(game_id);
                }
                FlowEvent::GameReset => {
                    self.to_room(game_id, ServerEvent::SeatUpdate {
                        players: base.players.clone(),
                    })
                    .await;
                }
            }
        }

        self.rearm_timer(game_id, base);
    }

    async fn to_room(&self, game_id: i64, event: ServerEvent) {
        self.broadcaster.to_room(game_id, &event).await;
    }

    /// Deliver `round_started` with each seat's own hand, optionally after
    /// the round-summary pause.
    fn send_round_started(
        self: &Arc<Self>,
        game_id: i64,
        base: &RoomView,
        round_no: u8,
        dealer_pos: Seat,
        first_bidder: Seat,
        dealt: [Vec<Card>; PLAYERS],
        delay: Option<std::time::Duration>,
    ) {
        let recipients: Vec<Seat> = base
            .players
            .iter()
            .filter(|p| !p.is_bot && p.is_connected)
            .map(|p| p.seat)
            .collect();
        let room = Arc::clone(self);
        tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            for seat in recipients {
                let event = ServerEvent::RoundStarted {
                    round_no,
                    dealer_pos,
                    first_bidder,
                    hand: dealt[seat as usize].clone(),
                };
                room.broadcaster.to_seat(game_id, seat, &event).await;
            }
        });
    }

    fn send_clear_table(self: &Arc<Self>, game_id: i64, trick_no: u8) {
        let room = Arc::clone(self);
        let delay = self.trick_clear_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            room.broadcaster
                .to_room(game_id, &ServerEvent::ClearTableCards { trick_no })
                .await;
        });
    }

    /// The timer follows whoever holds the turn after this commit. Bots act
    /// inside the transaction, so a bot on turn here means the game is
    /// waiting on nobody and the timer stays off.
    fn rearm_timer(self: &Arc<Self>, game_id: i64, base: &RoomView) {
        let awaiting_human = matches!(base.state.as_str(), "BIDDING" | "PLAYING")
            .then_some(base.current_player_seat)
            .flatten()
            .filter(|seat| {
                base.players
                    .iter()
                    .any(|p| p.seat == *seat && !p.is_bot)
            });

        match awaiting_human {
            Some(seat) => self.timer.schedule(Arc::clone(self), game_id, seat),
            None => self.timer.cancel(game_id),
        }
    }

    fn room_closed(&self, game_id: i64) {
        self.timer.cancel(game_id);
        self.guards.remove(&game_id);
        let cache = self.cache.clone();
        tokio::spawn(async move {
            cache.clear_game(game_id).await;
        });
        info!(game_id, "Room closed");
    }
}

fn is_turn_race_code(code: &str) -> bool {
    matches!(code, "INVALID_TURN" | "CONCURRENCY_CONFLICT")
}

fn score_view(summary: &RoundScoreSummary) -> RoundScoreView {
    RoundScoreView {
        round_no: summary.round_no,
        team_deltas: summary.team_deltas,
        team_bags: summary.team_bags,
        player_deltas: summary.player_deltas,
        standings: StandingsView {
            team_totals: summary.team_totals,
            team_bags: summary.team_bags_total,
            player_totals: summary.player_totals,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_race_codes_are_dropped_silently() {
        assert!(is_turn_race_code("INVALID_TURN"));
        assert!(is_turn_race_code("CONCURRENCY_CONFLICT"));
        assert!(!is_turn_race_code("ILLEGAL_MOVE"));
        assert!(!is_turn_race_code("GAME_NOT_FOUND"));
    }

    #[test]
    fn score_view_carries_partner_standings() {
        let summary = RoundScoreSummary {
            round_no: 3,
            team_deltas: Some([62, -50]),
            team_bags: Some([2, 0]),
            team_totals: Some([180, 40]),
            team_bags_total: Some([4, 1]),
            player_deltas: None,
            player_totals: None,
        };
        let view = score_view(&summary);
        assert_eq!(view.round_no, 3);
        assert_eq!(view.standings.team_totals, Some([180, 40]));
        assert_eq!(view.standings.team_bags, Some([4, 1]));
        assert!(view.player_deltas.is_none());
    }
}
