//! Per-room turn timers.
//!
//! One timer slot exists per game. Arming a seat bumps the slot's
//! generation; a fired task that finds a newer generation is stale and
//! exits without acting. The timer runs through a grace period, then a
//! visible countdown, then auto-plays for the seat through the same
//! entry points a live player would use.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::domain::Seat;
use crate::services::room::RoomService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerSlot {
    generation: u64,
    seat: Seat,
}

#[derive(Debug)]
pub struct TurnTimerService {
    grace: Duration,
    countdown: Duration,
    slots: DashMap<i64, TimerSlot>,
}

impl TurnTimerService {
    pub fn new(grace: Duration, countdown: Duration) -> Self {
        Self {
            grace,
            countdown,
            slots: DashMap::new(),
        }
    }

    /// Arm the timer for the seat currently on turn. Any previously armed
    /// timer for this game becomes stale.
    pub fn schedule(self: &Arc<Self>, room: Arc<RoomService>, game_id: i64, seat: Seat) {
        let generation = self.bump(game_id, seat);
        debug!(game_id, seat, generation, "Turn timer armed");

        let timer = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(timer.grace).await;
            if !timer.is_current(game_id, generation) {
                return;
            }

            room.announce_countdown(game_id, seat, timer.countdown.as_secs())
                .await;

            tokio::time::sleep(timer.countdown).await;
            if !timer.is_current(game_id, generation) {
                return;
            }

            debug!(game_id, seat, "Turn timer expired, auto-playing");
            if let Err(err) = room.auto_act(game_id, seat).await {
                // Losing the race to a late player action is routine; the
                // command path already drops those silently.
                warn!(game_id, seat, error = %err, "Timer auto-play failed");
            }
        });
    }

    /// Disarm whatever is scheduled for this game. Pending tasks see a
    /// missing slot and exit.
    pub fn cancel(&self, game_id: i64) {
        if self.slots.remove(&game_id).is_some() {
            debug!(game_id, "Turn timer cancelled");
        }
    }

    fn bump(&self, game_id: i64, seat: Seat) -> u64 {
        let mut entry = self.slots.entry(game_id).or_insert(TimerSlot {
            generation: 0,
            seat,
        });
        entry.generation += 1;
        entry.seat = seat;
        entry.generation
    }

    fn is_current(&self, game_id: i64, generation: u64) -> bool {
        self.slots
            .get(&game_id)
            .is_some_and(|slot| slot.generation == generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_invalidates_the_previous_generation() {
        let timer = TurnTimerService::new(Duration::from_secs(1), Duration::from_secs(1));
        let first = timer.bump(7, 0);
        let second = timer.bump(7, 1);
        assert!(second > first);
        assert!(!timer.is_current(7, first));
        assert!(timer.is_current(7, second));
    }

    #[test]
    fn cancel_clears_the_slot() {
        let timer = TurnTimerService::new(Duration::from_secs(1), Duration::from_secs(1));
        let generation = timer.bump(7, 2);
        timer.cancel(7);
        assert!(!timer.is_current(7, generation));
    }
}
