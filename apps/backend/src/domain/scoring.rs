//! Round scoring and game completion checks.

use serde::{Deserialize, Serialize};

use crate::domain::state::{team_of, Seat, PLAYERS};

pub const NIL_BONUS_PARTNERS: i32 = 100;
pub const NIL_BONUS_SOLO: i32 = 50;
pub const SOLO_BAG_LIMIT: u8 = 5;
pub const SOLO_BAG_PENALTY: i32 = 50;

/// One seat's bid and result for a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLine {
    pub bid: u8,
    pub is_nil: bool,
    pub is_blind_nil: bool,
    pub tricks_won: u8,
}

/// Per-team round delta in partners mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamDelta {
    pub points: i32,
    pub bags: u8,
}

/// Per-player round delta in solo mode, carried in `round_scores.solo_lines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoloLine {
    pub seat: Seat,
    pub round_score: i32,
    pub running_total: i32,
    pub bags_counter: u8,
}

fn nil_delta(line: &SeatLine, unit: i32) -> i32 {
    let bonus = if line.is_blind_nil { unit * 2 } else { unit };
    if line.tricks_won == 0 {
        bonus
    } else {
        -bonus
    }
}

/// Score one round for partners mode.
///
/// Contract: team bid sum vs team trick sum, bid x 10 made or failed. Each
/// overtrick is a bag worth +1. Nil bonuses are per bidder on top of the
/// contract. A nil bidder's tricks still count toward the team trick sum.
pub fn score_partners_round(lines: &[SeatLine; PLAYERS]) -> [TeamDelta; 2] {
    let mut deltas = [TeamDelta::default(); 2];

    for team in 0u8..2 {
        let members: Vec<&SeatLine> = lines
            .iter()
            .enumerate()
            .filter(|(seat, _)| team_of(*seat as Seat) == team)
            .map(|(_, line)| line)
            .collect();

        let team_bid: u32 = members.iter().map(|l| l.bid as u32).sum();
        let team_tricks: u32 = members.iter().map(|l| l.tricks_won as u32).sum();

        let mut points = 0i32;
        let mut bags = 0u8;
        if team_bid > 0 {
            if team_tricks >= team_bid {
                bags = (team_tricks - team_bid) as u8;
                points += team_bid as i32 * 10 + bags as i32;
            } else {
                points -= team_bid as i32 * 10;
            }
        } else {
            // Both partners nil: every trick taken is a bag.
            bags = team_tricks as u8;
            points += bags as i32;
        }

        for line in &members {
            if line.is_nil {
                points += nil_delta(line, NIL_BONUS_PARTNERS);
            }
        }

        deltas[team as usize] = TeamDelta { points, bags };
    }

    deltas
}

/// Score one round for a single seat in solo mode.
///
/// Nil is worth half the partners bonus. Tricks taken over the bid (or over
/// a failed nil) are bags worth +1 each.
pub fn score_solo_round(line: &SeatLine) -> TeamDelta {
    let mut points = 0i32;
    let mut bags = 0u8;

    if line.is_nil {
        points += nil_delta(line, NIL_BONUS_SOLO);
        bags = line.tricks_won;
        points += bags as i32;
    } else if line.tricks_won >= line.bid {
        bags = line.tricks_won - line.bid;
        points += line.bid as i32 * 10 + bags as i32;
    } else {
        points -= line.bid as i32 * 10;
    }

    TeamDelta { points, bags }
}

/// Advance a solo bag counter, applying the penalty on reaching the limit.
///
/// Returns the point delta (0 or the negative penalty) and the new counter.
pub fn apply_solo_bags(counter: u8, new_bags: u8) -> (i32, u8) {
    let total = counter + new_bags;
    if total >= SOLO_BAG_LIMIT {
        (-SOLO_BAG_PENALTY, total - SOLO_BAG_LIMIT)
    } else {
        (0, total)
    }
}

/// Outcome of a completion check after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Continue,
    TeamWins(u8),
    SeatWins(Seat),
}

fn crossed(total: i32, min_points: i32, max_points: i32) -> bool {
    total >= max_points || total <= min_points
}

/// Partners completion: a single crossing side wins; if both cross, the
/// higher total wins and a tie plays another round.
pub fn partners_completion(totals: [i32; 2], min_points: i32, max_points: i32) -> Completion {
    let c0 = crossed(totals[0], min_points, max_points);
    let c1 = crossed(totals[1], min_points, max_points);
    match (c0, c1) {
        (false, false) => Completion::Continue,
        (true, false) => Completion::TeamWins(0),
        (false, true) => Completion::TeamWins(1),
        (true, true) => {
            if totals[0] > totals[1] {
                Completion::TeamWins(0)
            } else if totals[1] > totals[0] {
                Completion::TeamWins(1)
            } else {
                Completion::Continue
            }
        }
    }
}

/// Solo completion with the same crossing rules across four players.
pub fn solo_completion(totals: [i32; PLAYERS], min_points: i32, max_points: i32) -> Completion {
    let crossers: Vec<Seat> = (0..PLAYERS as Seat)
        .filter(|&s| crossed(totals[s as usize], min_points, max_points))
        .collect();

    match crossers.as_slice() {
        [] => Completion::Continue,
        [only] => Completion::SeatWins(*only),
        many => {
            let best = many
                .iter()
                .map(|&s| totals[s as usize])
                .max()
                .unwrap_or(i32::MIN);
            let leaders: Vec<Seat> = many
                .iter()
                .copied()
                .filter(|&s| totals[s as usize] == best)
                .collect();
            if leaders.len() == 1 {
                Completion::SeatWins(leaders[0])
            } else {
                Completion::Continue
            }
        }
    }
}
