use crate::domain::scoring::{
    apply_solo_bags, partners_completion, score_partners_round, score_solo_round, solo_completion,
    Completion, SeatLine, SOLO_BAG_LIMIT,
};

fn line(bid: u8, tricks_won: u8) -> SeatLine {
    SeatLine {
        bid,
        is_nil: false,
        is_blind_nil: false,
        tricks_won,
    }
}

fn nil_line(tricks_won: u8) -> SeatLine {
    SeatLine {
        bid: 0,
        is_nil: true,
        is_blind_nil: false,
        tricks_won,
    }
}

fn blind_nil_line(tricks_won: u8) -> SeatLine {
    SeatLine {
        bid: 0,
        is_nil: true,
        is_blind_nil: true,
        tricks_won,
    }
}

#[test]
fn partners_made_contract_with_one_bag_scores_eighty_one() {
    // Team 0 (seats 0 and 2) bids 8 and takes 9 tricks: 80 + 1 bag.
    let lines = [line(5, 6), line(2, 2), line(3, 3), line(2, 2)];
    let deltas = score_partners_round(&lines);
    assert_eq!(deltas[0].points, 81);
    assert_eq!(deltas[0].bags, 1);
    assert_eq!(deltas[1].points, 40);
    assert_eq!(deltas[1].bags, 0);
}

#[test]
fn partners_failed_contract_loses_bid_times_ten() {
    let lines = [line(6, 3), line(3, 5), line(4, 2), line(3, 3)];
    let deltas = score_partners_round(&lines);
    assert_eq!(deltas[0].points, -100);
    assert_eq!(deltas[0].bags, 0);
    assert_eq!(deltas[1].points, 62);
    assert_eq!(deltas[1].bags, 2);
}

#[test]
fn partners_made_nil_adds_hundred() {
    // Seat 0 nil (0 tricks), seat 2 bids 4 and takes 4: 40 + 100.
    let lines = [nil_line(0), line(4, 4), line(4, 4), line(5, 5)];
    let deltas = score_partners_round(&lines);
    assert_eq!(deltas[0].points, 140);
    assert_eq!(deltas[0].bags, 0);
}

#[test]
fn partners_failed_nil_subtracts_hundred() {
    // Seat 0 nil but takes a trick; team still makes its 4-bid with a bag.
    let lines = [nil_line(1), line(4, 4), line(4, 4), line(4, 4)];
    let deltas = score_partners_round(&lines);
    assert_eq!(deltas[0].points, 41 - 100);
    assert_eq!(deltas[0].bags, 1);
}

#[test]
fn partners_blind_nil_doubles_the_bonus() {
    let made = [blind_nil_line(0), line(4, 4), line(4, 4), line(5, 5)];
    assert_eq!(score_partners_round(&made)[0].points, 240);

    let failed = [blind_nil_line(2), line(4, 4), line(4, 4), line(5, 3)];
    assert_eq!(score_partners_round(&failed)[0].points, 42 - 200);
}

#[test]
fn partners_double_nil_tricks_count_as_bags() {
    let lines = [nil_line(0), line(6, 7), nil_line(2), line(6, 4)];
    let deltas = score_partners_round(&lines);
    // Team 0: +100 made nil, -100 failed nil, 2 bags.
    assert_eq!(deltas[0].points, 2);
    assert_eq!(deltas[0].bags, 2);
}

#[test]
fn solo_made_bid_scores_bid_times_ten_plus_bags() {
    let delta = score_solo_round(&line(4, 6));
    assert_eq!(delta.points, 42);
    assert_eq!(delta.bags, 2);
}

#[test]
fn solo_failed_bid_loses_bid_times_ten() {
    let delta = score_solo_round(&line(4, 2));
    assert_eq!(delta.points, -40);
    assert_eq!(delta.bags, 0);
}

#[test]
fn solo_made_nil_scores_fifty() {
    let delta = score_solo_round(&nil_line(0));
    assert_eq!(delta.points, 50);
    assert_eq!(delta.bags, 0);
}

#[test]
fn solo_failed_nil_loses_fifty() {
    let delta = score_solo_round(&nil_line(2));
    assert_eq!(delta.points, -50 + 2);
    assert_eq!(delta.bags, 2);
}

#[test]
fn solo_blind_nil_doubles() {
    assert_eq!(score_solo_round(&blind_nil_line(0)).points, 100);
    assert_eq!(score_solo_round(&blind_nil_line(1)).points, -100 + 1);
}

#[test]
fn solo_bag_counter_penalizes_at_limit_and_resets() {
    let (penalty, counter) = apply_solo_bags(3, 1);
    assert_eq!(penalty, 0);
    assert_eq!(counter, 4);

    let (penalty, counter) = apply_solo_bags(4, 1);
    assert_eq!(penalty, -50);
    assert_eq!(counter, 0);

    let (penalty, counter) = apply_solo_bags(4, 3);
    assert_eq!(penalty, -50);
    assert_eq!(counter, 2);

    let (penalty, counter) = apply_solo_bags(0, SOLO_BAG_LIMIT);
    assert_eq!(penalty, -50);
    assert_eq!(counter, 0);
}

#[test]
fn partners_game_continues_below_thresholds() {
    assert_eq!(
        partners_completion([310, -120], -500, 500),
        Completion::Continue
    );
}

#[test]
fn partners_single_crosser_wins() {
    assert_eq!(
        partners_completion([520, 100], -500, 500),
        Completion::TeamWins(0)
    );
    assert_eq!(
        partners_completion([100, -510], -500, 500),
        Completion::TeamWins(1)
    );
}

#[test]
fn partners_falling_below_min_ends_the_game_for_that_team() {
    // Crossing either threshold ends the game in favor of the crossing
    // side, including a collapse through the floor.
    assert_eq!(
        partners_completion([-520, 200], -500, 500),
        Completion::TeamWins(0)
    );
}

#[test]
fn partners_both_cross_higher_total_wins() {
    assert_eq!(
        partners_completion([540, 510], -500, 500),
        Completion::TeamWins(0)
    );
    assert_eq!(
        partners_completion([510, 540], -500, 500),
        Completion::TeamWins(1)
    );
}

#[test]
fn partners_both_cross_tied_plays_on() {
    assert_eq!(
        partners_completion([510, 510], -500, 500),
        Completion::Continue
    );
}

#[test]
fn solo_single_crosser_wins() {
    assert_eq!(
        solo_completion([510, 0, 100, -100], -500, 500),
        Completion::SeatWins(0)
    );
}

#[test]
fn solo_multiple_crossers_highest_wins() {
    assert_eq!(
        solo_completion([510, 530, 100, -100], -500, 500),
        Completion::SeatWins(1)
    );
    assert_eq!(
        solo_completion([510, 510, 100, -100], -500, 500),
        Completion::Continue
    );
}
