//! Seat and turn math for the four fixed seats.
//!
//! These live in `domain` so every layer (services, repos, bots, views)
//! shares a single source of truth for rotation and "who acts next".

pub type Seat = u8; // 0..=3

pub const PLAYERS: usize = 4;
pub const HAND_SIZE: u8 = 13;
pub const TRICKS_PER_ROUND: u8 = 13;

/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(4)) as Seat
}

/// Returns the next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// Returns the seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: u8) -> Seat {
    seat_offset(start, n as i8)
}

/// The seat across the table; in partners mode this is the teammate.
#[inline]
pub fn partner_of(seat: Seat) -> Seat {
    seat_offset(seat, 2)
}

/// Team index in partners mode: seats 0/2 are team 0, seats 1/3 team 1.
#[inline]
pub fn team_of(seat: Seat) -> u8 {
    seat % 2
}

/// Round-start seat (player to the left of the dealer).
#[inline]
pub fn round_start_seat(dealer: Seat) -> Seat {
    next_seat(dealer)
}

/// Dealer position for a 1-based round number.
#[inline]
pub fn dealer_for_round(starting_dealer: Seat, round_no: u8) -> Seat {
    debug_assert!(round_no >= 1, "round_no is 1-based and must be >= 1");
    nth_from(starting_dealer, round_no.saturating_sub(1))
}

/// Expected bidder seat during bidding.
///
/// Bidding starts at left-of-dealer, then rotates clockwise by `bid_count`.
#[inline]
pub fn expected_bidder(dealer: Seat, bid_count: u8) -> Seat {
    seat_offset(dealer, 1 + bid_count as i8)
}

/// Expected actor seat during a trick.
///
/// `lead_seat` is the trick leader; `play_count` is how many cards
/// have already been played into the trick.
#[inline]
pub fn expected_actor(lead_seat: Seat, play_count: u8) -> Seat {
    nth_from(lead_seat, play_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_rotation_wraps() {
        assert_eq!(next_seat(0), 1);
        assert_eq!(next_seat(3), 0);
        assert_eq!(seat_offset(0, -1), 3);
        assert_eq!(nth_from(2, 3), 1);
    }

    #[test]
    fn partner_is_across_the_table() {
        assert_eq!(partner_of(0), 2);
        assert_eq!(partner_of(1), 3);
        assert_eq!(partner_of(2), 0);
        assert_eq!(partner_of(3), 1);
    }

    #[test]
    fn teams_are_even_and_odd_seats() {
        assert_eq!(team_of(0), 0);
        assert_eq!(team_of(1), 1);
        assert_eq!(team_of(2), 0);
        assert_eq!(team_of(3), 1);
    }

    #[test]
    fn bidding_starts_left_of_dealer() {
        assert_eq!(expected_bidder(0, 0), 1);
        assert_eq!(expected_bidder(0, 3), 0);
        assert_eq!(expected_bidder(3, 0), 0);
    }

    #[test]
    fn dealer_rotates_each_round() {
        assert_eq!(dealer_for_round(2, 1), 2);
        assert_eq!(dealer_for_round(2, 2), 3);
        assert_eq!(dealer_for_round(2, 5), 2);
    }

    #[test]
    fn trick_actor_follows_lead() {
        assert_eq!(expected_actor(1, 0), 1);
        assert_eq!(expected_actor(1, 2), 3);
        assert_eq!(expected_actor(3, 3), 2);
    }
}
