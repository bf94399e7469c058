use crate::domain::cards::{Card, Rank, Suit};
use crate::domain::rules::SpecialRules;
use crate::domain::state::Seat;
use crate::domain::tricks::{check_play, legal_plays, trick_winner};
use crate::errors::domain::{DomainError, ValidationKind};

fn c(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

fn no_special() -> SpecialRules {
    SpecialRules::default()
}

fn play(seat: Seat, suit: Suit, rank: Rank) -> (Seat, Card) {
    (seat, c(suit, rank))
}

#[test]
fn must_follow_lead_suit_when_held() {
    let hand = vec![
        c(Suit::Hearts, Rank::Four),
        c(Suit::Hearts, Rank::Nine),
        c(Suit::Clubs, Rank::Ace),
    ];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];

    let legal = legal_plays(&hand, &trick, false, no_special());
    assert_eq!(
        legal,
        vec![c(Suit::Hearts, Rank::Four), c(Suit::Hearts, Rank::Nine)]
    );
}

#[test]
fn void_in_lead_suit_may_play_anything() {
    let hand = vec![c(Suit::Clubs, Rank::Ace), c(Suit::Spades, Rank::Two)];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];

    let legal = legal_plays(&hand, &trick, false, no_special());
    assert_eq!(legal.len(), 2);
}

#[test]
fn cannot_lead_spades_before_broken() {
    let hand = vec![c(Suit::Spades, Rank::Ace), c(Suit::Clubs, Rank::Two)];

    let legal = legal_plays(&hand, &[], false, no_special());
    assert_eq!(legal, vec![c(Suit::Clubs, Rank::Two)]);

    let legal_broken = legal_plays(&hand, &[], true, no_special());
    assert_eq!(legal_broken.len(), 2);
}

#[test]
fn all_spades_hand_may_lead_spades_unbroken() {
    let hand = vec![c(Suit::Spades, Rank::Ace), c(Suit::Spades, Rank::Two)];
    let legal = legal_plays(&hand, &[], false, no_special());
    assert_eq!(legal.len(), 2);
}

#[test]
fn assassin_must_cut_when_void() {
    let special = SpecialRules {
        assassin: true,
        ..SpecialRules::default()
    };
    let hand = vec![
        c(Suit::Spades, Rank::Three),
        c(Suit::Spades, Rank::Jack),
        c(Suit::Clubs, Rank::Ace),
    ];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];

    let legal = legal_plays(&hand, &trick, false, special);
    assert_eq!(
        legal,
        vec![c(Suit::Spades, Rank::Three), c(Suit::Spades, Rank::Jack)]
    );
}

#[test]
fn assassin_must_lead_spades_once_broken() {
    let special = SpecialRules {
        assassin: true,
        ..SpecialRules::default()
    };
    let hand = vec![c(Suit::Spades, Rank::Three), c(Suit::Clubs, Rank::Ace)];

    // Not yet broken: normal lead restriction applies.
    let legal = legal_plays(&hand, &[], false, special);
    assert_eq!(legal, vec![c(Suit::Clubs, Rank::Ace)]);

    // Broken: the spade lead becomes mandatory.
    let legal = legal_plays(&hand, &[], true, special);
    assert_eq!(legal, vec![c(Suit::Spades, Rank::Three)]);
}

#[test]
fn screamer_avoids_spades_unless_forced() {
    let special = SpecialRules {
        screamer: true,
        ..SpecialRules::default()
    };
    let hand = vec![c(Suit::Spades, Rank::Three), c(Suit::Clubs, Rank::Ace)];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];

    let legal = legal_plays(&hand, &trick, true, special);
    assert_eq!(legal, vec![c(Suit::Clubs, Rank::Ace)]);

    // Only spades left: forced.
    let spades_only = vec![c(Suit::Spades, Rank::Three)];
    let legal = legal_plays(&spades_only, &trick, true, special);
    assert_eq!(legal, vec![c(Suit::Spades, Rank::Three)]);
}

#[test]
fn lowball_restricts_to_lowest_of_suit() {
    let special = SpecialRules {
        lowball: true,
        ..SpecialRules::default()
    };
    let hand = vec![
        c(Suit::Hearts, Rank::Four),
        c(Suit::Hearts, Rank::Nine),
        c(Suit::Hearts, Rank::King),
    ];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];

    let legal = legal_plays(&hand, &trick, false, special);
    assert_eq!(legal, vec![c(Suit::Hearts, Rank::Four)]);
}

#[test]
fn highball_restricts_to_highest_per_suit_when_void() {
    let special = SpecialRules {
        highball: true,
        ..SpecialRules::default()
    };
    let hand = vec![
        c(Suit::Clubs, Rank::Two),
        c(Suit::Clubs, Rank::Queen),
        c(Suit::Diamonds, Rank::Five),
        c(Suit::Diamonds, Rank::Nine),
    ];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];

    let legal = legal_plays(&hand, &trick, false, special);
    assert_eq!(
        legal,
        vec![c(Suit::Clubs, Rank::Queen), c(Suit::Diamonds, Rank::Nine)]
    );
}

#[test]
fn trick_winner_highest_of_lead_suit_without_spades() {
    let plays = vec![
        play(0, Suit::Hearts, Rank::Two),
        play(1, Suit::Hearts, Rank::King),
        play(2, Suit::Hearts, Rank::Five),
        play(3, Suit::Clubs, Rank::Ace),
    ];
    assert_eq!(trick_winner(&plays).unwrap(), 1);
}

#[test]
fn trick_winner_two_of_spades_beats_ace_of_diamonds() {
    let plays = vec![
        play(0, Suit::Diamonds, Rank::Ace),
        play(1, Suit::Diamonds, Rank::Three),
        play(2, Suit::Spades, Rank::Two),
        play(3, Suit::Diamonds, Rank::King),
    ];
    assert_eq!(trick_winner(&plays).unwrap(), 2);
}

#[test]
fn trick_winner_highest_spade_among_several() {
    let plays = vec![
        play(0, Suit::Clubs, Rank::Ace),
        play(1, Suit::Spades, Rank::Four),
        play(2, Suit::Spades, Rank::Jack),
        play(3, Suit::Spades, Rank::Six),
    ];
    assert_eq!(trick_winner(&plays).unwrap(), 2);
}

#[test]
fn trick_winner_rejects_incomplete_trick() {
    let plays = vec![play(0, Suit::Clubs, Rank::Ace)];
    assert!(trick_winner(&plays).is_err());
    assert!(trick_winner(&[]).is_err());
}

#[test]
fn check_play_flags_card_not_in_hand() {
    let hand = vec![c(Suit::Clubs, Rank::Two)];
    let err = check_play(&hand, &[], false, no_special(), c(Suit::Clubs, Rank::Three)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::CardNotInHand, _)
    ));
}

#[test]
fn check_play_flags_suit_follow_violation() {
    let hand = vec![c(Suit::Hearts, Rank::Four), c(Suit::Clubs, Rank::Ace)];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];
    let err = check_play(&hand, &trick, false, no_special(), c(Suit::Clubs, Rank::Ace)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::MustFollowSuit, _)
    ));
}

#[test]
fn check_play_flags_unbroken_spade_lead() {
    let hand = vec![c(Suit::Spades, Rank::Ace), c(Suit::Clubs, Rank::Two)];
    let err = check_play(&hand, &[], false, no_special(), c(Suit::Spades, Rank::Ace)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::SpadesNotBroken, _)
    ));
}

#[test]
fn check_play_flags_assassin_cut_violation() {
    let special = SpecialRules {
        assassin: true,
        ..SpecialRules::default()
    };
    let hand = vec![c(Suit::Spades, Rank::Three), c(Suit::Clubs, Rank::Ace)];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];
    let err = check_play(&hand, &trick, false, special, c(Suit::Clubs, Rank::Ace)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::MustPlaySpade, _)
    ));
}

#[test]
fn check_play_flags_lowball_violation() {
    let special = SpecialRules {
        lowball: true,
        ..SpecialRules::default()
    };
    let hand = vec![c(Suit::Hearts, Rank::Four), c(Suit::Hearts, Rank::Nine)];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];
    let err = check_play(&hand, &trick, false, special, c(Suit::Hearts, Rank::Nine)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotLowestOfSuit, _)
    ));
}

#[test]
fn check_play_accepts_legal_card() {
    let hand = vec![c(Suit::Hearts, Rank::Four), c(Suit::Clubs, Rank::Ace)];
    let trick = vec![play(0, Suit::Hearts, Rank::Two)];
    assert!(check_play(&hand, &trick, false, no_special(), c(Suit::Hearts, Rank::Four)).is_ok());
}
