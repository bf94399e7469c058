//! Core card types and trick comparison logic. Spades are the permanent trump.

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric rank value: Two = 2 .. Ace = 14.
    pub fn value(self) -> u8 {
        self as u8 + 2
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn is_spade(self) -> bool {
        self.suit == Suit::Spades
    }
}

// Note: Ord on Card is only for stable sorting: suit order C<D<H<S then rank order.
// Do not use for trick resolution.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether `challenger` beats the current `incumbent` given the lead suit.
///
/// Spades always trump. Off-suit, off-trump cards never win.
pub fn card_beats(challenger: Card, incumbent: Card, lead: Suit) -> bool {
    match (challenger.is_spade(), incumbent.is_spade()) {
        (true, true) => challenger.rank > incumbent.rank,
        (true, false) => true,
        (false, true) => false,
        (false, false) => {
            challenger.suit == incumbent.suit
                && challenger.suit == lead
                && challenger.rank > incumbent.rank
        }
    }
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

pub fn cards_of_suit(hand: &[Card], suit: Suit) -> Vec<Card> {
    hand.iter().copied().filter(|c| c.suit == suit).collect()
}

pub fn suit_count(hand: &[Card], suit: Suit) -> usize {
    hand.iter().filter(|c| c.suit == suit).count()
}

pub fn lowest_of(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().min_by_key(|c| c.rank)
}

pub fn highest_of(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().max_by_key(|c| c.rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn rank_values_span_two_to_ace() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Ace.value(), 14);
    }

    #[test]
    fn low_spade_beats_high_off_suit() {
        let two_spades = c(Suit::Spades, Rank::Two);
        let ace_diamonds = c(Suit::Diamonds, Rank::Ace);
        assert!(card_beats(two_spades, ace_diamonds, Suit::Diamonds));
        assert!(!card_beats(ace_diamonds, two_spades, Suit::Diamonds));
    }

    #[test]
    fn higher_lead_suit_card_wins_without_spades() {
        let king_hearts = c(Suit::Hearts, Rank::King);
        let queen_hearts = c(Suit::Hearts, Rank::Queen);
        assert!(card_beats(king_hearts, queen_hearts, Suit::Hearts));
        assert!(!card_beats(queen_hearts, king_hearts, Suit::Hearts));
    }

    #[test]
    fn off_suit_discard_never_wins() {
        let ace_clubs = c(Suit::Clubs, Rank::Ace);
        let three_hearts = c(Suit::Hearts, Rank::Three);
        assert!(!card_beats(ace_clubs, three_hearts, Suit::Hearts));
    }

    #[test]
    fn higher_spade_beats_lower_spade() {
        let ks = c(Suit::Spades, Rank::King);
        let qs = c(Suit::Spades, Rank::Queen);
        assert!(card_beats(ks, qs, Suit::Clubs));
        assert!(!card_beats(qs, ks, Suit::Clubs));
    }

    #[test]
    fn card_json_round_trips_with_screaming_names() {
        let card = c(Suit::Spades, Rank::Ace);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("SPADES"));
        assert!(json.contains("ACE"));
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
