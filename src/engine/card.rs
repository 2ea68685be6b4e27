//! Card identity: suit, rank, colour
//!
//! Cards are plain `Copy` values. The presentation layer refers to them by
//! [`Card::id`] and keeps its own id -> mesh lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DECK_SIZE, RANKS_PER_SUIT};

/// Card colour, used by the alternating-colour tableau rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card suit (order matches the sprite sheet rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// Card rank, totally ordered Ace < 2 < ... < King
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
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
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
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
    ];

    /// Numeric value, 1 (Ace) through 13 (King)
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// True if `self` sits directly above `other` in sequence (e.g. 8 over 7)
    pub fn is_one_above(self, other: Rank) -> bool {
        self.value() == other.value() + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn color(self) -> Color {
        self.suit.color()
    }

    /// Stable id in `0..52`: suit-major, Ace first
    pub fn id(self) -> u8 {
        // Both factors are tiny, the product always fits in u8
        (self.suit.index() as u8) * RANKS_PER_SUIT + (self.rank.value() - 1)
    }

    pub fn from_id(id: u8) -> Option<Self> {
        if usize::from(id) >= DECK_SIZE {
            return None;
        }
        let suit = Suit::ALL[usize::from(id / RANKS_PER_SUIT)];
        let rank = Rank::from_value(id % RANKS_PER_SUIT + 1)?;
        Some(Self::new(rank, suit))
    }

    /// True if `self` may be placed on `below` in a tableau pile
    pub fn stacks_on(self, below: Card) -> bool {
        below.rank.is_one_above(self.rank) && below.color() != self.color()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}
