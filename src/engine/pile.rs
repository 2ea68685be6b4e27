//! Typed card piles: tableau, foundation, stock and waste

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::consts::{FOUNDATION_PILES, TABLEAU_PILES};

/// Identifies one pile on the table. Doubles as the pile's kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileId {
    Tableau(usize),
    Foundation(usize),
    Stock,
    Waste,
}

impl PileId {
    /// Every pile id in table order
    pub fn all() -> impl Iterator<Item = PileId> {
        (0..TABLEAU_PILES)
            .map(PileId::Tableau)
            .chain((0..FOUNDATION_PILES).map(PileId::Foundation))
            .chain([PileId::Stock, PileId::Waste])
    }

    /// True if the index (if any) names an existing pile
    pub fn is_valid(self) -> bool {
        match self {
            PileId::Tableau(i) => i < TABLEAU_PILES,
            PileId::Foundation(i) => i < FOUNDATION_PILES,
            PileId::Stock | PileId::Waste => true,
        }
    }
}

/// Hitbox-style names: `tableau-3`, `foundation-0`, `stock`, `waste`
impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::Tableau(i) => write!(f, "tableau-{i}"),
            PileId::Foundation(i) => write!(f, "foundation-{i}"),
            PileId::Stock => f.write_str("stock"),
            PileId::Waste => f.write_str("waste"),
        }
    }
}

/// Error parsing a pile name
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("unknown pile '{_0}'")]
pub struct ParsePileIdError(pub String);

impl std::error::Error for ParsePileIdError {}

impl FromStr for PileId {
    type Err = ParsePileIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePileIdError(s.to_string());
        let id = match s.to_lowercase().as_str() {
            "stock" => PileId::Stock,
            "waste" => PileId::Waste,
            other => {
                let (kind, index) = other.split_once('-').ok_or_else(err)?;
                let index: usize = index.parse().map_err(|_| err())?;
                match kind {
                    "tableau" => PileId::Tableau(index),
                    "foundation" => PileId::Foundation(index),
                    _ => return Err(err()),
                }
            }
        };
        if id.is_valid() { Ok(id) } else { Err(err()) }
    }
}

/// A card as it lies in a pile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub card: Card,
    pub face_up: bool,
}

impl PlacedCard {
    pub fn up(card: Card) -> Self {
        Self { card, face_up: true }
    }

    pub fn down(card: Card) -> Self {
        Self {
            card,
            face_up: false,
        }
    }
}

/// Ordered stack of cards, last element on top
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    pub id: PileId,
    cards: Vec<PlacedCard>,
}

impl Pile {
    pub fn new(id: PileId) -> Self {
        Self {
            id,
            cards: Vec::new(),
        }
    }

    pub fn with_cards(id: PileId, cards: Vec<PlacedCard>) -> Self {
        Self { id, cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Bottom-to-top view
    pub fn cards(&self) -> &[PlacedCard] {
        &self.cards
    }

    pub fn top(&self) -> Option<&PlacedCard> {
        self.cards.last()
    }

    pub fn position_of(&self, card: Card) -> Option<usize> {
        self.cards.iter().position(|p| p.card == card)
    }

    pub fn push(&mut self, placed: PlacedCard) {
        self.cards.push(placed);
    }

    pub fn pop(&mut self) -> Option<PlacedCard> {
        self.cards.pop()
    }

    /// Remove and return everything from `index` to the top, order preserved
    pub(crate) fn take_from(&mut self, index: usize) -> Vec<PlacedCard> {
        self.cards.split_off(index.min(self.cards.len()))
    }

    pub(crate) fn extend(&mut self, cards: impl IntoIterator<Item = PlacedCard>) {
        self.cards.extend(cards);
    }

    /// Set the top card's face state. Returns false on an empty pile.
    pub(crate) fn set_top_face(&mut self, face_up: bool) -> bool {
        match self.cards.last_mut() {
            Some(top) => {
                top.face_up = face_up;
                true
            }
            None => false,
        }
    }

    /// True if the cards from `index` to the top are all face-up and form a
    /// descending, alternating-colour run
    pub fn is_run_from(&self, index: usize) -> bool {
        let Some(run) = self.cards.get(index..) else {
            return false;
        };
        if run.is_empty() || run.iter().any(|p| !p.face_up) {
            return false;
        }
        run.windows(2).all(|w| w[1].card.stacks_on(w[0].card))
    }

    /// Index of the deepest card that starts a movable run, if any
    pub fn run_start(&self) -> Option<usize> {
        let mut start = self.cards.len().checked_sub(1)?;
        if !self.cards[start].face_up {
            return None;
        }
        while start > 0 && self.is_run_from(start - 1) {
            start -= 1;
        }
        Some(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::card::{Rank, Suit};

    fn up(rank: Rank, suit: Suit) -> PlacedCard {
        PlacedCard::up(Card::new(rank, suit))
    }

    #[test]
    fn test_pile_id_text_round_trip() {
        for id in PileId::all() {
            assert_eq!(id.to_string().parse::<PileId>(), Ok(id));
        }
        assert_eq!("Tableau-6".parse::<PileId>(), Ok(PileId::Tableau(6)));
        assert!("tableau-7".parse::<PileId>().is_err());
        assert!("foundation-4".parse::<PileId>().is_err());
        assert!("table".parse::<PileId>().is_err());
        assert!("tableau-x".parse::<PileId>().is_err());
    }

    #[test]
    fn test_run_detection() {
        let pile = Pile::with_cards(
            PileId::Tableau(0),
            vec![
                PlacedCard::down(Card::new(Rank::Two, Suit::Clubs)),
                up(Rank::Nine, Suit::Spades),
                up(Rank::Eight, Suit::Hearts),
                up(Rank::Seven, Suit::Clubs),
            ],
        );
        assert_eq!(pile.run_start(), Some(1));
        assert!(pile.is_run_from(1));
        assert!(pile.is_run_from(3));
        assert!(!pile.is_run_from(0));
        assert!(!pile.is_run_from(4));
    }

    #[test]
    fn test_run_breaks_on_same_color() {
        let pile = Pile::with_cards(
            PileId::Tableau(0),
            vec![up(Rank::Nine, Suit::Diamonds), up(Rank::Eight, Suit::Hearts)],
        );
        assert_eq!(pile.run_start(), Some(1));
        assert!(!pile.is_run_from(0));
    }

    #[test]
    fn test_empty_and_face_down_piles_have_no_run() {
        assert_eq!(Pile::new(PileId::Tableau(2)).run_start(), None);
        let pile = Pile::with_cards(
            PileId::Tableau(2),
            vec![PlacedCard::down(Card::new(Rank::King, Suit::Hearts))],
        );
        assert_eq!(pile.run_start(), None);
    }

    #[test]
    fn test_take_from_preserves_order() {
        let mut pile = Pile::with_cards(
            PileId::Tableau(0),
            vec![
                up(Rank::Nine, Suit::Spades),
                up(Rank::Eight, Suit::Hearts),
                up(Rank::Seven, Suit::Clubs),
            ],
        );
        let taken = pile.take_from(1);
        assert_eq!(taken, vec![up(Rank::Eight, Suit::Hearts), up(Rank::Seven, Suit::Clubs)]);
        assert_eq!(pile.len(), 1);
    }
}
