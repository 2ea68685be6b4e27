//! Game state aggregate and deal
//!
//! Everything the renderer needs to place cards lives here and serializes to
//! JSON. Piles only change through `moves::apply_move` and `moves::undo`.

use serde::{Deserialize, Serialize};

use super::card::{Card, Suit};
use super::deck::{shuffled_deck, validate_deck};
use super::moves::MoveRecord;
use super::pile::{Pile, PileId, PlacedCard};
use super::scoring::ScoreTable;
use crate::consts::{DECK_SIZE, FOUNDATION_PILES, RANKS_PER_SUIT, TABLEAU_PILES};
use crate::error::GameError;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Cards are being distributed
    Dealing,
    /// Accepting moves
    Playing,
    /// All foundations complete; terminal until a new game
    Won,
}

/// How many cards a draw turns over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DrawMode {
    #[default]
    One,
    Three,
}

impl DrawMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawMode::One => "Draw One",
            DrawMode::Three => "Draw Three",
        }
    }

    pub fn count(&self) -> usize {
        match self {
            DrawMode::One => 1,
            DrawMode::Three => 3,
        }
    }
}

/// Draw-mode text that is neither one nor three
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("unknown draw mode '{_0}'")]
pub struct ParseDrawModeError(pub String);

impl std::error::Error for ParseDrawModeError {}

impl std::str::FromStr for DrawMode {
    type Err = ParseDrawModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "one" | "draw one" => Ok(DrawMode::One),
            "3" | "three" | "draw three" => Ok(DrawMode::Three),
            other => Err(ParseDrawModeError(other.to_string())),
        }
    }
}

/// Rule knobs carried by a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub draw_mode: DrawMode,
    /// Allow Foundation -> Tableau take-back moves
    pub allow_take_back: bool,
    pub scoring: ScoreTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::One,
            allow_take_back: true,
            scoring: ScoreTable::default(),
        }
    }
}

/// Explicit pile contents, bottom to top, for building arbitrary positions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layout {
    pub tableau: [Vec<PlacedCard>; TABLEAU_PILES],
    /// Foundation cards are always face-up
    pub foundations: [Vec<Card>; FOUNDATION_PILES],
    /// Stock cards are always face-down
    pub stock: Vec<Card>,
    /// Waste cards are always face-up
    pub waste: Vec<Card>,
}

/// Complete game state.
///
/// Serializes to the renderer's JSON snapshot. Snapshots are output only;
/// positions are restored through `from_layout`, which checks that every
/// card is present exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    /// Deal seed, if the deck came from `shuffled_deck`
    pub(crate) seed: Option<u64>,
    pub(crate) config: GameConfig,
    pub(crate) phase: GamePhase,
    pub(crate) tableau: [Pile; TABLEAU_PILES],
    pub(crate) foundations: [Pile; FOUNDATION_PILES],
    pub(crate) stock: Pile,
    pub(crate) waste: Pile,
    pub(crate) history: Vec<MoveRecord>,
    pub(crate) score: i32,
}

impl GameState {
    fn empty(config: GameConfig) -> Self {
        Self {
            seed: None,
            config,
            phase: GamePhase::Dealing,
            tableau: std::array::from_fn(|i| Pile::new(PileId::Tableau(i))),
            foundations: std::array::from_fn(|i| Pile::new(PileId::Foundation(i))),
            stock: Pile::new(PileId::Stock),
            waste: Pile::new(PileId::Waste),
            history: Vec::new(),
            score: 0,
        }
    }

    /// Shuffle a fresh deck from `seed` and deal it
    pub fn new_game(seed: u64, config: GameConfig) -> Result<Self, GameError> {
        let mut state = Self::deal(shuffled_deck(seed), config)?;
        state.seed = Some(seed);
        Ok(state)
    }

    /// Deal a 52-card deck into the opening layout.
    ///
    /// Cards come off the end of `deck`. Row `i` puts one card on each pile
    /// `j >= i`, face-up only when `i == j`, so pile `i` ends with `i + 1`
    /// cards and a single face-up top. The 24 left over become the stock in
    /// deck order, last card on top.
    pub fn deal(mut deck: Vec<Card>, config: GameConfig) -> Result<Self, GameError> {
        validate_deck(&deck)?;
        let mut state = Self::empty(config);

        for row in 0..TABLEAU_PILES {
            for pile in row..TABLEAU_PILES {
                let Some(card) = deck.pop() else {
                    return Err(GameError::InvalidDeck {
                        expected: DECK_SIZE,
                        found: 0,
                        unique: 0,
                    });
                };
                state.tableau[pile].push(PlacedCard {
                    card,
                    face_up: row == pile,
                });
            }
        }
        state.stock.extend(deck.into_iter().map(PlacedCard::down));
        state.phase = GamePhase::Playing;

        log::info!(
            "Dealt {} tableau cards, {} to stock ({})",
            DECK_SIZE - state.stock.len(),
            state.stock.len(),
            state.config.draw_mode.as_str()
        );
        Ok(state)
    }

    /// Build a position from explicit piles. Every card must appear once.
    pub fn from_layout(layout: Layout, config: GameConfig) -> Result<Self, GameError> {
        let mut state = Self::empty(config);
        for (pile, cards) in state.tableau.iter_mut().zip(layout.tableau) {
            pile.extend(cards);
        }
        for (pile, cards) in state.foundations.iter_mut().zip(layout.foundations) {
            pile.extend(cards.into_iter().map(PlacedCard::up));
        }
        state.stock.extend(layout.stock.into_iter().map(PlacedCard::down));
        state.waste.extend(layout.waste.into_iter().map(PlacedCard::up));

        let cards: Vec<Card> = state.all_cards().collect();
        validate_deck(&cards)?;

        state.phase = if is_won(&state) {
            GamePhase::Won
        } else {
            GamePhase::Playing
        };
        Ok(state)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn tableau(&self) -> &[Pile; TABLEAU_PILES] {
        &self.tableau
    }

    pub fn foundations(&self) -> &[Pile; FOUNDATION_PILES] {
        &self.foundations
    }

    pub fn stock(&self) -> &Pile {
        &self.stock
    }

    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    /// Switch draw mode mid-game. Piles are untouched.
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.config.draw_mode = mode;
    }

    /// Pile lookup; `None` for out-of-range indices
    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        match id {
            PileId::Tableau(i) => self.tableau.get(i),
            PileId::Foundation(i) => self.foundations.get(i),
            PileId::Stock => Some(&self.stock),
            PileId::Waste => Some(&self.waste),
        }
    }

    /// Callers must pass a valid id
    pub(crate) fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        match id {
            PileId::Tableau(i) => &mut self.tableau[i],
            PileId::Foundation(i) => &mut self.foundations[i],
            PileId::Stock => &mut self.stock,
            PileId::Waste => &mut self.waste,
        }
    }

    fn piles(&self) -> impl Iterator<Item = &Pile> {
        self.tableau
            .iter()
            .chain(self.foundations.iter())
            .chain([&self.stock, &self.waste])
    }

    /// Where a card currently lies: pile and index from the bottom
    pub fn locate(&self, card: Card) -> Option<(PileId, usize)> {
        self.piles()
            .find_map(|pile| pile.position_of(card).map(|index| (pile.id, index)))
    }

    /// Every card on the table, pile by pile
    pub fn all_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.piles().flat_map(|pile| pile.cards().iter().map(|p| p.card))
    }

    /// Foundation already holding `suit`, else the first empty one
    pub fn foundation_for(&self, suit: Suit) -> Option<usize> {
        self.foundations
            .iter()
            .position(|f| f.cards().first().is_some_and(|p| p.card.suit == suit))
            .or_else(|| self.foundations.iter().position(Pile::is_empty))
    }
}

/// True iff every foundation holds a full suit
pub fn is_won(state: &GameState) -> bool {
    state
        .foundations
        .iter()
        .all(|f| f.len() == usize::from(RANKS_PER_SUIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::card::{Rank, Suit};
    use crate::engine::deck::new_deck;

    #[test]
    fn test_deal_shape() {
        let state = GameState::new_game(12345, GameConfig::default()).unwrap();
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.seed(), Some(12345));
        for (i, pile) in state.tableau().iter().enumerate() {
            assert_eq!(pile.len(), i + 1);
            let (top, rest) = pile.cards().split_last().unwrap();
            assert!(top.face_up);
            assert!(rest.iter().all(|p| !p.face_up));
        }
        assert_eq!(state.stock().len(), 24);
        assert!(state.stock().cards().iter().all(|p| !p.face_up));
        assert!(state.waste().is_empty());
        assert!(state.foundations().iter().all(Pile::is_empty));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_deal_follows_deck_order() {
        let deck = new_deck();
        let state = GameState::deal(deck.clone(), GameConfig::default()).unwrap();
        // First card dealt is the last in the deck and lands on pile 0
        assert_eq!(state.tableau()[0].cards()[0].card, deck[51]);
        assert_eq!(state.tableau()[1].cards()[0].card, deck[50]);
        assert_eq!(state.tableau()[1].cards()[1].card, deck[44]);
        // Stock keeps the remaining deck order, top = deck[23]
        let stock: Vec<Card> = state.stock().cards().iter().map(|p| p.card).collect();
        assert_eq!(stock, deck[..24].to_vec());
    }

    #[test]
    fn test_deal_rejects_bad_deck() {
        let mut deck = new_deck();
        deck.truncate(30);
        assert!(matches!(
            GameState::deal(deck, GameConfig::default()),
            Err(GameError::InvalidDeck { found: 30, .. })
        ));
    }

    #[test]
    fn test_conservation_after_deal() {
        let state = GameState::new_game(7, GameConfig::default()).unwrap();
        let mut cards: Vec<Card> = state.all_cards().collect();
        cards.sort();
        let mut deck = new_deck();
        deck.sort();
        assert_eq!(cards, deck);
    }

    #[test]
    fn test_is_won_with_full_foundations() {
        let mut layout = Layout::default();
        for (i, suit) in Suit::ALL.iter().enumerate() {
            layout.foundations[i] = Rank::ALL.iter().map(|&r| Card::new(r, *suit)).collect();
        }
        let state = GameState::from_layout(layout, GameConfig::default()).unwrap();
        assert!(is_won(&state));
        assert_eq!(state.phase(), GamePhase::Won);
    }

    #[test]
    fn test_is_won_false_with_one_card_elsewhere() {
        let mut layout = Layout::default();
        for (i, suit) in Suit::ALL.iter().enumerate() {
            layout.foundations[i] = Rank::ALL.iter().map(|&r| Card::new(r, *suit)).collect();
        }
        let king = layout.foundations[3].pop().unwrap();
        layout.waste.push(king);
        let state = GameState::from_layout(layout, GameConfig::default()).unwrap();
        assert!(!is_won(&state));
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_from_layout_rejects_missing_cards() {
        let mut layout = Layout::default();
        layout.stock = new_deck();
        layout.stock.pop();
        assert!(GameState::from_layout(layout, GameConfig::default()).is_err());
    }

    #[test]
    fn test_locate_and_foundation_for() {
        let mut layout = Layout::default();
        let mut deck = new_deck();
        let ace_spades = Card::new(Rank::Ace, Suit::Spades);
        deck.retain(|&c| c != ace_spades);
        layout.foundations[2] = vec![ace_spades];
        layout.stock = deck;
        let state = GameState::from_layout(layout, GameConfig::default()).unwrap();
        assert_eq!(state.locate(ace_spades), Some((PileId::Foundation(2), 0)));
        assert_eq!(state.foundation_for(Suit::Spades), Some(2));
        assert_eq!(state.foundation_for(Suit::Hearts), Some(0));
    }

    #[test]
    fn test_draw_mode_parse() {
        assert_eq!("1".parse::<DrawMode>(), Ok(DrawMode::One));
        assert_eq!("Three".parse::<DrawMode>(), Ok(DrawMode::Three));
        assert_eq!(
            "2".parse::<DrawMode>(),
            Err(ParseDrawModeError("2".to_string()))
        );
        assert_eq!(
            " Draw Five ".parse::<DrawMode>().unwrap_err().to_string(),
            "unknown draw mode 'draw five'"
        );
        assert_eq!(DrawMode::Three.count(), 3);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new_game(3, GameConfig::default()).unwrap();
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();
        assert_eq!(json["seed"], 3);
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["score"], 0);
        assert_eq!(json["stock"]["cards"].as_array().map(Vec::len), Some(24));
        assert_eq!(json["tableau"][6]["cards"].as_array().map(Vec::len), Some(7));
    }
}
