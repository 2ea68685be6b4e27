//! Solitaire game engine
//!
//! All game logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - No rendering, DOM or storage dependencies
//! - Piles change only through `apply_move` and `undo`

pub mod card;
pub mod deck;
pub mod moves;
pub mod pile;
pub mod rules;
pub mod scoring;
pub mod state;

pub use card::{Card, Color, Rank, Suit};
pub use deck::{new_deck, shuffle, shuffled_deck, validate_deck};
pub use moves::{MoveKind, MoveRecord, apply_move, undo};
pub use pile::{ParsePileIdError, Pile, PileId, PlacedCard};
pub use rules::{MoveRequest, foundation_accepts, is_legal_move, legal_moves, tableau_accepts};
pub use scoring::ScoreTable;
pub use state::{DrawMode, ParseDrawModeError, GameConfig, GamePhase, GameState, Layout, is_won};
