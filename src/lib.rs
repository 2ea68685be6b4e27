//! Solitaire 3D - Klondike engine for a 3D card table
//!
//! Core modules:
//! - `engine`: Deterministic game logic (deck, piles, rules, moves, undo, scoring)
//! - `controller`: One running game plus high score bookkeeping
//! - `highscores`: Per-game high score store (LocalStorage on web)
//! - `settings`: Persisted player preferences

pub mod controller;
pub mod engine;
pub mod error;
pub mod highscores;
pub mod settings;

pub use controller::{Outcome, Solitaire};
pub use error::GameError;
pub use highscores::{HighScoreStore, MemoryStore, ScoreKeeper};
pub use settings::Settings;

#[cfg(target_arch = "wasm32")]
pub use highscores::LocalStorageStore;

/// Game configuration constants
pub mod consts {
    /// Number of tableau piles
    pub const TABLEAU_PILES: usize = 7;
    /// Number of foundation piles
    pub const FOUNDATION_PILES: usize = 4;
    /// Cards in a full deck
    pub const DECK_SIZE: usize = 52;
    pub const RANKS_PER_SUIT: u8 = 13;

    /// Identifier used for this game's high score
    pub const GAME_ID: &str = "solitaire-3d";
    /// Prefix shared by every game's high score key on the site
    pub const HIGH_SCORE_PREFIX: &str = "cso-highscore-";
    /// LocalStorage key for settings
    pub const SETTINGS_KEY: &str = "solitaire_settings";
}
