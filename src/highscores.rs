//! Per-game high score
//!
//! One integer per game key, persisted to LocalStorage on the web.

use std::collections::HashMap;

use crate::consts::HIGH_SCORE_PREFIX;

/// Key-value score storage
pub trait HighScoreStore {
    /// Stored score for `key`, 0 if none
    fn get(&self, key: &str) -> i32;
    fn set(&mut self, key: &str, score: i32);
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HashMap<String, i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self, key: &str) -> i32 {
        self.scores.get(key).copied().unwrap_or(0)
    }

    fn set(&mut self, key: &str, score: i32) {
        self.scores.insert(key.to_string(), score);
    }
}

/// `window.localStorage`, scores kept as decimal strings (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> i32 {
        let Some(storage) = Self::storage() else {
            return 0;
        };
        match storage.get_item(key) {
            Ok(Some(value)) => value.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring unreadable high score for {}: {:?}", key, value);
                0
            }),
            _ => 0,
        }
    }

    fn set(&mut self, key: &str, score: i32) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, &score.to_string()).is_err() {
                log::warn!("Failed to save high score for {}", key);
            }
        }
    }
}

/// Tracks the best score for one game against a store
#[derive(Debug, Clone)]
pub struct ScoreKeeper<S: HighScoreStore> {
    store: S,
    key: String,
    high_score: i32,
}

impl<S: HighScoreStore> ScoreKeeper<S> {
    /// Reads the current high score for `game` from the store
    pub fn new(store: S, game: &str) -> Self {
        let key = format!("{HIGH_SCORE_PREFIX}{game}");
        let high_score = store.get(&key);
        Self {
            store,
            key,
            high_score,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn high_score(&self) -> i32 {
        self.high_score
    }

    /// Re-read the stored value (e.g. at the start of a new game)
    pub fn refresh(&mut self) -> i32 {
        self.high_score = self.store.get(&self.key);
        self.high_score
    }

    /// Offer a score. Persists and returns true only if it beats the
    /// current high score.
    pub fn update(&mut self, score: i32) -> bool {
        if score <= self.high_score {
            return false;
        }
        self.store.set(&self.key, score);
        self.refresh();
        log::info!("New high score for {}: {}", self.key, score);
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
