//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::engine::{DrawMode, GameConfig, ScoreTable};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cards turned per stock click
    pub draw_mode: DrawMode,
    /// Allow moving cards back off a foundation
    pub allow_take_back: bool,
    /// Points per move kind
    pub scoring: ScoreTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::One,
            allow_take_back: true,
            scoring: ScoreTable::default(),
        }
    }
}

impl Settings {
    /// Create settings with a draw mode (other fields default)
    pub fn with_draw_mode(draw_mode: DrawMode) -> Self {
        Self {
            draw_mode,
            ..Self::default()
        }
    }

    /// Rules handed to a new game
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            draw_mode: self.draw_mode,
            allow_take_back: self.allow_take_back,
            scoring: self.scoring,
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(SETTINGS_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(SETTINGS_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No settings storage on native, using defaults ({})", SETTINGS_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
