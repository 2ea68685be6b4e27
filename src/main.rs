//! Solitaire 3D entry point
//!
//! On the web this owns the running game and exports the control surface the
//! page script calls after hit-testing. Natively it deals a game and logs it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;

    use solitaire_3d::engine::{Card, DrawMode, PileId};
    use solitaire_3d::{GameError, LocalStorageStore, Outcome, Settings, Solitaire};

    type WebGame = Solitaire<LocalStorageStore>;

    thread_local! {
        static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
    }

    fn with_game<T>(f: impl FnOnce(&mut WebGame) -> T) -> Option<T> {
        GAME.with(|slot| slot.borrow_mut().as_mut().map(f))
    }

    fn seed() -> u64 {
        js_sys::Date::now() as u64
    }

    /// Illegal moves fail silently; the page snaps the card back
    fn accepted(result: Option<Result<Outcome, GameError>>) -> bool {
        match result {
            Some(Ok(outcome)) => {
                if outcome.won {
                    log::info!("You win! Final score {}", outcome.score);
                }
                true
            }
            Some(Err(e)) => {
                log::debug!("{}", e);
                false
            }
            None => {
                log::warn!("Game not initialized");
                false
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Solitaire 3D starting...");

        let settings = Settings::load();
        let seed = seed();
        match Solitaire::new(settings, LocalStorageStore, seed) {
            Ok(game) => {
                GAME.with(|slot| *slot.borrow_mut() = Some(game));
                log::info!("Game initialized with seed: {}", seed);
            }
            Err(e) => log::error!("Game setup failed: {}", e),
        }
    }

    #[wasm_bindgen]
    pub fn new_game() -> bool {
        accepted(with_game(|g| g.new_game(seed())))
    }

    #[wasm_bindgen]
    pub fn draw() -> bool {
        accepted(with_game(|g| g.draw()))
    }

    /// `pile` uses hitbox names: `tableau-3`, `foundation-0`, ...
    #[wasm_bindgen]
    pub fn move_card(card_id: u8, pile: &str) -> bool {
        let Some(card) = Card::from_id(card_id) else {
            log::warn!("Unknown card id {}", card_id);
            return false;
        };
        let to: PileId = match pile.parse() {
            Ok(to) => to,
            Err(e) => {
                log::warn!("{}", e);
                return false;
            }
        };
        accepted(with_game(|g| g.move_card(card, to)))
    }

    #[wasm_bindgen]
    pub fn undo() -> bool {
        accepted(with_game(|g| g.undo()))
    }

    /// Draw-mode selector value ("1" or "3")
    #[wasm_bindgen]
    pub fn set_draw_mode(mode: &str) -> bool {
        match mode.parse::<DrawMode>() {
            Ok(mode) => with_game(|g| g.set_draw_mode(mode)).is_some(),
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// Suggested move as JSON, if any
    #[wasm_bindgen]
    pub fn hint() -> Option<String> {
        with_game(|g| g.hint())
            .flatten()
            .and_then(|request| serde_json::to_string(&request).ok())
    }

    /// Full game state as JSON for the renderer
    #[wasm_bindgen]
    pub fn snapshot() -> Option<String> {
        with_game(|g| g.snapshot_json().ok()).flatten()
    }

    #[wasm_bindgen]
    pub fn score() -> i32 {
        with_game(|g| g.score()).unwrap_or(0)
    }

    #[wasm_bindgen]
    pub fn high_score() -> i32 {
        with_game(|g| g.high_score()).unwrap_or(0)
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use solitaire_3d::{MemoryStore, Settings, Solitaire};

    env_logger::init();
    log::info!("Solitaire 3D (native) starting...");
    log::info!("Native mode has no table renderer - run with `trunk serve` for web version");

    let seed: u64 = rand::random();
    let game = match Solitaire::new(Settings::load(), MemoryStore::new(), seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Game setup failed: {}", e);
            return;
        }
    };

    let state = game.state();
    for pile in state.tableau() {
        let cards: Vec<String> = pile
            .cards()
            .iter()
            .map(|p| if p.face_up { p.card.to_string() } else { "XX".to_string() })
            .collect();
        log::info!("{}: {}", pile.id, cards.join(" "));
    }
    log::info!("stock: {} cards", state.stock().len());
    if let Some(hint) = game.hint() {
        log::info!("hint: {}", hint);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
