//! Single owner of a running game
//!
//! Wraps the engine state together with the high score keeper and player
//! settings. UI controls (stock click, drop on a pile, undo, new game,
//! draw-mode selector) map one-to-one onto methods here.

use serde::Serialize;

use crate::consts::GAME_ID;
use crate::engine::{
    self, Card, DrawMode, GamePhase, GameState, MoveRequest, PileId, legal_moves,
};
use crate::error::GameError;
use crate::highscores::{HighScoreStore, ScoreKeeper};
use crate::settings::Settings;

/// What the presentation layer needs after each action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub score: i32,
    pub high_score: i32,
    pub new_high_score: bool,
    pub won: bool,
}

/// A game of solitaire plus its high score bookkeeping
pub struct Solitaire<S: HighScoreStore> {
    state: GameState,
    keeper: ScoreKeeper<S>,
    settings: Settings,
}

impl<S: HighScoreStore> Solitaire<S> {
    /// Deal a first game from `seed`
    pub fn new(settings: Settings, store: S, seed: u64) -> Result<Self, GameError> {
        let state = GameState::new_game(seed, settings.game_config())?;
        let keeper = ScoreKeeper::new(store, GAME_ID);
        log::info!(
            "Solitaire started (seed {}, high score {})",
            seed,
            keeper.high_score()
        );
        Ok(Self {
            state,
            keeper,
            settings,
        })
    }

    /// Discard the current game and deal a fresh one
    pub fn new_game(&mut self, seed: u64) -> Result<Outcome, GameError> {
        self.state = GameState::new_game(seed, self.settings.game_config())?;
        self.keeper.refresh();
        log::info!("New game with seed: {}", seed);
        Ok(self.outcome(false))
    }

    /// Stock click
    pub fn draw(&mut self) -> Result<Outcome, GameError> {
        self.play(MoveRequest::Draw)
    }

    /// Drop `card` (with any run above it) on pile `to`
    pub fn move_card(&mut self, card: Card, to: PileId) -> Result<Outcome, GameError> {
        self.play(MoveRequest::Move { card, to })
    }

    pub fn play(&mut self, request: MoveRequest) -> Result<Outcome, GameError> {
        engine::apply_move(&mut self.state, request)?;
        let new_high_score = self.keeper.update(self.state.score());
        Ok(self.outcome(new_high_score))
    }

    pub fn undo(&mut self) -> Result<Outcome, GameError> {
        engine::undo(&mut self.state)?;
        let new_high_score = self.keeper.update(self.state.score());
        Ok(self.outcome(new_high_score))
    }

    /// First legal card move, else the draw if one is possible
    pub fn hint(&self) -> Option<MoveRequest> {
        let moves = legal_moves(&self.state);
        moves
            .iter()
            .find(|m| matches!(m, MoveRequest::Move { .. }))
            .or_else(|| moves.first())
            .copied()
    }

    /// Draw-mode selector. Applies to the current game and is remembered.
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.settings.draw_mode = mode;
        self.settings.save();
        self.state.set_draw_mode(mode);
        log::info!("Draw mode: {}", mode.as_str());
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> i32 {
        self.state.score()
    }

    pub fn high_score(&self) -> i32 {
        self.keeper.high_score()
    }

    pub fn is_won(&self) -> bool {
        self.state.phase() == GamePhase::Won
    }

    /// Read-only JSON snapshot for the renderer
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }

    fn outcome(&self, new_high_score: bool) -> Outcome {
        Outcome {
            score: self.state.score(),
            high_score: self.keeper.high_score(),
            new_high_score,
            won: self.is_won(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;

    fn game(seed: u64) -> Solitaire<MemoryStore> {
        Solitaire::new(Settings::default(), MemoryStore::new(), seed).unwrap()
    }

    /// Play hinted moves until one scores
    fn play_until_scored(game: &mut Solitaire<MemoryStore>) -> Option<Outcome> {
        for _ in 0..500 {
            let request = game.hint()?;
            let outcome = game.play(request).ok()?;
            if outcome.score > 0 {
                return Some(outcome);
            }
        }
        None
    }

    #[test]
    fn test_draw_and_undo() {
        let mut game = game(1);
        let outcome = game.draw().unwrap();
        assert_eq!(outcome.score, 0);
        assert!(!outcome.won);
        assert_eq!(game.state().waste().len(), 1);

        game.undo().unwrap();
        assert!(game.state().waste().is_empty());
        assert_eq!(game.undo(), Err(GameError::NothingToUndo));
    }

    #[test]
    fn test_illegal_move_leaves_state() {
        let mut game = game(2);
        let before = game.state().clone();
        let buried = game.state().tableau()[6].cards()[0].card;
        let result = game.move_card(buried, PileId::Tableau(0));
        assert!(matches!(result, Err(GameError::IllegalMove(_))));
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_high_score_tracks_best() {
        // Some seed in this range yields a scoring move quickly
        let scored = (0..50u64).find_map(|seed| {
            let mut game = game(seed);
            play_until_scored(&mut game).map(|outcome| (game, outcome))
        });
        let (mut game, outcome) = scored.unwrap();
        assert!(outcome.new_high_score);
        assert_eq!(outcome.high_score, outcome.score);

        // A new deal keeps the stored best
        let best = game.high_score();
        let outcome = game.new_game(99).unwrap();
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.high_score, best);
        assert!(!outcome.new_high_score);
    }

    #[test]
    fn test_set_draw_mode_applies_now() {
        let mut game = game(3);
        game.set_draw_mode(DrawMode::Three);
        assert_eq!(game.settings().draw_mode, DrawMode::Three);
        game.draw().unwrap();
        assert_eq!(game.state().waste().len(), 3);
    }

    #[test]
    fn test_hint_prefers_card_moves() {
        let game = game(4);
        let hint = game.hint().unwrap();
        let moves = legal_moves(game.state());
        if moves.iter().any(|m| matches!(m, MoveRequest::Move { .. })) {
            assert!(matches!(hint, MoveRequest::Move { .. }));
        } else {
            assert_eq!(hint, MoveRequest::Draw);
        }
    }

    #[test]
    fn test_snapshot_json() {
        let game = game(5);
        let json = game.snapshot_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 0);
        assert_eq!(value["phase"], "Playing");
        assert_eq!(value["stock"]["cards"].as_array().unwrap().len(), 24);
    }
}
