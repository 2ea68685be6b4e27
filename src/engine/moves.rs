//! Move execution and undo history

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::pile::{PileId, PlacedCard};
use super::rules::{self, MoveRequest};
use super::scoring::clamped_delta;
use super::state::{GamePhase, GameState, is_won};
use crate::error::GameError;

/// Category of an executed move, used for scoring and undo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Stock -> Waste
    Draw,
    /// Waste turned over into an empty Stock
    Recycle,
    TableauToTableau,
    TableauToFoundation,
    WasteToTableau,
    WasteToFoundation,
    FoundationToTableau,
}

/// Everything needed to reverse one executed move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub kind: MoveKind,
    pub from: PileId,
    /// Index in `from` where the moved cards started
    pub from_index: usize,
    pub to: PileId,
    /// Moved cards in the order they were taken
    pub cards: Vec<Card>,
    /// A face-down tableau card was turned up by this move
    pub flipped_source: bool,
    /// Score change actually applied (after clamping at zero)
    pub score_delta: i32,
}

/// Validate and apply `request`. On rejection the state is untouched.
/// Returns a copy of the record pushed onto the history.
pub fn apply_move(state: &mut GameState, request: MoveRequest) -> Result<MoveRecord, GameError> {
    let Some(plan) = rules::plan(state, &request) else {
        log::debug!("Rejected move: {request}");
        return Err(GameError::IllegalMove(request));
    };

    let mut cards = Vec::with_capacity(plan.count);
    let mut flipped_source = false;

    match plan.kind {
        MoveKind::Draw => {
            for _ in 0..plan.count {
                if let Some(placed) = state.stock.pop() {
                    state.waste.push(PlacedCard::up(placed.card));
                    cards.push(placed.card);
                }
            }
        }
        MoveKind::Recycle => {
            while let Some(placed) = state.waste.pop() {
                state.stock.push(PlacedCard::down(placed.card));
                cards.push(placed.card);
            }
        }
        _ => {
            let moved = state.pile_mut(plan.from).take_from(plan.from_index);
            if matches!(plan.from, PileId::Tableau(_)) {
                let source = state.pile_mut(plan.from);
                if source.top().is_some_and(|top| !top.face_up) {
                    flipped_source = source.set_top_face(true);
                }
            }
            cards.extend(moved.iter().map(|p| p.card));
            state
                .pile_mut(plan.to)
                .extend(moved.into_iter().map(|p| PlacedCard::up(p.card)));
        }
    }

    let raw = state.config.scoring.delta(plan.kind, flipped_source);
    let score_delta = clamped_delta(state.score, raw);
    state.score += score_delta;

    let record = MoveRecord {
        kind: plan.kind,
        from: plan.from,
        from_index: plan.from_index,
        to: plan.to,
        cards,
        flipped_source,
        score_delta,
    };
    log::debug!(
        "{:?} {} -> {} ({} cards, score {:+})",
        record.kind,
        record.from,
        record.to,
        record.cards.len(),
        record.score_delta
    );
    state.history.push(record.clone());

    if is_won(state) {
        state.phase = GamePhase::Won;
        log::info!("Game won with score {}", state.score);
    }
    Ok(record)
}

/// Reverse the most recent move
pub fn undo(state: &mut GameState) -> Result<MoveRecord, GameError> {
    if state.phase == GamePhase::Won {
        return Err(GameError::GameWon);
    }
    let record = state.history.pop().ok_or(GameError::NothingToUndo)?;
    let count = record.cards.len();

    match record.kind {
        MoveKind::Draw => {
            for _ in 0..count {
                if let Some(placed) = state.waste.pop() {
                    state.stock.push(PlacedCard::down(placed.card));
                }
            }
        }
        MoveKind::Recycle => {
            for _ in 0..count {
                if let Some(placed) = state.stock.pop() {
                    state.waste.push(PlacedCard::up(placed.card));
                }
            }
        }
        _ => {
            let destination = state.pile_mut(record.to);
            let start = destination.len().saturating_sub(count);
            let moved = destination.take_from(start);
            let source = state.pile_mut(record.from);
            if record.flipped_source {
                source.set_top_face(false);
            }
            source.extend(moved);
        }
    }

    state.score -= record.score_delta;
    log::debug!("Undid {:?} {} -> {}", record.kind, record.from, record.to);
    Ok(record)
}
