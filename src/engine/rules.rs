//! Move legality
//!
//! Pure checks over a `GameState`. Nothing here mutates or panics; every
//! request, however malformed, just comes back illegal.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank};
use super::moves::MoveKind;
use super::pile::{Pile, PileId};
use super::state::{GamePhase, GameState};

/// What the input layer asks for after resolving a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRequest {
    /// Move `card` (and any run above it) onto pile `to`
    Move { card: Card, to: PileId },
    /// Click on the stock: draw, or recycle the waste when the stock is empty
    Draw,
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRequest::Move { card, to } => write!(f, "{card} -> {to}"),
            MoveRequest::Draw => f.write_str("draw"),
        }
    }
}

/// A validated move, ready for the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MovePlan {
    pub kind: MoveKind,
    pub from: PileId,
    /// Index in `from` of the first card that moves
    pub from_index: usize,
    pub to: PileId,
    pub count: usize,
}

/// True if `request` may be applied to `state` right now
pub fn is_legal_move(state: &GameState, request: &MoveRequest) -> bool {
    plan(state, request).is_some()
}

/// Every legal request, card moves first (tableau, waste, foundation
/// sources in table order), then the draw
pub fn legal_moves(state: &GameState) -> Vec<MoveRequest> {
    let mut candidates: Vec<Card> = Vec::new();
    for pile in state.tableau() {
        if let Some(start) = pile.run_start() {
            candidates.extend(pile.cards()[start..].iter().map(|p| p.card));
        }
    }
    candidates.extend(state.waste().top().map(|p| p.card));
    candidates.extend(state.foundations().iter().filter_map(|f| f.top().map(|p| p.card)));

    let destinations: Vec<PileId> = PileId::all()
        .filter(|id| matches!(id, PileId::Tableau(_) | PileId::Foundation(_)))
        .collect();

    let mut moves: Vec<MoveRequest> = candidates
        .iter()
        .flat_map(|&card| {
            destinations
                .iter()
                .map(move |&to| MoveRequest::Move { card, to })
        })
        .filter(|request| is_legal_move(state, request))
        .collect();

    if is_legal_move(state, &MoveRequest::Draw) {
        moves.push(MoveRequest::Draw);
    }
    moves
}

pub(crate) fn plan(state: &GameState, request: &MoveRequest) -> Option<MovePlan> {
    if state.phase() != GamePhase::Playing {
        return None;
    }
    match *request {
        MoveRequest::Draw => plan_draw(state),
        MoveRequest::Move { card, to } => plan_card_move(state, card, to),
    }
}

fn plan_draw(state: &GameState) -> Option<MovePlan> {
    let stock = state.stock();
    let waste = state.waste();
    if !stock.is_empty() {
        let count = state.config().draw_mode.count().min(stock.len());
        return Some(MovePlan {
            kind: MoveKind::Draw,
            from: PileId::Stock,
            from_index: stock.len() - count,
            to: PileId::Waste,
            count,
        });
    }
    if !waste.is_empty() {
        return Some(MovePlan {
            kind: MoveKind::Recycle,
            from: PileId::Waste,
            from_index: 0,
            to: PileId::Stock,
            count: waste.len(),
        });
    }
    None
}

fn plan_card_move(state: &GameState, card: Card, to: PileId) -> Option<MovePlan> {
    let (from, from_index) = state.locate(card)?;
    if from == to {
        return None;
    }
    let source = state.pile(from)?;
    let destination = state.pile(to)?;
    if !source.cards().get(from_index)?.face_up {
        return None;
    }
    let is_top = from_index + 1 == source.len();

    let kind = match (from, to) {
        (PileId::Tableau(_), PileId::Tableau(_)) if source.is_run_from(from_index) => {
            MoveKind::TableauToTableau
        }
        (PileId::Tableau(_), PileId::Foundation(_)) if is_top => MoveKind::TableauToFoundation,
        (PileId::Waste, PileId::Foundation(_)) if is_top => MoveKind::WasteToFoundation,
        (PileId::Waste, PileId::Tableau(_)) if is_top => MoveKind::WasteToTableau,
        (PileId::Foundation(_), PileId::Tableau(_))
            if is_top && state.config().allow_take_back =>
        {
            MoveKind::FoundationToTableau
        }
        _ => return None,
    };

    let accepted = match to {
        PileId::Tableau(_) => tableau_accepts(destination, card),
        PileId::Foundation(_) => foundation_accepts(destination, card),
        PileId::Stock | PileId::Waste => false,
    };

    accepted.then_some(MovePlan {
        kind,
        from,
        from_index,
        to,
        count: source.len() - from_index,
    })
}

/// Empty pile takes anything; otherwise one rank lower, opposite colour,
/// onto a face-up top
pub fn tableau_accepts(pile: &Pile, card: Card) -> bool {
    match pile.top() {
        None => true,
        Some(top) => top.face_up && card.stacks_on(top.card),
    }
}

/// Empty foundation takes an Ace; otherwise the next rank of the same suit
pub fn foundation_accepts(pile: &Pile, card: Card) -> bool {
    match pile.top() {
        None => card.rank == Rank::Ace,
        Some(top) => top.card.suit == card.suit && card.rank.is_one_above(top.card.rank),
    }
}
