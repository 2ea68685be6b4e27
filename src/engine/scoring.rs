//! Point values per move kind

use serde::{Deserialize, Serialize};

use super::moves::MoveKind;

/// Configurable scoring table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    /// Stock -> Waste
    pub draw: i32,
    /// Tableau or Waste -> Foundation
    pub to_foundation: i32,
    /// Foundation -> Tableau (take-back)
    pub foundation_to_tableau: i32,
    /// Waste -> Tableau
    pub waste_to_tableau: i32,
    /// Bonus when a Tableau -> Tableau move turns a card face-up
    pub reveal: i32,
    /// Waste turned back into Stock
    pub recycle: i32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            draw: 0,
            to_foundation: 10,
            foundation_to_tableau: -10,
            waste_to_tableau: 5,
            reveal: 5,
            recycle: 0,
        }
    }
}

impl ScoreTable {
    /// Raw delta for a move, before the non-negative clamp
    pub fn delta(&self, kind: MoveKind, revealed: bool) -> i32 {
        let base = match kind {
            MoveKind::Draw => self.draw,
            MoveKind::Recycle => self.recycle,
            MoveKind::TableauToTableau => 0,
            MoveKind::TableauToFoundation | MoveKind::WasteToFoundation => self.to_foundation,
            MoveKind::WasteToTableau => self.waste_to_tableau,
            MoveKind::FoundationToTableau => self.foundation_to_tableau,
        };
        if revealed && kind == MoveKind::TableauToTableau {
            base + self.reveal
        } else {
            base
        }
    }
}

/// Delta that can actually be applied to `score` without dropping below zero
pub fn clamped_delta(score: i32, delta: i32) -> i32 {
    score.saturating_add(delta).max(0) - score
}
