//! Engine error type

use crate::engine::MoveRequest;

/// Errors returned by engine and controller operations
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The deck handed to the deal is not the 52 distinct cards
    #[display("invalid deck: expected {expected} unique cards, got {found} ({unique} unique)")]
    InvalidDeck {
        expected: usize,
        found: usize,
        unique: usize,
    },

    /// The move is not legal in the current position
    #[display("illegal move: {_0}")]
    IllegalMove(MoveRequest),

    /// History is empty
    #[display("nothing to undo")]
    NothingToUndo,

    /// The game is over; start a new one
    #[display("game already won")]
    GameWon,
}

impl std::error::Error for GameError {}
