//! Error types for rule violations
//!
//! Every failure in the rules engine is local: the operation that returns
//! an error leaves its receiver untouched.

use thiserror::Error;

use crate::board::{PlayerId, PointId};

/// A rejected board, dice, turn or cube operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    #[error("point cannot hold {count} checkers for {side:?}")]
    InconsistentPoint { side: PlayerId, count: u8 },
    #[error("no checker to move on {0:?}")]
    EmptyStart(PointId),
    #[error("{0:?} is blocked")]
    Blocked(PointId),
    #[error("die face {0} is outside 1..=6")]
    InvalidFace(u8),
    #[error("die face {0} has no uses left")]
    DieUnavailable(u8),
    #[error("die face {0} has not been used")]
    DieAtCapacity(u8),
    #[error("no legal move from {start:?} to {end:?}")]
    IllegalMove { start: PointId, end: PointId },
    #[error("no move to undo")]
    NothingToUndo,
    #[error("doubling cube is not available")]
    CubeUnavailable,
    #[error("no turn in progress")]
    NoActiveTurn,
    #[error("the current turn is not finished")]
    TurnInProgress,
    #[error("the game is already over")]
    GameOver,
    #[error("the game is still being played")]
    GameInProgress,
}
