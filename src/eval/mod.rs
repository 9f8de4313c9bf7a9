//! Evaluation module for backgammon positions
//!
//! The AI scores the position at the end of every legal move sequence
//! and keeps the best one. Scoring is pluggable through [`Evaluator`];
//! [`DefaultHeuristic`] is the phase-based scorer the engine ships with.

pub mod heuristic;
pub mod weights;

use crate::board::{BoardMap, PlayerId};

pub use heuristic::{evaluate, DefaultHeuristic};
pub use weights::Weight;

/// Scores a position for one side. Higher is better for `side`.
///
/// Implementations must be pure: the same board and side always give the
/// same score.
pub trait Evaluator {
    fn evaluate(&self, board: &BoardMap, side: PlayerId) -> f64;
}

impl<F> Evaluator for F
where
    F: Fn(&BoardMap, PlayerId) -> f64,
{
    fn evaluate(&self, board: &BoardMap, side: PlayerId) -> f64 {
        self(board, side)
    }
}
