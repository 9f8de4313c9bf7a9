//! Game rules for backgammon
//!
//! This module implements the rule set including:
//! - Dice usage (doubles give four moves)
//! - Legal move generation with entering, blocking and bearing off
//! - The "use both dice, else the larger" rule
//! - Game completion and gammon/backgammon scoring

pub mod dice;
pub mod movegen;
pub mod moves;
pub mod outcome;

// Re-exports for convenient access
pub use dice::DiceRoll;
pub use movegen::MoveOptions;
pub use moves::Move;
pub use outcome::{
    has_borne_off, is_blocked_off, is_complete, is_in_opponent_inner_table, is_jailed, win_kind,
    WinKind,
};
