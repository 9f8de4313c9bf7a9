//! Search module for the backgammon AI
//!
//! Contains the turn tree: every legal ordering of die uses for one roll,
//! expanded up front so the engine can score each complete sequence.

pub mod tree;

pub use tree::GameState;
