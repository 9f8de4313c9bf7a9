//! Backgammon rules engine with a computer opponent
//!
//! The engine covers the board model, dice, legal-move generation under
//! the full rule set and an AI that searches every legal way to play a
//! roll:
//! - 24 track points, two homes and two jails per board
//! - Doubles give four moves of the same face
//! - Jailed checkers must enter before anything else moves
//! - Both dice must be used when possible, otherwise the larger one
//! - Bearing off once every checker is in the inner table
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Points, the 28-location board map and starting layouts
//! - [`rules`]: Dice, moves, legal-move generation and game outcome
//! - [`search`]: The tree of every legal move ordering for a roll
//! - [`eval`]: Position evaluation and heuristics
//! - [`engine`]: AI player selecting the best full move sequence
//! - [`game`]: Turns, the doubling cube and match / money sessions
//! - [`config`]: JSON game configuration
//!
//! # Quick Start
//!
//! ```
//! use backgammon::{AiPlayer, BoardMap, DiceRoll, MoveOptions, PlayerId, Variant};
//!
//! let mut board = BoardMap::setup(Variant::Standard);
//! let dice = DiceRoll::new(3, 1);
//! let options = MoveOptions::generate(PlayerId::Player1, &board, &dice);
//!
//! // Let the computer play Player1's roll
//! for mv in AiPlayer::new().select_move_sequence(&board, &options, &dice) {
//!     board.apply(&mv).unwrap();
//!     println!("AI plays {mv}");
//! }
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{BoardMap, PlayerId, Point, PointId, Variant};
pub use config::{ConfigError, GameConfig};
pub use engine::{AiPlayer, SearchResult};
pub use error::RuleError;
pub use eval::{DefaultHeuristic, Evaluator};
pub use game::{DoublingCube, Session, Turn};
pub use rules::{DiceRoll, Move, MoveOptions, WinKind};
pub use search::GameState;
