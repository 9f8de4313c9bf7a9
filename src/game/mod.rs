//! Playing games on top of the rules engine
//!
//! - [`turn`]: one side's turn, with undo and relayed moves
//! - [`cube`]: the doubling cube
//! - [`session`]: opening roll, turn order, scoring and match play

pub mod cube;
pub mod session;
pub mod turn;

pub use cube::{DoublingCube, MAX_CUBE_VALUE};
pub use session::{Ending, GameResult, PlayMode, Session};
pub use turn::Turn;
