//! Full search tree for one turn
//!
//! Every node owns the board and dice reached by playing the moves on the
//! path from the root. Children are kept in the order their moves were
//! generated, so a depth-first walk visits sequences in generation order.
//!
//! # Example
//!
//! ```
//! use backgammon::board::{BoardMap, PlayerId, Variant};
//! use backgammon::rules::{DiceRoll, MoveOptions};
//! use backgammon::search::GameState;
//!
//! let board = BoardMap::setup(Variant::Standard);
//! let dice = DiceRoll::new(3, 1);
//! let options = MoveOptions::generate(PlayerId::Player1, &board, &dice);
//!
//! let tree = GameState::build(&board, &options, &dice);
//! assert!(!tree.is_terminal());
//! assert!(tree.leaf_count() > 0);
//! ```

use crate::board::{BoardMap, PlayerId};
use crate::rules::{DiceRoll, Move, MoveOptions};

/// A node of the turn tree: a position plus the legal moves out of it.
///
/// A node without legal moves is a leaf. Depth never exceeds the number
/// of die uses in the roll (two, or four on doubles).
#[derive(Debug, Clone)]
pub struct GameState {
    board: BoardMap,
    dice: DiceRoll,
    options: MoveOptions,
    children: Vec<(Move, GameState)>,
}

impl GameState {
    /// Expand every legal move sequence reachable from `board`.
    ///
    /// The arguments are cloned; nothing the caller owns is modified.
    pub fn build(board: &BoardMap, options: &MoveOptions, dice: &DiceRoll) -> Self {
        let side = options.side();
        let mut children = Vec::with_capacity(options.len());

        for mv in options {
            let mut next_board = board.clone();
            let mut next_dice = *dice;
            if next_board.apply(mv).is_err() || next_dice.use_move(mv).is_err() {
                continue;
            }
            let next_options = MoveOptions::generate(side, &next_board, &next_dice);
            children.push((*mv, Self::build(&next_board, &next_options, &next_dice)));
        }

        Self {
            board: board.clone(),
            dice: *dice,
            options: options.clone(),
            children,
        }
    }

    #[inline]
    pub fn board(&self) -> &BoardMap {
        &self.board
    }

    #[inline]
    pub fn dice(&self) -> &DiceRoll {
        &self.dice
    }

    #[inline]
    pub fn options(&self) -> &MoveOptions {
        &self.options
    }

    #[inline]
    pub fn side(&self) -> PlayerId {
        self.options.side()
    }

    /// Moves out of this node, in generation order
    pub fn moves(&self) -> impl Iterator<Item = &Move> + '_ {
        self.children.iter().map(|(mv, _)| mv)
    }

    #[inline]
    pub fn children(&self) -> &[(Move, GameState)] {
        &self.children
    }

    /// State reached by playing `mv` from here
    pub fn child(&self, mv: &Move) -> Option<&GameState> {
        self.children
            .iter()
            .find(|(candidate, _)| candidate == mv)
            .map(|(_, state)| state)
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Nodes in this subtree, this one included
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|(_, state)| state.node_count())
            .sum::<usize>()
    }

    /// Complete move sequences below this node
    pub fn leaf_count(&self) -> usize {
        if self.is_terminal() {
            return 1;
        }
        self.children
            .iter()
            .map(|(_, state)| state.leaf_count())
            .sum()
    }

    /// Longest move sequence below this node
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|(_, state)| 1 + state.depth())
            .max()
            .unwrap_or(0)
    }
}
