//! Main AI engine: picks a full move sequence for one dice roll
//!
//! The engine expands every legal ordering of die uses into a
//! [`GameState`] tree, scores the position at each leaf with its
//! [`Evaluator`] and returns the path to the best leaf. Only a strictly
//! higher score replaces the incumbent, so among equal scores the first
//! sequence in generation order wins.
//!
//! # Example
//!
//! ```
//! use backgammon::{AiPlayer, BoardMap, DiceRoll, MoveOptions, PlayerId, Variant};
//!
//! let board = BoardMap::setup(Variant::Standard);
//! let dice = DiceRoll::new(6, 1);
//! let options = MoveOptions::generate(PlayerId::Player2, &board, &dice);
//!
//! let ai = AiPlayer::new();
//! let result = ai.select_with_stats(&board, &options, &dice);
//! assert_eq!(result.moves.len(), 2);
//! println!("Best sequence scored {} over {} leaves", result.score, result.leaves);
//! ```

use std::time::Instant;

use tracing::{debug, trace};

use crate::board::{BoardMap, PlayerId};
use crate::eval::{DefaultHeuristic, Evaluator};
use crate::rules::{DiceRoll, Move, MoveOptions};
use crate::search::GameState;

/// Result of a sequence search with statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best sequence found, in the order it must be played; empty when
    /// the side has no legal move
    pub moves: Vec<Move>,
    /// Evaluation of the position after the sequence
    pub score: f64,
    /// Complete sequences scored
    pub leaves: u64,
    /// Nodes in the turn tree
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

/// Computer opponent choosing a move sequence for a roll.
///
/// Holds no state between calls; one instance can serve both sides and
/// any number of games.
#[derive(Debug, Clone, Default)]
pub struct AiPlayer<E: Evaluator = DefaultHeuristic> {
    evaluator: E,
}

impl AiPlayer<DefaultHeuristic> {
    /// AI using the built-in heuristic
    #[must_use]
    pub fn new() -> Self {
        Self {
            evaluator: DefaultHeuristic,
        }
    }
}

impl<E: Evaluator> AiPlayer<E> {
    /// AI using a custom evaluator
    #[must_use]
    pub fn with_evaluator(evaluator: E) -> Self {
        Self { evaluator }
    }

    #[inline]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Best ordered move sequence for the side in `options`.
    ///
    /// Returns an empty sequence when no move is legal.
    #[must_use]
    pub fn select_move_sequence(
        &self,
        board: &BoardMap,
        options: &MoveOptions,
        dice: &DiceRoll,
    ) -> Vec<Move> {
        self.select_with_stats(board, options, dice).moves
    }

    /// Best ordered move sequence along with search statistics.
    pub fn select_with_stats(
        &self,
        board: &BoardMap,
        options: &MoveOptions,
        dice: &DiceRoll,
    ) -> SearchResult {
        let start = Instant::now();
        let tree = GameState::build(board, options, dice);

        let mut walk = Walk {
            evaluator: &self.evaluator,
            side: options.side(),
            path: Vec::with_capacity(4),
            best_moves: Vec::new(),
            best_score: f64::NEG_INFINITY,
            leaves: 0,
        };
        walk.visit(&tree);

        let result = SearchResult {
            moves: walk.best_moves,
            score: walk.best_score,
            leaves: walk.leaves,
            nodes: tree.node_count() as u64,
            time_ms: start.elapsed().as_millis() as u64,
        };

        debug!(
            side = ?options.side(),
            leaves = result.leaves,
            nodes = result.nodes,
            score = result.score,
            time_ms = result.time_ms,
            "sequence search complete"
        );

        result
    }
}

/// Depth-first walk state
struct Walk<'a, E: Evaluator> {
    evaluator: &'a E,
    side: PlayerId,
    path: Vec<Move>,
    best_moves: Vec<Move>,
    best_score: f64,
    leaves: u64,
}

impl<E: Evaluator> Walk<'_, E> {
    fn visit(&mut self, state: &GameState) {
        if state.is_terminal() {
            self.score_leaf(state);
            return;
        }

        for (mv, child) in state.children() {
            self.path.push(*mv);
            self.visit(child);
            self.path.pop();
        }
    }

    fn score_leaf(&mut self, state: &GameState) {
        self.leaves += 1;
        let score = self.evaluator.evaluate(state.board(), self.side);

        if score > self.best_score {
            trace!(score, sequence = ?self.path, "new best sequence");
            self.best_score = score;
            self.best_moves.clone_from(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PointId, Variant};

    fn board_with(layout: &[(PointId, PlayerId, u8)]) -> BoardMap {
        BoardMap::from_occupancy(layout.iter().copied()).unwrap()
    }

    fn select(board: &BoardMap, side: PlayerId, dice: DiceRoll) -> SearchResult {
        let options = MoveOptions::generate(side, board, &dice);
        AiPlayer::new().select_with_stats(board, &options, &dice)
    }

    #[test]
    fn test_engine_no_moves_returns_empty() {
        let mut layout = vec![(PointId::JailP2, PlayerId::Player2, 1)];
        for id in BoardMap::inner_table_ids(PlayerId::Player1).unwrap() {
            layout.push((id, PlayerId::Player1, 2));
        }
        let board = board_with(&layout);
        let result = select(&board, PlayerId::Player2, DiceRoll::new(5, 3));

        assert!(result.moves.is_empty());
        assert_eq!(result.leaves, 1);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_engine_opening_uses_both_dice() {
        let board = BoardMap::setup(Variant::Standard);
        let result = select(&board, PlayerId::Player1, DiceRoll::new(4, 2));
        assert_eq!(result.moves.len(), 2);

        let result = select(&board, PlayerId::Player2, DiceRoll::new(3, 3));
        assert_eq!(result.moves.len(), 4);
        assert!(result.leaves > 1);
    }

    #[test]
    fn test_engine_sequence_is_playable() {
        let board = BoardMap::setup(Variant::Standard);
        let mut dice = DiceRoll::new(6, 5);
        let moves = AiPlayer::new().select_move_sequence(
            &board,
            &MoveOptions::generate(PlayerId::Player2, &board, &dice),
            &dice,
        );

        let mut replay = board.clone();
        for mv in &moves {
            let options = MoveOptions::generate(PlayerId::Player2, &replay, &dice);
            assert!(options.moves().contains(mv), "{mv} not legal");
            replay.apply(mv).unwrap();
            dice.use_move(mv).unwrap();
        }
        assert!(!MoveOptions::generate(PlayerId::Player2, &replay, &dice).can_move());
    }

    #[test]
    fn test_engine_picks_the_only_safe_sequence() {
        let board = board_with(&[
            (PointId::Point11, PlayerId::Player2, 1),
            (PointId::Point13, PlayerId::Player2, 1),
            (PointId::HomeP2, PlayerId::Player2, 13),
            (PointId::Point21, PlayerId::Player1, 2),
            (PointId::HomeP1, PlayerId::Player1, 13),
        ]);
        let result = select(&board, PlayerId::Player2, DiceRoll::new(5, 3));

        let played: Vec<(PointId, PointId)> =
            result.moves.iter().map(|m| (m.start(), m.end())).collect();
        assert_eq!(
            played,
            vec![
                (PointId::Point13, PointId::Point16),
                (PointId::Point11, PointId::Point16),
            ]
        );
    }

    #[test]
    fn test_engine_first_sequence_wins_ties() {
        let board = BoardMap::setup(Variant::Standard);
        let dice = DiceRoll::new(2, 1);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &dice);

        let flat = AiPlayer::with_evaluator(|_: &BoardMap, _: PlayerId| 0.0);
        let result = flat.select_with_stats(&board, &options, &dice);

        let tree = GameState::build(&board, &options, &dice);
        let mut first = Vec::new();
        let mut state = &tree;
        while let Some((mv, child)) = state.children().first() {
            first.push(*mv);
            state = child;
        }
        assert_eq!(result.moves, first);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_engine_custom_evaluator_changes_choice() {
        let board = BoardMap::setup(Variant::Standard);
        let dice = DiceRoll::new(6, 4);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &dice);

        // Prefer the lowest pip count: the sequence must use all ten pips
        let racer = AiPlayer::with_evaluator(|b: &BoardMap, side: PlayerId| -f64::from(b.pip_count(side)));
        let result = racer.select_with_stats(&board, &options, &dice);
        assert_eq!(result.score, -157.0);
    }

    #[test]
    fn test_engine_stats_consistent() {
        let board = BoardMap::setup(Variant::Standard);
        let dice = DiceRoll::new(5, 2);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &dice);
        let tree = GameState::build(&board, &options, &dice);

        let result = AiPlayer::<DefaultHeuristic>::default().select_with_stats(&board, &options, &dice);
        assert_eq!(result.leaves, tree.leaf_count() as u64);
        assert_eq!(result.nodes, tree.node_count() as u64);
        assert!(result.score.is_finite());
    }
}
