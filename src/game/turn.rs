//! One turn of play
//!
//! A [`Turn`] owns the dice and the moves made so far, and keeps the legal
//! options in step with the board after every move or undo. The board
//! itself belongs to the caller and is passed into each operation.

use tracing::warn;

use crate::board::{BoardMap, PlayerId, PointId};
use crate::error::RuleError;
use crate::rules::{DiceRoll, Move, MoveOptions};

#[derive(Debug, Clone)]
pub struct Turn {
    side: PlayerId,
    dice: DiceRoll,
    options: MoveOptions,
    made: Vec<Move>,
}

impl Turn {
    /// Start a turn for `side` with a fresh roll
    pub fn new(side: PlayerId, board: &BoardMap, dice: DiceRoll) -> Self {
        Self {
            side,
            dice,
            options: MoveOptions::generate(side, board, &dice),
            made: Vec::new(),
        }
    }

    #[inline]
    pub fn side(&self) -> PlayerId {
        self.side
    }

    #[inline]
    pub fn dice(&self) -> &DiceRoll {
        &self.dice
    }

    /// Legal moves from the current position
    #[inline]
    pub fn options(&self) -> &MoveOptions {
        &self.options
    }

    /// Moves played so far, oldest first
    #[inline]
    pub fn moves_made(&self) -> &[Move] {
        &self.made
    }

    /// No legal move remains
    #[inline]
    pub fn is_over(&self) -> bool {
        !self.options.can_move()
    }

    /// Play the move from `start` to `end`.
    pub fn play(&mut self, board: &mut BoardMap, start: PointId, end: PointId) -> Result<Move, RuleError> {
        let mv = self
            .options
            .find_move(start, end)
            .ok_or(RuleError::IllegalMove { start, end })?;
        self.play_move(board, mv)?;
        Ok(mv)
    }

    /// Play a move already chosen from [`Turn::options`], e.g. by the AI.
    pub fn play_move(&mut self, board: &mut BoardMap, mv: Move) -> Result<(), RuleError> {
        if !self.options.moves().contains(&mv) {
            return Err(RuleError::IllegalMove {
                start: mv.start(),
                end: mv.end(),
            });
        }

        let mut dice = self.dice;
        dice.use_move(&mv)?;
        board.apply(&mv)?;

        self.dice = dice;
        self.made.push(mv);
        self.refresh(board);
        Ok(())
    }

    /// Take back the last move made this turn.
    pub fn undo(&mut self, board: &mut BoardMap) -> Result<Move, RuleError> {
        let mv = *self.made.last().ok_or(RuleError::NothingToUndo)?;

        let mut dice = self.dice;
        dice.restore_move(&mv)?;
        board.revert(&mv)?;

        self.dice = dice;
        self.made.pop();
        self.refresh(board);
        Ok(mv)
    }

    /// Play a move list received from a remote peer, in order.
    ///
    /// Either every pair is legal in sequence and all are applied, or
    /// nothing changes.
    pub fn apply_relayed(&mut self, board: &mut BoardMap, relayed: &[(PointId, PointId)]) -> Result<(), RuleError> {
        let mut next_board = board.clone();
        let mut next_turn = self.clone();

        for &(start, end) in relayed {
            if let Err(err) = next_turn.play(&mut next_board, start, end) {
                warn!(side = ?self.side, ?start, ?end, %err, "rejected relayed move");
                return Err(err);
            }
        }

        *board = next_board;
        *self = next_turn;
        Ok(())
    }

    /// The moves made, as (start, end) pairs for relaying
    pub fn relay(&self) -> Vec<(PointId, PointId)> {
        self.made.iter().map(|m| (m.start(), m.end())).collect()
    }

    fn refresh(&mut self, board: &BoardMap) {
        self.options = MoveOptions::generate(self.side, board, &self.dice);
    }
}
