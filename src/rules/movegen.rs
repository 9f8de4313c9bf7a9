//! Legal move generation
//!
//! Moves are generated per usable die face:
//! - A side with a jailed checker may only enter it into the opponent's
//!   inner table, on the point `d` steps from the bar.
//! - Otherwise every checker may advance `d` points onto any point that
//!   does not hold two or more opposing checkers.
//! - Once nothing is left in the outer table, checkers may bear off with
//!   the exact die, or with a larger die from the farthest occupied slot.
//!
//! When two different dice are both still available, the candidates are
//! filtered so that both dice are played if any ordering allows it, and
//! otherwise the larger die is played.

use std::fmt;

use crate::board::{BoardMap, PlayerId, PointId, TRACK_LEN};

use super::{DiceRoll, Move};

/// The legal moves for one side given a board and the remaining dice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveOptions {
    side: PlayerId,
    moves: Vec<Move>,
}

impl MoveOptions {
    /// Compute every legal move for `side`.
    pub fn generate(side: PlayerId, board: &BoardMap, dice: &DiceRoll) -> Self {
        let mut moves = candidate_moves(side, board, dice);

        let (roll1, roll2) = (dice.roll1(), dice.roll2());
        if roll1 != roll2 && dice.can_use(roll1) && dice.can_use(roll2) {
            moves = enforce_dice_usage(side, board, dice, moves);
        }

        Self { side, moves }
    }

    #[inline]
    pub fn side(&self) -> PlayerId {
        self.side
    }

    #[inline]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Any move available
    #[inline]
    pub fn can_move(&self) -> bool {
        !self.moves.is_empty()
    }

    /// Any move consuming `face`
    pub fn can_move_with(&self, face: u8) -> bool {
        self.moves.iter().any(|m| m.die() == face)
    }

    /// Any move starting on `start`
    pub fn can_move_from(&self, start: PointId) -> bool {
        self.moves.iter().any(|m| m.start() == start)
    }

    /// Any move starting on `start` and consuming `face`
    pub fn can_move_from_with(&self, start: PointId, face: u8) -> bool {
        self.move_from(start, face).is_some()
    }

    pub fn move_from(&self, start: PointId, face: u8) -> Option<Move> {
        self.moves
            .iter()
            .find(|m| m.start() == start && m.die() == face)
            .copied()
    }

    /// Whether a move from `start` to `end` exists
    pub fn has_move(&self, start: PointId, end: PointId) -> bool {
        self.find_move(start, end).is_some()
    }

    /// First move from `start` to `end`, in generation order
    pub fn find_move(&self, start: PointId, end: PointId) -> Option<Move> {
        self.moves
            .iter()
            .find(|m| m.start() == start && m.end() == end)
            .copied()
    }

    /// Distinct destinations reachable from `start`
    pub fn destinations_from(&self, start: PointId) -> Vec<PointId> {
        let mut ends: Vec<PointId> = self
            .moves
            .iter()
            .filter(|m| m.start() == start)
            .map(|m| m.end())
            .collect();
        ends.sort_unstable();
        ends.dedup();
        ends
    }
}

impl<'a> IntoIterator for &'a MoveOptions {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl fmt::Display for MoveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mv in &self.moves {
            writeln!(f, "{mv}")?;
        }
        Ok(())
    }
}

/// Every move allowed by the dice before the forced-usage rule.
fn candidate_moves(side: PlayerId, board: &BoardMap, dice: &DiceRoll) -> Vec<Move> {
    let mut moves = Vec::new();

    let (Some(home), Some(jail), Some(inner), Some(outer)) = (
        board.home(side),
        board.jail(side),
        board.inner_table(side),
        board.outer_table(side),
    ) else {
        return moves;
    };

    if jail.count() > 0 {
        for roll in 1..=6u8 {
            let entry = outer[usize::from(roll - 1)];
            if dice.can_use(roll) && !entry.is_blocking(side) {
                moves.push(Move::new(jail, entry, roll));
            }
        }
        return moves;
    }

    for roll in 1..=6u8 {
        if !dice.can_use(roll) {
            continue;
        }
        for (idx, from) in board.track().iter().enumerate() {
            if !from.is_occupied_by(side) {
                continue;
            }
            let Some(to) = forward(idx, side, roll).map(|id| board.point(id)) else {
                continue;
            };
            if !to.is_blocking(side) {
                moves.push(Move::new(from, to, roll));
            }
        }
    }

    if outer.iter().any(|p| p.is_occupied_by(side)) {
        return moves;
    }

    // Farthest occupied inner slot, 1-based
    let max_distance = inner
        .iter()
        .rposition(|p| p.is_occupied_by(side))
        .map_or(0, |i| i + 1);

    for roll in 1..=6u8 {
        if !dice.can_use(roll) {
            continue;
        }
        let slot = usize::from(roll);
        if inner[slot - 1].is_occupied_by(side) {
            moves.push(Move::new(inner[slot - 1], home, roll));
        } else if max_distance > 0
            && slot >= max_distance
            && inner[max_distance - 1].is_occupied_by(side)
        {
            moves.push(Move::new(inner[max_distance - 1], home, roll));
        }
    }

    moves
}

/// Track point `roll` steps ahead of `idx` for `side`, if still on the track.
fn forward(idx: usize, side: PlayerId, roll: u8) -> Option<PointId> {
    let roll = usize::from(roll);
    match side {
        PlayerId::Player1 => idx.checked_sub(roll).and_then(PointId::track),
        PlayerId::Player2 => {
            let to = idx + roll;
            if to < TRACK_LEN {
                PointId::track(to)
            } else {
                None
            }
        }
        PlayerId::None => None,
    }
}

/// Keep only the moves that let both dice be played; failing that, only
/// the moves of the larger die.
fn enforce_dice_usage(
    side: PlayerId,
    board: &BoardMap,
    dice: &DiceRoll,
    moves: Vec<Move>,
) -> Vec<Move> {
    let (roll1, roll2) = (dice.roll1(), dice.roll2());
    let mut both = Vec::new();
    let mut roll1_only = Vec::new();
    let mut roll2_only = Vec::new();

    for mv in &moves {
        let mut next_board = board.clone();
        let mut next_dice = *dice;
        let applied = next_board
            .apply(mv)
            .and_then(|()| next_dice.use_move(mv));
        debug_assert!(applied.is_ok(), "generated move {mv} must apply");

        let next = MoveOptions::generate(side, &next_board, &next_dice);

        if (mv.die() == roll1 && next.can_move_with(roll2))
            || (mv.die() == roll2 && next.can_move_with(roll1))
        {
            both.push(*mv);
        } else if mv.die() == roll1 {
            roll1_only.push(*mv);
        } else if mv.die() == roll2 {
            roll2_only.push(*mv);
        }
    }

    if !both.is_empty() {
        both
    } else if roll1 > roll2 && !roll1_only.is_empty() {
        roll1_only
    } else if roll2 > roll1 && !roll2_only.is_empty() {
        roll2_only
    } else {
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(layout: &[(PointId, PlayerId, u8)]) -> BoardMap {
        BoardMap::from_occupancy(layout.iter().copied()).unwrap()
    }

    #[test]
    fn test_standard_opening_moves() {
        let board = BoardMap::setup(crate::board::Variant::Standard);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &DiceRoll::new(3, 1));
        assert!(options.can_move());
        assert!(options.has_move(PointId::Point8, PointId::Point5));
        assert!(options.has_move(PointId::Point6, PointId::Point5));
        assert!(options.has_move(PointId::Point24, PointId::Point21));
        assert_eq!(options.side(), PlayerId::Player1);
    }

    #[test]
    fn test_hit_on_lone_checker() {
        let board = board_with(&[
            (PointId::Point5, PlayerId::Player1, 1),
            (PointId::Point1, PlayerId::Player2, 1),
            (PointId::Point2, PlayerId::Player2, 1),
        ]);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &DiceRoll::new(4, 1));

        let hit = options.move_from(PointId::Point5, 4).unwrap();
        assert_eq!(hit.end(), PointId::Point1);
        assert!(hit.is_hit());
    }

    #[test]
    fn test_jailed_checker_must_enter() {
        let board = board_with(&[
            (PointId::JailP2, PlayerId::Player2, 1),
            (PointId::Point10, PlayerId::Player2, 2),
            (PointId::Point3, PlayerId::Player1, 2),
        ]);
        let options = MoveOptions::generate(PlayerId::Player2, &board, &DiceRoll::new(3, 5));

        assert_eq!(options.len(), 1);
        let entry = options.moves()[0];
        assert!(entry.is_entry());
        assert_eq!(entry.end(), PointId::Point5);
        assert!(!options.can_move_from(PointId::Point10));
    }

    #[test]
    fn test_closed_board_has_no_moves() {
        let mut layout = vec![(PointId::JailP1, PlayerId::Player1, 1)];
        for id in BoardMap::inner_table_ids(PlayerId::Player2).unwrap() {
            layout.push((id, PlayerId::Player2, 2));
        }
        let board = board_with(&layout);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &DiceRoll::new(6, 2));
        assert!(!options.can_move());
    }

    #[test]
    fn test_larger_die_when_only_one_playable() {
        let board = board_with(&[
            (PointId::Point13, PlayerId::Player1, 1),
            (PointId::Point2, PlayerId::Player2, 2),
            (PointId::HomeP1, PlayerId::Player1, 14),
        ]);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &DiceRoll::new(5, 6));

        assert_eq!(options.len(), 1);
        let only = options.moves()[0];
        assert_eq!(only.die(), 6);
        assert_eq!(only.end(), PointId::Point7);
    }

    #[test]
    fn test_both_dice_preferred() {
        let board = board_with(&[
            (PointId::Point11, PlayerId::Player1, 1),
            (PointId::Point21, PlayerId::Player1, 1),
            (PointId::Point8, PlayerId::Player2, 2),
            (PointId::Point13, PlayerId::Player2, 2),
        ]);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &DiceRoll::new(5, 3));

        assert_eq!(options.len(), 2);
        assert!(options.has_move(PointId::Point21, PointId::Point18));
        assert!(options.has_move(PointId::Point11, PointId::Point6));
        // Point21 -> Point16 strands the 3
        assert!(!options.has_move(PointId::Point21, PointId::Point16));
    }

    #[test]
    fn test_bear_off_with_larger_die() {
        let board = board_with(&[
            (PointId::Point3, PlayerId::Player1, 1),
            (PointId::Point5, PlayerId::Player1, 1),
            (PointId::HomeP1, PlayerId::Player1, 13),
        ]);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &DiceRoll::new(6, 6));

        assert_eq!(options.len(), 1);
        assert_eq!(options.moves()[0].start(), PointId::Point5);
        assert_eq!(options.moves()[0].end(), PointId::HomeP1);
        assert!(!options.can_move_from(PointId::Point3));
    }

    #[test]
    fn test_bear_off_exact_die() {
        let board = board_with(&[
            (PointId::Point20, PlayerId::Player2, 2),
            (PointId::Point23, PlayerId::Player2, 1),
            (PointId::HomeP2, PlayerId::Player2, 12),
        ]);
        let options = MoveOptions::generate(PlayerId::Player2, &board, &DiceRoll::new(2, 2));

        // Point23 is slot 2 for Player2, Point20 would land on Point22
        assert!(options.has_move(PointId::Point23, PointId::HomeP2));
        assert!(options.has_move(PointId::Point20, PointId::Point22));
        assert!(!options.has_move(PointId::Point20, PointId::HomeP2));
    }

    #[test]
    fn test_no_bear_off_with_outer_checker() {
        let board = board_with(&[
            (PointId::Point2, PlayerId::Player1, 14),
            (PointId::Point7, PlayerId::Player1, 1),
        ]);
        let options = MoveOptions::generate(PlayerId::Player1, &board, &DiceRoll::new(2, 2));
        assert!(!options.moves().iter().any(|m| m.is_bear_off()));
    }

    #[test]
    fn test_none_side_has_no_moves() {
        let board = BoardMap::setup(crate::board::Variant::Standard);
        let options = MoveOptions::generate(PlayerId::None, &board, &DiceRoll::new(4, 2));
        assert!(options.is_empty());
    }

    #[test]
    fn test_queries() {
        let board = BoardMap::setup(crate::board::Variant::Standard);
        let options = MoveOptions::generate(PlayerId::Player2, &board, &DiceRoll::new(6, 4));

        assert!(options.can_move_with(6));
        assert!(options.can_move_with(4));
        assert!(!options.can_move_with(5));
        assert!(options.can_move_from_with(PointId::Point1, 6));
        assert_eq!(
            options.find_move(PointId::Point1, PointId::Point7).map(|m| m.die()),
            Some(6)
        );
        assert!(options.destinations_from(PointId::Point12).contains(&PointId::Point18));
        assert!(options.find_move(PointId::Point19, PointId::HomeP2).is_none());
    }
}
