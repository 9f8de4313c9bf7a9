//! Logical 28-point board used for move generation and search

use std::fmt;

use serde::{Deserialize, Serialize};

use super::point::Point;
use super::{PlayerId, PointId, POINT_COUNT, TRACK_LEN};
use crate::error::RuleError;
use crate::rules::Move;

/// Starting layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    Standard,
    SuddenDeath,
    Rush,
}

impl Variant {
    /// Player1 stacks; Player2 uses the mirrored track index.
    fn player1_layout(self) -> &'static [(usize, u8)] {
        match self {
            // Point24 x2, Point13 x5, Point8 x3, Point6 x5
            Variant::Standard => &[(23, 2), (12, 5), (7, 3), (5, 5)],
            Variant::SuddenDeath => &[(0, 5), (1, 2), (2, 2), (3, 2), (4, 2), (5, 2)],
            Variant::Rush => &[
                (0, 2),
                (1, 2),
                (2, 2),
                (3, 2),
                (4, 2),
                (5, 2),
                (17, 1),
                (16, 1),
                (15, 1),
            ],
        }
    }
}

/// The board: 24 track points, two homes and two jails.
///
/// A `BoardMap` is a disposable value. Search code clones it before
/// exploring a hypothetical move so the original is never disturbed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardMap {
    points: [Point; POINT_COUNT],
}

impl BoardMap {
    /// Empty board
    pub fn new() -> Self {
        Self {
            points: PointId::ALL.map(Point::new),
        }
    }

    /// Board with both sides in the starting layout of `variant`
    pub fn setup(variant: Variant) -> Self {
        let mut board = Self::new();
        for &(idx, count) in variant.player1_layout() {
            board.points[idx].side = PlayerId::Player1;
            board.points[idx].count = count;

            let mirrored = TRACK_LEN - 1 - idx;
            board.points[mirrored].side = PlayerId::Player2;
            board.points[mirrored].count = count;
        }
        board
    }

    /// Project an externally owned board into a `BoardMap`.
    ///
    /// Locations not listed stay empty; later entries overwrite earlier ones.
    pub fn from_occupancy<I>(occupancy: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (PointId, PlayerId, u8)>,
    {
        let mut board = Self::new();
        for (id, side, count) in occupancy {
            board.set_point(id, side, count)?;
        }
        Ok(board)
    }

    #[inline]
    pub fn set_point(&mut self, id: PointId, side: PlayerId, count: u8) -> Result<(), RuleError> {
        self.points[id.index()].set(side, count)
    }

    #[inline]
    pub fn point(&self, id: PointId) -> &Point {
        &self.points[id.index()]
    }

    /// The 24 track points, Point1 first
    #[inline]
    pub fn track(&self) -> &[Point] {
        &self.points[..TRACK_LEN]
    }

    #[inline]
    pub fn home(&self, side: PlayerId) -> Option<&Point> {
        PointId::home(side).map(|id| self.point(id))
    }

    #[inline]
    pub fn jail(&self, side: PlayerId) -> Option<&Point> {
        PointId::jail(side).map(|id| self.point(id))
    }

    /// The six points nearest `side`'s home, nearest first
    pub fn inner_table_ids(side: PlayerId) -> Option<[PointId; 6]> {
        match side {
            PlayerId::Player1 => Some(std::array::from_fn(|i| PointId::ALL[i])),
            PlayerId::Player2 => Some(std::array::from_fn(|i| PointId::ALL[TRACK_LEN - 1 - i])),
            PlayerId::None => None,
        }
    }

    /// The other 18 points, farthest from `side`'s home first.
    ///
    /// Entry `d - 1` is where a jailed checker of `side` enters with die `d`.
    pub fn outer_table_ids(side: PlayerId) -> Option<[PointId; 18]> {
        match side {
            PlayerId::Player1 => Some(std::array::from_fn(|i| PointId::ALL[TRACK_LEN - 1 - i])),
            PlayerId::Player2 => Some(std::array::from_fn(|i| PointId::ALL[i])),
            PlayerId::None => None,
        }
    }

    pub fn inner_table(&self, side: PlayerId) -> Option<[&Point; 6]> {
        Self::inner_table_ids(side).map(|ids| ids.map(|id| self.point(id)))
    }

    pub fn outer_table(&self, side: PlayerId) -> Option<[&Point; 18]> {
        Self::outer_table_ids(side).map(|ids| ids.map(|id| self.point(id)))
    }

    /// Total distance `side` still has to cover, jail included
    pub fn pip_count(&self, side: PlayerId) -> u32 {
        self.points.iter().map(|p| p.pip(side)).sum()
    }

    /// Checkers `side` has anywhere on the board, home and jail included
    pub fn checker_count(&self, side: PlayerId) -> u32 {
        self.points
            .iter()
            .filter(|p| p.is_occupied_by(side))
            .map(|p| u32::from(p.count))
            .sum()
    }

    /// Apply a move. A hit sends the lone opposing checker to its jail.
    ///
    /// Fails without touching the board when the start is empty or the
    /// destination holds two or more opposing checkers.
    pub fn apply(&mut self, mv: &Move) -> Result<(), RuleError> {
        let start = self.points[mv.start().index()];
        let end = self.points[mv.end().index()];

        if start.count == 0 {
            return Err(RuleError::EmptyStart(mv.start()));
        }

        if end.side.is_none() || end.side == start.side {
            self.transfer(mv.start(), mv.end());
            return Ok(());
        }

        if end.count == 1 {
            let opponent = end.side;
            if let Some(jail_id) = PointId::jail(opponent) {
                let jail = &mut self.points[jail_id.index()];
                jail.count += 1;
                jail.side = opponent;
            }
            let hit = &mut self.points[mv.end().index()];
            hit.count = 0;
            hit.side = PlayerId::None;
            self.transfer(mv.start(), mv.end());
            return Ok(());
        }

        Err(RuleError::Blocked(mv.end()))
    }

    /// Exact inverse of [`BoardMap::apply`]: the checker goes back to the
    /// start and a hit checker comes back out of jail.
    pub fn revert(&mut self, mv: &Move) -> Result<(), RuleError> {
        let start = self.points[mv.start().index()];
        let end = self.points[mv.end().index()];

        if end.count == 0 {
            return Err(RuleError::EmptyStart(mv.end()));
        }
        let mover = end.side;
        if !start.side.is_none() && start.side != mover {
            return Err(RuleError::Blocked(mv.start()));
        }

        let jail_id = if mv.is_hit() {
            let jail_id = PointId::jail(mover.opponent()).ok_or(RuleError::EmptyStart(mv.end()))?;
            if self.points[jail_id.index()].count == 0 {
                return Err(RuleError::EmptyStart(jail_id));
            }
            if end.count != 1 {
                return Err(RuleError::Blocked(mv.end()));
            }
            Some(jail_id)
        } else {
            None
        };

        self.transfer(mv.end(), mv.start());

        if let Some(jail_id) = jail_id {
            let opponent = mover.opponent();
            let jail = &mut self.points[jail_id.index()];
            jail.count -= 1;
            if jail.count == 0 {
                jail.side = PlayerId::None;
            }
            let restored = &mut self.points[mv.end().index()];
            restored.count = 1;
            restored.side = opponent;
        }

        Ok(())
    }

    fn transfer(&mut self, from: PointId, to: PointId) {
        let source = &mut self.points[from.index()];
        let side = source.side;
        source.count -= 1;
        if source.count == 0 {
            source.side = PlayerId::None;
        }

        let target = &mut self.points[to.index()];
        target.count += 1;
        target.side = side;
    }

    /// Probability (a multiple of 1/36) that the blot on `id` is hit on the
    /// opponent's next roll. Zero unless the point holds exactly one checker.
    pub fn vulnerability(&self, id: PointId) -> f32 {
        f32::from(self.hitting_rolls(id)) / 36.0
    }

    /// Number of the 36 ordered rolls that let the opponent hit the blot on `id`.
    pub fn hitting_rolls(&self, id: PointId) -> u8 {
        let point = self.point(id);
        if !point.is_vulnerable() {
            return 0;
        }

        let owner = point.side;
        let hitter = owner.opponent();
        let mut hit_table = [[false; 6]; 6];

        for roll1 in 1..=6u8 {
            let Some(first) = self.previous_point(id, hitter, roll1) else {
                continue;
            };
            let r1 = usize::from(roll1 - 1);

            if first.is_occupied_by(hitter) {
                for other in 0..6 {
                    hit_table[r1][other] = true;
                    hit_table[other][r1] = true;
                }
            } else if !first.is_controlled_by(owner) {
                for roll2 in 1..=6u8 {
                    let Some(second) = self.previous_point(first.id(), hitter, roll2) else {
                        continue;
                    };
                    if second.is_occupied_by(hitter) {
                        let r2 = usize::from(roll2 - 1);
                        hit_table[r1][r2] = true;
                        hit_table[r2][r1] = true;
                    }
                }
            }
        }

        hit_table.iter().flatten().filter(|&&hit| hit).count() as u8
    }

    /// The point exactly `distance` steps behind track point `id` along
    /// `side`'s direction of travel.
    ///
    /// Stepping one past the end of the track lands in a jail (Player2's jail
    /// for Player1, Player1's jail for Player2); anything further, and any
    /// home or jail input, has no previous point.
    pub fn previous_point(&self, id: PointId, side: PlayerId, distance: u8) -> Option<&Point> {
        let idx = id.track_index()? as isize;
        let distance = isize::from(distance);

        match side {
            PlayerId::Player1 => {
                let prev = idx + distance;
                if prev < TRACK_LEN as isize {
                    PointId::track(prev as usize).map(|p| self.point(p))
                } else if prev == TRACK_LEN as isize {
                    Some(self.point(PointId::JailP2))
                } else {
                    None
                }
            }
            PlayerId::Player2 => {
                let prev = idx - distance;
                if prev >= 0 {
                    PointId::track(prev as usize).map(|p| self.point(p))
                } else if prev == -1 {
                    Some(self.point(PointId::JailP1))
                } else {
                    None
                }
            }
            PlayerId::None => None,
        }
    }

    /// Neither side can hit the other any more: both jails are empty and
    /// every Player1 checker sits below every Player2 checker on the track.
    pub fn is_run_out(&self) -> bool {
        if self.point(PointId::JailP1).count > 0 || self.point(PointId::JailP2).count > 0 {
            return false;
        }

        let mut seen_player2 = false;
        for point in self.track() {
            match point.side {
                PlayerId::Player2 => seen_player2 = true,
                PlayerId::Player1 if seen_player2 => return false,
                _ => {}
            }
        }
        true
    }

    /// `side` has nothing in its outer table and nothing in jail
    pub fn can_bear_off(&self, side: PlayerId) -> bool {
        let (Some(outer), Some(jail)) = (self.outer_table(side), self.jail(side)) else {
            return false;
        };
        !outer.iter().any(|p| p.is_occupied_by(side)) && !jail.is_occupied_by(side)
    }
}

impl Default for BoardMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for point in &self.points {
            writeln!(f, "{point}")?;
        }
        Ok(())
    }
}
