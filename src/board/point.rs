//! A single board location with its checker stack

use std::fmt;

use super::{PlayerId, PointId, JAIL_PIP, TRACK_LEN};
use crate::error::RuleError;

/// One location on the board: a track point, a home or a jail.
///
/// Invariant: `count == 0` exactly when `side == PlayerId::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    id: PointId,
    pub(crate) side: PlayerId,
    pub(crate) count: u8,
}

impl Point {
    pub const fn new(id: PointId) -> Self {
        Self {
            id,
            side: PlayerId::None,
            count: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Side occupying the point (`None` when empty)
    #[inline]
    pub fn side(&self) -> PlayerId {
        self.side
    }

    #[inline]
    pub fn count(&self) -> u8 {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Overwrite occupancy. Rejects a side without checkers and checkers
    /// without a side; the count itself is not bounded.
    pub fn set(&mut self, side: PlayerId, count: u8) -> Result<(), RuleError> {
        if side.is_none() != (count == 0) {
            return Err(RuleError::InconsistentPoint { side, count });
        }
        self.side = side;
        self.count = count;
        Ok(())
    }

    /// A single checker that can be hit
    #[inline]
    pub fn is_vulnerable(&self) -> bool {
        self.count == 1
    }

    /// Whether an incoming checker of `side` cannot land here
    #[inline]
    pub fn is_blocking(&self, side: PlayerId) -> bool {
        !side.is_none() && self.count >= 2 && self.side != side
    }

    #[inline]
    pub fn is_controlled_by(&self, side: PlayerId) -> bool {
        !side.is_none() && self.count >= 2 && self.side == side
    }

    #[inline]
    pub fn is_occupied_by(&self, side: PlayerId) -> bool {
        !side.is_none() && self.count >= 1 && self.side == side
    }

    /// Remaining distance to bear off every checker `side` has here
    pub fn pip(&self, side: PlayerId) -> u32 {
        if side.is_none() || self.side != side {
            return 0;
        }

        let count = u32::from(self.count);
        if self.id.is_home() {
            0
        } else if self.id.is_jail() {
            count * JAIL_PIP
        } else {
            let idx = self.id.index();
            let distance = match side {
                PlayerId::Player1 => idx + 1,
                _ => TRACK_LEN - idx,
            };
            count * distance as u32
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{},{:?}", self.id, self.count, self.side)
    }
}
