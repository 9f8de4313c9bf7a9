//! Single checker moves

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Point, PointId};

/// One checker moving from `start` to `end` with die `die`.
///
/// Built from the board as it is before the move; `is_hit` records whether
/// the destination held a lone opposing checker at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    start: PointId,
    end: PointId,
    die: u8,
    is_hit: bool,
}

impl Move {
    pub fn new(start: &Point, end: &Point, die: u8) -> Self {
        Self {
            start: start.id(),
            end: end.id(),
            die,
            is_hit: start.side() != end.side() && end.count() == 1,
        }
    }

    #[inline]
    pub fn start(&self) -> PointId {
        self.start
    }

    #[inline]
    pub fn end(&self) -> PointId {
        self.end
    }

    /// Die value consumed by the move
    #[inline]
    pub fn die(&self) -> u8 {
        self.die
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.is_hit
    }

    /// Entering from jail
    #[inline]
    pub fn is_entry(&self) -> bool {
        self.start.is_jail()
    }

    #[inline]
    pub fn is_bear_off(&self) -> bool {
        self.end.is_home()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}=>{:?}: {}]", self.start, self.end, self.die)?;
        if self.is_hit {
            write!(f, "*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PlayerId;

    #[test]
    fn test_hit_flag() {
        let mut from = Point::new(PointId::Point8);
        from.set(PlayerId::Player1, 2).unwrap();
        let mut to = Point::new(PointId::Point5);
        to.set(PlayerId::Player2, 1).unwrap();
        assert!(Move::new(&from, &to, 3).is_hit());

        to.set(PlayerId::Player1, 1).unwrap();
        assert!(!Move::new(&from, &to, 3).is_hit());

        to.set(PlayerId::None, 0).unwrap();
        assert!(!Move::new(&from, &to, 3).is_hit());
    }

    #[test]
    fn test_entry_and_bear_off() {
        let jail = Point::new(PointId::JailP1);
        let target = Point::new(PointId::Point22);
        let entry = Move::new(&jail, &target, 3);
        assert!(entry.is_entry());
        assert!(!entry.is_bear_off());

        let home = Point::new(PointId::HomeP1);
        let bear = Move::new(&Point::new(PointId::Point2), &home, 2);
        assert!(bear.is_bear_off());
        assert_eq!(bear.to_string(), "[Point2=>HomeP1: 2]");
    }
}
