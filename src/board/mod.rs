//! Board representation for backgammon

pub mod board_map;
pub mod point;


use serde::{Deserialize, Serialize};

// Re-exports
pub use board_map::{BoardMap, Variant};
pub use point::Point;

/// Number of track points (Point1..Point24)
pub const TRACK_LEN: usize = 24;
/// Track points plus both homes and both jails
pub const POINT_COUNT: usize = 28;
/// Checkers each side starts with
pub const CHECKERS_PER_SIDE: u8 = 15;
/// Pip value of a jailed checker
pub const JAIL_PIP: u32 = 25;

/// Side controlling a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum PlayerId {
    #[default]
    None,
    /// Moves from Point24 toward Point1 and bears off into HomeP1
    Player1,
    /// Moves from Point1 toward Point24 and bears off into HomeP2
    Player2,
}

impl PlayerId {
    /// Get the opposing side
    #[inline]
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
            PlayerId::None => PlayerId::None,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == PlayerId::None
    }

    /// How far a checker on track `index` has travelled for this side (0..=23).
    ///
    /// Player2 enters at index 0 and Player1 at index 23, so the value
    /// grows as the checker approaches its home.
    #[inline]
    pub fn progress(self, index: usize) -> usize {
        match self {
            PlayerId::Player1 => TRACK_LEN - 1 - index,
            _ => index,
        }
    }
}

/// The 28 locations of the board.
///
/// Point1..Point24 are ordered along the track; the homes and jails sit
/// outside that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PointId {
    Point1,
    Point2,
    Point3,
    Point4,
    Point5,
    Point6,
    Point7,
    Point8,
    Point9,
    Point10,
    Point11,
    Point12,
    Point13,
    Point14,
    Point15,
    Point16,
    Point17,
    Point18,
    Point19,
    Point20,
    Point21,
    Point22,
    Point23,
    Point24,
    HomeP1,
    HomeP2,
    JailP1,
    JailP2,
}

impl PointId {
    /// Every location, in index order
    pub const ALL: [PointId; POINT_COUNT] = [
        PointId::Point1,
        PointId::Point2,
        PointId::Point3,
        PointId::Point4,
        PointId::Point5,
        PointId::Point6,
        PointId::Point7,
        PointId::Point8,
        PointId::Point9,
        PointId::Point10,
        PointId::Point11,
        PointId::Point12,
        PointId::Point13,
        PointId::Point14,
        PointId::Point15,
        PointId::Point16,
        PointId::Point17,
        PointId::Point18,
        PointId::Point19,
        PointId::Point20,
        PointId::Point21,
        PointId::Point22,
        PointId::Point23,
        PointId::Point24,
        PointId::HomeP1,
        PointId::HomeP2,
        PointId::JailP1,
        PointId::JailP2,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Option<PointId> {
        Self::ALL.get(idx).copied()
    }

    /// Track point at 0-based `idx` (0 = Point1)
    #[inline]
    pub fn track(idx: usize) -> Option<PointId> {
        if idx < TRACK_LEN {
            Some(Self::ALL[idx])
        } else {
            None
        }
    }

    /// 0-based track index, `None` for homes and jails
    #[inline]
    pub fn track_index(self) -> Option<usize> {
        let idx = self.index();
        (idx < TRACK_LEN).then_some(idx)
    }

    #[inline]
    pub fn is_track(self) -> bool {
        self.index() < TRACK_LEN
    }

    #[inline]
    pub fn is_home(self) -> bool {
        matches!(self, PointId::HomeP1 | PointId::HomeP2)
    }

    #[inline]
    pub fn is_jail(self) -> bool {
        matches!(self, PointId::JailP1 | PointId::JailP2)
    }

    /// Home of `side`, `None` for `PlayerId::None`
    #[inline]
    pub fn home(side: PlayerId) -> Option<PointId> {
        match side {
            PlayerId::Player1 => Some(PointId::HomeP1),
            PlayerId::Player2 => Some(PointId::HomeP2),
            PlayerId::None => None,
        }
    }

    /// Jail holding the checkers of `side`
    #[inline]
    pub fn jail(side: PlayerId) -> Option<PointId> {
        match side {
            PlayerId::Player1 => Some(PointId::JailP1),
            PlayerId::Player2 => Some(PointId::JailP2),
            PlayerId::None => None,
        }
    }
}
