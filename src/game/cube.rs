//! Doubling cube

use serde::{Deserialize, Serialize};

use crate::board::PlayerId;
use crate::error::RuleError;

/// Highest value the cube can show
pub const MAX_CUBE_VALUE: u32 = 64;

/// The doubling cube: a stake multiplier that changes hands on acceptance.
///
/// A centred cube (no owner) may be offered by either side; once accepted
/// only the accepting side may offer it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoublingCube {
    value: u32,
    owner: PlayerId,
    offered_to: PlayerId,
}

impl DoublingCube {
    pub fn new() -> Self {
        Self {
            value: 1,
            owner: PlayerId::None,
            offered_to: PlayerId::None,
        }
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Side allowed to offer next; `None` while centred
    #[inline]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Side that must answer a pending offer
    #[inline]
    pub fn offered_to(&self) -> PlayerId {
        self.offered_to
    }

    #[inline]
    pub fn is_offered(&self) -> bool {
        !self.offered_to.is_none()
    }

    /// Whether `side` may offer the cube as far as the cube itself is concerned
    pub fn can_offer(&self, side: PlayerId) -> bool {
        !side.is_none()
            && !self.is_offered()
            && (self.owner.is_none() || self.owner == side)
            && self.value < MAX_CUBE_VALUE
    }

    pub fn offer(&mut self, side: PlayerId) -> Result<(), RuleError> {
        if !self.can_offer(side) {
            return Err(RuleError::CubeUnavailable);
        }
        self.offered_to = side.opponent();
        Ok(())
    }

    /// Withdraw a pending offer
    pub fn cancel(&mut self) -> Result<(), RuleError> {
        if !self.is_offered() {
            return Err(RuleError::CubeUnavailable);
        }
        self.offered_to = PlayerId::None;
        Ok(())
    }

    /// Take the offer: the value doubles and the cube moves to the accepting side.
    pub fn accept(&mut self) -> Result<(), RuleError> {
        if !self.is_offered() {
            return Err(RuleError::CubeUnavailable);
        }
        self.value = (self.value * 2).min(MAX_CUBE_VALUE);
        self.owner = self.offered_to;
        self.offered_to = PlayerId::None;
        Ok(())
    }

    /// Refuse the offer and concede the game. Returns the offering side,
    /// which wins at the current value; the cube goes back to the centre.
    pub fn decline(&mut self) -> Result<PlayerId, RuleError> {
        if !self.is_offered() {
            return Err(RuleError::CubeUnavailable);
        }
        let winner = self.offered_to.opponent();
        self.reset();
        Ok(winner)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for DoublingCube {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_and_accept() {
        let mut cube = DoublingCube::new();
        assert_eq!(cube.value(), 1);
        assert!(cube.can_offer(PlayerId::Player1));
        assert!(cube.can_offer(PlayerId::Player2));

        cube.offer(PlayerId::Player1).unwrap();
        assert!(cube.is_offered());
        assert_eq!(cube.offered_to(), PlayerId::Player2);
        assert_eq!(cube.offer(PlayerId::Player2), Err(RuleError::CubeUnavailable));

        cube.accept().unwrap();
        assert_eq!(cube.value(), 2);
        assert_eq!(cube.owner(), PlayerId::Player2);
        assert!(!cube.is_offered());

        // Only the owner may redouble
        assert!(!cube.can_offer(PlayerId::Player1));
        assert!(cube.can_offer(PlayerId::Player2));
    }

    #[test]
    fn test_cancel_keeps_value() {
        let mut cube = DoublingCube::new();
        assert_eq!(cube.cancel(), Err(RuleError::CubeUnavailable));
        cube.offer(PlayerId::Player2).unwrap();
        cube.cancel().unwrap();
        assert_eq!(cube, DoublingCube::new());
    }

    #[test]
    fn test_decline_returns_offerer() {
        let mut cube = DoublingCube::new();
        cube.offer(PlayerId::Player1).unwrap();
        cube.accept().unwrap();
        cube.offer(PlayerId::Player2).unwrap();

        assert_eq!(cube.decline(), Ok(PlayerId::Player2));
        assert_eq!(cube.value(), 1);
        assert_eq!(cube.owner(), PlayerId::None);
        assert_eq!(cube.decline(), Err(RuleError::CubeUnavailable));
    }

    #[test]
    fn test_value_capped() {
        let mut cube = DoublingCube::new();
        let mut side = PlayerId::Player1;
        while cube.can_offer(side) {
            cube.offer(side).unwrap();
            cube.accept().unwrap();
            side = side.opponent();
        }
        assert_eq!(cube.value(), MAX_CUBE_VALUE);
        assert!(!cube.can_offer(PlayerId::Player1));
        assert!(!cube.can_offer(PlayerId::Player2));
        assert!(!cube.can_offer(PlayerId::None));
    }
}
