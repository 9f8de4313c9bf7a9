//! Dice roll bookkeeping for one turn

use std::fmt;

use rand::Rng;

use super::Move;
use crate::error::RuleError;

/// How many times each face may still be played this turn.
///
/// Doubles give four uses of the rolled face, otherwise each of the two
/// faces may be used once. Index 0 of the tables is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceRoll {
    roll1: u8,
    roll2: u8,
    total: [u8; 7],
    left: [u8; 7],
}

impl DiceRoll {
    /// Create a roll from two faces in 1..=6
    #[inline]
    pub fn new(roll1: u8, roll2: u8) -> Self {
        debug_assert!((1..=6).contains(&roll1) && (1..=6).contains(&roll2));
        let mut total = [0u8; 7];
        if roll1 == roll2 {
            total[usize::from(roll1)] = 4;
        } else {
            total[usize::from(roll1)] = 1;
            total[usize::from(roll2)] = 1;
        }
        Self {
            roll1,
            roll2,
            total,
            left: total,
        }
    }

    /// Create a roll from faces of unknown provenance
    pub fn try_new(roll1: u8, roll2: u8) -> Result<Self, RuleError> {
        for face in [roll1, roll2] {
            if !(1..=6).contains(&face) {
                return Err(RuleError::InvalidFace(face));
            }
        }
        Ok(Self::new(roll1, roll2))
    }

    /// Roll two fair dice
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.random_range(1..=6), rng.random_range(1..=6))
    }

    #[inline]
    pub fn roll1(&self) -> u8 {
        self.roll1
    }

    #[inline]
    pub fn roll2(&self) -> u8 {
        self.roll2
    }

    #[inline]
    pub fn is_double(&self) -> bool {
        self.roll1 == self.roll2
    }

    #[inline]
    fn in_range(face: u8) -> bool {
        (1..=6).contains(&face)
    }

    /// Whether `face` has a use left
    #[inline]
    pub fn can_use(&self, face: u8) -> bool {
        Self::in_range(face) && self.left[usize::from(face)] > 0
    }

    /// Remaining uses of `face`
    #[inline]
    pub fn remaining(&self, face: u8) -> u8 {
        if Self::in_range(face) {
            self.left[usize::from(face)]
        } else {
            0
        }
    }

    /// Uses of `face` granted by this roll
    #[inline]
    pub fn total(&self, face: u8) -> u8 {
        if Self::in_range(face) {
            self.total[usize::from(face)]
        } else {
            0
        }
    }

    /// Consume one use of `face`
    pub fn use_face(&mut self, face: u8) -> Result<(), RuleError> {
        if !Self::in_range(face) {
            return Err(RuleError::InvalidFace(face));
        }
        if !self.can_use(face) {
            return Err(RuleError::DieUnavailable(face));
        }
        self.left[usize::from(face)] -= 1;
        Ok(())
    }

    /// Give back one use of `face`
    pub fn restore_face(&mut self, face: u8) -> Result<(), RuleError> {
        if !Self::in_range(face) {
            return Err(RuleError::InvalidFace(face));
        }
        let idx = usize::from(face);
        if self.left[idx] >= self.total[idx] {
            return Err(RuleError::DieAtCapacity(face));
        }
        self.left[idx] += 1;
        Ok(())
    }

    #[inline]
    pub fn use_move(&mut self, mv: &Move) -> Result<(), RuleError> {
        self.use_face(mv.die())
    }

    #[inline]
    pub fn restore_move(&mut self, mv: &Move) -> Result<(), RuleError> {
        self.restore_face(mv.die())
    }

    /// Any face played this turn
    pub fn has_used_rolls(&self) -> bool {
        self.left.iter().zip(&self.total).any(|(left, total)| left < total)
    }

    /// Every use consumed
    pub fn is_exhausted(&self) -> bool {
        self.left.iter().all(|&left| left == 0)
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Roll1={}, Roll2={}, Total={:?}, Left={:?}",
            self.roll1,
            self.roll2,
            &self.total[1..],
            &self.left[1..]
        )
    }
}
