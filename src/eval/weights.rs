//! Scoring weights for backgammon position evaluation
//!
//! The race phases add a large base so reaching them scores above
//! ordinary contact positions.

/// Phase bases and per-checker weights
pub struct Weight;

impl Weight {
    // Phase bases
    /// Contact is over, pure race
    pub const RUN_OUT_BASE: f64 = 2_000_000.0;
    /// Everything is in the inner table
    pub const BEAR_OFF_BASE: f64 = 1_000_000.0;

    /// Per checker already borne off
    pub const BORNE_OFF: f64 = 10_000.0;

    // Race penalties for checkers still outside the inner table
    /// Checker in the outer table
    pub const OUTER_LAG: f64 = 10.0;
    /// Checker still in the opponent's inner table
    pub const FAR_LAG: f64 = 100.0;
    /// Offset added to the lag distance before squaring
    pub const LAG_OFFSET: usize = 24;

    /// Blot left while the opponent waits in jail
    pub const EXPOSED_BEAR_OFF_BLOT: f64 = 10_000.0;

    // Contact play
    /// Point held by exactly two checkers
    pub const MADE_POINT: f64 = 5.0;
    /// Own blot, scaled by its hit probability
    pub const OWN_BLOT: f64 = 10.0;
    /// Per squared extra point in a run of made points
    pub const PRIME: f64 = 1_000.0;
}

/// Bonus for a run of `length` consecutive made points.
///
/// A single made point earns nothing; longer runs grow quadratically.
#[inline]
pub fn prime_bonus(length: u32) -> f64 {
    if length > 1 {
        f64::from((length - 1).pow(2)) * Weight::PRIME
    } else {
        0.0
    }
}

/// Squared progress as a score
#[inline]
pub fn squared(progress: usize) -> f64 {
    (progress * progress) as f64
}
