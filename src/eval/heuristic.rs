//! Static evaluation of a backgammon position
//!
//! The position is scored from one side's perspective, in one of three
//! phases:
//! - Run out: no more contact, so only racing progress counts and
//!   checkers left outside the inner table cost quadratically more the
//!   farther back they are.
//! - Bear off: every checker is home; borne-off checkers dominate and a
//!   blot is punished hard while the opponent sits in jail.
//! - Contact: made points and runs of consecutive made points are
//!   rewarded, own blots cost in proportion to their hit probability and
//!   opposing blots count against the opponent.
//!
//! Progress is the distance a checker has travelled (0 where it entered,
//! 23 next to home), so the weights read the same for both sides.

use crate::board::{BoardMap, PlayerId, TRACK_LEN};

use super::weights::{prime_bonus, squared, Weight};
use super::Evaluator;

/// Progress of the last outer-table point
const OUTER_END: usize = 17;
/// Progress of the first inner-table point
const INNER_START: usize = 18;
/// Progress values below this lie in the opponent's inner table
const FAR_END: usize = 6;

/// The built-in position scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultHeuristic;

impl Evaluator for DefaultHeuristic {
    fn evaluate(&self, board: &BoardMap, side: PlayerId) -> f64 {
        evaluate(board, side)
    }
}

/// Evaluate the board from the perspective of `side`.
///
/// Higher is better for `side`. `PlayerId::None` always scores 0.
#[must_use]
pub fn evaluate(board: &BoardMap, side: PlayerId) -> f64 {
    if side.is_none() {
        0.0
    } else if board.is_run_out() {
        run_out_score(board, side)
    } else if board.can_bear_off(side) {
        bear_off_score(board, side)
    } else {
        contact_score(board, side)
    }
}

fn borne_off_score(board: &BoardMap, side: PlayerId) -> f64 {
    let borne_off = board.home(side).map_or(0, |home| home.count());
    f64::from(borne_off) * Weight::BORNE_OFF
}

/// Squared lag of a checker at `progress` behind the inner table
#[inline]
fn lag(progress: usize) -> f64 {
    squared(Weight::LAG_OFFSET + OUTER_END - progress)
}

fn run_out_score(board: &BoardMap, side: PlayerId) -> f64 {
    let mut score = Weight::RUN_OUT_BASE + borne_off_score(board, side);

    for progress in (0..TRACK_LEN).rev() {
        let point = &board.track()[side.progress(progress)];
        if !point.is_occupied_by(side) {
            continue;
        }
        let count = f64::from(point.count());

        if progress >= INNER_START {
            score += count * squared(progress);
        } else if progress >= FAR_END {
            score -= Weight::OUTER_LAG * count * lag(progress);
        } else {
            score -= Weight::FAR_LAG * count * lag(progress);
        }
    }

    score
}

fn bear_off_score(board: &BoardMap, side: PlayerId) -> f64 {
    let mut score = Weight::BEAR_OFF_BASE + borne_off_score(board, side);
    let opponent_jailed = board
        .jail(side.opponent())
        .is_some_and(|jail| jail.count() > 0);

    for progress in (INNER_START..TRACK_LEN).rev() {
        let point = &board.track()[side.progress(progress)];
        if !point.is_occupied_by(side) {
            continue;
        }
        let count = f64::from(point.count());

        if point.count() == 1 && opponent_jailed {
            score -= Weight::EXPOSED_BEAR_OFF_BLOT * count * squared(progress);
        } else {
            score += count * squared(progress);
        }
    }

    score
}

fn contact_score(board: &BoardMap, side: PlayerId) -> f64 {
    let opponent = side.opponent();
    let mut score = 0.0;
    let mut run = 0u32;

    for progress in (0..TRACK_LEN).rev() {
        let idx = side.progress(progress);
        let point = &board.track()[idx];

        if point.is_occupied_by(side) {
            match point.count() {
                1 => {
                    let exposure = f64::from(board.vulnerability(point.id()));
                    score -= Weight::OWN_BLOT * squared(progress) * exposure;
                }
                2 => {
                    run += 1;
                    score += Weight::MADE_POINT * squared(progress);
                }
                _ => {
                    run += 1;
                    score += squared(progress);
                }
            }
        } else if point.is_occupied_by(opponent) && point.is_vulnerable() {
            score -= squared(opponent.progress(idx));
        }

        // A run ends on the first point we do not hold
        if !point.is_controlled_by(side) {
            score += prime_bonus(run);
            run = 0;
        }
    }

    score + borne_off_score(board, side)
}
