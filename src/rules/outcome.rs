//! Game completion and scoring

use serde::{Deserialize, Serialize};

use crate::board::{BoardMap, PlayerId};

/// How a finished game was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    Single,
    /// Loser has not borne off a checker
    Gammon,
    /// Loser is still jailed or inside the winner's inner table
    Backgammon,
}

impl WinKind {
    /// Stake multiplier for this kind of win
    #[inline]
    pub fn multiplier(self) -> u32 {
        match self {
            WinKind::Single => 1,
            WinKind::Gammon => 2,
            WinKind::Backgammon => 3,
        }
    }
}

/// Every checker of `side` has been borne off
pub fn is_complete(board: &BoardMap, side: PlayerId) -> bool {
    let Some(home) = board.home(side) else {
        return false;
    };
    home.is_occupied_by(side) && u32::from(home.count()) == board.checker_count(side)
}

/// At least one checker of `side` has been borne off
pub fn has_borne_off(board: &BoardMap, side: PlayerId) -> bool {
    board.home(side).is_some_and(|home| home.is_occupied_by(side))
}

pub fn is_jailed(board: &BoardMap, side: PlayerId) -> bool {
    board.jail(side).is_some_and(|jail| jail.is_occupied_by(side))
}

/// `side` still has a checker in the opponent's inner table
pub fn is_in_opponent_inner_table(board: &BoardMap, side: PlayerId) -> bool {
    board
        .inner_table(side.opponent())
        .is_some_and(|inner| inner.iter().any(|p| p.is_occupied_by(side)))
}

/// `side` is jailed and every entry point is closed to it
pub fn is_blocked_off(board: &BoardMap, side: PlayerId) -> bool {
    is_jailed(board, side)
        && board
            .inner_table(side.opponent())
            .is_some_and(|inner| inner.iter().all(|p| p.is_blocking(side)))
}

/// Kind of win for `winner`, or `None` while the game is still running.
pub fn win_kind(board: &BoardMap, winner: PlayerId) -> Option<WinKind> {
    if !is_complete(board, winner) {
        return None;
    }

    let loser = winner.opponent();
    let kind = if is_jailed(board, loser) || is_in_opponent_inner_table(board, loser) {
        WinKind::Backgammon
    } else if !has_borne_off(board, loser) {
        WinKind::Gammon
    } else {
        WinKind::Single
    };
    Some(kind)
}
