//! Match and money play
//!
//! A [`Session`] owns the authoritative board of the game in progress and
//! sequences it: the opening roll, alternating turns, the doubling cube,
//! scoring each finished game and deciding when the match is over.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{BoardMap, PlayerId, PointId};
use crate::config::GameConfig;
use crate::error::RuleError;
use crate::rules::{is_blocked_off, win_kind, DiceRoll, Move, WinKind};

use super::cube::DoublingCube;
use super::turn::Turn;

/// How a session is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Games continue until a side reaches the match score
    #[default]
    Match,
    /// A single game for the configured stake
    Money,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The winner bore off every checker
    BorneOff(WinKind),
    /// The loser refused a double
    CubeDeclined,
}

/// Outcome of one finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub winner: PlayerId,
    pub ending: Ending,
    /// Points credited to the winner
    pub points: u32,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    board: BoardMap,
    cube: DoublingCube,
    scores: [u32; 2],
    stakes: u32,
    current: PlayerId,
    turn: Option<Turn>,
    turn_number: u32,
    games_played: u32,
    crawford_game: bool,
    crawford_played: bool,
    result: Option<GameResult>,
}

/// Score slot of a side
fn slot(side: PlayerId) -> Option<usize> {
    match side {
        PlayerId::Player1 => Some(0),
        PlayerId::Player2 => Some(1),
        PlayerId::None => None,
    }
}

impl Session {
    /// New session with the first game set up, waiting for the opening roll
    pub fn new(config: GameConfig) -> Self {
        let mut session = Self {
            board: BoardMap::setup(config.variant),
            config,
            cube: DoublingCube::new(),
            scores: [0; 2],
            stakes: 1,
            current: PlayerId::None,
            turn: None,
            turn_number: 0,
            games_played: 0,
            crawford_game: false,
            crawford_played: false,
            result: None,
        };
        session.start_game();
        session
    }

    /// Resume a game from an existing position with `current` to roll.
    pub fn from_position(config: GameConfig, board: BoardMap, current: PlayerId) -> Self {
        let mut session = Self::new(config);
        session.board = board;
        session.current = current;
        session.turn_number = 1;
        session
    }

    fn start_game(&mut self) {
        if self.config.play_mode == PlayMode::Match && self.config.crawford_rule {
            if self.crawford_played {
                self.crawford_game = false;
            } else if self
                .scores
                .iter()
                .any(|&score| score + 1 == self.config.match_score)
            {
                self.crawford_game = true;
                self.crawford_played = true;
            }
        }

        self.board = BoardMap::setup(self.config.variant);
        self.cube.reset();
        self.stakes = match self.config.play_mode {
            PlayMode::Money => self.config.initial_stakes,
            PlayMode::Match => 1,
        };
        self.current = PlayerId::None;
        self.turn = None;
        self.turn_number = 0;
        self.result = None;

        info!(
            game = self.games_played + 1,
            variant = ?self.config.variant,
            crawford = self.crawford_game,
            "game started"
        );
    }

    /// Set up the next game of the match.
    pub fn next_game(&mut self) -> Result<(), RuleError> {
        if self.result.is_none() {
            return Err(RuleError::GameInProgress);
        }
        if self.is_match_over() {
            return Err(RuleError::GameOver);
        }
        self.start_game();
        Ok(())
    }

    /// Roll the opening until it decides who moves first.
    pub fn roll_opening<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Turn, RuleError> {
        loop {
            if self.open_with(DiceRoll::roll(rng))?.is_some() {
                return self.turn.as_ref().ok_or(RuleError::NoActiveTurn);
            }
        }
    }

    /// Resolve one opening roll; `roll1` is Player1's die, `roll2` Player2's.
    ///
    /// The higher die moves first and plays both dice as its first turn.
    /// A tie returns `None` and must be re-rolled; with the Murphy rule
    /// every tie doubles the stakes.
    pub fn open_with(&mut self, dice: DiceRoll) -> Result<Option<PlayerId>, RuleError> {
        if self.result.is_some() {
            return Err(RuleError::GameOver);
        }
        if self.turn_number > 0 || !self.current.is_none() {
            return Err(RuleError::TurnInProgress);
        }

        if dice.is_double() {
            if self.config.murphy_rule {
                self.stakes *= 2;
                info!(stakes = self.stakes, "tied opening roll doubles the stakes");
            }
            return Ok(None);
        }

        let first = if dice.roll1() > dice.roll2() {
            PlayerId::Player1
        } else {
            PlayerId::Player2
        };
        info!(side = ?first, %dice, "moves first");

        self.current = first;
        self.turn = Some(Turn::new(first, &self.board, dice));
        Ok(Some(first))
    }

    /// Roll for the side to move.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Turn, RuleError> {
        self.start_turn(DiceRoll::roll(rng))
    }

    /// Start the turn of the side to move with the given dice.
    pub fn start_turn(&mut self, dice: DiceRoll) -> Result<&Turn, RuleError> {
        if self.result.is_some() {
            return Err(RuleError::GameOver);
        }
        if self.current.is_none() {
            return Err(RuleError::NoActiveTurn);
        }
        if self.turn.is_some() {
            return Err(RuleError::TurnInProgress);
        }
        if self.cube.is_offered() {
            return Err(RuleError::CubeUnavailable);
        }

        let turn = Turn::new(self.current, &self.board, dice);
        info!(
            side = ?self.current,
            turn = self.turn_number,
            %dice,
            moves = turn.options().len(),
            "turn started"
        );
        Ok(self.turn.insert(turn))
    }

    /// Pass without rolling when the side to move is jailed behind a
    /// closed board. Returns whether the turn was passed.
    pub fn skip_if_blocked_off(&mut self) -> bool {
        if self.result.is_some() || self.turn.is_some() || !is_blocked_off(&self.board, self.current) {
            return false;
        }
        info!(side = ?self.current, "blocked off, turn passes");
        self.advance();
        true
    }

    pub fn play(&mut self, start: PointId, end: PointId) -> Result<Move, RuleError> {
        self.ensure_running()?;
        let turn = self.turn.as_mut().ok_or(RuleError::NoActiveTurn)?;
        let mv = turn.play(&mut self.board, start, end)?;
        self.check_for_win();
        Ok(mv)
    }

    /// Play a move picked from the current options (the AI path).
    pub fn play_move(&mut self, mv: Move) -> Result<(), RuleError> {
        self.ensure_running()?;
        let turn = self.turn.as_mut().ok_or(RuleError::NoActiveTurn)?;
        turn.play_move(&mut self.board, mv)?;
        self.check_for_win();
        Ok(())
    }

    pub fn undo(&mut self) -> Result<Move, RuleError> {
        self.ensure_running()?;
        let turn = self.turn.as_mut().ok_or(RuleError::NoActiveTurn)?;
        turn.undo(&mut self.board)
    }

    /// Apply the moves of a remote turn, all or nothing.
    pub fn apply_relayed(&mut self, relayed: &[(PointId, PointId)]) -> Result<(), RuleError> {
        self.ensure_running()?;
        let turn = self.turn.as_mut().ok_or(RuleError::NoActiveTurn)?;
        turn.apply_relayed(&mut self.board, relayed)?;
        self.check_for_win();
        Ok(())
    }

    /// Hand the dice to the opponent once no legal move remains.
    pub fn end_turn(&mut self) -> Result<(), RuleError> {
        self.ensure_running()?;
        let turn = self.turn.as_ref().ok_or(RuleError::NoActiveTurn)?;
        if !turn.is_over() {
            return Err(RuleError::TurnInProgress);
        }
        info!(side = ?self.current, moves = turn.moves_made().len(), "turn ended");
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        self.turn = None;
        self.turn_number += 1;
        self.current = self.current.opponent();
    }

    fn ensure_running(&self) -> Result<(), RuleError> {
        if self.result.is_some() {
            Err(RuleError::GameOver)
        } else {
            Ok(())
        }
    }

    fn check_for_win(&mut self) {
        if let Some(kind) = win_kind(&self.board, self.current) {
            self.finish(self.current, Ending::BorneOff(kind), self.cube.value());
        }
    }

    fn finish(&mut self, winner: PlayerId, ending: Ending, cube_value: u32) {
        let multiplier = match ending {
            Ending::BorneOff(kind) => kind.multiplier(),
            Ending::CubeDeclined => 1,
        };
        let points = self.stakes * cube_value * multiplier;
        if let Some(slot) = slot(winner) {
            self.scores[slot] += points;
        }

        self.turn = None;
        self.games_played += 1;
        self.result = Some(GameResult {
            winner,
            ending,
            points,
        });
        info!(side = ?winner, ?ending, points, "game won");

        if let Some(champion) = self.match_winner() {
            info!(side = ?champion, p1 = self.scores[0], p2 = self.scores[1], "match won");
        }
    }

    /// Whether the side to move may offer the cube now: before rolling,
    /// after the opening turn, outside a Crawford game and only between
    /// two human players.
    pub fn can_offer_cube(&self) -> bool {
        self.result.is_none()
            && self.turn.is_none()
            && self.turn_number > 0
            && !self.crawford_game
            && !self.config.has_ai()
            && self.cube.can_offer(self.current)
    }

    pub fn offer_cube(&mut self) -> Result<(), RuleError> {
        if !self.can_offer_cube() {
            return Err(RuleError::CubeUnavailable);
        }
        self.cube.offer(self.current)?;
        info!(side = ?self.current, value = self.cube.value() * 2, "double offered");
        Ok(())
    }

    pub fn cancel_cube_offer(&mut self) -> Result<(), RuleError> {
        self.cube.cancel()
    }

    pub fn accept_cube(&mut self) -> Result<(), RuleError> {
        self.cube.accept()?;
        info!(owner = ?self.cube.owner(), value = self.cube.value(), "double accepted");
        Ok(())
    }

    /// Refuse the double: the offering side wins at the current value.
    pub fn decline_cube(&mut self) -> Result<GameResult, RuleError> {
        let value = self.cube.value();
        let winner = self.cube.decline()?;
        self.finish(winner, Ending::CubeDeclined, value);
        self.result.ok_or(RuleError::GameInProgress)
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The authoritative board
    #[inline]
    pub fn board(&self) -> &BoardMap {
        &self.board
    }

    #[inline]
    pub fn cube(&self) -> &DoublingCube {
        &self.cube
    }

    pub fn score(&self, side: PlayerId) -> u32 {
        slot(side).map_or(0, |slot| self.scores[slot])
    }

    /// Base stake of the current game, before the cube
    #[inline]
    pub fn stakes(&self) -> u32 {
        self.stakes
    }

    /// Side to move, `None` before the opening roll
    #[inline]
    pub fn current(&self) -> PlayerId {
        self.current
    }

    #[inline]
    pub fn turn(&self) -> Option<&Turn> {
        self.turn.as_ref()
    }

    #[inline]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[inline]
    pub fn is_first_turn(&self) -> bool {
        self.turn_number == 0
    }

    #[inline]
    pub fn is_crawford_game(&self) -> bool {
        self.crawford_game
    }

    #[inline]
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Result of the game just finished
    #[inline]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.current.is_none() && self.current == self.config.ai_side
    }

    pub fn is_match_over(&self) -> bool {
        self.match_winner().is_some()
    }

    pub fn match_winner(&self) -> Option<PlayerId> {
        let result = self.result.as_ref()?;
        match self.config.play_mode {
            PlayMode::Money => Some(result.winner),
            PlayMode::Match => [PlayerId::Player1, PlayerId::Player2]
                .into_iter()
                .find(|&side| self.score(side) >= self.config.match_score),
        }
    }
}
