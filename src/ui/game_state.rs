//! Game state management for the backgammon GUI
//!
//! Wraps a [`Session`] with what the front end needs on top of it: the
//! checker the player picked up, the AI running on a worker thread and
//! the queue of AI moves replayed one at a time.

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::board::{PlayerId, PointId};
use crate::config::GameConfig;
use crate::engine::{AiPlayer, SearchResult};
use crate::game::Session;
use crate::rules::Move;

use super::board_view::Highlights;

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<SearchResult>,
        start_time: Instant,
    },
    /// Replaying the chosen sequence with a pause between moves
    Playing { queue: VecDeque<Move>, next_at: Instant },
}

/// Main game state
pub struct PlayState {
    pub session: Session,
    pub selected: Option<PointId>,
    pub last_ai_result: Option<SearchResult>,
    pub ai_state: AiState,
    pub ai_thinking_time: Option<Duration>,
    pub message: Option<String>,
}

impl PlayState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            session: Session::new(config),
            selected: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            ai_thinking_time: None,
            message: None,
        }
    }

    /// Start over with the same configuration
    pub fn reset(&mut self) {
        *self = Self::new(self.session.config().clone());
    }

    fn report(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        warn!(%msg, "action rejected");
        self.message = Some(msg);
    }

    /// Check if the human may act now
    pub fn is_human_turn(&self) -> bool {
        self.session.result().is_none() && !self.session.is_ai_turn() && !self.is_ai_busy()
    }

    /// Check if AI is thinking or replaying its moves
    pub fn is_ai_busy(&self) -> bool {
        !matches!(self.ai_state, AiState::Idle)
    }

    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            _ => None,
        }
    }

    /// Whether the opening roll is still to be made
    pub fn awaiting_opening(&self) -> bool {
        self.session.result().is_none() && self.session.current().is_none()
    }

    /// Whether the side to move has yet to roll
    pub fn can_roll(&self) -> bool {
        self.awaiting_opening()
            || (self.is_human_turn() && self.session.turn().is_none() && !self.session.cube().is_offered())
    }

    /// Roll the opening or the human's dice; passes at once if nothing can move.
    pub fn roll(&mut self) {
        if !self.can_roll() {
            return;
        }
        let mut rng = rand::rng();
        self.message = None;

        if self.awaiting_opening() {
            if let Err(err) = self.session.roll_opening(&mut rng) {
                self.report(err.to_string());
            }
            return;
        }

        if self.session.skip_if_blocked_off() {
            self.message = Some("Blocked off, turn passes".to_string());
            return;
        }
        let rolled = self
            .session
            .roll(&mut rng)
            .map(|turn| turn.is_over().then(|| *turn.dice()));
        match rolled {
            Ok(Some(dice)) => {
                self.message = Some(format!("No legal move for {dice}"));
                if let Err(err) = self.session.end_turn() {
                    self.report(err.to_string());
                }
            }
            Ok(None) => {}
            Err(err) => self.report(err.to_string()),
        }
    }

    /// Handle a click on the board: pick up a checker, then drop it.
    pub fn click(&mut self, id: PointId) {
        if !self.is_human_turn() {
            return;
        }
        let Some(turn) = self.session.turn() else {
            return;
        };
        let options = turn.options();
        let playable = self.selected.filter(|&start| options.has_move(start, id));
        let can_pick = options.can_move_from(id);

        if let Some(start) = playable {
            self.selected = None;
            match self.session.play(start, id) {
                Ok(_) => self.message = None,
                Err(err) => self.report(err.to_string()),
            }
        } else if can_pick && self.selected != Some(id) {
            self.selected = Some(id);
        } else {
            self.selected = None;
        }
    }

    pub fn undo(&mut self) {
        if !self.is_human_turn() {
            return;
        }
        self.selected = None;
        if let Err(err) = self.session.undo() {
            self.report(err.to_string());
        }
    }

    pub fn can_end_turn(&self) -> bool {
        self.is_human_turn() && self.session.turn().is_some_and(|turn| turn.is_over())
    }

    pub fn end_turn(&mut self) {
        if !self.can_end_turn() {
            return;
        }
        self.selected = None;
        if let Err(err) = self.session.end_turn() {
            self.report(err.to_string());
        }
    }

    pub fn offer_cube(&mut self) {
        if let Err(err) = self.session.offer_cube() {
            self.report(err.to_string());
        }
    }

    pub fn answer_cube(&mut self, accept: bool) {
        let answer = if accept {
            self.session.accept_cube()
        } else {
            self.session.decline_cube().map(|_| ())
        };
        if let Err(err) = answer {
            self.report(err.to_string());
        }
    }

    pub fn cancel_cube(&mut self) {
        if let Err(err) = self.session.cancel_cube_offer() {
            self.report(err.to_string());
        }
    }

    pub fn next_game(&mut self) {
        self.selected = None;
        if let Err(err) = self.session.next_game() {
            self.report(err.to_string());
        }
    }

    /// What the board should mark for the current frame
    pub fn highlights(&self) -> Highlights {
        let interactive = self.is_human_turn();
        let Some(turn) = self.session.turn().filter(|_| interactive) else {
            return Highlights::default();
        };
        let options = turn.options();

        let mut movable: Vec<PointId> = options.iter().map(|mv| mv.start()).collect();
        movable.sort();
        movable.dedup();

        Highlights {
            selected: self.selected,
            destinations: self
                .selected
                .map(|start| options.destinations_from(start))
                .unwrap_or_default(),
            movable,
            interactive,
        }
    }

    /// Drive the computer side: roll, search on a worker thread, then
    /// replay the chosen moves one by one.
    pub fn update_ai(&mut self) {
        if self.session.result().is_some() || !self.session.is_ai_turn() {
            self.ai_state = AiState::Idle;
            return;
        }
        let delay = Duration::from_millis(self.session.config().move_delay_ms);

        if matches!(self.ai_state, AiState::Idle) {
            self.start_ai_turn();
            return;
        }

        if let AiState::Thinking { receiver, start_time } = &self.ai_state {
            let received = receiver.try_recv();
            let elapsed = start_time.elapsed();
            match received {
                Ok(result) => {
                    self.ai_thinking_time = Some(elapsed);
                    self.ai_state = AiState::Playing {
                        queue: result.moves.iter().copied().collect(),
                        next_at: Instant::now() + delay,
                    };
                    self.last_ai_result = Some(result);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.report("AI error");
                }
            }
            return;
        }

        let next = match &mut self.ai_state {
            AiState::Playing { queue, next_at } => {
                if Instant::now() < *next_at {
                    return;
                }
                *next_at = Instant::now() + delay;
                queue.pop_front()
            }
            _ => return,
        };

        match next {
            Some(mv) => {
                if let Err(err) = self.session.play_move(mv) {
                    self.ai_state = AiState::Idle;
                    self.report(format!("AI move {mv} rejected: {err}"));
                }
            }
            None => {
                self.ai_state = AiState::Idle;
                if let Err(err) = self.session.end_turn() {
                    self.report(err.to_string());
                }
            }
        }
    }

    /// Roll for the AI if needed and hand the search to a worker thread.
    fn start_ai_turn(&mut self) {
        if self.session.turn().is_none() {
            if self.session.skip_if_blocked_off() {
                return;
            }
            if let Err(err) = self.session.roll(&mut rand::rng()) {
                self.report(err.to_string());
                return;
            }
        }

        let Some(turn) = self.session.turn() else {
            return;
        };
        if turn.is_over() {
            if let Err(err) = self.session.end_turn() {
                self.report(err.to_string());
            }
            return;
        }

        let board = self.session.board().clone();
        let options = turn.options().clone();
        let dice = *turn.dice();

        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = AiPlayer::new().select_with_stats(&board, &options, &dice);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Label of a side for the panels
    pub fn side_name(&self, side: PlayerId) -> &'static str {
        match (side, side == self.session.config().ai_side) {
            (PlayerId::None, _) => "-",
            (PlayerId::Player1, true) => "WHITE (AI)",
            (PlayerId::Player1, false) => "WHITE",
            (PlayerId::Player2, true) => "BLACK (AI)",
            (PlayerId::Player2, false) => "BLACK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DiceRoll;

    fn hotseat() -> PlayState {
        PlayState::new(GameConfig {
            ai_side: PlayerId::None,
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_click_selects_then_moves() {
        let mut state = hotseat();
        state.session.open_with(DiceRoll::new(3, 1)).unwrap();

        state.click(PointId::Point7);
        assert_eq!(state.selected, None);

        state.click(PointId::Point8);
        assert_eq!(state.selected, Some(PointId::Point8));
        assert!(state.highlights().destinations.contains(&PointId::Point5));

        state.click(PointId::Point5);
        assert_eq!(state.selected, None);
        assert_eq!(state.session.board().point(PointId::Point5).count(), 1);

        state.click(PointId::Point6);
        state.click(PointId::Point5);
        assert!(state.can_end_turn());
        state.end_turn();
        assert_eq!(state.session.current(), PlayerId::Player2);
        assert!(state.can_roll());
    }

    #[test]
    fn test_clicking_selection_again_drops_it() {
        let mut state = hotseat();
        state.session.open_with(DiceRoll::new(6, 5)).unwrap();
        state.click(PointId::Point24);
        state.click(PointId::Point24);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_ai_plays_its_opening_turn() {
        let mut state = PlayState::new(GameConfig {
            move_delay_ms: 0,
            ..GameConfig::default()
        });
        // Player2 is the AI and wins the opening
        state.session.open_with(DiceRoll::new(1, 6)).unwrap();
        assert!(!state.is_human_turn());
        assert!(state.highlights().movable.is_empty());

        for _ in 0..1000 {
            state.update_ai();
            if state.session.current() == PlayerId::Player1 {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(state.session.current(), PlayerId::Player1);
        assert_eq!(state.last_ai_result.as_ref().map(|r| r.moves.len()), Some(2));
        assert!(state.is_human_turn());
        assert!(state.message.is_none());
    }
}
