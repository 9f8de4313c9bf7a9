//! Main application for the backgammon GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use crate::board::PlayerId;
use crate::config::GameConfig;
use crate::game::{Ending, GameResult, PlayMode};
use crate::rules::WinKind;
use super::board_view::BoardView;
use super::game_state::PlayState;
use super::theme::*;

/// Main backgammon application
pub struct BackgammonApp {
    state: PlayState,
    board_view: BoardView,
    /// Configuration loaded at start-up, the base of every new game
    config: GameConfig,
    show_debug: bool,
}

impl BackgammonApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: GameConfig) -> Self {
        Self {
            state: PlayState::new(config.clone()),
            board_view: BoardView::default(),
            config,
            show_debug: true,
        }
    }

    fn start(&mut self, play_mode: PlayMode, ai_side: PlayerId) {
        self.state = PlayState::new(GameConfig {
            play_mode,
            ai_side,
            ..self.config.clone()
        });
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Match (vs AI)").clicked() {
                        self.start(PlayMode::Match, PlayerId::Player2);
                        ui.close_menu();
                    }
                    if ui.button("New Money Game (vs AI)").clicked() {
                        self.start(PlayMode::Money, PlayerId::Player2);
                        ui.close_menu();
                    }
                    if ui.button("New Match (Hotseat)").clicked() {
                        self.start(PlayMode::Match, PlayerId::None);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let config = self.state.session.config();
                    let mode_text = match (config.play_mode, config.has_ai()) {
                        (PlayMode::Match, true) => format!("Match to {} - vs AI", config.match_score),
                        (PlayMode::Match, false) => format!("Match to {} - Hotseat", config.match_score),
                        (PlayMode::Money, true) => "Money - vs AI".to_string(),
                        (PlayMode::Money, false) => "Money - Hotseat".to_string(),
                    };
                    ui.label(format!("{mode_text} - {:?}", config.variant));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);

                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_score_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.session.result().copied() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &result);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    /// Clickable label styled as a button
    fn action_button(ui: &mut egui::Ui, text: &str, enabled: bool) -> bool {
        let color = if enabled { TEXT_PRIMARY } else { TEXT_MUTED };
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                let label = egui::Label::new(RichText::new(text).size(12.0).color(color));
                enabled && ui.add(label.sense(egui::Sense::click())).clicked()
            })
            .inner
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("BACKGAMMON").size(22.0).strong().color(TEXT_PRIMARY));
        });
    }

    /// Render turn indicator card with the dice
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        let session = &self.state.session;
        let side = session.current();

        Self::card_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                let (fill, rim) = match side {
                    PlayerId::Player1 => (P1_CHECKER, P1_CHECKER_RIM),
                    PlayerId::Player2 => (P2_CHECKER, P2_CHECKER_RIM),
                    PlayerId::None => (BUTTON_BG, TEXT_MUTED),
                };
                ui.painter().circle_filled(rect.center(), 20.0, fill);
                ui.painter().circle_stroke(rect.center(), 15.0, egui::Stroke::new(2.0, rim));

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    let title = if side.is_none() { "OPENING" } else { self.state.side_name(side) };
                    ui.label(RichText::new(title).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...", STATUS_WAIT)
                    } else if self.state.is_ai_busy() {
                        ("AI moving...", STATUS_WAIT)
                    } else if session.result().is_some() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else if session.cube().is_offered() {
                        ("Double offered", STATUS_WAIT)
                    } else if self.state.can_roll() {
                        ("Roll the dice", STATUS_OK)
                    } else {
                        ("Move a checker", STATUS_OK)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });

            if let Some(turn) = session.turn() {
                ui.add_space(8.0);
                let dice = turn.dice();
                let faces: Vec<u8> = if dice.is_double() {
                    vec![dice.roll1(); 4]
                } else {
                    vec![dice.roll1(), dice.roll2()]
                };
                // Faces already played are dimmed
                let mut unused = [dice.remaining(dice.roll1()), dice.remaining(dice.roll2())];
                ui.horizontal(|ui| {
                    for face in faces {
                        let slot = usize::from(face != dice.roll1());
                        let color = if unused[slot] > 0 {
                            unused[slot] -= 1;
                            TEXT_PRIMARY
                        } else {
                            TEXT_MUTED
                        };
                        ui.label(RichText::new(format!("[{face}]")).size(20.0).strong().color(color));
                    }
                });
            }
        });
    }

    /// Render pips, score and cube
    fn render_score_card(&self, ui: &mut egui::Ui) {
        let session = &self.state.session;
        let config = session.config();

        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SCORE").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            for side in [PlayerId::Player1, PlayerId::Player2] {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(self.state.side_name(side)).size(13.0).color(TEXT_PRIMARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(session.score(side).to_string())
                                .size(16.0)
                                .strong()
                                .color(TEXT_PRIMARY),
                        );
                        ui.label(
                            RichText::new(format!("{} pips", session.board().pip_count(side)))
                                .size(10.0)
                                .color(TEXT_SECONDARY),
                        );
                    });
                });
                ui.add_space(4.0);
            }

            ui.add_space(4.0);
            let cube = session.cube();
            let owner = if cube.owner().is_none() { "centre" } else { self.state.side_name(cube.owner()) };
            ui.label(
                RichText::new(format!("Cube {} ({owner})  Stakes {}", cube.value(), session.stakes()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );

            let mut notes = Vec::new();
            if config.play_mode == PlayMode::Match {
                notes.push(format!("Game {}", session.games_played() + 1));
            }
            if session.is_crawford_game() {
                notes.push("Crawford game".to_string());
            }
            if !notes.is_empty() {
                ui.label(RichText::new(notes.join("  ")).size(10.0).color(TEXT_MUTED));
            }
        });
    }

    /// Render actions card
    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            let can_undo = self.state.is_human_turn()
                && self
                    .state
                    .session
                    .turn()
                    .is_some_and(|turn| !turn.moves_made().is_empty());

            ui.horizontal(|ui| {
                if Self::action_button(ui, "Roll", self.state.can_roll()) {
                    self.state.roll();
                }
                ui.add_space(4.0);
                if Self::action_button(ui, "Undo", can_undo) {
                    self.state.undo();
                }
                ui.add_space(4.0);
                if Self::action_button(ui, "End Turn", self.state.can_end_turn()) {
                    self.state.end_turn();
                }
            });

            ui.add_space(6.0);
            let cube = *self.state.session.cube();
            ui.horizontal(|ui| {
                if cube.is_offered() {
                    if Self::action_button(ui, "Accept", true) {
                        self.state.answer_cube(true);
                    }
                    ui.add_space(4.0);
                    if Self::action_button(ui, "Decline", true) {
                        self.state.answer_cube(false);
                    }
                    ui.add_space(4.0);
                    if Self::action_button(ui, "Cancel", true) {
                        self.state.cancel_cube();
                    }
                } else if Self::action_button(ui, "Double", self.state.session.can_offer_cube()) {
                    self.state.offer_cube();
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Turn #{}", self.state.session.turn_number()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    /// Render debug card
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                ui.label(
                    RichText::new(format!("{:.2}s", elapsed.as_secs_f32()))
                        .size(20.0)
                        .strong()
                        .color(STATUS_WAIT),
                );
            }

            let Some(result) = &self.state.last_ai_result else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
                return;
            };

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(format!("Score: {:.0}", result.score)).size(10.0).color(TEXT_SECONDARY));
                    ui.label(RichText::new(format!("{} leaves", result.leaves)).size(10.0).color(TEXT_MUTED));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                        ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                    });
                });
            });

            if let Some(time) = self.state.ai_thinking_time {
                ui.label(
                    RichText::new(format!("Last AI: {:.3}s", time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }

            ui.add_space(4.0);
            let sequence: Vec<String> = result.moves.iter().map(ToString::to_string).collect();
            let text = if sequence.is_empty() { "no move".to_string() } else { sequence.join(", ") };
            ui.label(RichText::new(text).size(11.0).strong().color(WIN_HIGHLIGHT));
        });
    }

    /// Render game over card
    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let how = match result.ending {
            Ending::BorneOff(WinKind::Single) => "single game",
            Ending::BorneOff(WinKind::Gammon) => "gammon",
            Ending::BorneOff(WinKind::Backgammon) => "backgammon",
            Ending::CubeDeclined => "declined double",
        };
        let session = &self.state.session;
        let match_winner = session.match_winner();
        let winner = self.state.side_name(result.winner);

        let mut next_game = false;
        let mut new_match = false;

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    let header = if match_winner.is_some() { "MATCH OVER" } else { "GAME OVER" };
                    ui.label(RichText::new(header).size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);

                    ui.label(RichText::new(winner).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new("WINS!").size(14.0).color(WIN_HIGHLIGHT));
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("{} point(s) by {how}", result.points))
                            .size(11.0)
                            .color(TEXT_SECONDARY),
                    );

                    ui.add_space(12.0);
                    if match_winner.is_some() {
                        new_match = Self::action_button(ui, "New Match", true);
                    } else {
                        next_game = Self::action_button(ui, "Next Game", true);
                    }
                });
            });

        if next_game {
            self.state.next_game();
        }
        if new_match {
            self.state.reset();
        }
    }

    /// Render status message card
    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let highlights = self.state.highlights();
            if let Some(id) = self.board_view.show(ui, self.state.session.board(), &highlights) {
                self.state.click(id);
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, roll, undo, end, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::E),
                i.key_pressed(egui::Key::N),
            )
        });

        if debug {
            self.show_debug = !self.show_debug;
        }
        if roll {
            self.state.roll();
        }
        if undo {
            self.state.undo();
        }
        if end {
            self.state.end_turn();
        }
        if new_game {
            self.state.reset();
        }
    }
}

impl eframe::App for BackgammonApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // Advance the computer side
        self.state.update_ai();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_busy() || self.state.session.is_ai_turn() {
            ctx.request_repaint();
        }
    }
}
