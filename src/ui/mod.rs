//! egui front end: a 2-D board, side panel cards and the AI driver

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::BackgammonApp;
