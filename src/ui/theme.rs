//! Theme constants for the backgammon GUI

use egui::Color32;

// Board colors - felt and wood
pub const BOARD_BG: Color32 = Color32::from_rgb(34, 92, 62);
pub const BOARD_FRAME: Color32 = Color32::from_rgb(110, 70, 38);
pub const BAR_BG: Color32 = Color32::from_rgb(92, 58, 30);
pub const TRAY_BG: Color32 = Color32::from_rgb(70, 45, 24);
pub const POINT_LIGHT: Color32 = Color32::from_rgb(222, 196, 150);
pub const POINT_DARK: Color32 = Color32::from_rgb(150, 52, 40);

// Checker colors
pub const P1_CHECKER: Color32 = Color32::from_rgb(245, 240, 228);
pub const P1_CHECKER_RIM: Color32 = Color32::from_rgb(180, 170, 150);
pub const P2_CHECKER: Color32 = Color32::from_rgb(35, 32, 30);
pub const P2_CHECKER_RIM: Color32 = Color32::from_rgb(90, 85, 80);

// Markers
pub const SELECTED: Color32 = Color32::from_rgb(255, 210, 60);
pub const DESTINATION: Color32 = Color32::from_rgb(80, 220, 120);
pub const MOVABLE: Color32 = Color32::from_rgb(120, 170, 255);

pub fn shadow() -> Color32 {
    Color32::from_rgba_unmultiplied(0, 0, 0, 60)
}

pub fn destination_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 220, 120, 70)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const BUTTON_BG: Color32 = Color32::from_rgb(50, 53, 58);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Status colors
pub const STATUS_OK: Color32 = Color32::from_rgb(80, 200, 120);
pub const STATUS_WAIT: Color32 = Color32::from_rgb(255, 180, 50);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Sizes
pub const BOARD_MARGIN: f32 = 16.0;
/// Point columns, the bar and the bear-off tray
pub const BOARD_COLUMNS: f32 = 14.0;
pub const CHECKER_RADIUS_RATIO: f32 = 0.44;
/// Checkers drawn on a point before the rest collapse into a count
pub const MAX_DRAWN_STACK: u8 = 5;
pub const POINT_HEIGHT_RATIO: f32 = 0.42;
