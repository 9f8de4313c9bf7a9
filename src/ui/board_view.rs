//! Board rendering for the backgammon GUI

use crate::board::{BoardMap, PlayerId, PointId, TRACK_LEN};
use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, Vec2};

use super::theme::*;

/// Column of the bar between the two halves
const BAR_COLUMN: usize = 6;
/// Column of the bear-off tray
const TRAY_COLUMN: usize = 13;

/// Points the board should mark this frame
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    pub selected: Option<PointId>,
    /// Legal destinations of the selected checker
    pub destinations: Vec<PointId>,
    /// Points holding a checker that can move
    pub movable: Vec<PointId>,
    /// Accept clicks
    pub interactive: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Area inside the frame
    inner: Rect,
    column_width: f32,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            inner: Rect::NOTHING,
            column_width: 40.0,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked location if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &BoardMap, highlights: &Highlights) -> Option<PointId> {
        let available = ui.available_size();
        let width = (available.x - 20.0).max(200.0);
        let height = (available.y - 20.0).min(width * 0.75).max(150.0);

        let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::click());

        self.inner = response.rect.shrink(BOARD_MARGIN);
        self.column_width = self.inner.width() / BOARD_COLUMNS;

        painter.rect_filled(response.rect, CornerRadius::same(6), BOARD_FRAME);
        painter.rect_filled(self.inner, CornerRadius::same(2), BOARD_BG);

        self.draw_bar_and_tray(&painter);
        self.draw_points(&painter);
        self.draw_labels(&painter);

        for id in &highlights.movable {
            self.outline(&painter, *id, Stroke::new(1.5, MOVABLE));
        }
        for id in &highlights.destinations {
            if let Some(rect) = self.region(*id) {
                painter.rect_filled(rect.shrink(2.0), CornerRadius::same(4), destination_fill());
            }
            self.outline(&painter, *id, Stroke::new(2.0, DESTINATION));
        }
        if let Some(id) = highlights.selected {
            self.outline(&painter, id, Stroke::new(3.0, SELECTED));
        }

        self.draw_checkers(&painter, board);

        if !highlights.interactive {
            return None;
        }

        let hovered = response.hover_pos().and_then(|pos| self.locate(pos));
        if let Some(id) = hovered {
            self.outline(&painter, id, Stroke::new(1.0, TEXT_SECONDARY));
        }

        if response.clicked() {
            hovered
        } else {
            None
        }
    }

    /// Screen column (0..14) of a track point; Point1 sits bottom right.
    fn track_column(idx: usize) -> usize {
        let column = if idx < TRACK_LEN / 2 {
            TRACK_LEN / 2 - 1 - idx
        } else {
            idx - TRACK_LEN / 2
        };
        if column >= BAR_COLUMN {
            column + 1
        } else {
            column
        }
    }

    fn column_rect(&self, column: usize, top: bool) -> Rect {
        let min = Pos2::new(
            self.inner.min.x + column as f32 * self.column_width,
            if top { self.inner.min.y } else { self.inner.center().y },
        );
        Rect::from_min_size(min, Vec2::new(self.column_width, self.inner.height() * 0.5))
    }

    /// Clickable area of a location
    pub fn region(&self, id: PointId) -> Option<Rect> {
        if self.inner == Rect::NOTHING {
            return None;
        }
        let rect = match id {
            PointId::JailP1 => self.column_rect(BAR_COLUMN, true),
            PointId::JailP2 => self.column_rect(BAR_COLUMN, false),
            PointId::HomeP2 => self.column_rect(TRAY_COLUMN, true),
            PointId::HomeP1 => self.column_rect(TRAY_COLUMN, false),
            _ => {
                let idx = id.track_index()?;
                self.column_rect(Self::track_column(idx), idx >= TRACK_LEN / 2)
            }
        };
        Some(rect)
    }

    /// Location under a screen position
    pub fn locate(&self, pos: Pos2) -> Option<PointId> {
        PointId::ALL
            .into_iter()
            .find(|&id| self.region(id).is_some_and(|rect| rect.contains(pos)))
    }

    fn outline(&self, painter: &Painter, id: PointId, stroke: Stroke) {
        let Some(rect) = self.region(id) else {
            return;
        };
        let rect = rect.shrink(1.0);
        let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
        for i in 0..4 {
            painter.line_segment([corners[i], corners[(i + 1) % 4]], stroke);
        }
    }

    fn draw_bar_and_tray(&self, painter: &Painter) {
        for (column, color) in [(BAR_COLUMN, BAR_BG), (TRAY_COLUMN, TRAY_BG)] {
            let top = self.column_rect(column, true);
            let bottom = self.column_rect(column, false);
            painter.rect_filled(top.union(bottom), CornerRadius::ZERO, color);
        }
        let mid = self.column_rect(TRAY_COLUMN, false).left_top();
        painter.line_segment(
            [mid, mid + Vec2::new(self.column_width, 0.0)],
            Stroke::new(2.0, BOARD_FRAME),
        );
    }

    /// Draw the 24 triangles
    fn draw_points(&self, painter: &Painter) {
        let depth = self.inner.height() * POINT_HEIGHT_RATIO;

        for idx in 0..TRACK_LEN {
            let top = idx >= TRACK_LEN / 2;
            let rect = self.column_rect(Self::track_column(idx), top);
            let color = if idx % 2 == 0 { POINT_DARK } else { POINT_LIGHT };

            let triangle = if top {
                vec![
                    rect.left_top(),
                    rect.right_top(),
                    Pos2::new(rect.center().x, rect.top() + depth),
                ]
            } else {
                vec![
                    rect.left_bottom(),
                    Pos2::new(rect.center().x, rect.bottom() - depth),
                    rect.right_bottom(),
                ]
            };
            painter.add(Shape::convex_polygon(triangle, color, Stroke::NONE));
        }
    }

    /// Point numbers from Player1's point of view
    fn draw_labels(&self, painter: &Painter) {
        let font = FontId::proportional(10.0);
        for idx in 0..TRACK_LEN {
            let top = idx >= TRACK_LEN / 2;
            let rect = self.column_rect(Self::track_column(idx), top);
            let pos = if top {
                Pos2::new(rect.center().x, rect.top() - BOARD_MARGIN * 0.5)
            } else {
                Pos2::new(rect.center().x, rect.bottom() + BOARD_MARGIN * 0.5)
            };
            painter.text(pos, Align2::CENTER_CENTER, idx + 1, font.clone(), P1_CHECKER);
        }
    }

    /// Centre of the first checker of a stack and the direction it grows in
    fn stack_anchor(&self, id: PointId) -> Option<(Pos2, f32)> {
        let rect = self.region(id)?;
        let r = self.checker_radius();
        let x = rect.center().x;
        let anchor = match id {
            PointId::JailP1 => (Pos2::new(x, rect.bottom() - r), -1.0),
            PointId::JailP2 => (Pos2::new(x, rect.top() + r), 1.0),
            _ if rect.top() < self.inner.center().y => (Pos2::new(x, rect.top() + r), 1.0),
            _ => (Pos2::new(x, rect.bottom() - r), -1.0),
        };
        Some(anchor)
    }

    fn checker_radius(&self) -> f32 {
        self.column_width * CHECKER_RADIUS_RATIO
    }

    fn draw_checkers(&self, painter: &Painter, board: &BoardMap) {
        let r = self.checker_radius();

        for id in PointId::ALL {
            let point = board.point(id);
            if point.is_empty() {
                continue;
            }
            let Some((base, direction)) = self.stack_anchor(id) else {
                continue;
            };

            let drawn = point.count().min(MAX_DRAWN_STACK);
            let mut center = base;
            for _ in 0..drawn {
                self.draw_checker(painter, center, r, point.side());
                center.y += direction * 2.0 * r;
            }

            if point.count() > MAX_DRAWN_STACK {
                let last = Pos2::new(base.x, base.y + direction * 2.0 * r * f32::from(drawn - 1));
                let text_color = match point.side() {
                    PlayerId::Player1 => P2_CHECKER,
                    _ => P1_CHECKER,
                };
                painter.text(
                    last,
                    Align2::CENTER_CENTER,
                    point.count(),
                    FontId::proportional(r),
                    text_color,
                );
            }
        }
    }

    /// Draw a single checker with a rim and shadow
    fn draw_checker(&self, painter: &Painter, center: Pos2, radius: f32, side: PlayerId) {
        let (fill, rim): (Color32, Color32) = match side {
            PlayerId::Player1 => (P1_CHECKER, P1_CHECKER_RIM),
            _ => (P2_CHECKER, P2_CHECKER_RIM),
        };

        painter.circle_filled(center + Vec2::new(1.5, 1.5), radius, shadow());
        painter.circle_filled(center, radius, fill);
        painter.circle_stroke(center, radius * 0.75, Stroke::new(radius * 0.1, rim));
    }
}
