use egui::{Color32, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2, vec2};

use crate::constants::{JOINT_HANDLE_RADIUS, SELECTION_HALF_SIZE};
use crate::editor::Editor;
use crate::figure::Figure;
use crate::limb::LimbJoint;
use crate::scene::BackgroundMode;

const CHECKER_SIZE: f32 = 16.0;
const CHECKER_DARK: Color32 = Color32::from_gray(220);
const HEAD_INDICATOR_COLOR: Color32 = Color32::RED;
const HANDLE_COLOR: Color32 = Color32::YELLOW;
const SELECTION_COLOR: Color32 = Color32::RED;
/// Segments shorter than this are not drawn as bars
const MIN_SEGMENT_DRAW_LENGTH: f32 = 5.0;

/// Draws the scene onto the canvas area of the editor window.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub show_joint_handles: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            show_joint_handles: true,
        }
    }
}

impl Renderer {
    pub fn new(show_joint_handles: bool) -> Self {
        Self { show_joint_handles }
    }

    /// Paints the background, every figure, and the selection marker.
    /// `canvas_rect` is the screen rect of the canvas; its top left corner is
    /// world origin.
    pub fn render(&self, painter: &Painter, canvas_rect: Rect, editor: &Editor) {
        let scene = editor.scene();
        let painter = painter.with_clip_rect(canvas_rect);
        let offset = canvas_rect.min.to_vec2();

        match scene.background {
            BackgroundMode::White => {
                painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
            }
            BackgroundMode::Transparent => draw_checkerboard(&painter, canvas_rect),
        }

        for figure in scene.figures() {
            self.draw_figure(&painter, figure, offset);
        }

        if let Some(figure) = editor.selected_figure() {
            draw_selection(&painter, figure, offset);
        }
    }

    fn draw_figure(&self, painter: &Painter, figure: &Figure, offset: Vec2) {
        let stroke = if figure.global_outline {
            Stroke::new(1.0, Color32::BLACK)
        } else {
            Stroke::NONE
        };
        let scale = figure.scale();

        for (_, limb) in figure.limbs() {
            let start = figure.to_world(limb.start) + offset;
            let mid = figure.to_world(limb.mid) + offset;
            let end = figure.to_world(limb.end) + offset;
            let half_width = limb.width * scale / 2.0;

            for (a, b) in [(start, mid), (mid, end)] {
                if let Some(bar) = segment_polygon(a, b, half_width, figure.color, stroke) {
                    painter.add(bar);
                }
            }
            for center in [start, mid, end] {
                painter.circle(center, half_width, figure.color, stroke);
            }
        }

        painter.rect(
            figure.body_rect().translate(offset),
            Rounding::same(figure.body_corner_radius()),
            figure.color,
            stroke,
        );

        let head_center = figure.head_center() + offset;
        let head_radius = figure.head_radius() * scale;
        painter.circle(head_center, head_radius, figure.color, stroke);

        let angle = figure.head_rotation.to_radians();
        let tip = head_center + vec2(angle.sin(), -angle.cos()) * head_radius * 0.7;
        painter.line_segment([head_center, tip], Stroke::new(4.0, HEAD_INDICATOR_COLOR));

        if self.show_joint_handles {
            for (_, limb) in figure.limbs() {
                for joint in LimbJoint::ALL {
                    painter.circle(
                        figure.to_world(limb.joint(joint)) + offset,
                        JOINT_HANDLE_RADIUS,
                        HANDLE_COLOR,
                        Stroke::new(2.0, Color32::BLACK),
                    );
                }
            }
        }
    }
}

/// Quad covering the segment `a..b` with the given half width.
fn segment_polygon(
    a: Pos2,
    b: Pos2,
    half_width: f32,
    fill: Color32,
    stroke: Stroke,
) -> Option<Shape> {
    let direction = b - a;
    let length = direction.length();
    if length < MIN_SEGMENT_DRAW_LENGTH {
        return None;
    }
    let normal = direction.rot90() / length * half_width;
    Some(Shape::convex_polygon(
        vec![a + normal, b + normal, b - normal, a - normal],
        fill,
        stroke,
    ))
}

fn draw_selection(painter: &Painter, figure: &Figure, offset: Vec2) {
    let half = SELECTION_HALF_SIZE * figure.scale();
    let rect = Rect::from_center_size(figure.position() + offset, Vec2::splat(half * 2.0));
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    painter.extend(Shape::dashed_line(
        &corners,
        Stroke::new(3.0, SELECTION_COLOR),
        5.0,
        5.0,
    ));
}

fn draw_checkerboard(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::WHITE);
    let columns = (rect.width() / CHECKER_SIZE).ceil() as usize;
    let rows = (rect.height() / CHECKER_SIZE).ceil() as usize;
    for row in 0..rows {
        for column in (row % 2..columns).step_by(2) {
            let min = rect.min + vec2(column as f32, row as f32) * CHECKER_SIZE;
            let cell = Rect::from_min_size(min, Vec2::splat(CHECKER_SIZE)).intersect(rect);
            painter.rect_filled(cell, 0.0, CHECKER_DARK);
        }
    }
}
