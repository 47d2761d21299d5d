//! Paints a [`CardVisual`] as a projected quad with its face text on top.

use card_stack::CardVisual;
use eframe::egui::{self, epaint::TextShape, FontId, Pos2, Shape, Stroke};

use crate::ui::theme;

/// Below this horizontal projection the face is too thin for text to be legible.
const MIN_TEXT_PROJECTION: f32 = 0.2;
const GLOW_SPREAD: f32 = 1.04;
const BORDER_WIDTH: f32 = 3.0;

/// Screen-space corners (top-left, top-right, bottom-right, bottom-left) of a card
/// whose resting center sits at `anchor`.
pub fn project(anchor: Pos2, visual: &CardVisual<'_>) -> [Pos2; 4] {
    let transform = &visual.transform;
    let half_width = visual.size.width * 0.5 * transform.scale * visual.face_scale_x.abs();
    let half_height = visual.size.height * 0.5 * transform.scale;
    let (leading, trailing) = visual.edge_scales;
    let center = card_center(anchor, visual);

    [
        egui::vec2(-half_width, -half_height * trailing),
        egui::vec2(half_width, -half_height * leading),
        egui::vec2(half_width, half_height * leading),
        egui::vec2(-half_width, half_height * trailing),
    ]
    .map(|corner| center + rotate(corner, transform.rotation))
}

pub fn card_center(anchor: Pos2, visual: &CardVisual<'_>) -> Pos2 {
    anchor + egui::vec2(visual.transform.offset.x, visual.transform.offset.y)
}

/// Point-in-quad test for a convex quad with consistent winding.
pub fn contains(corners: &[Pos2; 4], point: Pos2) -> bool {
    let mut sign = 0.0_f32;
    for (index, start) in corners.iter().enumerate() {
        let end = corners[(index + 1) % corners.len()];
        let edge = end - *start;
        let to_point = point - *start;
        let cross = edge.x * to_point.y - edge.y * to_point.x;
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    sign != 0.0
}

pub fn paint_card(painter: &egui::Painter, anchor: Pos2, visual: &CardVisual<'_>) {
    let opacity = visual.transform.opacity;
    if opacity <= 0.0 {
        return;
    }

    let corners = project(anchor, visual);
    let center = card_center(anchor, visual);
    let glow: Vec<Pos2> = corners
        .iter()
        .map(|corner| center + (*corner - center) * GLOW_SPREAD)
        .collect();
    painter.add(Shape::convex_polygon(
        glow,
        theme::color32(visual.theme.glow, opacity * 0.6),
        Stroke::NONE,
    ));
    painter.add(Shape::convex_polygon(
        corners.to_vec(),
        theme::color32(visual.theme.fill, opacity),
        Stroke::new(
            BORDER_WIDTH * visual.transform.scale,
            theme::color32(visual.theme.border, opacity),
        ),
    ));

    if visual.face_scale_x.abs() < MIN_TEXT_PROJECTION {
        return;
    }
    paint_face_text(painter, center, visual);
}

fn paint_face_text(painter: &egui::Painter, center: Pos2, visual: &CardVisual<'_>) {
    let transform = &visual.transform;
    let width = visual.size.width * transform.scale * visual.face_scale_x.abs();
    let height = visual.size.height * transform.scale;
    let text_color = theme::color32(theme::CARD_TEXT, transform.opacity);

    let lines = [
        (&visual.face.title, 30.0, -0.22),
        (&visual.face.subtitle, 16.0, 0.02),
        (&visual.face.detail, 20.0, 0.2),
    ];
    for (text, size, relative_y) in lines {
        if text.is_empty() {
            continue;
        }
        let galley = painter.layout(
            text.clone(),
            FontId::proportional(size * transform.scale),
            text_color,
            width * 0.85,
        );
        let half = galley.size() * 0.5;
        let local_center = egui::vec2(0.0, height * relative_y);
        let pos = center + rotate(local_center, transform.rotation)
            - rotate(half, transform.rotation);
        painter.add(TextShape::new(pos, galley, text_color).with_angle(transform.rotation));
    }
}

fn rotate(v: egui::Vec2, angle: f32) -> egui::Vec2 {
    let (sin, cos) = angle.sin_cos();
    egui::vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
