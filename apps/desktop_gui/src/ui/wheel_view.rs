//! Paints the selector wheel. Angles follow screen space: zero points right
//! and positive angles turn clockwise because y grows downwards.

use std::f64::consts::FRAC_PI_2;

use client_core::wheel::{Slice, POINTER_ANGLE};
use eframe::egui;
use egui::{epaint::TextShape, Color32, FontId, Pos2, Shape, Stroke, Vec2};

const ARC_STEPS_PER_QUARTER: usize = 16;
const HUB_RADIUS: f32 = 20.0;
const LABEL_INSET: f32 = 20.0;
const MAX_LABEL_CHARS: usize = 22;

pub fn palette_color([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

pub fn point_at(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    center + Vec2::new(angle.cos() as f32, angle.sin() as f32) * radius
}

/// Splits `[start, end]` into pieces no wider than a quarter turn so each
/// wedge stays convex.
pub fn convex_spans(start: f64, end: f64) -> Vec<(f64, f64)> {
    let pieces = ((end - start) / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = (end - start) / pieces as f64;
    (0..pieces)
        .map(|i| (start + step * i as f64, start + step * (i + 1) as f64))
        .collect()
}

pub fn wedge_points(center: Pos2, radius: f32, start: f64, end: f64) -> Vec<Pos2> {
    let mut points = Vec::with_capacity(ARC_STEPS_PER_QUARTER + 2);
    points.push(center);
    for step in 0..=ARC_STEPS_PER_QUARTER {
        let t = step as f64 / ARC_STEPS_PER_QUARTER as f64;
        points.push(point_at(center, radius, start + (end - start) * t));
    }
    points
}

fn short_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
    short.push('…');
    short
}

pub fn paint_wheel(ui: &mut egui::Ui, slices: &[Slice], rotation: f64, diameter: f32) {
    let (response, painter) =
        ui.allocate_painter(Vec2::splat(diameter), egui::Sense::hover());
    let center = response.rect.center();
    let radius = diameter / 2.0 - 10.0;
    let outline = Stroke::new(1.0, Color32::from_gray(40));

    for slice in slices {
        let start = slice.start_angle + rotation;
        let end = slice.end_angle + rotation;
        let fill = palette_color(slice.color);
        for (from, to) in convex_spans(start, end) {
            painter.add(Shape::convex_polygon(
                wedge_points(center, radius, from, to),
                fill,
                Stroke::NONE,
            ));
        }
        painter.line_segment([center, point_at(center, radius, start)], outline);

        let mid = (start + end) / 2.0;
        let galley = painter.layout_no_wrap(
            short_label(&slice.label),
            FontId::proportional(14.0),
            Color32::BLACK,
        );
        let size = galley.size();
        let along = Vec2::new(mid.cos() as f32, mid.sin() as f32);
        let across = Vec2::new(-along.y, along.x);
        let anchor =
            center + along * (radius - LABEL_INSET - size.x) - across * (size.y / 2.0);
        painter.add(TextShape::new(anchor, galley, Color32::BLACK).with_angle(mid as f32));
    }

    painter.circle_stroke(center, radius, outline);
    painter.circle(center, HUB_RADIUS, Color32::WHITE, outline);

    let tip = point_at(center, radius - 12.0, POINTER_ANGLE);
    let base_left = point_at(center, radius + 8.0, POINTER_ANGLE - 0.06);
    let base_right = point_at(center, radius + 8.0, POINTER_ANGLE + 0.06);
    painter.add(Shape::convex_polygon(
        vec![tip, base_left, base_right],
        Color32::from_rgb(220, 38, 38),
        Stroke::new(1.0, Color32::WHITE),
    ));
}
