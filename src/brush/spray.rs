use std::f32::consts::TAU;

use egui::{Color32, Pos2, Vec2};
use rand::Rng;

use crate::surface::DrawOp;

/// Number of dots in one burst for a brush of `size`.
pub fn density(size: f32) -> usize {
    (25.0 + size * 2.0).ceil().max(0.0) as usize
}

/// Scatters `count` translucent dots uniformly by angle within `spread` of
/// `center`.
pub fn scatter(
    center: Pos2,
    spread: f32,
    count: usize,
    color: Color32,
    rng: &mut impl Rng,
) -> Vec<DrawOp> {
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let radius = rng.r#gen::<f32>() * spread;
            let offset = Vec2::angled(angle) * radius;
            DrawOp::Circle {
                center: center + offset,
                radius: 1.0 + rng.r#gen::<f32>() * 1.5,
                color,
                alpha: 0.18 + rng.r#gen::<f32>() * 0.18,
            }
        })
        .collect()
}

/// One spray burst at `center`.
pub fn burst(center: Pos2, size: f32, color: Color32, rng: &mut impl Rng) -> Vec<DrawOp> {
    scatter(center, size * 1.2, density(size), color, rng)
}
