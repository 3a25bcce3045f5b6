use std::f32::consts::TAU;

use egui::{Color32, Pos2};
use rand::Rng;

use crate::brush::{BrushConfig, BrushKind, RainbowCursor, hsl};
use crate::surface::PixelSurface;

pub const PREVIEW_SIZE: u32 = 60;

const PREVIEW_ALPHA: f32 = 0.8;
const SPRAY_DOTS: usize = 40;
const RAINBOW_ARCS: usize = 24;
const ARC_HUE_STEP: u16 = 15;

/// Renders a `PREVIEW_SIZE` square swatch for `config`. The rainbow cursor
/// is only read.
pub fn render(config: &BrushConfig, cursor: RainbowCursor, rng: &mut impl Rng) -> PixelSurface {
    let mut surface = PixelSurface::new(PREVIEW_SIZE, PREVIEW_SIZE);
    let half = PREVIEW_SIZE as f32 / 2.0;
    let center = Pos2::new(half, half);
    let size = config.size;

    match config.kind {
        BrushKind::Round => {
            surface.fill_circle(center, size / 2.0, config.color, PREVIEW_ALPHA);
        }
        BrushKind::Square => {
            surface.fill_rect_alpha(center, size, config.color, PREVIEW_ALPHA);
        }
        BrushKind::Spray => {
            let dots = crate::brush::spray::scatter(center, size * 0.8, SPRAY_DOTS, config.color, rng);
            for dot in &dots {
                surface.apply(dot);
            }
        }
        BrushKind::Rainbow => rainbow_ring(&mut surface, center, size / 2.0, size / 3.0, cursor),
    }
    surface
}

/// A ring split into equal arcs whose hues step away from the cursor.
fn rainbow_ring(
    surface: &mut PixelSurface,
    center: Pos2,
    radius: f32,
    width: f32,
    cursor: RainbowCursor,
) {
    let half_width = width / 2.0;
    let arc = TAU / RAINBOW_ARCS as f32;
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let p = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            let d = p - center;
            let cover = (half_width - (d.length() - radius).abs() + 0.5).clamp(0.0, 1.0);
            if cover <= 0.0 {
                continue;
            }
            let angle = d.y.atan2(d.x).rem_euclid(TAU);
            let index = ((angle / arc) as usize).min(RAINBOW_ARCS - 1) as u16;
            let hue = (cursor.hue() + index * ARC_HUE_STEP) % 360;
            surface.blend_pixel(x, y, hsl(hue as f32, 1.0, 0.55), cover);
        }
    }
    surface.touch();
}
