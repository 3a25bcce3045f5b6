use egui::{Color32, Pos2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::surface::{DrawOp, PixelSurface, StrokeStyle};

mod rainbow;
pub(crate) mod spray;

pub use rainbow::{HUE_STEP, RainbowCursor, hsl};
pub use spray::density as spray_density;

pub const MIN_SIZE: f32 = 2.0;
pub const MAX_SIZE: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    #[default]
    Round,
    Square,
    Spray,
    Rainbow,
}

impl BrushKind {
    pub const ALL: [BrushKind; 4] = [Self::Round, Self::Square, Self::Spray, Self::Rainbow];

    pub fn label(self) -> &'static str {
        match self {
            Self::Round => "Round",
            Self::Square => "Square",
            Self::Spray => "Spray",
            Self::Rainbow => "Rainbow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushConfig {
    pub kind: BrushKind,
    pub color: Color32,
    pub size: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            kind: BrushKind::Round,
            color: Color32::from_rgb(0x6C, 0x63, 0xFF),
            size: 6.0,
        }
    }
}

/// Clamps a requested brush size into `MIN_SIZE..=MAX_SIZE`.
pub fn clamp_size(size: f32) -> Option<f32> {
    size.is_finite().then(|| size.clamp(MIN_SIZE, MAX_SIZE))
}

/// The active brush. It never touches the surface: [`Brush::segment`] and
/// [`Brush::stroke_start`] return the [`DrawOp`]s for the caller to apply.
#[derive(Debug, Clone)]
pub struct Brush {
    config: BrushConfig,
    cursor: RainbowCursor,
    rng: StdRng,
}

impl Brush {
    pub fn new(config: BrushConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic spray placement and hue seeding, for tests.
    pub fn seeded(config: BrushConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: BrushConfig, mut rng: StdRng) -> Self {
        let mut cursor = RainbowCursor::default();
        if config.kind == BrushKind::Rainbow {
            cursor.randomize(&mut rng);
        }
        let size = clamp_size(config.size).unwrap_or(BrushConfig::default().size);
        Self {
            config: BrushConfig { size, ..config },
            cursor,
            rng,
        }
    }

    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    pub fn hue(&self) -> u16 {
        self.cursor.hue()
    }

    pub fn set_hue(&mut self, hue: u16) {
        self.cursor = RainbowCursor::new(hue);
    }

    pub fn set_color(&mut self, color: Color32) {
        self.config.color = color;
    }

    /// Out-of-range sizes are clamped; non-finite ones are ignored.
    pub fn set_size(&mut self, size: f32) {
        match clamp_size(size) {
            Some(clamped) => {
                if clamped != size {
                    log::debug!("brush size {size} clamped to {clamped}");
                }
                self.config.size = clamped;
            }
            None => log::warn!("ignoring non-finite brush size {size}"),
        }
    }

    /// Switching to Rainbow from another kind re-seeds the hue cursor.
    pub fn set_kind(&mut self, kind: BrushKind) {
        if kind == BrushKind::Rainbow && self.config.kind != BrushKind::Rainbow {
            self.cursor.randomize(&mut self.rng);
            log::debug!("rainbow hue reset to {}", self.cursor.hue());
        }
        self.config.kind = kind;
    }

    /// Primitives emitted when a stroke begins at `at`, before any motion.
    pub fn stroke_start(&mut self, at: Pos2) -> Vec<DrawOp> {
        match self.config.kind {
            BrushKind::Spray => self.burst(at),
            _ => Vec::new(),
        }
    }

    /// One spray burst at `at`, regardless of the active kind.
    pub fn burst(&mut self, at: Pos2) -> Vec<DrawOp> {
        spray::burst(at, self.config.size, self.config.color, &mut self.rng)
    }

    /// Primitives for the motion segment `from -> to`. Rainbow advances its
    /// hue cursor once per call.
    pub fn segment(&mut self, from: Pos2, to: Pos2) -> Vec<DrawOp> {
        let BrushConfig { kind, color, size } = self.config;
        match kind {
            BrushKind::Round => vec![DrawOp::Segment {
                from,
                to,
                style: StrokeStyle::round(color, size),
            }],
            BrushKind::Square => vec![
                DrawOp::Segment {
                    from,
                    to,
                    style: StrokeStyle::square(color, size),
                },
                DrawOp::Rect {
                    center: to,
                    size,
                    color,
                },
            ],
            BrushKind::Spray => self.burst(to),
            BrushKind::Rainbow => {
                let op = DrawOp::Segment {
                    from,
                    to,
                    style: StrokeStyle::round(self.cursor.color(), size),
                };
                self.cursor.advance();
                vec![op]
            }
        }
    }

    /// Renders the brush swatch shown next to the controls.
    pub fn preview(&mut self) -> PixelSurface {
        crate::preview::render(&self.config, self.cursor, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::LineCap;

    fn brush(kind: BrushKind) -> Brush {
        Brush::seeded(
            BrushConfig {
                kind,
                color: Color32::RED,
                size: 10.0,
            },
            1,
        )
    }

    #[test]
    fn test_round_is_one_round_segment() {
        let mut brush = brush(BrushKind::Round);
        let ops = brush.segment(Pos2::new(10.0, 10.0), Pos2::new(20.0, 10.0));
        assert_eq!(
            ops,
            vec![DrawOp::Segment {
                from: Pos2::new(10.0, 10.0),
                to: Pos2::new(20.0, 10.0),
                style: StrokeStyle::round(Color32::RED, 10.0),
            }]
        );
        assert!(brush.stroke_start(Pos2::ZERO).is_empty());
    }

    #[test]
    fn test_square_adds_rect_at_destination() {
        let mut brush = brush(BrushKind::Square);
        let to = Pos2::new(30.0, 12.0);
        let ops = brush.segment(Pos2::new(10.0, 10.0), to);

        assert_eq!(ops.len(), 2);
        match &ops[0] {
            DrawOp::Segment { style, .. } => assert_eq!(style.cap, LineCap::Butt),
            other => panic!("expected segment, got {other:?}"),
        }
        assert_eq!(
            ops[1],
            DrawOp::Rect {
                center: to,
                size: 10.0,
                color: Color32::RED,
            }
        );
    }

    #[test]
    fn test_spray_emits_density_dots_at_destination() {
        let mut brush = brush(BrushKind::Spray);
        let ops = brush.segment(Pos2::new(0.0, 0.0), Pos2::new(200.0, 200.0));
        assert_eq!(ops.len(), 45);
        assert!(ops.iter().all(|op| matches!(op, DrawOp::Circle { .. })));

        let start = brush.stroke_start(Pos2::new(5.0, 5.0));
        assert_eq!(start.len(), 45);
    }

    #[test]
    fn test_rainbow_advances_per_segment() {
        let mut brush = brush(BrushKind::Rainbow);
        brush.set_hue(100);
        let first = brush.segment(Pos2::ZERO, Pos2::new(1.0, 1.0));
        assert_eq!(brush.hue(), 103);

        let DrawOp::Segment { style, .. } = &first[0] else {
            panic!("rainbow draws a segment");
        };
        assert_eq!(style.color, hsl(100.0, 1.0, 0.55));
        assert_eq!(style.cap, LineCap::Round);
    }

    #[test]
    fn test_size_is_clamped() {
        let mut brush = brush(BrushKind::Round);
        brush.set_size(100.0);
        assert_eq!(brush.config().size, MAX_SIZE);
        brush.set_size(0.5);
        assert_eq!(brush.config().size, MIN_SIZE);
        brush.set_size(f32::NAN);
        assert_eq!(brush.config().size, MIN_SIZE);
    }

    #[test]
    fn test_reselecting_rainbow_keeps_cursor() {
        let mut brush = brush(BrushKind::Round);
        brush.set_kind(BrushKind::Rainbow);
        brush.set_hue(42);
        brush.set_kind(BrushKind::Rainbow);
        assert_eq!(brush.hue(), 42);

        brush.set_kind(BrushKind::Round);
        brush.set_kind(BrushKind::Rainbow);
        assert!(brush.hue() < 360);
    }

    #[test]
    fn test_config_changes_are_not_retroactive() {
        let mut brush = brush(BrushKind::Round);
        let before = brush.segment(Pos2::ZERO, Pos2::new(5.0, 0.0));
        brush.set_color(Color32::BLUE);
        assert_eq!(
            before[0],
            DrawOp::Segment {
                from: Pos2::ZERO,
                to: Pos2::new(5.0, 0.0),
                style: StrokeStyle::round(Color32::RED, 10.0),
            }
        );
    }
}
