use egui::Color32;
use rand::Rng;

/// Hue step applied after every rendered rainbow segment.
pub const HUE_STEP: u16 = 3;

/// Current hue of the rainbow brush, always in `0..360`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RainbowCursor(u16);

impl RainbowCursor {
    pub fn new(hue: u16) -> Self {
        Self(hue % 360)
    }

    pub fn hue(self) -> u16 {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 = (self.0 + HUE_STEP) % 360;
    }

    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.0 = rng.gen_range(0..360);
    }

    /// The stroke colour for the current hue: `hsl(hue, 100%, 55%)`.
    pub fn color(self) -> Color32 {
        hsl(self.0 as f32, 1.0, 0.55)
    }
}

/// CSS-style HSL to sRGB. `hue` is in degrees, the rest in `0.0..=1.0`.
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Color32::from_rgb(
        channel(h + 1.0 / 3.0),
        channel(h),
        channel(h - 1.0 / 3.0),
    )
}
