use egui::{Color32, ColorImage, Pos2, Vec2};
use image::{Rgba, RgbaImage, imageops};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// An integer pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Intersect with a `width` x `height` surface anchored at the origin.
    fn clipped(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self {
            x,
            y,
            width: self.width.min(width - x),
            height: self.height.min(height - y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

/// Joins only apply between consecutive segments of one path; a single
/// segment has no interior vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color32,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl StrokeStyle {
    pub fn round(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }

    pub fn square(color: Color32, width: f32) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }
}

/// One primitive draw call. Brushes plan strokes as lists of these.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Segment {
        from: Pos2,
        to: Pos2,
        style: StrokeStyle,
    },
    Rect {
        center: Pos2,
        size: f32,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
        alpha: f32,
    },
}

/// Immutable copy of a rectangle of surface pixels.
///
/// A snapshot owns its pixels; later writes to the surface it came from are
/// never visible through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    image: RgbaImage,
}

impl Snapshot {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Raw RGBA bytes, row major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Size in bytes held by this snapshot.
    pub fn byte_len(&self) -> usize {
        self.image.as_raw().len()
    }
}

/// Fixed-size RGBA raster that strokes are painted onto.
///
/// Pixels are stored non-premultiplied. Shapes get per-pixel coverage from
/// the pixel centre's distance to the shape edge and are composited
/// source-over. Anything outside the surface is clipped.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    image: RgbaImage,
    revision: u64,
}

impl PixelSurface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, TRANSPARENT),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn full_region(&self) -> Region {
        Region::new(0, 0, self.width(), self.height())
    }

    /// Bumped by every mutating call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p.0[3] == 0)
    }

    /// Copies the pixels inside `region` (clipped to the surface).
    pub fn read_region(&self, region: Region) -> Snapshot {
        let r = region.clipped(self.width(), self.height());
        Snapshot {
            image: imageops::crop_imm(&self.image, r.x, r.y, r.width, r.height).to_image(),
        }
    }

    /// Overwrites pixels starting at `origin` with the snapshot contents. No
    /// blending: transparent snapshot pixels replace whatever was there.
    pub fn write_region(&mut self, snapshot: &Snapshot, origin: (i64, i64)) {
        imageops::replace(&mut self.image, &snapshot.image, origin.0, origin.1);
        self.touch();
    }

    /// Resets every pixel in `region` to transparent.
    pub fn clear(&mut self, region: Region) {
        let r = region.clipped(self.width(), self.height());
        for y in r.y..r.y + r.height {
            for x in r.x..r.x + r.width {
                self.image.put_pixel(x, y, TRANSPARENT);
            }
        }
        self.touch();
    }

    pub fn apply(&mut self, op: &DrawOp) {
        match op {
            DrawOp::Segment { from, to, style } => self.stroke_segment(*from, *to, style),
            DrawOp::Rect {
                center,
                size,
                color,
            } => self.fill_rect(*center, *size, *color),
            DrawOp::Circle {
                center,
                radius,
                color,
                alpha,
            } => self.fill_circle(*center, *radius, *color, *alpha),
        }
    }

    /// Rasterizes the single line segment `from -> to`.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, style: &StrokeStyle) {
        let half = style.width / 2.0;
        if half <= 0.0 {
            return;
        }
        let delta = to - from;
        let len = delta.length();
        if style.cap == LineCap::Butt && len <= f32::EPSILON {
            return;
        }

        let min = from.min(to) - Vec2::splat(half + 1.0);
        let max = from.max(to) + Vec2::splat(half + 1.0);
        let color = style.color;
        self.for_each_pixel_in(min, max, |p| match style.cap {
            LineCap::Round => {
                let dist = distance_to_segment(p, from, delta, len);
                coverage(half - dist)
            }
            LineCap::Butt => {
                let dir = delta / len;
                let rel = p - from;
                let along = rel.dot(dir);
                let across = (rel.x * dir.y - rel.y * dir.x).abs();
                coverage(half - across) * coverage(along) * coverage(len - along)
            }
        }, color, 1.0);
    }

    /// Fills an axis-aligned square of side `size` centred on `center`.
    pub fn fill_rect(&mut self, center: Pos2, size: f32, color: Color32) {
        self.fill_rect_alpha(center, size, color, 1.0);
    }

    pub fn fill_rect_alpha(&mut self, center: Pos2, size: f32, color: Color32, alpha: f32) {
        if size <= 0.0 || alpha <= 0.0 {
            return;
        }
        let half = size / 2.0;
        let min = center - Vec2::splat(half);
        let max = center + Vec2::splat(half);
        self.for_each_pixel_in(min, max, |p| {
            let px = p.x - 0.5;
            let py = p.y - 0.5;
            let cover_x = ((px + 1.0).min(max.x) - px.max(min.x)).clamp(0.0, 1.0);
            let cover_y = ((py + 1.0).min(max.y) - py.max(min.y)).clamp(0.0, 1.0);
            cover_x * cover_y
        }, color, alpha);
    }

    /// Fills a disc, composited at `alpha` opacity.
    pub fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let min = center - Vec2::splat(radius + 1.0);
        let max = center + Vec2::splat(radius + 1.0);
        self.for_each_pixel_in(min, max, |p| coverage(radius - p.distance(center)), color, alpha);
    }

    pub fn to_color_image(&self) -> ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, self.image.as_raw())
    }

    /// Source-over composite of `color` at `alpha` onto one pixel.
    pub(crate) fn blend_pixel(&mut self, x: u32, y: u32, color: Color32, alpha: f32) {
        let Some(px) = self.image.get_pixel_mut_checked(x, y) else {
            return;
        };
        let [sr, sg, sb, sa] = color.to_srgba_unmultiplied();
        let src_a = sa as f32 / 255.0 * alpha.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }
        let [dr, dg, db, da] = px.0;
        let dst_a = da as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let mix = |s: u8, d: u8| {
            let c = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        *px = Rgba([
            mix(sr, dr),
            mix(sg, dg),
            mix(sb, db),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]);
    }

    /// Visits the pixels whose centres fall in the box `min..max` (clipped),
    /// blending `color` with the coverage returned by `cover`.
    fn for_each_pixel_in(
        &mut self,
        min: Pos2,
        max: Pos2,
        cover: impl Fn(Pos2) -> f32,
        color: Color32,
        alpha: f32,
    ) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        let x0 = min.x.floor().clamp(0.0, w) as u32;
        let y0 = min.y.floor().clamp(0.0, h) as u32;
        let x1 = max.x.ceil().clamp(0.0, w) as u32;
        let y1 = max.y.ceil().clamp(0.0, h) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                let c = cover(Pos2::new(x as f32 + 0.5, y as f32 + 0.5));
                if c > 0.0 {
                    self.blend_pixel(x, y, color, c * alpha);
                }
            }
        }
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.revision += 1;
    }
}

/// Maps signed distance inside an edge to a one-pixel anti-aliasing ramp.
fn coverage(inside: f32) -> f32 {
    (inside + 0.5).clamp(0.0, 1.0)
}

fn distance_to_segment(p: Pos2, from: Pos2, delta: Vec2, len: f32) -> f32 {
    if len <= f32::EPSILON {
        return p.distance(from);
    }
    let t = ((p - from).dot(delta) / (len * len)).clamp(0.0, 1.0);
    p.distance(from + delta * t)
}
