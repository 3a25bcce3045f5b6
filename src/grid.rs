use egui::{Color32, Pos2};

use crate::history::SnapshotHistory;
use crate::surface::{LineCap, LineJoin, PixelSurface, Snapshot, StrokeStyle};

pub const DEFAULT_SPACING: u32 = 20;
pub const GRID_COLOR: Color32 = Color32::from_rgb(0xE0, 0xD7, 0xD1);
pub const GRID_LINE_WIDTH: f32 = 0.5;

/// Alignment grid painted onto the surface pixels. The content underneath is
/// held here rather than in the undo history.
#[derive(Debug, Clone)]
pub struct GridOverlay {
    spacing: u32,
    visible: bool,
    /// Surface content underneath the grid lines, present while they are drawn
    base: Option<Snapshot>,
}

impl Default for GridOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_SPACING)
    }
}

impl GridOverlay {
    pub fn new(spacing: u32) -> Self {
        Self {
            spacing: spacing.max(1),
            visible: false,
            base: None,
        }
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    /// Whether the user has the grid switched on
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether grid lines are currently painted on the surface
    pub fn is_drawn(&self) -> bool {
        self.base.is_some()
    }

    /// Flips the grid and returns the new visibility
    pub fn toggle(&mut self, surface: &mut PixelSurface, history: &SnapshotHistory) -> bool {
        if self.visible {
            self.hide(surface, history);
        } else {
            self.show(surface);
        }
        self.visible
    }

    pub fn show(&mut self, surface: &mut PixelSurface) {
        self.visible = true;
        self.draw(surface);
    }

    /// Removes the grid lines. Falls back to the latest checkpoint, then to a
    /// blank surface, when no pre-grid content was captured.
    pub fn hide(&mut self, surface: &mut PixelSurface, history: &SnapshotHistory) {
        self.visible = false;
        match self.base.take() {
            Some(base) => surface.write_region(&base, (0, 0)),
            None => restore_latest(surface, history),
        }
    }

    /// Takes the grid lines off the surface while it is being edited.
    /// Visibility is unchanged; call [`Self::settle`] afterwards.
    pub fn lift(&mut self, surface: &mut PixelSurface) {
        if let Some(base) = self.base.take() {
            surface.write_region(&base, (0, 0));
        }
    }

    /// Redraws the grid over the current content if it is switched on but
    /// not painted.
    pub fn settle(&mut self, surface: &mut PixelSurface) {
        if self.visible && self.base.is_none() {
            self.draw(surface);
        }
    }

    fn draw(&mut self, surface: &mut PixelSurface) {
        if self.base.is_none() {
            self.base = Some(surface.read_region(surface.full_region()));
        }
        let style = StrokeStyle {
            color: GRID_COLOR,
            width: GRID_LINE_WIDTH,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        };
        let (w, h) = (surface.width(), surface.height());
        for x in (self.spacing..w).step_by(self.spacing as usize) {
            let x = x as f32;
            surface.stroke_segment(Pos2::new(x, 0.0), Pos2::new(x, h as f32), &style);
        }
        for y in (self.spacing..h).step_by(self.spacing as usize) {
            let y = y as f32;
            surface.stroke_segment(Pos2::new(0.0, y), Pos2::new(w as f32, y), &style);
        }
    }
}

/// Writes back the most recent checkpoint, or clears the surface when the
/// history is empty.
pub fn restore_latest(surface: &mut PixelSurface, history: &SnapshotHistory) {
    match history.peek_latest() {
        Some(snapshot) => surface.write_region(snapshot, (0, 0)),
        None => surface.clear(surface.full_region()),
    }
}
