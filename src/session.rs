use std::path::{Path, PathBuf};

use egui::{Color32, Pos2};

use crate::brush::{Brush, BrushConfig, BrushKind};
use crate::config::SketchConfig;
use crate::error::{ConfigError, ExportError};
use crate::export;
use crate::grid::GridOverlay;
use crate::history::SnapshotHistory;
use crate::input::{InputEvent, Shortcut};
use crate::stroke::{StrokeContext, StrokeController};
use crate::surface::PixelSurface;

/// One drawing session: the surface and everything that edits it.
///
/// Every user action that changes pixels checkpoints the surface first, so
/// undo always returns to the state before a whole action.
#[derive(Debug)]
pub struct PaintSession {
    surface: PixelSurface,
    history: SnapshotHistory,
    brush: Brush,
    stroke: StrokeController,
    grid: GridOverlay,
    export_path: PathBuf,
}

impl PaintSession {
    pub fn new(config: &SketchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let brush = Brush::new(config.brush_config()?);
        Ok(Self::with_brush(config, brush))
    }

    /// Builds a session around an existing brush (tests seed its random source).
    pub fn with_brush(config: &SketchConfig, brush: Brush) -> Self {
        log::info!(
            "new {}x{} canvas, {} undo steps",
            config.canvas_width,
            config.canvas_height,
            config.max_undo
        );
        Self {
            surface: PixelSurface::new(config.canvas_width, config.canvas_height),
            history: SnapshotHistory::with_capacity(config.max_undo),
            brush,
            stroke: StrokeController::new(),
            grid: GridOverlay::new(config.grid_spacing),
            export_path: PathBuf::from(&config.export_file_name),
        }
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn stroke(&self) -> &StrokeController {
        &self.stroke
    }

    pub fn grid(&self) -> &GridOverlay {
        &self.grid
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    /// Captures the current surface as an undo point.
    pub fn checkpoint(&mut self) {
        self.grid.lift(&mut self.surface);
        self.history.checkpoint(&self.surface);
        self.grid.settle(&mut self.surface);
    }

    /// Routes one input event. Only an export shortcut can fail.
    pub fn handle_event(&mut self, event: &InputEvent) -> Result<(), ExportError> {
        match event {
            InputEvent::PointerDown { pos } => self.pointer_down(*pos),
            InputEvent::PointerMove { pos } => {
                self.pointer_move(*pos);
            }
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::KeyDown { key, modifiers } => match Shortcut::from_key(*key, *modifiers) {
                Some(Shortcut::Undo) => {
                    self.undo();
                }
                Some(Shortcut::Export) => {
                    let path = self.export_path.clone();
                    self.export_to(&path)?;
                }
                None => {}
            },
        }
        Ok(())
    }

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.grid.lift(&mut self.surface);
        let mut ctx = StrokeContext {
            surface: &mut self.surface,
            history: &mut self.history,
            brush: &mut self.brush,
        };
        self.stroke.pointer_down(pos, &mut ctx);
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        let mut ctx = StrokeContext {
            surface: &mut self.surface,
            history: &mut self.history,
            brush: &mut self.brush,
        };
        self.stroke.pointer_move(pos, &mut ctx)
    }

    pub fn pointer_up(&mut self) {
        self.stroke.pointer_up();
        self.grid.settle(&mut self.surface);
    }

    pub fn pointer_leave(&mut self) {
        self.stroke.pointer_leave();
        self.grid.settle(&mut self.surface);
    }

    /// Ends any gesture in progress, e.g. when a control outside the canvas
    /// is used.
    fn end_stroke(&mut self) {
        if self.stroke.is_stroking() {
            self.pointer_up();
        }
    }

    /// Checkpoints, then wipes the surface.
    pub fn clear(&mut self) {
        self.end_stroke();
        self.grid.lift(&mut self.surface);
        self.history.checkpoint(&self.surface);
        self.surface.clear(self.surface.full_region());
        self.grid.settle(&mut self.surface);
        log::debug!("canvas cleared");
    }

    /// Restores the latest checkpoint. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        self.grid.lift(&mut self.surface);
        let undone = self.history.undo(&mut self.surface);
        self.grid.settle(&mut self.surface);
        if undone {
            log::debug!("undo, {} steps left", self.history.len());
        } else {
            log::debug!("nothing to undo");
        }
        undone
    }

    /// Flips the grid overlay and returns whether it is now shown.
    pub fn toggle_grid(&mut self) -> bool {
        self.end_stroke();
        self.grid.toggle(&mut self.surface, &self.history)
    }

    pub fn set_color(&mut self, color: Color32) {
        self.brush.set_color(color);
    }

    pub fn set_size(&mut self, size: f32) {
        self.brush.set_size(size);
    }

    pub fn set_kind(&mut self, kind: BrushKind) {
        self.brush.set_kind(kind);
    }

    pub fn brush_config(&self) -> BrushConfig {
        *self.brush.config()
    }

    pub fn preview(&mut self) -> PixelSurface {
        self.brush.preview()
    }

    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        export::encode_png(&self.surface)
    }

    pub fn export_to(&self, path: &Path) -> Result<(), ExportError> {
        export::save_png(&self.surface, path)
    }
}
