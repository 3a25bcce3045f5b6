use egui::{TextureHandle, TextureId, TextureOptions};

use crate::brush::BrushConfig;
use crate::input::{InputEvent, InputHandler, Shortcut};
use crate::panels::{central_panel, tools_panel};
use crate::session::PaintSession;

pub struct PaintApp {
    session: PaintSession,
    input: InputHandler,
    canvas_texture: Option<TextureHandle>,
    /// Surface revision last uploaded to `canvas_texture`
    uploaded_revision: Option<u64>,
    preview_texture: Option<TextureHandle>,
    /// Brush state the preview was rendered for
    preview_key: Option<(BrushConfig, u16)>,
    status: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, mut session: PaintSession) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        // undo can always get back to the blank canvas
        session.checkpoint();
        Self {
            session,
            input: InputHandler::new(egui::Rect::NOTHING),
            canvas_texture: None,
            uploaded_revision: None,
            preview_texture: None,
            preview_key: None,
            status: None,
        }
    }

    pub fn session(&self) -> &PaintSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PaintSession {
        &mut self.session
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Feeds this frame's pointer and keyboard input to the session.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        self.input.set_canvas_rect(canvas_rect);
        for event in self.input.process_input(ctx) {
            let export = matches!(
                &event,
                InputEvent::KeyDown { key, modifiers }
                    if Shortcut::from_key(*key, *modifiers) == Some(Shortcut::Export)
            );
            match self.session.handle_event(&event) {
                Ok(()) if export => self.report_export(Ok(())),
                Ok(()) => {}
                Err(err) => self.report_export(Err(err)),
            }
        }
    }

    /// Writes the drawing to the configured file.
    pub fn export(&mut self) {
        let path = self.session.export_path().to_path_buf();
        let result = self.session.export_to(&path);
        self.report_export(result);
    }

    fn report_export(&mut self, result: Result<(), crate::error::ExportError>) {
        self.status = Some(match result {
            Ok(()) => format!("Saved {}", self.session.export_path().display()),
            Err(err) => {
                log::error!("export failed: {err}");
                format!("Export failed: {err}")
            }
        });
    }

    /// The canvas texture, re-uploaded when the surface changed.
    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> TextureId {
        let surface = self.session.surface();
        let revision = surface.revision();
        let uploaded = self.uploaded_revision.replace(revision);
        let texture = self.canvas_texture.get_or_insert_with(|| {
            ctx.load_texture("canvas", surface.to_color_image(), TextureOptions::NEAREST)
        });
        if uploaded.is_some_and(|r| r != revision) {
            texture.set(surface.to_color_image(), TextureOptions::NEAREST);
        }
        texture.id()
    }

    /// The brush preview texture, re-rendered when the brush changed.
    pub fn preview_texture(&mut self, ctx: &egui::Context) -> Option<TextureId> {
        let key = (self.session.brush_config(), self.session.brush().hue());
        if self.preview_key.replace(key) != Some(key) {
            let image = self.session.preview().to_color_image();
            match &mut self.preview_texture {
                Some(texture) => texture.set(image, TextureOptions::LINEAR),
                None => {
                    self.preview_texture =
                        Some(ctx.load_texture("brush_preview", image, TextureOptions::LINEAR));
                }
            }
        }
        self.preview_texture.as_ref().map(TextureHandle::id)
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
