use egui::{Color32, Rect, Sense, Stroke, pos2, vec2};

use crate::PaintApp;

const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(0xFF, 0xFD, 0xFA);
const CANVAS_BORDER: Color32 = Color32::from_rgb(0xE0, 0xD7, 0xD1);

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let surface = app.session().surface();
        let size = vec2(surface.width() as f32, surface.height() as f32);

        ui.vertical_centered(|ui| {
            let (canvas_rect, response) = ui.allocate_exact_size(size, Sense::drag());
            response.on_hover_cursor(egui::CursorIcon::Crosshair);

            // Handle input
            app.handle_input(ctx, canvas_rect);

            // Render the canvas
            let texture = app.canvas_texture(ctx);
            let painter = ui.painter_at(canvas_rect);
            painter.rect_filled(canvas_rect, 0.0, CANVAS_BACKGROUND);
            painter.image(
                texture,
                canvas_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
            ui.painter()
                .rect_stroke(canvas_rect.expand(0.75), 0.0, Stroke::new(1.5, CANVAS_BORDER));
        });
    });
}
