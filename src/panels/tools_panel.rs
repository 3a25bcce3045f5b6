use egui::color_picker::{Alpha, color_edit_button_srgba};
use egui::{Button, ComboBox, Slider};

use crate::PaintApp;
use crate::brush::{BrushKind, MAX_SIZE, MIN_SIZE};
use crate::config::to_hex_color;
use crate::preview::PREVIEW_SIZE;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Brush");
            ui.separator();

            let current = app.session().brush_config();
            let mut edited = current;

            ui.horizontal(|ui| {
                ui.label("Brush Color:");
                color_edit_button_srgba(ui, &mut edited.color, Alpha::Opaque);
                ui.monospace(to_hex_color(edited.color));
            });
            ui.add(
                Slider::new(&mut edited.size, MIN_SIZE..=MAX_SIZE)
                    .step_by(1.0)
                    .text("Brush Size"),
            );
            ComboBox::from_label("Brush Shape")
                .selected_text(edited.kind.label())
                .show_ui(ui, |ui| {
                    for kind in BrushKind::ALL {
                        ui.selectable_value(&mut edited.kind, kind, kind.label());
                    }
                });

            if edited.color != current.color {
                app.session_mut().set_color(edited.color);
            }
            if edited.size != current.size {
                app.session_mut().set_size(edited.size);
            }
            if edited.kind != current.kind {
                log::info!("brush shape selected from UI: {}", edited.kind.label());
                app.session_mut().set_kind(edited.kind);
            }

            if let Some(preview) = app.preview_texture(ctx) {
                let side = PREVIEW_SIZE as f32;
                ui.add_space(4.0);
                ui.image((preview, egui::vec2(side, side)));
            }

            ui.separator();

            ui.horizontal_wrapped(|ui| {
                let can_undo = app.session().history().can_undo();
                if ui.add_enabled(can_undo, Button::new("Undo")).clicked() {
                    app.session_mut().undo();
                }
                if ui.button("Download").clicked() {
                    app.export();
                }
                if ui.button("Clear Canvas").clicked() {
                    app.session_mut().clear();
                }
                let grid = app.session().grid();
                let grid_on = grid.is_visible();
                let grid_hint = format!("{} px grid", grid.spacing());
                if ui
                    .selectable_label(grid_on, "Toggle Grid")
                    .on_hover_text(grid_hint)
                    .clicked()
                {
                    app.session_mut().toggle_grid();
                }
            });

            ui.separator();

            let history = app.session().history();
            ui.label(format!("Undo steps: {}/{}", history.len(), history.capacity()));
            ui.small("Ctrl+Z undo, Ctrl+S download");
            if let Some(status) = app.status() {
                ui.label(status);
            }
        });
}
