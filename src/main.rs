#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe_sketchpad::{Brush, BrushConfig, PaintApp, PaintSession, SketchConfig, SketchResult};

fn load_session() -> SketchResult<PaintSession> {
    let config = SketchConfig::from_env()?;
    Ok(PaintSession::new(&config)?)
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let session = match load_session() {
        Ok(session) => session,
        Err(err) => {
            log::error!("{err}; falling back to the default canvas");
            PaintSession::with_brush(&SketchConfig::default(), Brush::new(BrushConfig::default()))
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 520.0])
            .with_min_inner_size([820.0, 440.0])
            .with_title("Sketchpad"),
        ..Default::default()
    };
    eframe::run_native(
        "eframe sketchpad",
        native_options,
        Box::new(move |cc| Ok(Box::new(PaintApp::new(cc, session)))),
    )
}
