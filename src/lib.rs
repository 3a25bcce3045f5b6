#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod history;
pub mod input;
pub mod panels;
pub mod preview;
pub mod session;
pub mod stroke;
pub mod surface;

pub use app::PaintApp;
pub use brush::{Brush, BrushConfig, BrushKind};
pub use config::SketchConfig;
pub use error::{ConfigError, ExportError, SketchError, SketchResult};
pub use history::SnapshotHistory;
pub use input::{InputEvent, InputHandler, Shortcut};
pub use session::PaintSession;
pub use stroke::{StrokeContext, StrokeController, StrokeState};
pub use surface::{DrawOp, PixelSurface, Region, Snapshot};
