use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::brush::{BrushConfig, BrushKind, clamp_size};
use crate::error::ConfigError;
use crate::grid::DEFAULT_SPACING;
use crate::history::MAX_UNDO;

/// Environment variable naming a JSON config file to load at start-up
pub const CONFIG_ENV: &str = "SKETCHPAD_CONFIG";

/// Largest canvas side accepted from a config file
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// We derive Deserialize so every field can be overridden from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields keep their default values
pub struct SketchConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub max_undo: usize,
    pub grid_spacing: u32,
    pub export_file_name: String,
    pub brush: BrushSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    pub kind: BrushKind,
    /// `#RRGGBB`
    pub color: String,
    pub size: f32,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 380,
            max_undo: MAX_UNDO,
            grid_spacing: DEFAULT_SPACING,
            export_file_name: "my_drawing.png".to_owned(),
            brush: BrushSettings::default(),
        }
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            kind: BrushKind::Round,
            color: "#6C63FF".to_owned(),
            size: 6.0,
        }
    }
}

impl SketchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads the file named by `SKETCHPAD_CONFIG`, or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("loading config from {}", Path::new(&path).display());
                Self::load(Path::new(&path))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "canvas_width/canvas_height",
                reason: format!("{}x{} is empty", self.canvas_width, self.canvas_height),
            });
        }
        if self.canvas_width > MAX_CANVAS_SIDE || self.canvas_height > MAX_CANVAS_SIDE {
            return Err(ConfigError::InvalidSetting {
                field: "canvas_width/canvas_height",
                reason: format!(
                    "{}x{} exceeds {MAX_CANVAS_SIDE}px per side",
                    self.canvas_width, self.canvas_height
                ),
            });
        }
        if self.max_undo == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "max_undo",
                reason: "must keep at least one snapshot".to_owned(),
            });
        }
        if self.grid_spacing == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "grid_spacing",
                reason: "must be at least one pixel".to_owned(),
            });
        }
        if clamp_size(self.brush.size).is_none() {
            return Err(ConfigError::InvalidSetting {
                field: "brush.size",
                reason: format!("{} is not a number", self.brush.size),
            });
        }
        parse_hex_color(&self.brush.color)?;
        Ok(())
    }

    /// The initial brush, with its size clamped into range.
    pub fn brush_config(&self) -> Result<BrushConfig, ConfigError> {
        Ok(BrushConfig {
            kind: self.brush.kind,
            color: parse_hex_color(&self.brush.color)?,
            size: clamp_size(self.brush.size).unwrap_or(BrushConfig::default().size),
        })
    }
}

/// Parses `#RRGGBB` (the leading `#` is optional).
pub fn parse_hex_color(text: &str) -> Result<Color32, ConfigError> {
    let hex = text.trim().trim_start_matches('#');
    let invalid = || ConfigError::InvalidColor(text.to_owned());
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Formats an opaque colour as `#RRGGBB`.
pub fn to_hex_color(color: Color32) -> String {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    format!("#{r:02X}{g:02X}{b:02X}")
}
