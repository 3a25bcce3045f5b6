use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a [`crate::config::SketchConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid JSON for the expected shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A colour was not of the form `#RRGGBB`
    #[error("invalid colour {0:?}, expected #RRGGBB")]
    InvalidColor(String),
    /// A numeric setting is outside the range the canvas can work with
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: String,
    },
}

/// Errors raised while serializing the surface to an image file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Umbrella error for the application shell
#[derive(Debug, Error)]
pub enum SketchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type SketchResult<T> = Result<T, SketchError>;
