use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;

use crate::error::ExportError;
use crate::surface::PixelSurface;

/// Encodes the whole surface as PNG bytes.
pub fn encode_png(surface: &PixelSurface) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    surface
        .image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Writes the surface to `path` as a PNG file.
pub fn save_png(surface: &PixelSurface, path: &Path) -> Result<(), ExportError> {
    let bytes = encode_png(surface)?;
    std::fs::write(path, &bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "exported {}x{} drawing to {} ({} bytes)",
        surface.width(),
        surface.height(),
        path.display(),
        bytes.len()
    );
    Ok(())
}
