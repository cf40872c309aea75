//! I/O helpers for RGBA images and JSON.
//!
//! - `load_rgba_image`: read a PNG/JPEG into an owned `RasterImage`.
//! - `save_rgba_png`: write a `RasterImage` to a PNG, keeping alpha.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::RasterImage;
use image::RgbaImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to RGBA8.
pub fn load_rgba_image(path: &Path) -> Result<RasterImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgba8();
    let w = img.width() as usize;
    let h = img.height() as usize;
    RasterImage::from_raw(w, h, img.into_raw())
        .ok_or_else(|| format!("Unexpected pixel buffer size in {}", path.display()))
}

/// Save an RGBA buffer to a PNG.
pub fn save_rgba_png(image: &RasterImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let buffer = RgbaImage::from_raw(image.w as u32, image.h as u32, image.data.clone())
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    buffer
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
