// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module decodes dataset images and converts them to RGBA pixels
//! suitable for display in egui.

use anyhow::{Context, Result};
use std::path::Path;

/// A decoded image ready for texture upload.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row major
    pub pixels: Vec<u8>,
}

/// Decode an image file into RGBA pixels.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Size of a file on disk in bytes, 0 when it can't be read.
pub fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_load_image_reports_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("img.png");
        RgbaImage::from_pixel(5, 3, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (5, 3));
        assert_eq!(loaded.pixels.len(), 5 * 3 * 4);
        assert_eq!(&loaded.pixels[0..4], &[10, 20, 30, 255]);
        assert!(file_size(&path) > 0);
    }

    #[test]
    fn test_load_invalid_image_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_image(&path).is_err());
        assert_eq!(file_size(&dir.path().join("missing.png")), 0);
    }
}
