// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sidecar file layout.
//!
//! Every image `<folder>/<name>.<ext>` may have:
//! - a caption in `<folder>/<name>.txt` or `<folder>/<name>.caption`
//! - tags in `<folder>/<name>.tag` or `<folder>/<name>.tags`
//! - a mask in `<folder>/mask/<name>.<ext>`
//!
//! A missing sidecar is simply "not created yet".

use crate::models::mask::MaskLayer;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Name of the per-folder directory holding masks.
pub const MASK_DIR: &str = "mask";

/// Text sidecar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Caption,
    Tags,
}

impl TextKind {
    /// Extensions in lookup order; the first is used when creating a file.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            TextKind::Caption => &["txt", "caption"],
            TextKind::Tags => &["tag", "tags"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextKind::Caption => "caption",
            TextKind::Tags => "tags",
        }
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// True for `.png`, `.jpg` and `.jpeg` files (any case).
pub fn is_image(path: &Path) -> bool {
    has_extension(path, &IMAGE_EXTENSIONS)
}

/// True for caption and tag files.
pub fn is_text_sidecar(path: &Path) -> bool {
    has_extension(path, TextKind::Caption.extensions())
        || has_extension(path, TextKind::Tags.extensions())
}

/// Text loaded from a sidecar together with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSidecar {
    pub path: PathBuf,
    pub text: String,
}

/// What happened when a mask was saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskSave {
    Written,
    /// The mask was empty and the old file was deleted.
    Removed,
    /// The mask was empty and no file existed.
    Skipped,
}

/// Sidecar paths for one image.
#[derive(Debug, Clone)]
pub struct Sidecars {
    image: PathBuf,
}

impl Sidecars {
    pub fn for_image(image: &Path) -> Self {
        Self {
            image: image.to_path_buf(),
        }
    }

    pub fn image(&self) -> &Path {
        &self.image
    }

    /// Candidate paths for a text sidecar, in lookup order.
    pub fn candidates(&self, kind: TextKind) -> Vec<PathBuf> {
        kind.extensions()
            .iter()
            .map(|ext| self.image.with_extension(ext))
            .collect()
    }

    /// Path used when a text sidecar is created.
    pub fn primary_path(&self, kind: TextKind) -> PathBuf {
        self.image.with_extension(kind.extensions()[0])
    }

    /// The first existing text sidecar of this kind.
    pub fn find(&self, kind: TextKind) -> Option<PathBuf> {
        self.candidates(kind).into_iter().find(|p| p.is_file())
    }

    pub fn read(&self, kind: TextKind) -> Result<Option<TextSidecar>> {
        let Some(path) = self.find(kind) else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(TextSidecar { path, text }))
    }

    /// Create an empty sidecar unless one already exists. Returns its path.
    pub fn create(&self, kind: TextKind) -> Result<PathBuf> {
        if let Some(existing) = self.find(kind) {
            return Ok(existing);
        }
        let path = self.primary_path(kind);
        std::fs::write(&path, "")
            .with_context(|| format!("Failed to create {}", path.display()))?;
        log::info!("Created {} file {}", kind.label(), path.display());
        Ok(path)
    }

    /// Autosave: write to `target` (the file the text came from) or the primary path.
    pub fn write(&self, kind: TextKind, target: Option<&Path>, text: &str) -> Result<PathBuf> {
        let path = target
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.primary_path(kind));
        std::fs::write(&path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Saved {} to {}", kind.label(), path.display());
        Ok(path)
    }

    /// `<folder>/mask/<image file name>`.
    pub fn mask_path(&self) -> PathBuf {
        let folder = self.image.parent().unwrap_or_else(|| Path::new(""));
        let name = self.image.file_name().unwrap_or_default();
        folder.join(MASK_DIR).join(name)
    }

    /// Load the saved mask scaled to `width` x `height`, if there is one.
    pub fn load_mask(&self, width: u32, height: u32) -> Result<Option<MaskLayer>> {
        let path = self.mask_path();
        if !path.is_file() {
            return Ok(None);
        }
        let decoded = image::open(&path)
            .with_context(|| format!("Failed to decode mask {}", path.display()))?;
        log::debug!("Loaded mask {}", path.display());
        Ok(Some(MaskLayer::from_image(decoded, width, height)))
    }

    /// Save the mask next to the image. An empty mask removes the file instead.
    pub fn save_mask(&self, layer: &MaskLayer) -> Result<MaskSave> {
        let path = self.mask_path();
        if layer.is_blank() {
            if path.is_file() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                log::info!("Removed empty mask {}", path.display());
                return Ok(MaskSave::Removed);
            }
            return Ok(MaskSave::Skipped);
        }

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        // Masks are opaque; RGB keeps JPEG output possible
        image::DynamicImage::ImageRgba8(layer.pixels().clone())
            .to_rgb8()
            .save(&path)
            .with_context(|| format!("Failed to save mask {}", path.display()))?;
        log::debug!("Saved mask {}", path.display());
        Ok(MaskSave::Written)
    }

    /// Every sidecar of this image that exists on disk.
    pub fn existing_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .candidates(TextKind::Caption)
            .into_iter()
            .chain(self.candidates(TextKind::Tags))
            .filter(|p| p.is_file())
            .collect();
        let mask = self.mask_path();
        if mask.is_file() {
            files.push(mask);
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::brush::MASK_COLOR;
    use crate::models::mask::Point;
    use tempfile::tempdir;

    #[test]
    fn test_extension_checks() {
        assert!(is_image(Path::new("a/b.png")));
        assert!(is_image(Path::new("b.JPEG")));
        assert!(!is_image(Path::new("b.gif")));
        assert!(!is_image(Path::new("noext")));
        assert!(is_text_sidecar(Path::new("b.caption")));
        assert!(is_text_sidecar(Path::new("b.tags")));
        assert!(!is_text_sidecar(Path::new("b.png")));
    }

    #[test]
    fn test_paths_follow_layout() {
        let sidecars = Sidecars::for_image(Path::new("/data/cat.01.png"));
        assert_eq!(
            sidecars.candidates(TextKind::Caption),
            vec![PathBuf::from("/data/cat.01.txt"), PathBuf::from("/data/cat.01.caption")]
        );
        assert_eq!(sidecars.primary_path(TextKind::Tags), PathBuf::from("/data/cat.01.tag"));
        assert_eq!(sidecars.mask_path(), PathBuf::from("/data/mask/cat.01.png"));
    }

    #[test]
    fn test_missing_sidecar_is_none() {
        let dir = tempdir().unwrap();
        let sidecars = Sidecars::for_image(&dir.path().join("a.png"));
        assert!(sidecars.read(TextKind::Caption).unwrap().is_none());
        assert!(sidecars.load_mask(4, 4).unwrap().is_none());
        assert!(sidecars.existing_files().is_empty());
    }

    #[test]
    fn test_caption_lookup_order() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("a.png");
        std::fs::write(dir.path().join("a.caption"), "from caption").unwrap();
        let sidecars = Sidecars::for_image(&image);

        let loaded = sidecars.read(TextKind::Caption).unwrap().unwrap();
        assert_eq!(loaded.text, "from caption");
        assert_eq!(loaded.path, dir.path().join("a.caption"));

        std::fs::write(dir.path().join("a.txt"), "from txt").unwrap();
        let loaded = sidecars.read(TextKind::Caption).unwrap().unwrap();
        assert_eq!(loaded.text, "from txt");
    }

    #[test]
    fn test_create_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("a.jpg");
        let sidecars = Sidecars::for_image(&image);

        let created = sidecars.create(TextKind::Tags).unwrap();
        assert_eq!(created, dir.path().join("a.tag"));
        assert_eq!(std::fs::read_to_string(&created).unwrap(), "");

        std::fs::write(&created, "red, blue").unwrap();
        sidecars.create(TextKind::Tags).unwrap();
        assert_eq!(std::fs::read_to_string(&created).unwrap(), "red, blue");
    }

    #[test]
    fn test_write_goes_back_to_source_file() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("a.png");
        let sidecars = Sidecars::for_image(&image);
        let source = dir.path().join("a.tags");
        std::fs::write(&source, "old").unwrap();

        let written = sidecars.write(TextKind::Tags, Some(&source), "new").unwrap();
        assert_eq!(written, source);
        assert_eq!(std::fs::read_to_string(&source).unwrap(), "new");
        assert!(!dir.path().join("a.tag").exists());

        let written = sidecars.write(TextKind::Caption, None, "a cat").unwrap();
        assert_eq!(written, dir.path().join("a.txt"));
    }

    #[test]
    fn test_mask_save_and_load() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("a.png");
        let sidecars = Sidecars::for_image(&image);

        let mut layer = MaskLayer::blank(16, 8);
        layer.stamp(Point::new(4.0, 4.0), 4.0, MASK_COLOR);
        assert_eq!(sidecars.save_mask(&layer).unwrap(), MaskSave::Written);
        assert!(dir.path().join("mask").join("a.png").is_file());

        let loaded = sidecars.load_mask(16, 8).unwrap().unwrap();
        assert_eq!(loaded, layer);
        assert_eq!(sidecars.existing_files(), vec![sidecars.mask_path()]);
    }

    #[test]
    fn test_blank_mask_removes_file() {
        let dir = tempdir().unwrap();
        let sidecars = Sidecars::for_image(&dir.path().join("a.png"));
        let blank = MaskLayer::blank(4, 4);
        assert_eq!(sidecars.save_mask(&blank).unwrap(), MaskSave::Skipped);

        let mut painted = blank.clone();
        painted.stamp(Point::new(1.0, 1.0), 2.0, MASK_COLOR);
        sidecars.save_mask(&painted).unwrap();
        assert_eq!(sidecars.save_mask(&blank).unwrap(), MaskSave::Removed);
        assert!(!sidecars.mask_path().exists());
    }

    #[test]
    fn test_jpeg_image_gets_jpeg_mask() {
        let dir = tempdir().unwrap();
        let sidecars = Sidecars::for_image(&dir.path().join("a.jpg"));

        let mut layer = MaskLayer::blank(32, 32);
        layer.stamp(Point::new(16.0, 16.0), 12.0, MASK_COLOR);
        assert_eq!(sidecars.save_mask(&layer).unwrap(), MaskSave::Written);

        let path = dir.path().join("mask").join("a.jpg");
        assert!(path.is_file());
        assert_eq!(image::ImageFormat::from_path(&path).unwrap(), image::ImageFormat::Jpeg);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        // JPEG is lossy, so only check the stroke survived
        let loaded = sidecars.load_mask(32, 32).unwrap().unwrap();
        assert!(!loaded.is_blank());
        assert!(loaded.pixels().get_pixel(16, 16).0[0] < 64);
        assert!(loaded.pixels().get_pixel(0, 0).0[0] > 192);

        assert_eq!(sidecars.save_mask(&MaskLayer::blank(32, 32)).unwrap(), MaskSave::Removed);
        assert!(!path.exists());
    }
}
