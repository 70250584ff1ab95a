// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Deleting images by moving them to the operating system trash.

use super::sidecar::Sidecars;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// The image and every sidecar of it that currently exists.
pub fn deletion_targets(image: &Path) -> Vec<PathBuf> {
    let mut targets = Vec::new();
    if image.exists() {
        targets.push(image.to_path_buf());
    }
    targets.extend(Sidecars::for_image(image).existing_files());
    targets
}

/// Move files to the trash, skipping ones that no longer exist.
pub fn move_to_trash(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        if !path.exists() {
            continue;
        }
        log::info!("Deleting {}", path.display());
        ::trash::delete(path).with_context(|| format!("Failed to trash {}", path.display()))?;
    }
    Ok(())
}

/// Trash an image together with its caption, tag and mask files.
pub fn delete_image(image: &Path) -> Result<Vec<PathBuf>> {
    let targets = deletion_targets(image);
    move_to_trash(&targets)?;
    Ok(targets)
}
