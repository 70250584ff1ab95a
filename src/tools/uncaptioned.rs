// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Find files that have neither a caption nor a tag sidecar.

use crate::io::sidecar::{is_text_sidecar, Sidecars, TextKind};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Files directly inside `dir` with no `.txt`, `.caption`, `.tag` or `.tags` sidecar.
pub fn find_uncaptioned(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut missing = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() || is_text_sidecar(&path) {
            continue;
        }
        let sidecars = Sidecars::for_image(&path);
        let has_text = [TextKind::Caption, TextKind::Tags]
            .into_iter()
            .any(|kind| sidecars.find(kind).is_some());
        if !has_text {
            missing.push(path);
        }
    }
    missing.sort();
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lists_files_without_sidecars() {
        let dir = tempdir().unwrap();
        for name in ["a.png", "a.txt", "b.jpg", "b.tags", "c.png", "d.jpeg", "d.caption", "e.webp"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("mask")).unwrap();

        let missing = find_uncaptioned(dir.path()).unwrap();
        assert_eq!(missing, vec![dir.path().join("c.png"), dir.path().join("e.webp")]);
    }

    #[test]
    fn test_orphan_sidecars_are_not_reported() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("lonely.tag"), b"x").unwrap();
        assert!(find_uncaptioned(dir.path()).unwrap().is_empty());
    }
}
