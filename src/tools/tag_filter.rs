// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Discard images whose tag files fail a whitelist/blacklist check.
//!
//! Every `.tag` file below a directory is tested. When it is rejected, all
//! files sharing its base name (the image, caption, tags) and the image's
//! mask are moved to the trash.

use crate::io::sidecar::{is_image, Sidecars};
use crate::io::trash;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    /// Tags that must all be present
    pub whitelist: Vec<String>,
    /// Tags that must not be present
    pub blacklist: Vec<String>,
}

impl TagFilter {
    /// Build from comma separated lists.
    pub fn from_lists(whitelist: Option<&str>, blacklist: Option<&str>) -> Self {
        Self {
            whitelist: whitelist.map(parse_list).unwrap_or_default(),
            blacklist: blacklist.map(parse_list).unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.whitelist.is_empty() && self.blacklist.is_empty()
    }

    /// True when the tag text misses a required tag or contains a forbidden one.
    pub fn rejects(&self, tags: &str) -> bool {
        let present: Vec<&str> = tags.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
        let has = |tag: &String| present.iter().any(|p| *p == tag.as_str());
        !self.whitelist.iter().all(has) || self.blacklist.iter().any(has)
    }
}

fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// All files named `<stem>.*` next to `tag_file`, plus the mask of any such image.
pub fn related_files(tag_file: &Path) -> Result<Vec<PathBuf>> {
    let Some(stem) = tag_file.file_stem().and_then(|s| s.to_str()) else {
        return Ok(vec![tag_file.to_path_buf()]);
    };
    let dir = tag_file.parent().unwrap_or_else(|| Path::new("."));
    let prefix = format!("{stem}.");

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(&prefix) && !n[prefix.len()..].contains('.'))
            .unwrap_or(false);
        if path.is_file() && matches {
            files.push(path);
        }
    }

    let masks: Vec<PathBuf> = files
        .iter()
        .filter(|p| is_image(p))
        .map(|p| Sidecars::for_image(p).mask_path())
        .filter(|m| m.is_file())
        .collect();
    files.extend(masks);
    files.sort();
    Ok(files)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub scanned: usize,
    /// Files trashed (or that would be, in a dry run)
    pub discarded: Vec<PathBuf>,
}

/// Apply `filter` to every `.tag` file below `dir`.
pub fn filter_directory(dir: &Path, filter: &TagFilter, dry_run: bool) -> Result<FilterSummary> {
    let mut summary = FilterSummary::default();
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();
        let is_tag_file = path.extension().and_then(|e| e.to_str()) == Some("tag");
        if !entry.file_type().is_file() || !is_tag_file {
            continue;
        }
        summary.scanned += 1;

        let tags = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if !filter.rejects(&tags) {
            continue;
        }

        let files = related_files(path)?;
        if dry_run {
            for file in &files {
                log::info!("Would delete {}", file.display());
            }
        } else {
            trash::move_to_trash(&files)?;
        }
        summary.discarded.extend(files);
    }
    Ok(summary)
}
