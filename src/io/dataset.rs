// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Folder of images being labelled, with a wrapping cursor.

use super::sidecar::is_image;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Outcome of moving to the next or previous image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved,
    /// Went past one end and continued from the other.
    Wrapped,
    /// Nothing to navigate.
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    folder: Option<PathBuf>,
    images: Vec<PathBuf>,
    current: usize,
}

impl Dataset {
    /// List the images directly inside `folder`, sorted by file name.
    pub fn open(folder: &Path) -> Result<Self> {
        let mut images = Vec::new();
        for entry in std::fs::read_dir(folder)
            .with_context(|| format!("Failed to read folder {}", folder.display()))?
        {
            let path = entry?.path();
            if path.is_file() && is_image(&path) {
                images.push(path);
            }
        }
        images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        log::info!("Opened {} with {} images", folder.display(), images.len());

        Ok(Self {
            folder: Some(folder.to_path_buf()),
            images,
            current: 0,
        })
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Path> {
        self.images.get(self.current).map(PathBuf::as_path)
    }

    pub fn next(&mut self) -> Navigation {
        if self.images.is_empty() {
            return Navigation::Empty;
        }
        self.current += 1;
        if self.current >= self.images.len() {
            self.current = 0;
            return Navigation::Wrapped;
        }
        Navigation::Moved
    }

    pub fn prev(&mut self) -> Navigation {
        if self.images.is_empty() {
            return Navigation::Empty;
        }
        if self.current == 0 {
            self.current = self.images.len() - 1;
            return Navigation::Wrapped;
        }
        self.current -= 1;
        Navigation::Moved
    }

    /// Jump to `index`, clamped to the list.
    pub fn set_index(&mut self, index: usize) {
        self.current = index.min(self.images.len().saturating_sub(1));
    }

    /// Forget the current image (after it was deleted) and stay at the same position.
    pub fn remove_current(&mut self) -> Option<PathBuf> {
        if self.images.is_empty() {
            return None;
        }
        let removed = self.images.remove(self.current);
        self.current = self.current.min(self.images.len().saturating_sub(1));
        Some(removed)
    }

    /// 1-based position, e.g. `(3/10)`.
    pub fn position_label(&self) -> String {
        if self.images.is_empty() {
            return String::from("(0/0)");
        }
        format!("({}/{})", self.current + 1, self.images.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn dataset_with(names: &[&str]) -> (tempfile::TempDir, Dataset) {
        let dir = tempdir().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let dataset = Dataset::open(dir.path()).unwrap();
        (dir, dataset)
    }

    #[test]
    fn test_open_lists_images_only() {
        let (dir, dataset) = dataset_with(&["b.jpg", "a.png", "a.txt", "c.JPEG", "d.gif"]);
        std::fs::create_dir(dir.path().join("mask.png")).unwrap();
        let names: Vec<_> = (0..dataset.len())
            .map(|i| {
                let mut d = dataset.clone();
                d.set_index(i);
                d.current().unwrap().file_name().unwrap().to_string_lossy().to_string()
            })
            .collect();
        assert_eq!(names, vec!["a.png", "b.jpg", "c.JPEG"]);
        assert_eq!(dataset.folder(), Some(dir.path()));
    }

    #[test]
    fn test_navigation_wraps() {
        let (_dir, mut dataset) = dataset_with(&["a.png", "b.png", "c.png"]);
        assert_eq!(dataset.prev(), Navigation::Wrapped);
        assert_eq!(dataset.index(), 2);
        assert_eq!(dataset.next(), Navigation::Wrapped);
        assert_eq!(dataset.index(), 0);
        assert_eq!(dataset.next(), Navigation::Moved);
        assert_eq!(dataset.position_label(), "(2/3)");
    }

    #[test]
    fn test_empty_dataset() {
        let (_dir, mut dataset) = dataset_with(&[]);
        assert_eq!(dataset.next(), Navigation::Empty);
        assert_eq!(dataset.prev(), Navigation::Empty);
        assert!(dataset.current().is_none());
        assert!(dataset.remove_current().is_none());
        assert_eq!(dataset.position_label(), "(0/0)");
    }

    #[test]
    fn test_set_index_clamps() {
        let (_dir, mut dataset) = dataset_with(&["a.png", "b.png"]);
        dataset.set_index(1);
        assert_eq!(dataset.index(), 1);
        dataset.set_index(99);
        assert_eq!(dataset.index(), 1);
    }

    #[test]
    fn test_remove_current_clamps_cursor() {
        let (_dir, mut dataset) = dataset_with(&["a.png", "b.png", "c.png"]);
        dataset.set_index(2);
        let removed = dataset.remove_current().unwrap();
        assert!(removed.ends_with("c.png"));
        assert_eq!(dataset.index(), 1);

        dataset.set_index(0);
        dataset.remove_current();
        assert!(dataset.current().unwrap().ends_with("b.png"));
        dataset.remove_current();
        assert!(dataset.is_empty());
        assert_eq!(dataset.index(), 0);
    }
}
