// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persistent application settings.
//!
//! Settings live in `<config dir>/masktag/settings.yaml`. A missing or
//! unreadable file falls back to the defaults.

use crate::models::brush::DEFAULT_BRUSH_SIZE;
use crate::models::history::DEFAULT_CAPACITY;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "masktag";
const SETTINGS_FILE: &str = "settings.yaml";

/// Mask overlay opacity used for the multiply composite.
pub const DEFAULT_MASK_OPACITY: f32 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Brush diameter in image pixels
    pub brush_size: f32,
    /// Number of mask snapshots kept for undo
    pub history_capacity: usize,
    pub mask_opacity: f32,
    /// Folder reopened on start when none is given on the command line
    pub last_folder: Option<PathBuf>,
    /// Default log filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            brush_size: DEFAULT_BRUSH_SIZE,
            history_capacity: DEFAULT_CAPACITY,
            mask_opacity: DEFAULT_MASK_OPACITY,
            last_folder: None,
            log_level: String::from("info"),
        }
    }
}

/// `<config dir>/masktag/settings.yaml`, if the platform has a config directory.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(SETTINGS_FILE))
}

/// Load settings, falling back to defaults when the file is missing or invalid.
pub fn load_from_path(path: &Path) -> AppSettings {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return AppSettings::default(),
    };
    match serde_yaml::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring invalid settings {}: {}", path.display(), e);
            AppSettings::default()
        }
    }
}

pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let yaml = serde_yaml::to_string(settings)?;
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Seconds without further changes before settings are written.
pub const SAVE_DELAY_SECONDS: f64 = 0.5;

/// Delays settings writes until a burst of changes (slider drag, wheel ticks) settles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SaveSchedule {
    changed_at: Option<f64>,
}

impl SaveSchedule {
    /// Note a change at time `now`, restarting the delay.
    pub fn mark(&mut self, now: f64) {
        self.changed_at = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.changed_at.is_some()
    }

    /// True once the delay has passed and nothing is `busy`. Clears the pending change.
    pub fn take_due(&mut self, now: f64, busy: bool) -> bool {
        match self.changed_at {
            Some(at) if !busy && now - at >= SAVE_DELAY_SECONDS => {
                self.changed_at = None;
                true
            }
            _ => false,
        }
    }
}
