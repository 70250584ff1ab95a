// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! MaskTag - image dataset labeling
//!
//! A cross-platform desktop application for painting masks and editing
//! captions and tags for folders of training images.

use anyhow::Result;
use clap::Parser;
use masktag::app::LabelerApp;
use masktag::config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Paint masks and edit captions and tags for a folder of images")]
struct Args {
    /// Folder to open (defaults to the last opened folder)
    folder: Option<PathBuf>,

    /// Settings file to use instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings_path = args.config.or_else(config::default_path);
    let settings = settings_path
        .as_deref()
        .map(config::load_from_path)
        .unwrap_or_default();

    // Initialize logging, RUST_LOG overrides the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(settings.log_level.as_str())).init();

    let folder = args.folder.or_else(|| settings.last_folder.clone());
    log::info!("Settings file: {:?}", settings_path);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 900.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("MaskTag"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "MaskTag",
        options,
        Box::new(|_cc| Ok(Box::new(LabelerApp::new(settings, settings_path, folder)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
