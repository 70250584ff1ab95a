// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Trash images whose tags fail a whitelist or hit a blacklist.

use anyhow::{bail, Result};
use clap::Parser;
use masktag::tools::tag_filter::{filter_directory, TagFilter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Filter images by their tags, moving rejected images to the trash")]
struct Args {
    /// Folder containing .tag files
    dir: PathBuf,

    /// Comma separated tags an image must all have
    #[arg(short, long)]
    whitelist: Option<String>,

    /// Comma separated tags an image must not have
    #[arg(short, long)]
    blacklist: Option<String>,

    /// Only report what would be deleted
    #[arg(long)]
    dry: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let filter = TagFilter::from_lists(args.whitelist.as_deref(), args.blacklist.as_deref());
    if filter.is_empty() {
        bail!("Give at least one of --whitelist or --blacklist");
    }

    let summary = filter_directory(&args.dir, &filter, args.dry)?;
    log::info!(
        "Scanned {} tag file(s), {} {}",
        summary.scanned,
        summary.discarded.len(),
        if args.dry { "would be discarded" } else { "discarded" }
    );
    Ok(())
}
