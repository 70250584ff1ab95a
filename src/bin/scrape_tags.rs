// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Write `.tag` files for booru downloads by fetching each post's tags.

use anyhow::Result;
use clap::Parser;
use masktag::tools::scrape::{TagScraper, DEFAULT_BASE_URL};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Fetch tags for images named <site>_<post id>.<ext>")]
struct Args {
    /// Folder to scan recursively
    dir: PathBuf,

    /// Posts endpoint, `<base-url>/<id>.json` is requested per image
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scraper = TagScraper::new(&args.base_url)?;
    let summary = scraper.scrape_directory(&args.dir)?;
    log::info!(
        "Wrote {} tag file(s), {} already tagged, {} failed",
        summary.written,
        summary.existing,
        summary.failed
    );
    Ok(())
}
