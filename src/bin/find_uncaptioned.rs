// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! List images that have neither a caption nor a tag file.

use anyhow::Result;
use clap::Parser;
use masktag::io::trash::delete_image;
use masktag::tools::uncaptioned::find_uncaptioned;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Find images without a caption or tag file")]
struct Args {
    /// Folder to scan
    dir: PathBuf,

    /// Move the images found to the trash
    #[arg(long)]
    trash: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let images = find_uncaptioned(&args.dir)?;
    for image in &images {
        println!("{}", image.display());
        if args.trash {
            delete_image(image)?;
        }
    }
    log::info!("{} image(s) without captions", images.len());
    Ok(())
}
