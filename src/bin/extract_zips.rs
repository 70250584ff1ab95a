// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Extract every zip archive found below a folder into one output folder.

use anyhow::Result;
use clap::Parser;
use masktag::tools::extract::extract_zips;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Extract zip files from a folder (or a single zip) into an output folder")]
struct Args {
    /// Zip file or folder containing zip files
    input: PathBuf,

    /// Folder to extract into
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let summary = extract_zips(&args.input, &args.output)?;
    log::info!(
        "Extracted {} archive(s) into {}, skipped {}",
        summary.extracted,
        args.output.display(),
        summary.skipped
    );
    Ok(())
}
