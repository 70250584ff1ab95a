// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Copy a random sample of files from one folder to another.

use anyhow::Result;
use clap::Parser;
use masktag::tools::sample::copy_random;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Copy N random files from an input folder to an output folder")]
struct Args {
    /// Folder to sample from
    input: PathBuf,

    /// Folder to copy into (created if missing)
    output: PathBuf,

    /// Number of files to copy
    #[arg(short = 'n', long)]
    count: usize,

    /// Seed for a reproducible sample
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let copied = copy_random(&args.input, &args.output, args.count, &mut rng)?;
    log::info!("Copied {} file(s) to {}", copied.len(), args.output.display());
    Ok(())
}
