// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fetch tags for downloaded booru images.
//!
//! Images are expected to be named `<prefix>_<post id>.<ext>`. For each image
//! without a `.tag` file the post JSON is fetched and its character and
//! general tags are written as one comma separated line.

use crate::io::sidecar::{is_image, Sidecars, TextKind, MASK_DIR};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use walkdir::WalkDir;

pub const DEFAULT_BASE_URL: &str = "https://safebooru.donmai.us/posts";

const USER_AGENT: &str = concat!("masktag/", env!("CARGO_PKG_VERSION"));

/// The fields of a post we care about.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Post {
    #[serde(default)]
    pub tag_string_character: String,
    #[serde(default)]
    pub tag_string_general: String,
}

impl Post {
    /// `"<characters>, <general tags>"` with space separated tags turned into a comma list.
    pub fn tag_line(&self) -> String {
        let general = self.tag_string_general.split_whitespace().collect::<Vec<_>>().join(", ");
        let character = self.tag_string_character.trim();
        match (character.is_empty(), general.is_empty()) {
            (true, _) => general,
            (false, true) => character.to_string(),
            (false, false) => format!("{character}, {general}"),
        }
    }
}

/// Post id from a file name like `safebooru_12345.jpg`.
pub fn post_id(file_name: &str) -> Option<&str> {
    let stem = Path::new(file_name).file_stem()?.to_str()?;
    let id = stem.split('_').nth(1)?;
    if id.is_empty() {
        return None;
    }
    Some(id)
}

pub fn parse_post(json: &str) -> Result<Post> {
    Ok(serde_json::from_str(json)?)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub written: usize,
    /// Images that already had a tag file
    pub existing: usize,
    pub failed: usize,
}

pub struct TagScraper {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TagScraper {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn fetch_post(&self, id: &str) -> Result<Post> {
        let url = format!("{}/{}.json", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Request to {url} failed"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("Error fetching tags for post {}, status code: {}", id, status);
        }
        let body = response
            .text()
            .with_context(|| format!("Failed to read response from {url}"))?;
        parse_post(&body).with_context(|| format!("Invalid post JSON from {url}"))
    }

    /// Tag one image unless it already has a `.tag` file. Returns true when a file was written.
    pub fn scrape_image(&self, image: &Path) -> Result<bool> {
        let sidecars = Sidecars::for_image(image);
        let tag_file = sidecars.primary_path(TextKind::Tags);
        if tag_file.exists() {
            return Ok(false);
        }
        let file_name = image.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let Some(id) = post_id(file_name) else {
            bail!("No post id in file name: {}", image.display());
        };
        let post = self.fetch_post(id)?;
        sidecars.write(TextKind::Tags, Some(&tag_file), &post.tag_line())?;
        log::info!("Tagged {}", image.display());
        Ok(true)
    }

    /// Tag every image below `dir`, skipping mask folders. Failures are logged and counted.
    pub fn scrape_directory(&self, dir: &Path) -> Result<ScrapeSummary> {
        let mut summary = ScrapeSummary::default();
        let walker = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && e.file_name() == MASK_DIR));
        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
            if entry.file_type().is_dir() {
                log::info!("Scanning {}", entry.path().display());
                continue;
            }
            if !is_image(entry.path()) {
                continue;
            }
            match self.scrape_image(entry.path()) {
                Ok(true) => summary.written += 1,
                Ok(false) => summary.existing += 1,
                Err(e) => {
                    log::warn!("{:#}", e);
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }
}
