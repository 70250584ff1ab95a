// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Flatten a tree of zip archives into one output directory.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub extracted: usize,
    /// Archives that could not be read
    pub skipped: usize,
}

/// Extract one archive into `output`.
pub fn extract_archive(archive: &Path, output: &Path) -> Result<()> {
    let file = File::open(archive).with_context(|| format!("Failed to open {}", archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("Bad zip file: {}", archive.display()))?;
    zip.extract(output)
        .with_context(|| format!("Failed to extract {}", archive.display()))?;
    log::info!("Extracted {} ({} entries)", archive.display(), zip.len());
    Ok(())
}

/// Extract `input` if it is a zip file, otherwise every zip file found below it.
///
/// Unreadable archives found while walking a directory are logged and skipped.
pub fn extract_zips(input: &Path, output: &Path) -> Result<ExtractSummary> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    if input.is_file() && is_zip(input) {
        extract_archive(input, output)?;
        return Ok(ExtractSummary {
            extracted: 1,
            skipped: 0,
        });
    }

    let mut summary = ExtractSummary::default();
    for entry in WalkDir::new(input) {
        let entry = entry.with_context(|| format!("Failed to walk {}", input.display()))?;
        if !entry.file_type().is_file() || !is_zip(entry.path()) {
            continue;
        }
        match extract_archive(entry.path(), output) {
            Ok(()) => summary.extracted += 1,
            Err(e) => {
                log::warn!("{:#}", e);
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, name: &str, content: &[u8]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content).unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_extracts_nested_archives_flat() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        std::fs::create_dir(input.path().join("sub")).unwrap();
        write_zip(&input.path().join("one.zip"), "a.png", b"a");
        write_zip(&input.path().join("sub").join("two.ZIP"), "b.png", b"b");
        std::fs::write(input.path().join("notes.txt"), b"ignored").unwrap();

        let summary = extract_zips(input.path(), output.path()).unwrap();
        assert_eq!(summary, ExtractSummary { extracted: 2, skipped: 0 });
        assert_eq!(std::fs::read(output.path().join("a.png")).unwrap(), b"a");
        assert_eq!(std::fs::read(output.path().join("b.png")).unwrap(), b"b");
    }

    #[test]
    fn test_bad_archive_is_skipped() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        std::fs::write(input.path().join("bad.zip"), b"definitely not a zip").unwrap();
        write_zip(&input.path().join("good.zip"), "c.txt", b"c");

        let summary = extract_zips(input.path(), output.path()).unwrap();
        assert_eq!(summary, ExtractSummary { extracted: 1, skipped: 1 });
    }

    #[test]
    fn test_single_archive_input() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let archive = input.path().join("only.zip");
        write_zip(&archive, "d.txt", b"d");

        let out_dir = output.path().join("new");
        let summary = extract_zips(&archive, &out_dir).unwrap();
        assert_eq!(summary.extracted, 1);
        assert!(out_dir.join("d.txt").is_file());
    }

    #[test]
    fn test_single_bad_archive_is_an_error() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let archive = input.path().join("bad.zip");
        std::fs::write(&archive, b"nope").unwrap();
        assert!(extract_zips(&archive, output.path()).is_err());
    }
}
