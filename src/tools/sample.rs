// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Copy a random sample of files from one directory to another.

use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Regular files directly inside `dir`, sorted so a seeded sample is reproducible.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy `count` distinct randomly chosen files from `input` into `output`.
///
/// Returns the copied destination paths. Asking for more files than exist is an error.
pub fn copy_random<R: Rng + ?Sized>(
    input: &Path,
    output: &Path,
    count: usize,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    let files = list_files(input)?;
    if count > files.len() {
        bail!(
            "Requested {} files but {} only has {}",
            count,
            input.display(),
            files.len()
        );
    }

    std::fs::create_dir_all(output).with_context(|| format!("Failed to create {}", output.display()))?;

    let mut copied = Vec::with_capacity(count);
    for source in files.choose_multiple(rng, count) {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = output.join(name);
        std::fs::copy(source, &target)
            .with_context(|| format!("Failed to copy {}", source.display()))?;
        log::debug!("Copied {}", source.display());
        copied.push(target);
    }
    log::info!("Copied {} files to {}", copied.len(), output.display());
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn populated(count: usize) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for i in 0..count {
            std::fs::write(dir.path().join(format!("{i}.png")), format!("{i}")).unwrap();
        }
        std::fs::create_dir(dir.path().join("subdir")).unwrap();
        dir
    }

    #[test]
    fn test_copies_requested_number_of_distinct_files() {
        let input = populated(10);
        let output = tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let copied = copy_random(input.path(), output.path(), 4, &mut rng).unwrap();
        assert_eq!(copied.len(), 4);
        let mut names: Vec<_> = copied.iter().map(|p| p.file_name().unwrap().to_owned()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
        assert!(copied.iter().all(|p| p.is_file()));
    }

    fn file_names(paths: &[PathBuf]) -> Vec<std::ffi::OsString> {
        paths.iter().map(|p| p.file_name().unwrap().to_owned()).collect()
    }

    #[test]
    fn test_same_seed_same_sample() {
        let input = populated(10);
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        let first = copy_random(input.path(), a.path(), 3, &mut StdRng::seed_from_u64(1)).unwrap();
        let second = copy_random(input.path(), b.path(), 3, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(file_names(&first), file_names(&second));
    }

    #[test]
    fn test_too_many_requested() {
        let input = populated(2);
        let output = tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(copy_random(input.path(), output.path(), 3, &mut rng).is_err());
    }
}
