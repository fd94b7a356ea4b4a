//! Locating coverage-notes artifacts and the listing files gcov leaves
//! beside them.

use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively find files ending in `.{extension}` below `root`.
///
/// Hidden directories are searched (libtool puts objects in `.libs`), but
/// hidden artifact files themselves are skipped. The result is sorted.
pub fn discover_artifacts(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "library root is not a directory"),
        ));
    }

    let mut artifacts: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let name = entry.file_name().to_string_lossy();
            !name.starts_with('.')
        })
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extension))
        .collect();

    artifacts.sort();
    Ok(artifacts)
}

/// Group artifacts by parent directory, preserving sorted order.
///
/// The tool writes listing files into the working directory, so artifacts
/// sharing a directory must not run at the same time.
pub fn group_by_directory(artifacts: &[PathBuf]) -> Vec<(PathBuf, Vec<PathBuf>)> {
    let mut groups: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for artifact in artifacts {
        let dir = artifact
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        groups.entry(dir).or_default().push(artifact.clone());
    }
    groups.into_iter().collect()
}

/// Listing files (`.{extension}`) directly inside `dir`, sorted.
pub fn collect_listings(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut listings: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, extension))
        .collect();
    listings.sort();
    listings
}

/// Path of the filtered log written for `artifact`.
pub fn log_path_for(artifact: &Path, log_extension: &str) -> PathBuf {
    artifact.with_extension(log_extension)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
