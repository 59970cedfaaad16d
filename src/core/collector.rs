//! Discovers text files under a root directory and builds the registry
//! that the rest of the session treats as the source of truth.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{CoreError, FileEntry};
use crate::config::AppConfig;

/// The authoritative mapping from relative path to discovered file.
///
/// A `BTreeMap` keeps iteration in path order, which is also the order
/// the output composer renders blocks in.
pub type FileRegistry = BTreeMap<String, FileEntry>;

/// Recursively enumerates `root`, pruning every directory whose name is
/// in the configured deny-set.
///
/// Returns `(relative-path, absolute-handle)` pairs. Relative paths use
/// `/` as the separator regardless of platform. The traversal itself
/// does not filter by extension; that is [`collect_files`]' job, so the
/// pair stream stays reusable for synthetic inputs in tests.
pub fn walk_directory(
    root: &Path,
    config: &AppConfig,
) -> Result<Vec<(String, PathBuf)>, CoreError> {
    if !root.is_dir() {
        return Err(CoreError::NotADirectory(root.to_path_buf()));
    }

    let mut pairs = Vec::new();

    let walker = WalkDir::new(root).follow_links(false).into_iter();
    for entry in walker.filter_entry(|e| {
        // Prune deny-listed directories before descending into them.
        // The chosen root itself is exempt, whatever its name.
        e.depth() == 0
            || !(e.file_type().is_dir()
                && is_deny_listed(e.file_name().to_string_lossy().as_ref(), config))
    }) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
            match e.into_io_error() {
                Some(io) => CoreError::Io(io, path),
                None => CoreError::NotADirectory(path),
            }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        pairs.push((relative, entry.path().to_path_buf()));
    }

    tracing::info!("Traversal of {:?} yielded {} candidate files", root, pairs.len());
    Ok(pairs)
}

/// Filters `(relative-path, handle)` pairs into a fresh [`FileRegistry`].
///
/// An entry is kept iff its extension belongs to the configured
/// allow-set and no path segment is a deny-listed directory name. Pure:
/// callers decide when to install the result, which keeps registry
/// rebuilds atomic (a failed scan never leaves a half-populated map).
pub fn collect_files(
    pairs: impl IntoIterator<Item = (String, PathBuf)>,
    config: &AppConfig,
) -> FileRegistry {
    let mut registry = FileRegistry::new();

    for (path, handle) in pairs {
        if path.split('/').rev().skip(1).any(|seg| is_deny_listed(seg, config)) {
            continue;
        }
        let Some(extension) = extension_of(&path) else {
            continue;
        };
        if !config.text_extensions.contains(&extension) {
            continue;
        }
        registry.insert(
            path.clone(),
            FileEntry {
                path,
                handle,
                extension,
            },
        );
    }

    registry
}

fn is_deny_listed(name: &str, config: &AppConfig) -> bool {
    config.skip_directories.contains(name)
}

/// Lowercased substring after the last `.` of the file name, or `None`
/// for files without an extension.
fn extension_of(path: &str) -> Option<String> {
    let name = path.rsplit('/').next()?;
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}
