//! Source tree walking
//!
//! Produces one [`PackageDir`] per directory, parents before children, with
//! entries sorted so that generation output is stable across platforms.

use crate::{Error, NormalizedPath, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A directory in the source tree, i.e. a candidate build package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDir {
    /// Slash-separated path relative to the walk root ("" for the root)
    pub rel: NormalizedPath,
    /// Native absolute (or root-relative) path of the directory
    pub dir: PathBuf,
    /// Regular file names directly inside the directory, sorted
    pub files: Vec<String>,
    /// Subdirectory names that were walked, sorted
    pub subdirs: Vec<String>,
}

/// Walk `root` and return every package directory in pre-order.
///
/// Hidden directories, symlinked directories and any directory whose name is
/// listed in `exclude` are skipped entirely. Symlinks to regular files are
/// listed as files.
pub fn walk_packages(root: &Path, exclude: &[String]) -> Result<Vec<PackageDir>> {
    if !root.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut packages: Vec<PackageDir> = Vec::new();
    let mut index_by_rel: HashMap<NormalizedPath, usize> = HashMap::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry, exclude));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            Error::io(path, e.into())
        })?;

        let Ok(rel_path) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel = NormalizedPath::new(rel_path);
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if let Some(&parent) = rel.parent().as_ref().and_then(|p| index_by_rel.get(p)) {
                packages[parent].subdirs.push(name);
            }
            index_by_rel.insert(rel.clone(), packages.len());
            packages.push(PackageDir {
                rel,
                dir: entry.into_path(),
                files: Vec::new(),
                subdirs: Vec::new(),
            });
            continue;
        }

        let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        if let Some(&parent) = rel.parent().as_ref().and_then(|p| index_by_rel.get(p)) {
            packages[parent].files.push(name);
        }
    }

    tracing::debug!(root = %root.display(), count = packages.len(), "walked source tree");
    Ok(packages)
}

fn is_skipped_dir(entry: &DirEntry, exclude: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    let skipped = name.starts_with('.') || exclude.iter().any(|ex| ex.as_str() == name);
    if skipped {
        tracing::trace!(dir = %entry.path().display(), "skipping directory");
    }
    skipped
}
