//! Normalized path handling for package paths and import strings

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Package paths and import strings are always slash-separated regardless
/// of platform; conversion to a native path only happens at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// The repository root package (empty path).
    pub fn root() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Whether this is the empty (root) path.
    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// Joining onto the root path yields the segment itself, so package
    /// paths never gain a leading slash.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment_normalized
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    ///
    /// A single-segment relative path has the root path as its parent.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => Some(Self::root()),
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Split into the directory part (including its trailing slash) and the
    /// file name, like `dir/` + `file.ext`.
    pub fn split(&self) -> (&str, &str) {
        match self.inner.rfind('/') {
            Some(idx) => (&self.inner[..=idx], &self.inner[idx + 1..]),
            None => ("", &self.inner),
        }
    }

    /// Lexically cleaned form of this path, see [`clean_slash_path`].
    pub fn clean(&self) -> Self {
        Self {
            inner: clean_slash_path(&self.inner),
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Lexically clean a relative, slash-separated path.
///
/// Empty and `.` segments are dropped, `name/..` pairs collapse, and `..`
/// segments that would climb above the start are dropped. The result never
/// has a leading or trailing slash; the empty string denotes the root.
pub fn clean_slash_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_onto_root_has_no_leading_slash() {
        let joined = NormalizedPath::root().join("cmd");
        assert_eq!(joined.as_str(), "cmd");
    }

    #[test]
    fn test_parent_of_single_segment_is_root() {
        let path = NormalizedPath::new("cmd");
        assert_eq!(path.parent(), Some(NormalizedPath::root()));
        assert_eq!(NormalizedPath::root().parent(), None);
    }

    #[test]
    fn test_split_keeps_trailing_slash_on_dir() {
        let path = NormalizedPath::new("../shared/common.libsonnet");
        assert_eq!(path.split(), ("../shared/", "common.libsonnet"));

        let bare = NormalizedPath::new("common.libsonnet");
        assert_eq!(bare.split(), ("", "common.libsonnet"));
    }
}
