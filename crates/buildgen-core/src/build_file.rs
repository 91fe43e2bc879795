//! Existing build files and the directives they carry
//!
//! Only directive comments are read from an existing build file; rule
//! bodies are regenerated on every run.

use buildgen_fs::{NormalizedPath, io};

/// Comment prefix that marks a directive line.
pub const DIRECTIVE_PREFIX: &str = "# buildgen:";

/// A `# buildgen:<key> <value>` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: String,
}

/// An existing build file found in a package directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFile {
    /// Package the file belongs to
    pub pkg: NormalizedPath,
    /// Location of the file on disk
    pub path: NormalizedPath,
    /// Directives in file order
    pub directives: Vec<Directive>,
}

impl BuildFile {
    /// Parse directives out of build file content.
    pub fn parse(pkg: NormalizedPath, path: NormalizedPath, content: &str) -> Self {
        let directives = content
            .lines()
            .filter_map(|line| line.trim().strip_prefix(DIRECTIVE_PREFIX))
            .filter_map(|rest| {
                let rest = rest.trim();
                let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if key.is_empty() {
                    return None;
                }
                Some(Directive {
                    key: key.to_string(),
                    value: value.trim().to_string(),
                })
            })
            .collect();

        Self {
            pkg,
            path,
            directives,
        }
    }

    /// Load the build file at `path` if it exists.
    pub fn load(pkg: NormalizedPath, path: NormalizedPath) -> buildgen_fs::Result<Option<Self>> {
        let content = io::read_text_if_exists(&path)?;
        Ok(content.map(|content| Self::parse(pkg, path, &content)))
    }
}
