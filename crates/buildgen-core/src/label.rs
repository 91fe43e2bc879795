//! Build target labels

use crate::{Error, Result};
use std::fmt;

/// A label naming a build rule, `//pkg:name` or `@repo//pkg:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    /// External repository name, `None` for the main repository
    pub repo: Option<String>,
    /// Slash-separated package path, empty for the root package
    pub pkg: String,
    /// Rule name within the package
    pub name: String,
}

impl Label {
    /// Create a label in the main repository.
    pub fn new(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            repo: None,
            pkg: pkg.into(),
            name: name.into(),
        }
    }

    /// Parse an absolute label.
    ///
    /// `//pkg` is shorthand for `//pkg:<last segment of pkg>`. Relative
    /// labels (`:name`) have no meaning without a package and are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidLabel {
            label: input.to_string(),
            reason: reason.to_string(),
        };

        let (repo, rest) = match input.strip_prefix('@') {
            Some(after_at) => {
                let idx = after_at
                    .find("//")
                    .ok_or_else(|| invalid("missing '//' after repository name"))?;
                (Some(after_at[..idx].to_string()), &after_at[idx..])
            }
            None => (None, input),
        };

        let rest = rest
            .strip_prefix("//")
            .ok_or_else(|| invalid("label must start with '//'"))?;

        let (pkg, name) = match rest.split_once(':') {
            Some((pkg, name)) => (pkg, name),
            None => {
                let name = rest.rsplit('/').next().unwrap_or_default();
                (rest, name)
            }
        };

        if pkg.starts_with('/') || pkg.ends_with('/') {
            return Err(invalid("package must not start or end with '/'"));
        }
        if name.is_empty() {
            return Err(invalid("empty rule name"));
        }

        Ok(Self {
            repo,
            pkg: pkg.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(repo) = &self.repo {
            write!(f, "@{}", repo)?;
        }
        write!(f, "//{}:{}", self.pkg, self.name)
    }
}

impl std::str::FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
