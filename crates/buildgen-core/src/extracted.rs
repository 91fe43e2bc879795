//! Import lists produced by an upstream extractor
//!
//! The generator never parses source files. Import lists arrive as a JSON
//! object mapping repository-relative source paths to the import strings
//! found in each file:
//!
//! ```json
//! { "cmd/app/config.libsonnet": ["../shared/common.libsonnet", "schema.json"] }
//! ```

use buildgen_fs::{ConfigStore, NormalizedPath, clean_slash_path};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extracted import lists keyed by cleaned repository-relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ExtractedImports {
    by_file: BTreeMap<String, Vec<String>>,
}

impl ExtractedImports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON import listing, normalizing its keys.
    pub fn load(path: &NormalizedPath) -> buildgen_fs::Result<Self> {
        let raw: Self = ConfigStore::new().load(path)?;
        let mut cleaned = Self::new();
        for (file, imports) in raw.by_file {
            cleaned.insert(&file, imports);
        }
        tracing::debug!(path = %path, files = cleaned.len(), "loaded extracted imports");
        Ok(cleaned)
    }

    /// Record the imports of one source file.
    pub fn insert(&mut self, file: &str, imports: Vec<String>) {
        self.by_file.insert(clean_slash_path(file), imports);
    }

    /// Imports of a source file, in source order.
    pub fn get(&self, file: &str) -> Option<&[String]> {
        self.by_file
            .get(&clean_slash_path(file))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }
}
