//! Generator configuration
//!
//! Two layers: the optional `buildgen.toml` file at the repository root
//! ([`GeneratorFile`]), and the per-directory [`Config`] handed to language
//! extensions. Each directory's `Config` starts as a clone of its parent's
//! and accumulates the directives found along the way.

use crate::Result;
use crate::build_file::Directive;
use buildgen_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the optional generator config file at the repository root.
pub const CONFIG_FILENAME: &str = "buildgen.toml";

/// The `[generator]` table of `buildgen.toml`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// File name of generated build files
    pub build_file_name: String,
    /// Languages to run; empty means every registered language
    pub languages: Vec<String>,
    /// Directory names never walked
    pub exclude: Vec<String>,
    /// Extracted import lists, relative to the repository root
    pub imports: Option<PathBuf>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            build_file_name: "BUILD.bazel".to_string(),
            languages: Vec::new(),
            exclude: Vec::new(),
            imports: None,
        }
    }
}

/// Parsed `buildgen.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GeneratorFile {
    #[serde(default)]
    pub generator: GeneratorSettings,
}

impl GeneratorFile {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let file = ConfigStore::new().load_or_default(&NormalizedPath::new(path))?;
        Ok(file)
    }
}

/// Configuration visible to language extensions while a directory is processed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Repository root on disk
    pub repo_root: PathBuf,
    /// File name of generated build files
    pub build_file_name: String,
    /// Languages enabled for this run; empty means all
    pub languages: Vec<String>,
    /// Directives seen from the root down to the current directory
    pub directives: Vec<Directive>,
    /// Per-language state, keyed by language name
    exts: BTreeMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Config {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self::from_settings(repo_root, &GeneratorSettings::default())
    }

    pub fn from_settings(repo_root: impl Into<PathBuf>, settings: &GeneratorSettings) -> Self {
        Self {
            repo_root: repo_root.into(),
            build_file_name: settings.build_file_name.clone(),
            languages: settings.languages.clone(),
            directives: Vec::new(),
            exts: BTreeMap::new(),
        }
    }

    /// Whether `lang` should run under this configuration.
    pub fn is_enabled(&self, lang: &str) -> bool {
        self.languages.is_empty() || self.languages.iter().any(|l| l == lang)
    }

    /// Most recent value of a directive, if any directory above set it.
    pub fn directive(&self, key: &str) -> Option<&str> {
        self.directives
            .iter()
            .rev()
            .find(|d| d.key == key)
            .map(|d| d.value.as_str())
    }

    /// Store `lang`'s state for this directory and the ones below it.
    pub fn set_ext<T: Any + Send + Sync>(&mut self, lang: &str, value: T) {
        self.exts.insert(lang.to_string(), Arc::new(value));
    }

    /// `lang`'s state, if it was set here or in a parent directory and has
    /// type `T`.
    pub fn ext<T: Any>(&self, lang: &str) -> Option<&T> {
        self.exts.get(lang)?.downcast_ref::<T>()
    }
}
