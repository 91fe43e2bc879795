//! Filesystem helpers for buildgen
//!
//! Forward-slash normalized paths, source tree walking, atomic writes and
//! format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, clean_slash_path};
pub use walk::{PackageDir, walk_packages};
