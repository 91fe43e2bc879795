//! Error types for buildgen-core

/// Result type for buildgen-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can stop a generation run
///
/// Problems with individual imports are never represented here: language
/// extensions log them and carry on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A label string could not be parsed
    #[error("Invalid label '{label}': {reason}")]
    InvalidLabel { label: String, reason: String },

    /// A language was requested that no extension provides
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// A flag assignment was malformed or names an undeclared flag
    #[error("Invalid flag '{name}': {reason}")]
    InvalidFlag { name: String, reason: String },

    /// Filesystem error from buildgen-fs
    #[error(transparent)]
    Fs(#[from] buildgen_fs::Error),
}

impl Error {
    pub fn invalid_flag(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFlag {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
