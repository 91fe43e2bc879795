//! Error types for buildgen-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from buildgen-core
    #[error(transparent)]
    Core(#[from] buildgen_core::Error),

    /// Error from buildgen-fs
    #[error(transparent)]
    Fs(#[from] buildgen_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Logging could not be initialized
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
