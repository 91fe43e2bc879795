//! Import resolution failures
//!
//! These never reach the host: the resolver logs them and drops the import.

/// Why a single import could not be turned into a dependency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no rule found for import '{0}'")]
    NotFound(String),

    #[error("multiple rules found for import '{import}' ({count} candidates)")]
    Ambiguous { import: String, count: usize },
}
