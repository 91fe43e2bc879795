//! Package filter

/// Package path prefixes this extension runs under.
///
/// TODO: read the allowlist from generator configuration instead of this
/// fixed set.
pub const ALLOWED_PKG_PREFIXES: [&str; 3] = ["cmd/", "deployments/", "third_party/jsonnet/"];

/// Whether the extension should run for the package at `pkg`.
pub fn should_process_pkg(pkg: &str) -> bool {
    ALLOWED_PKG_PREFIXES
        .iter()
        .any(|prefix| pkg.starts_with(prefix))
}
