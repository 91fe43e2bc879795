//! Canonical target naming

use crate::LIBSONNET_EXT;
use buildgen_fs::{NormalizedPath, clean_slash_path};

/// Target identifier of a Jsonnet library.
///
/// `("deployments/k8s", "consts.libsonnet")` => `//deployments/k8s:consts`.
/// One trailing slash is dropped from `pkg` and the `.libsonnet` extension
/// from `lib_name`; nothing else is touched.
pub fn libsonnet_target(pkg: &str, lib_name: &str) -> String {
    let dir_path = pkg.strip_suffix('/').unwrap_or(pkg);
    let file_name = lib_name.strip_suffix(LIBSONNET_EXT).unwrap_or(lib_name);
    format!("//{}:{}", dir_path, file_name)
}

/// Target identifier for an import string such as
/// `../shared/common.libsonnet`.
///
/// The directory part is relative to the workspace-root library search
/// path, so it is lexically cleaned and may not climb above the root:
/// `../shared/common.libsonnet` => `//shared:common`.
pub fn import_target(import: &str) -> String {
    let path = NormalizedPath::new(import);
    let (dir, file) = path.split();
    libsonnet_target(&clean_slash_path(dir), file)
}
