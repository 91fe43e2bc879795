//! Jsonnet extension for buildgen.
//!
//! Generates `jsonnet_library` and `jsonnet_to_json` rules for `.libsonnet`
//! and `.jsonnet` sources, indexes libraries under their canonical target
//! identifier, and turns extracted `.libsonnet` imports into `deps`.
//!
//! # Example
//!
//! ```
//! use buildgen_jsonnet::target::libsonnet_target;
//!
//! assert_eq!(
//!     libsonnet_target("deployments/k8s", "consts.libsonnet"),
//!     "//deployments/k8s:consts"
//! );
//! ```

pub mod error;
pub mod filter;
pub mod generate;
pub mod imports;
pub mod lang;
pub mod resolve;
pub mod target;

/// Namespace of this extension's import specs.
pub const JSONNET_NAME: &str = "jsonnet";

/// Rule kind for importable Jsonnet libraries.
pub const LIBRARY_KIND: &str = "jsonnet_library";

/// Rule kind for terminal Jsonnet-to-JSON outputs; never indexed.
pub const TO_JSON_KIND: &str = "jsonnet_to_json";

/// Extension of Jsonnet library files.
pub const LIBSONNET_EXT: &str = ".libsonnet";

/// Extension of top-level Jsonnet files.
pub const JSONNET_EXT: &str = ".jsonnet";

/// Extension of JSON data files; imported but never resolved.
pub const JSON_EXT: &str = ".json";

/// Starlark file defining both rule kinds.
pub const RULES_JSONNET_BZL: &str = "@io_bazel_rules_jsonnet//jsonnet:jsonnet.bzl";

pub use error::ResolveError;
pub use filter::should_process_pkg;
pub use imports::exposed_imports;
pub use lang::JsonnetLang;
pub use resolve::{find_indexed_rule, resolve_imports};
pub use target::{import_target, libsonnet_target};
