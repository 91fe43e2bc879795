//! Import specs exposed to the host's reverse index

use crate::filter::should_process_pkg;
use crate::target::libsonnet_target;
use crate::{JSONNET_NAME, LIBRARY_KIND, LIBSONNET_EXT};
use buildgen_core::ImportSpec;

/// Import specs for a rule named `rule_name` of kind `rule_kind` in `pkg`.
///
/// Only `jsonnet_library` rules in accepted packages are indexed; generated
/// `jsonnet_to_json` rules are terminal outputs that nothing imports.
pub fn exposed_imports(pkg: &str, rule_kind: &str, rule_name: &str) -> Vec<ImportSpec> {
    if !should_process_pkg(pkg) || rule_kind != LIBRARY_KIND {
        return Vec::new();
    }

    let lib_name = format!("{}{}", rule_name, LIBSONNET_EXT);
    vec![ImportSpec::new(JSONNET_NAME, libsonnet_target(pkg, &lib_name))]
}
