//! Import resolution
//!
//! Turns a rule's extracted import list into its `deps` attribute. Every
//! failure is local to one import: it is logged and the import is dropped,
//! the rest of the list still resolves.

use crate::error::ResolveError;
use crate::filter::should_process_pkg;
use crate::target::import_target;
use crate::{JSON_EXT, JSONNET_NAME, LIBSONNET_EXT};
use buildgen_core::{FindResult, ImportLookup, ImportSpec, Label, Rule};
use std::any::Any;
use tracing::{debug, warn};

/// Attribute written by the resolver.
pub const DEPS_ATTR: &str = "deps";

/// Find the single rule indexed under `target` in this extension's namespace.
pub fn find_indexed_rule(
    target: &str,
    index: &dyn ImportLookup,
) -> Result<FindResult, ResolveError> {
    let spec = ImportSpec::new(JSONNET_NAME, target);
    let mut rules = index.find_rules_by_import(&spec, JSONNET_NAME);
    match rules.len() {
        0 => Err(ResolveError::NotFound(target.to_string())),
        1 => Ok(rules.remove(0)),
        count => Err(ResolveError::Ambiguous {
            import: target.to_string(),
            count,
        }),
    }
}

/// Rewrite `rule`'s `deps` from `imports`.
///
/// `imports` is the payload generated alongside the rule and must be a
/// `Vec<String>`; anything else leaves the rule untouched. When no import
/// resolves, `deps` is removed rather than set to an empty list.
pub fn resolve_imports(index: &dyn ImportLookup, rule: &mut Rule, imports: &dyn Any, from: &Label) {
    if !should_process_pkg(&from.pkg) {
        debug!(rule = rule.name(), pkg = %from.pkg, "resolve skipped for package");
        return;
    }

    let Some(libsonnet_imports) = imports.downcast_ref::<Vec<String>>() else {
        warn!(rule = rule.name(), pkg = %from.pkg, "resolve skipped for invalid imports payload");
        return;
    };

    let mut deps: Vec<String> = Vec::new();
    for lib in libsonnet_imports {
        if !lib.ends_with(LIBSONNET_EXT) {
            // JSON data imports are expected and never become deps
            if !lib.ends_with(JSON_EXT) {
                warn!(import = %lib, pkg = %from.pkg, "ignoring unsupported import");
            }
            continue;
        }

        let target = import_target(lib);
        match find_indexed_rule(&target, index) {
            Ok(_) => deps.push(target),
            Err(err) => {
                warn!(from = %from, import = %lib, "could not resolve import: {}", err);
            }
        }
    }

    if deps.is_empty() {
        rule.del_attr(DEPS_ATTR);
        return;
    }

    rule.set_attr(DEPS_ATTR, deps);
}
