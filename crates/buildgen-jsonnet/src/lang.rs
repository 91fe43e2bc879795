//! [`Language`] implementation wiring the Jsonnet extension into the host

use crate::generate;
use crate::imports::exposed_imports;
use crate::resolve::{DEPS_ATTR, resolve_imports};
use crate::{JSONNET_NAME, LIBRARY_KIND, RULES_JSONNET_BZL, TO_JSON_KIND};
use buildgen_core::{
    BuildFile, Config, FlagSet, GenerateArgs, GenerateResult, ImportLookup, ImportSpec, KindInfo,
    Label, Language, LoadInfo, Rule,
};
use buildgen_fs::NormalizedPath;
use std::any::Any;
use std::collections::BTreeMap;

/// The Jsonnet language extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonnetLang;

impl JsonnetLang {
    pub fn new() -> Self {
        Self
    }
}

impl Language for JsonnetLang {
    fn name(&self) -> &'static str {
        JSONNET_NAME
    }

    fn known_directives(&self) -> Vec<&'static str> {
        vec![TO_JSON_KIND, LIBRARY_KIND]
    }

    // No flags.
    fn register_flags(&self, _flags: &mut FlagSet, _cmd: &str, _config: &mut Config) {}

    fn check_flags(&self, _flags: &FlagSet, _config: &mut Config) -> buildgen_core::Result<()> {
        Ok(())
    }

    // Directives are registered but do not change behavior.
    fn configure(&self, _config: &mut Config, _rel: &NormalizedPath, _file: Option<&BuildFile>) {}

    fn kinds(&self) -> BTreeMap<&'static str, KindInfo> {
        BTreeMap::from([
            (
                LIBRARY_KIND,
                KindInfo {
                    non_empty_attrs: vec!["srcs"],
                    mergeable_attrs: vec!["srcs"],
                    resolve_attrs: vec![DEPS_ATTR],
                },
            ),
            (
                TO_JSON_KIND,
                KindInfo {
                    non_empty_attrs: vec!["src", "outs"],
                    mergeable_attrs: vec!["src", "outs"],
                    resolve_attrs: vec![DEPS_ATTR],
                },
            ),
        ])
    }

    fn loads(&self) -> Vec<LoadInfo> {
        vec![LoadInfo {
            name: RULES_JSONNET_BZL,
            symbols: vec![LIBRARY_KIND, TO_JSON_KIND],
        }]
    }

    fn generate_rules(&self, args: &GenerateArgs<'_>) -> GenerateResult {
        generate::generate_rules(args)
    }

    fn imports(&self, _config: &Config, rule: &Rule, pkg: &NormalizedPath) -> Vec<ImportSpec> {
        exposed_imports(pkg.as_str(), rule.kind(), rule.name())
    }

    fn embeds(&self, _rule: &Rule, _from: &Label) -> Vec<Label> {
        Vec::new()
    }

    fn resolve(
        &self,
        _config: &Config,
        index: &dyn ImportLookup,
        rule: &mut Rule,
        imports: &dyn Any,
        from: &Label,
    ) {
        resolve_imports(index, rule, imports, from);
    }
}
