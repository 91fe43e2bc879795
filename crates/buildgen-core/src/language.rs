//! The extension contract every language implements

use crate::build_file::BuildFile;
use crate::config::Config;
use crate::extracted::ExtractedImports;
use crate::flags::FlagSet;
use crate::index::{ImportLookup, ImportSpec};
use crate::label::Label;
use crate::rule::Rule;
use crate::Result;
use buildgen_fs::NormalizedPath;
use std::any::Any;
use std::collections::BTreeMap;
use std::path::Path;

/// How the generator should treat the attributes of a rule kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindInfo {
    /// Attributes that must be non-empty for the rule to be kept
    pub non_empty_attrs: Vec<&'static str>,
    /// Attributes derived from the package's source files
    pub mergeable_attrs: Vec<&'static str>,
    /// Attributes written by `resolve`
    pub resolve_attrs: Vec<&'static str>,
}

/// A `.bzl` file and the rule kinds it defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadInfo {
    pub name: &'static str,
    pub symbols: Vec<&'static str>,
}

/// Inputs for generating rules in one directory.
#[derive(Debug, Clone, Copy)]
pub struct GenerateArgs<'a> {
    pub config: &'a Config,
    /// Package path of the directory
    pub rel: &'a NormalizedPath,
    /// Directory on disk
    pub dir: &'a Path,
    pub regular_files: &'a [String],
    pub subdirs: &'a [String],
    /// Existing build file in the directory, if any
    pub file: Option<&'a BuildFile>,
    pub extracted: &'a ExtractedImports,
}

/// Rules generated for one directory.
///
/// `imports[i]` is the language-private import payload of `rules[i]`; the
/// host hands it back unchanged to `resolve`.
#[derive(Default)]
pub struct GenerateResult {
    pub rules: Vec<Rule>,
    pub imports: Vec<Box<dyn Any>>,
}

impl GenerateResult {
    pub fn push(&mut self, rule: Rule, imports: Box<dyn Any>) {
        self.rules.push(rule);
        self.imports.push(imports);
    }
}

impl std::fmt::Debug for GenerateResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateResult")
            .field("rules", &self.rules)
            .field("imports", &self.imports.len())
            .finish()
    }
}

/// A language extension driven by the [`Generator`](crate::Generator).
///
/// The host calls these in phase order and never concurrently: flags, then
/// `configure` and `generate_rules` per directory, then `imports` for every
/// generated rule, then `resolve`.
pub trait Language {
    /// Namespace for this language's import specs.
    fn name(&self) -> &'static str;

    /// Directive keys this language understands.
    fn known_directives(&self) -> Vec<&'static str>;

    fn register_flags(&self, flags: &mut FlagSet, cmd: &str, config: &mut Config);

    fn check_flags(&self, flags: &FlagSet, config: &mut Config) -> Result<()>;

    /// Adjust configuration for the directory at `rel`.
    fn configure(&self, config: &mut Config, rel: &NormalizedPath, file: Option<&BuildFile>);

    fn kinds(&self) -> BTreeMap<&'static str, KindInfo>;

    fn loads(&self) -> Vec<LoadInfo>;

    fn generate_rules(&self, args: &GenerateArgs<'_>) -> GenerateResult;

    /// Import specs under which `rule` (in package `pkg`) should be indexed.
    fn imports(&self, config: &Config, rule: &Rule, pkg: &NormalizedPath) -> Vec<ImportSpec>;

    /// Labels of rules embedded in `rule`; embedded rules are not indexed.
    fn embeds(&self, rule: &Rule, from: &Label) -> Vec<Label>;

    /// Rewrite `rule`'s dependency attributes from its import payload.
    fn resolve(
        &self,
        config: &Config,
        index: &dyn ImportLookup,
        rule: &mut Rule,
        imports: &dyn Any,
        from: &Label,
    );
}
