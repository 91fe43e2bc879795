//! Phase-ordered generation driver
//!
//! The generator walks package directories parents-first, lets every
//! enabled language configure itself and generate rules, builds the reverse
//! import index from all generated rules, and finally asks each language to
//! resolve the rules it generated. Phases never interleave.

use crate::build_file::BuildFile;
use crate::config::Config;
use crate::extracted::ExtractedImports;
use crate::flags::FlagSet;
use crate::index::RuleIndex;
use crate::label::Label;
use crate::language::{GenerateArgs, KindInfo, Language, LoadInfo};
use crate::rule::Rule;
use crate::{Error, Result};
use buildgen_fs::{NormalizedPath, PackageDir};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Generated content for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPackage {
    pub rel: NormalizedPath,
    pub rules: Vec<Rule>,
    /// Load statements, limited to the kinds used in `rules`
    pub loads: Vec<LoadInfo>,
}

impl GeneratedPackage {
    /// Location of this package's build file under `repo_root`.
    pub fn build_file_path(&self, repo_root: &Path, build_file_name: &str) -> PathBuf {
        repo_root.join(self.rel.to_native()).join(build_file_name)
    }

    /// Render as build file text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for load in &self.loads {
            let symbols: Vec<String> = load.symbols.iter().map(|s| format!("\"{}\"", s)).collect();
            out.push_str(&format!("load(\"{}\", {})\n", load.name, symbols.join(", ")));
        }
        if !self.loads.is_empty() {
            out.push('\n');
        }
        let rules: Vec<String> = self.rules.iter().map(Rule::to_string).collect();
        out.push_str(&rules.join("\n\n"));
        out.push('\n');
        out
    }
}

struct PendingRule {
    pkg_idx: usize,
    lang_idx: usize,
    rule: Rule,
    imports: Box<dyn Any>,
}

/// Drives registered languages through one generation pass.
pub struct Generator {
    languages: Vec<Box<dyn Language>>,
    flags: FlagSet,
}

impl Generator {
    pub fn new(languages: Vec<Box<dyn Language>>) -> Self {
        Self {
            languages,
            flags: FlagSet::new(),
        }
    }

    pub fn languages(&self) -> &[Box<dyn Language>] {
        &self.languages
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut FlagSet {
        &mut self.flags
    }

    /// Let every language declare its flags.
    pub fn register_flags(&mut self, cmd: &str, config: &mut Config) {
        for lang in &self.languages {
            lang.register_flags(&mut self.flags, cmd, config);
        }
    }

    /// Let every language validate parsed flag values.
    pub fn check_flags(&self, config: &mut Config) -> Result<()> {
        for lang in &self.languages {
            lang.check_flags(&self.flags, config)?;
        }
        Ok(())
    }

    /// Indices of the languages enabled by `config`.
    fn enabled_languages(&self, config: &Config) -> Result<Vec<usize>> {
        if let Some(unknown) = config
            .languages
            .iter()
            .find(|name| !self.languages.iter().any(|l| l.name() == name.as_str()))
        {
            return Err(Error::UnknownLanguage(unknown.clone()));
        }

        Ok(self
            .languages
            .iter()
            .enumerate()
            .filter(|(_, lang)| config.is_enabled(lang.name()))
            .map(|(i, _)| i)
            .collect())
    }

    /// Run one generation pass over `packages`, which must be in pre-order
    /// (every directory after its parent), as produced by
    /// [`buildgen_fs::walk_packages`].
    ///
    /// Rules missing an attribute their kind requires are dropped, and
    /// packages left without rules are omitted.
    pub fn run(
        &self,
        base: &Config,
        packages: &[PackageDir],
        extracted: &ExtractedImports,
    ) -> Result<Vec<GeneratedPackage>> {
        let enabled = self.enabled_languages(base)?;
        let known_directives: HashSet<&str> = enabled
            .iter()
            .flat_map(|&i| self.languages[i].known_directives())
            .collect();
        let kinds: HashMap<usize, BTreeMap<&'static str, KindInfo>> = enabled
            .iter()
            .map(|&i| (i, self.languages[i].kinds()))
            .collect();

        // Phase 1: configure and generate, parents first
        let mut pkg_configs: Vec<Config> = Vec::with_capacity(packages.len());
        let mut config_by_rel: HashMap<&NormalizedPath, usize> = HashMap::new();
        let mut pending: Vec<PendingRule> = Vec::new();

        for (pkg_idx, pkg) in packages.iter().enumerate() {
            let mut config = pkg
                .rel
                .parent()
                .and_then(|parent| config_by_rel.get(&parent).copied())
                .map(|i| pkg_configs[i].clone())
                .unwrap_or_else(|| base.clone());

            let build_path = NormalizedPath::new(pkg.dir.join(&config.build_file_name));
            let file = BuildFile::load(pkg.rel.clone(), build_path)?;

            if let Some(file) = &file {
                for directive in &file.directives {
                    if !known_directives.contains(directive.key.as_str()) {
                        warn!(pkg = %pkg.rel, directive = %directive.key, "unknown directive");
                    }
                }
                config.directives.extend(file.directives.iter().cloned());
            }

            for &i in &enabled {
                self.languages[i].configure(&mut config, &pkg.rel, file.as_ref());
            }

            {
                let args = GenerateArgs {
                    config: &config,
                    rel: &pkg.rel,
                    dir: &pkg.dir,
                    regular_files: &pkg.files,
                    subdirs: &pkg.subdirs,
                    file: file.as_ref(),
                    extracted,
                };

                for &lang_idx in &enabled {
                    let result = self.languages[lang_idx].generate_rules(&args);
                    if result.rules.len() != result.imports.len() {
                        warn!(
                            pkg = %pkg.rel,
                            lang = self.languages[lang_idx].name(),
                            rules = result.rules.len(),
                            imports = result.imports.len(),
                            "generated rules and import payloads differ in length"
                        );
                    }
                    for (rule, imports) in result.rules.into_iter().zip(result.imports) {
                        if let Some(attr) = kinds
                            .get(&lang_idx)
                            .and_then(|lang_kinds| empty_required_attr(&rule, lang_kinds))
                        {
                            warn!(
                                pkg = %pkg.rel,
                                rule = rule.name(),
                                attr,
                                "dropping rule with empty required attribute"
                            );
                            continue;
                        }
                        pending.push(PendingRule {
                            pkg_idx,
                            lang_idx,
                            rule,
                            imports,
                        });
                    }
                }
            }

            config_by_rel.insert(&pkg.rel, pkg_configs.len());
            pkg_configs.push(config);
        }

        let label_of =
            |p: &PendingRule| Label::new(packages[p.pkg_idx].rel.as_str(), p.rule.name());

        // Phase 2: index
        let mut embedded: HashSet<Label> = HashSet::new();
        for p in &pending {
            embedded.extend(self.languages[p.lang_idx].embeds(&p.rule, &label_of(p)));
        }

        let mut index = RuleIndex::new();
        for p in &pending {
            let label = label_of(p);
            if embedded.contains(&label) {
                debug!(label = %label, "skipping embedded rule during indexing");
                continue;
            }
            let lang = &self.languages[p.lang_idx];
            let specs = lang.imports(&pkg_configs[p.pkg_idx], &p.rule, &packages[p.pkg_idx].rel);
            index.add_rule(label, lang.name(), specs);
        }
        if index.is_empty() {
            debug!("no rules indexed");
        }
        info!(
            rules = index.len(),
            imports = index.import_count(),
            "built import index"
        );

        // Phase 3: resolve, every kept rule with its own payload
        for p in &mut pending {
            let label = Label::new(packages[p.pkg_idx].rel.as_str(), p.rule.name());
            self.languages[p.lang_idx].resolve(
                &pkg_configs[p.pkg_idx],
                &index,
                &mut p.rule,
                &*p.imports,
                &label,
            );
        }

        let generated = self.group_by_package(packages, &enabled, pending);
        info!(
            packages = generated.len(),
            rules = generated.iter().map(|g| g.rules.len()).sum::<usize>(),
            "generation complete"
        );
        Ok(generated)
    }

    fn group_by_package(
        &self,
        packages: &[PackageDir],
        enabled: &[usize],
        pending: Vec<PendingRule>,
    ) -> Vec<GeneratedPackage> {
        let loads: Vec<LoadInfo> = enabled
            .iter()
            .flat_map(|&i| self.languages[i].loads())
            .collect();

        let mut grouped: Vec<(usize, Vec<Rule>)> = Vec::new();
        for p in pending {
            match grouped.last_mut() {
                Some((idx, rules)) if *idx == p.pkg_idx => rules.push(p.rule),
                _ => grouped.push((p.pkg_idx, vec![p.rule])),
            }
        }

        grouped
            .into_iter()
            .map(|(pkg_idx, rules)| {
                let kinds: BTreeSet<&str> = rules.iter().map(Rule::kind).collect();
                let pkg_loads = loads
                    .iter()
                    .filter_map(|load| {
                        let mut symbols: Vec<&'static str> = load
                            .symbols
                            .iter()
                            .copied()
                            .filter(|s| kinds.contains(s))
                            .collect();
                        symbols.sort_unstable();
                        (!symbols.is_empty()).then_some(LoadInfo {
                            name: load.name,
                            symbols,
                        })
                    })
                    .collect();

                GeneratedPackage {
                    rel: packages[pkg_idx].rel.clone(),
                    rules,
                    loads: pkg_loads,
                }
            })
            .collect()
    }
}

/// First attribute required by `rule`'s kind that is unset or empty.
fn empty_required_attr(
    rule: &Rule,
    kinds: &BTreeMap<&'static str, KindInfo>,
) -> Option<&'static str> {
    kinds
        .get(rule.kind())?
        .non_empty_attrs
        .iter()
        .copied()
        .find(|attr| rule.attr_is_empty(attr))
}
