//! Reverse import index
//!
//! During indexing every language reports, for each rule it generated, the
//! import strings that rule satisfies. The resulting [`RuleIndex`] maps
//! `(language, import string)` back to the defining rules and is consulted
//! read-only during resolution.

use crate::label::Label;
use std::collections::HashMap;

/// An import string a rule satisfies, namespaced by language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportSpec {
    pub lang: String,
    pub imp: String,
}

impl ImportSpec {
    pub fn new(lang: impl Into<String>, imp: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            imp: imp.into(),
        }
    }
}

/// A rule found in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindResult {
    pub label: Label,
}

/// Read access to the reverse import index.
///
/// Resolvers depend on this trait rather than on [`RuleIndex`] so they can
/// be exercised against a stand-in index; plain closures implement it.
pub trait ImportLookup {
    /// Every rule indexed under `spec` by language `lang`, in index order.
    fn find_rules_by_import(&self, spec: &ImportSpec, lang: &str) -> Vec<FindResult>;
}

impl<F> ImportLookup for F
where
    F: Fn(&ImportSpec, &str) -> Vec<FindResult>,
{
    fn find_rules_by_import(&self, spec: &ImportSpec, lang: &str) -> Vec<FindResult> {
        self(spec, lang)
    }
}

#[derive(Debug, Clone)]
struct IndexedRule {
    label: Label,
    lang: String,
}

/// The host's reverse import index for one generation pass.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    rules: Vec<IndexedRule>,
    by_import: HashMap<ImportSpec, Vec<usize>>,
}

impl RuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a rule under every import spec it exposes.
    ///
    /// Rules exposing no specs are still counted but can never be found.
    pub fn add_rule(&mut self, label: Label, lang: &str, specs: Vec<ImportSpec>) {
        let idx = self.rules.len();
        for spec in specs {
            tracing::trace!(
                label = %label,
                import = %spec.imp,
                lang = %spec.lang,
                "indexed import"
            );
            self.by_import.entry(spec).or_default().push(idx);
        }
        self.rules.push(IndexedRule {
            label,
            lang: lang.to_string(),
        });
    }

    /// Number of indexed rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of distinct import specs.
    pub fn import_count(&self) -> usize {
        self.by_import.len()
    }
}

impl ImportLookup for RuleIndex {
    fn find_rules_by_import(&self, spec: &ImportSpec, lang: &str) -> Vec<FindResult> {
        self.by_import
            .get(spec)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| &self.rules[i])
                    .filter(|rule| rule.lang == lang)
                    .map(|rule| FindResult {
                        label: rule.label.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(imp: &str) -> ImportSpec {
        ImportSpec::new("jsonnet", imp)
    }

    #[test]
    fn test_find_single_rule() {
        let mut index = RuleIndex::new();
        index.add_rule(
            Label::new("shared", "common"),
            "jsonnet",
            vec![spec("//shared:common")],
        );

        let found = index.find_rules_by_import(&spec("//shared:common"), "jsonnet");
        assert_eq!(
            found,
            vec![FindResult {
                label: Label::new("shared", "common")
            }]
        );
    }

    #[test]
    fn test_duplicates_are_all_returned_in_order() {
        let mut index = RuleIndex::new();
        index.add_rule(Label::new("pkg", "dup"), "jsonnet", vec![spec("//pkg:dup")]);
        index.add_rule(Label::new("other", "dup"), "jsonnet", vec![spec("//pkg:dup")]);

        let found = index.find_rules_by_import(&spec("//pkg:dup"), "jsonnet");
        let labels: Vec<String> = found.iter().map(|f| f.label.to_string()).collect();
        assert_eq!(labels, vec!["//pkg:dup", "//other:dup"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.import_count(), 1);
    }

    #[test]
    fn test_namespace_and_language_must_match() {
        let mut index = RuleIndex::new();
        index.add_rule(
            Label::new("shared", "common"),
            "jsonnet",
            vec![spec("//shared:common")],
        );

        let other_ns = ImportSpec::new("proto", "//shared:common");
        assert!(index.find_rules_by_import(&other_ns, "jsonnet").is_empty());
        assert!(
            index
                .find_rules_by_import(&spec("//shared:common"), "go")
                .is_empty()
        );
        assert!(
            index
                .find_rules_by_import(&spec("//shared:missing"), "jsonnet")
                .is_empty()
        );
    }

    #[test]
    fn test_closure_is_a_lookup() {
        let lookup = |spec: &ImportSpec, _lang: &str| {
            vec![FindResult {
                label: Label::parse(&spec.imp).unwrap(),
            }]
        };
        let found = lookup.find_rules_by_import(&spec("//a:b"), "jsonnet");
        assert_eq!(found[0].label, Label::new("a", "b"));
    }
}
