//! Tests for the generation driver using a minimal in-test language

use buildgen_core::{
    BuildFile, Config, Error, ExtractedImports, FlagSet, GenerateArgs, GenerateResult,
    Generator, ImportLookup, ImportSpec, KindInfo, Label, Language, LoadInfo, Rule,
};
use buildgen_fs::{NormalizedPath, walk_packages};
use pretty_assertions::assert_eq;
use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

/// Generates a `text_lib` per `.txt` file and depends on whatever the
/// extracted imports name, looked up as `//<import>`. `empty.txt` yields a
/// rule without sources.
#[derive(Default)]
struct TextLang {
    /// (package, directive value, strict setting) recorded during configure
    seen: Rc<RefCell<Vec<Seen>>>,
}

type Seen = (String, Option<String>, Option<bool>);

/// State kept in `Config` exts by the text language.
struct TextSettings {
    strict: bool,
}

impl Language for TextLang {
    fn name(&self) -> &'static str {
        "text"
    }

    fn known_directives(&self) -> Vec<&'static str> {
        vec!["text_mode"]
    }

    fn register_flags(&self, flags: &mut FlagSet, _cmd: &str, _config: &mut Config) {
        flags.define("text_strict", "reject odd files", Some("false"));
    }

    fn check_flags(&self, flags: &FlagSet, _config: &mut Config) -> buildgen_core::Result<()> {
        match flags.get("text_strict") {
            Some("true") | Some("false") => Ok(()),
            other => Err(Error::invalid_flag(
                "text_strict",
                format!("expected true or false, got {other:?}"),
            )),
        }
    }

    fn configure(&self, config: &mut Config, rel: &NormalizedPath, file: Option<&BuildFile>) {
        let mode = file
            .into_iter()
            .flat_map(|f| &f.directives)
            .find(|d| d.key == "text_mode");
        if let Some(mode) = mode {
            config.set_ext(
                "text",
                TextSettings {
                    strict: mode.value == "strict",
                },
            );
        }

        self.seen.borrow_mut().push((
            rel.as_str().to_string(),
            config.directive("text_mode").map(str::to_string),
            config.ext::<TextSettings>("text").map(|s| s.strict),
        ));
    }

    fn kinds(&self) -> BTreeMap<&'static str, KindInfo> {
        BTreeMap::from([(
            "text_lib",
            KindInfo {
                non_empty_attrs: vec!["srcs"],
                ..KindInfo::default()
            },
        )])
    }

    fn loads(&self) -> Vec<LoadInfo> {
        vec![LoadInfo {
            name: "//tools:text.bzl",
            symbols: vec!["text_lib", "text_bundle"],
        }]
    }

    fn generate_rules(&self, args: &GenerateArgs<'_>) -> GenerateResult {
        let mut result = GenerateResult::default();
        for file in args.regular_files {
            if let Some(stem) = file.strip_suffix(".txt") {
                let mut rule = Rule::new("text_lib", stem);
                if stem == "empty" {
                    rule.set_attr("srcs", Vec::<String>::new());
                } else {
                    rule.set_attr("srcs", vec![file.as_str()]);
                }
                let imports: Vec<String> = args
                    .extracted
                    .get(args.rel.join(file).as_str())
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                result.push(rule, Box::new(imports));
            }
        }
        result
    }

    fn imports(&self, _config: &Config, rule: &Rule, pkg: &NormalizedPath) -> Vec<ImportSpec> {
        if rule.name() == "hidden" {
            return vec![];
        }
        vec![ImportSpec::new("text", format!("//{}:{}", pkg, rule.name()))]
    }

    fn embeds(&self, rule: &Rule, from: &Label) -> Vec<Label> {
        if rule.name() == "outer" {
            vec![Label::new(from.pkg.clone(), "inner")]
        } else {
            vec![]
        }
    }

    fn resolve(
        &self,
        _config: &Config,
        index: &dyn ImportLookup,
        rule: &mut Rule,
        imports: &dyn Any,
        _from: &Label,
    ) {
        let Some(imports) = imports.downcast_ref::<Vec<String>>() else {
            return;
        };
        let deps: Vec<String> = imports
            .iter()
            .filter_map(|imp| {
                let spec = ImportSpec::new("text", imp.clone());
                let found = index.find_rules_by_import(&spec, "text");
                (found.len() == 1).then(|| found[0].label.to_string())
            })
            .collect();
        if deps.is_empty() {
            rule.del_attr("deps");
        } else {
            rule.set_attr("deps", deps);
        }
    }
}

fn write(root: &std::path::Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn generator() -> Generator {
    Generator::new(vec![Box::new(TextLang::default())])
}

#[test]
fn test_generate_index_and_resolve_across_packages() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a/one.txt", "");
    write(temp.path(), "b/two.txt", "");

    let mut extracted = ExtractedImports::new();
    extracted.insert("b/two.txt", vec!["//a:one".into(), "//a:missing".into()]);

    let packages = walk_packages(temp.path(), &[]).unwrap();
    let generated = generator()
        .run(&Config::new(temp.path()), &packages, &extracted)
        .unwrap();

    let rels: Vec<&str> = generated.iter().map(|g| g.rel.as_str()).collect();
    assert_eq!(rels, vec!["a", "b"]);

    let two = &generated[1].rules[0];
    assert_eq!(two.attr_strings("deps"), Some(vec!["//a:one"]));
    assert!(!generated[0].rules[0].has_attr("deps"));
}

#[test]
fn test_render_includes_only_used_load_symbols() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a/one.txt", "");

    let packages = walk_packages(temp.path(), &[]).unwrap();
    let generated = generator()
        .run(&Config::new(temp.path()), &packages, &ExtractedImports::new())
        .unwrap();

    let expected = r#"load("//tools:text.bzl", "text_lib")

text_lib(
    name = "one",
    srcs = ["one.txt"],
)
"#;
    assert_eq!(generated[0].render(), expected);
    assert_eq!(
        generated[0].build_file_path(temp.path(), "BUILD.bazel"),
        temp.path().join("a").join("BUILD.bazel")
    );
}

#[test]
fn test_directives_are_inherited_by_subdirectories() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a/BUILD.bazel", "# buildgen:text_mode strict\n");
    write(temp.path(), "a/b/one.txt", "");
    write(temp.path(), "c/two.txt", "");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let lang = TextLang { seen: Rc::clone(&seen) };
    let packages = walk_packages(temp.path(), &[]).unwrap();

    Generator::new(vec![Box::new(lang)])
        .run(&Config::new(temp.path()), &packages, &ExtractedImports::new())
        .unwrap();

    let seen = seen.borrow().clone();
    let lookup = |rel: &str| {
        seen.iter()
            .find(|(r, _, _)| r == rel)
            .map(|(_, directive, strict)| (directive.clone(), *strict))
            .unwrap()
    };
    assert_eq!(lookup(""), (None, None));
    assert_eq!(lookup("a"), (Some("strict".to_string()), Some(true)));
    assert_eq!(lookup("a/b"), (Some("strict".to_string()), Some(true)));
    assert_eq!(lookup("c"), (None, None));
}

#[test]
fn test_ext_set_by_a_language_is_overridden_below() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a/BUILD.bazel", "# buildgen:text_mode strict\n");
    write(temp.path(), "a/b/BUILD.bazel", "# buildgen:text_mode loose\n");
    write(temp.path(), "a/b/c/one.txt", "");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let lang = TextLang { seen: Rc::clone(&seen) };
    let packages = walk_packages(temp.path(), &[]).unwrap();

    Generator::new(vec![Box::new(lang)])
        .run(&Config::new(temp.path()), &packages, &ExtractedImports::new())
        .unwrap();

    let strict: Vec<(String, Option<bool>)> = seen
        .borrow()
        .iter()
        .map(|(rel, _, strict)| (rel.clone(), *strict))
        .collect();
    assert_eq!(
        strict,
        vec![
            (String::new(), None),
            ("a".to_string(), Some(true)),
            ("a/b".to_string(), Some(false)),
            ("a/b/c".to_string(), Some(false)),
        ]
    );
}

#[test]
fn test_rules_with_empty_required_attrs_are_dropped() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a/one.txt", "");
    write(temp.path(), "a/empty.txt", "");
    write(temp.path(), "b/empty.txt", "");
    write(temp.path(), "c/user.txt", "");

    let mut extracted = ExtractedImports::new();
    extracted.insert("c/user.txt", vec!["//a:empty".into(), "//a:one".into()]);

    let packages = walk_packages(temp.path(), &[]).unwrap();
    let generated = generator()
        .run(&Config::new(temp.path()), &packages, &extracted)
        .unwrap();

    let rels: Vec<&str> = generated.iter().map(|g| g.rel.as_str()).collect();
    assert_eq!(rels, vec!["a", "c"]);

    let names: Vec<&str> = generated[0].rules.iter().map(Rule::name).collect();
    assert_eq!(names, vec!["one"]);

    // A dropped rule is never indexed
    let user = &generated[1].rules[0];
    assert_eq!(user.attr_strings("deps"), Some(vec!["//a:one"]));
}

#[test]
fn test_rule_with_empty_payload_gets_no_deps() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a/one.txt", "");

    let packages = walk_packages(temp.path(), &[]).unwrap();
    let generated = generator()
        .run(&Config::new(temp.path()), &packages, &ExtractedImports::new())
        .unwrap();

    assert!(!generated[0].rules[0].has_attr("deps"));
}

#[test]
fn test_embedded_and_unexposed_rules_cannot_be_found() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a/outer.txt", "");
    write(temp.path(), "a/inner.txt", "");
    write(temp.path(), "a/hidden.txt", "");
    write(temp.path(), "b/user.txt", "");

    let mut extracted = ExtractedImports::new();
    extracted.insert(
        "b/user.txt",
        vec!["//a:inner".into(), "//a:hidden".into(), "//a:outer".into()],
    );

    let packages = walk_packages(temp.path(), &[]).unwrap();
    let generated = generator()
        .run(&Config::new(temp.path()), &packages, &extracted)
        .unwrap();

    let user = &generated[1].rules[0];
    assert_eq!(user.attr_strings("deps"), Some(vec!["//a:outer"]));
}

#[test]
fn test_unknown_language_is_an_error() {
    let temp = TempDir::new().unwrap();
    let packages = walk_packages(temp.path(), &[]).unwrap();
    let mut config = Config::new(temp.path());
    config.languages = vec!["cobol".to_string()];

    let err = generator()
        .run(&config, &packages, &ExtractedImports::new())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownLanguage(ref name) if name == "cobol"));
}

#[test]
fn test_flags_are_registered_and_checked() {
    let temp = TempDir::new().unwrap();
    let mut config = Config::new(temp.path());
    let mut generator = generator();

    generator.register_flags("generate", &mut config);
    assert_eq!(generator.flags().get("text_strict"), Some("false"));
    generator.check_flags(&mut config).unwrap();

    generator
        .flags_mut()
        .parse_assignment("text_strict=maybe")
        .unwrap();
    assert!(generator.check_flags(&mut config).is_err());
}
