//! Rule generation for Jsonnet sources
//!
//! One rule per source file in an accepted package:
//!
//! | file            | rule                                                        |
//! |-----------------|-------------------------------------------------------------|
//! | `x.libsonnet`   | `jsonnet_library(name = "x", srcs = ["x.libsonnet"])`       |
//! | `x.jsonnet`     | `jsonnet_to_json(name = "x", src = "x.jsonnet", outs = ["x.json"])` |
//!
//! When a library and a top-level file share a stem, the `jsonnet_to_json`
//! rule is named `x_json` so both targets can coexist. If `x_json` is itself
//! the name of another rule in the package, the renamed rule is skipped.

use crate::filter::should_process_pkg;
use crate::{JSON_EXT, JSONNET_EXT, LIBRARY_KIND, LIBSONNET_EXT, TO_JSON_KIND};
use buildgen_core::{GenerateArgs, GenerateResult, Rule};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Generate rules for the directory described by `args`.
///
/// Each rule's import payload is the extracted import list of its source
/// file (`Vec<String>`, empty when the extractor reported nothing).
pub fn generate_rules(args: &GenerateArgs<'_>) -> GenerateResult {
    let mut result = GenerateResult::default();
    if !should_process_pkg(args.rel.as_str()) {
        trace!(pkg = %args.rel, "package not handled by jsonnet");
        return result;
    }

    let lib_stems: HashSet<&str> = args
        .regular_files
        .iter()
        .filter_map(|f| f.strip_suffix(LIBSONNET_EXT))
        .collect();
    // Names taken without any renaming
    let plain_names: HashSet<&str> = args
        .regular_files
        .iter()
        .filter_map(|f| f.strip_suffix(JSONNET_EXT))
        .filter(|stem| !lib_stems.contains(stem))
        .chain(lib_stems.iter().copied())
        .collect();

    for file in args.regular_files {
        let rule = if let Some(stem) = file.strip_suffix(LIBSONNET_EXT) {
            if stem.is_empty() {
                continue;
            }
            let mut rule = Rule::new(LIBRARY_KIND, stem);
            rule.set_attr("srcs", vec![file.as_str()]);
            rule
        } else if let Some(stem) = file.strip_suffix(JSONNET_EXT) {
            if stem.is_empty() {
                continue;
            }
            let name = if lib_stems.contains(stem) {
                let renamed = format!("{}_json", stem);
                if plain_names.contains(renamed.as_str()) {
                    warn!(
                        pkg = %args.rel,
                        file = %file,
                        name = %renamed,
                        "rule name already taken, skipping"
                    );
                    continue;
                }
                renamed
            } else {
                stem.to_string()
            };
            let mut rule = Rule::new(TO_JSON_KIND, name);
            rule.set_attr("src", file.as_str());
            rule.set_attr("outs", vec![format!("{}{}", stem, JSON_EXT)]);
            rule
        } else {
            continue;
        };

        let imports: Vec<String> = args
            .extracted
            .get(args.rel.join(file).as_str())
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        result.push(rule, Box::new(imports));
    }

    debug!(pkg = %args.rel, rules = result.rules.len(), "generated jsonnet rules");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildgen_core::{Config, ExtractedImports};
    use buildgen_fs::NormalizedPath;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn run(rel: &str, files: &[&str], extracted: &ExtractedImports) -> GenerateResult {
        let config = Config::new("/repo");
        let rel = NormalizedPath::new(rel);
        let files: Vec<String> = files.iter().map(|f| f.to_string()).collect();
        let args = GenerateArgs {
            config: &config,
            rel: &rel,
            dir: Path::new("/repo"),
            regular_files: &files,
            subdirs: &[],
            file: None,
            extracted,
        };
        generate_rules(&args)
    }

    #[test]
    fn test_generates_library_and_to_json_rules() {
        let result = run(
            "cmd/app",
            &["README.md", "app.jsonnet", "config.libsonnet", "schema.json"],
            &ExtractedImports::new(),
        );

        let rendered: Vec<String> = result.rules.iter().map(Rule::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "jsonnet_to_json(\n    name = \"app\",\n    src = \"app.jsonnet\",\n    outs = [\"app.json\"],\n)",
                "jsonnet_library(\n    name = \"config\",\n    srcs = [\"config.libsonnet\"],\n)",
            ]
        );
        assert_eq!(result.imports.len(), 2);
    }

    #[test]
    fn test_payload_carries_extracted_imports() {
        let mut extracted = ExtractedImports::new();
        extracted.insert(
            "cmd/app/config.libsonnet",
            vec!["../shared/common.libsonnet".into(), "schema.json".into()],
        );

        let result = run("cmd/app", &["config.libsonnet"], &extracted);
        let payload = result.imports[0].downcast_ref::<Vec<String>>().unwrap();
        assert_eq!(
            payload,
            &vec!["../shared/common.libsonnet".to_string(), "schema.json".to_string()]
        );
    }

    #[test]
    fn test_shared_stem_gets_json_suffix() {
        let result = run(
            "deployments/k8s",
            &["prod.jsonnet", "prod.libsonnet"],
            &ExtractedImports::new(),
        );
        let names: Vec<&str> = result.rules.iter().map(Rule::name).collect();
        assert_eq!(names, vec!["prod_json", "prod"]);
        assert_eq!(result.rules[0].attr_strings("outs"), Some(vec!["prod.json"]));
    }

    #[test]
    fn test_renamed_rule_never_duplicates_a_name() {
        let result = run(
            "deployments/k8s",
            &["x.jsonnet", "x.libsonnet", "x_json.jsonnet"],
            &ExtractedImports::new(),
        );
        let names: Vec<&str> = result.rules.iter().map(Rule::name).collect();
        assert_eq!(names, vec!["x", "x_json"]);
        assert_eq!(result.rules[1].attr_strings("src"), Some(vec!["x_json.jsonnet"]));
        assert_eq!(result.imports.len(), 2);
    }

    #[test]
    fn test_rejected_package_generates_nothing() {
        let result = run("pkg/other", &["config.libsonnet"], &ExtractedImports::new());
        assert!(result.rules.is_empty());
        assert!(result.imports.is_empty());
    }
}
