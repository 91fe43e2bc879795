//! Generate command

use std::io::Write;
use std::path::{Path, PathBuf};

use buildgen_core::{
    BuildFile, CONFIG_FILENAME, Config, DIRECTIVE_PREFIX, ExtractedImports, GeneratedPackage,
    Generator, GeneratorFile,
};
use buildgen_fs::io::WriteOutcome;
use buildgen_fs::{NormalizedPath, io, walk_packages};
use colored::Colorize;

use super::registered_languages;
use crate::error::Result;

/// Options for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub imports: Option<PathBuf>,
    pub write: bool,
    pub flags: Vec<String>,
}

/// Run the generate command
pub fn run_generate(opts: &GenerateOptions) -> Result<()> {
    let root = opts.root.as_path();
    let config_path = opts
        .config
        .clone()
        .unwrap_or_else(|| root.join(CONFIG_FILENAME));
    let settings = GeneratorFile::load(&config_path)?.generator;

    let mut config = Config::from_settings(root, &settings);
    let mut generator = Generator::new(registered_languages());
    generator.register_flags("generate", &mut config);
    for assignment in &opts.flags {
        generator.flags_mut().parse_assignment(assignment)?;
    }
    generator.check_flags(&mut config)?;

    // --imports is relative to the working directory, the config value to the root
    let imports_path = opts
        .imports
        .clone()
        .or_else(|| settings.imports.as_ref().map(|p| root.join(p)));
    let extracted = match imports_path {
        Some(path) => ExtractedImports::load(&NormalizedPath::new(&path))?,
        None => ExtractedImports::new(),
    };

    let packages = walk_packages(&config.repo_root, &settings.exclude)?;
    let generated = generator.run(&config, &packages, &extracted)?;

    if opts.write {
        let mut unchanged = 0;
        for pkg in &generated {
            let outcome = write_build_file(&config.repo_root, &config.build_file_name, pkg)?;
            if outcome == WriteOutcome::Unchanged {
                unchanged += 1;
            }
        }
        println!(
            "{} {} build file(s) under {} ({} unchanged)",
            "Wrote".green().bold(),
            generated.len() - unchanged,
            config.repo_root.display(),
            unchanged
        );
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    for (i, pkg) in generated.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        let display_path = if pkg.rel.is_root() {
            config.build_file_name.clone()
        } else {
            format!("{}/{}", pkg.rel, config.build_file_name)
        };
        writeln!(stdout, "# {}", display_path)?;
        write!(stdout, "{}", pkg.render())?;
    }

    Ok(())
}

/// Replace a package's build file, keeping its directive lines on top.
fn write_build_file(
    root: &Path,
    build_file_name: &str,
    pkg: &GeneratedPackage,
) -> Result<WriteOutcome> {
    let path = NormalizedPath::new(pkg.build_file_path(root, build_file_name));
    let existing = BuildFile::load(pkg.rel.clone(), path.clone())?;

    let mut content = String::new();
    if let Some(file) = existing.filter(|f| !f.directives.is_empty()) {
        for directive in &file.directives {
            if directive.value.is_empty() {
                content.push_str(&format!("{}{}\n", DIRECTIVE_PREFIX, directive.key));
            } else {
                content.push_str(&format!(
                    "{}{} {}\n",
                    DIRECTIVE_PREFIX, directive.key, directive.value
                ));
            }
        }
        content.push('\n');
    }
    content.push_str(&pkg.render());

    let outcome = io::write_if_changed(&path, &content)?;
    tracing::info!(path = %path, rules = pkg.rules.len(), ?outcome, "build file written");
    Ok(outcome)
}
