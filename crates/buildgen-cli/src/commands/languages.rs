//! Languages command

use buildgen_core::{Config, FlagSet};
use colored::Colorize;

use super::registered_languages;
use crate::error::Result;

/// Run the languages command
pub fn run_languages() -> Result<()> {
    println!("{}", "Registered Languages".bold());
    println!();

    for lang in registered_languages() {
        println!("{}:", lang.name().cyan().bold());
        for (kind, info) in lang.kinds() {
            println!(
                "  {:<18} {}",
                kind.green(),
                format!(
                    "requires: {}; generates: {}; resolves: {}",
                    info.non_empty_attrs.join(", "),
                    info.mergeable_attrs.join(", "),
                    info.resolve_attrs.join(", ")
                )
                .dimmed()
            );
        }

        let mut flags = FlagSet::new();
        lang.register_flags(&mut flags, "generate", &mut Config::new("."));
        for def in flags.defs() {
            let default = def.default.as_deref().unwrap_or("");
            println!(
                "  {:<18} {}",
                format!("-F {}={}", def.name, default).yellow(),
                def.help.dimmed()
            );
        }
        println!(
            "  {} {}",
            "directives:".dimmed(),
            lang.known_directives().join(", ")
        );
        println!();
    }

    Ok(())
}
