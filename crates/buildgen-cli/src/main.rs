//! buildgen CLI
//!
//! Walks a source tree and generates build files with the registered
//! language extensions.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose).map_err(|e| CliError::Logging(e.to_string()))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Commands::Generate {
            root,
            config,
            imports,
            write,
            flags,
        } => commands::run_generate(&commands::GenerateOptions {
            root,
            config,
            imports,
            write,
            flags,
        }),
        Commands::Languages => commands::run_languages(),
    }
}
