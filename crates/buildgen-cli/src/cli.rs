//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// buildgen - Generate build files for Jsonnet sources
#[derive(Parser, Debug)]
#[command(name = "buildgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate build files for a source tree
    ///
    /// Prints the generated build files to stdout unless --write is given.
    ///
    /// Examples:
    ///   buildgen generate                          # Current directory
    ///   buildgen generate --root repo --write      # Write BUILD.bazel files
    ///   buildgen generate --imports imports.json   # Use extracted imports
    Generate {
        /// Repository root to walk
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Generator config file (default: <root>/buildgen.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Extracted import lists (JSON), overrides the config file
        #[arg(long, env = "BUILDGEN_IMPORTS")]
        imports: Option<PathBuf>,

        /// Write build files instead of printing them
        #[arg(long)]
        write: bool,

        /// Language flag assignment, name=value (repeatable)
        #[arg(short = 'F', long = "flag", value_name = "NAME=VALUE")]
        flags: Vec<String>,
    },

    /// List registered languages, their rule kinds and directives
    Languages,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["buildgen", "generate"]);
        assert_eq!(
            cli.command,
            Commands::Generate {
                root: PathBuf::from("."),
                config: None,
                imports: None,
                write: false,
                flags: vec![],
            }
        );
        assert!(!cli.verbose);
    }

    #[test]
    fn test_generate_with_flags() {
        let cli = Cli::parse_from([
            "buildgen",
            "-v",
            "generate",
            "--root",
            "repo",
            "--write",
            "-F",
            "a=1",
            "--flag",
            "b=2",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Generate {
                root, write, flags, ..
            } => {
                assert_eq!(root, PathBuf::from("repo"));
                assert!(write);
                assert_eq!(flags, vec!["a=1", "b=2"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
