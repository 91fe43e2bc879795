//! Host contract for buildgen language extensions
//!
//! This crate models everything a language extension talks to while the
//! generator runs:
//!
//! - **Labels and rules**: [`Label`], [`Rule`] and their attribute values
//! - **Configuration**: per-directory [`Config`], the `buildgen.toml` file and
//!   `# buildgen:` directives read from existing build files
//! - **Reverse import index**: [`ImportSpec`], [`RuleIndex`] and the
//!   [`ImportLookup`] capability handed to resolvers
//! - **Lifecycle**: the [`Language`] trait and the phase-ordered [`Generator`]
//!
//! # Lifecycle
//!
//! ```text
//! register_flags -> check_flags
//!        |
//!   per directory: configure -> generate_rules
//!        |
//!   index: imports() for every generated rule
//!        |
//!   resolve() for every generated rule
//! ```

pub mod build_file;
pub mod config;
pub mod error;
pub mod extracted;
pub mod flags;
pub mod generator;
pub mod index;
pub mod label;
pub mod language;
pub mod rule;

pub use build_file::{BuildFile, DIRECTIVE_PREFIX, Directive};
pub use config::{CONFIG_FILENAME, Config, GeneratorFile, GeneratorSettings};
pub use error::{Error, Result};
pub use extracted::ExtractedImports;
pub use flags::{FlagDef, FlagSet};
pub use generator::{GeneratedPackage, Generator};
pub use index::{FindResult, ImportLookup, ImportSpec, RuleIndex};
pub use label::Label;
pub use language::{GenerateArgs, GenerateResult, KindInfo, Language, LoadInfo};
pub use rule::{AttrValue, Rule};
