//! Command implementations for buildgen-cli

pub mod generate;
pub mod languages;

pub use generate::{GenerateOptions, run_generate};
pub use languages::run_languages;

use buildgen_core::Language;
use buildgen_jsonnet::JsonnetLang;

/// Every language extension compiled into the binary.
pub fn registered_languages() -> Vec<Box<dyn Language>> {
    vec![Box::new(JsonnetLang::new())]
}
