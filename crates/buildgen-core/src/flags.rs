//! Flags declared by language extensions
//!
//! Extensions declare flags during `register_flags`; the host fills values
//! from `name=value` assignments and then calls `check_flags`.

use crate::{Error, Result};
use std::collections::HashMap;

/// A declared flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDef {
    pub name: String,
    pub help: String,
    pub default: Option<String>,
}

/// Declared flags and their parsed values.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    defs: Vec<FlagDef>,
    values: HashMap<String, String>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a flag. Re-declaring a name replaces the earlier definition.
    pub fn define(&mut self, name: &str, help: &str, default: Option<&str>) {
        let def = FlagDef {
            name: name.to_string(),
            help: help.to_string(),
            default: default.map(str::to_string),
        };
        match self.defs.iter_mut().find(|d| d.name == name) {
            Some(existing) => *existing = def,
            None => self.defs.push(def),
        }
    }

    /// Apply a `name=value` assignment to a declared flag.
    pub fn parse_assignment(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| Error::invalid_flag(assignment, "expected name=value"))?;

        if !self.defs.iter().any(|d| d.name == name) {
            return Err(Error::invalid_flag(name, "no language declares this flag"));
        }

        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Value of a flag, falling back to its default.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str).or_else(|| {
            self.defs
                .iter()
                .find(|d| d.name == name)
                .and_then(|d| d.default.as_deref())
        })
    }

    pub fn defs(&self) -> &[FlagDef] {
        &self.defs
    }
}
