//! Build rules and their attributes
//!
//! A [`Rule`] is the in-memory form of one call in a build file, e.g.
//! `jsonnet_library(name = "consts", srcs = ["consts.libsonnet"])`.
//! Attributes keep insertion order so rendering is stable.

use std::fmt;

/// An attribute value on a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Str(String),
    List(Vec<String>),
    Bool(bool),
}

impl AttrValue {
    /// String-list view of the value; a single string counts as one element.
    pub fn as_strings(&self) -> Option<Vec<&str>> {
        match self {
            AttrValue::Str(s) => Some(vec![s.as_str()]),
            AttrValue::List(items) => Some(items.iter().map(String::as_str).collect()),
            AttrValue::Bool(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(items: Vec<String>) -> Self {
        AttrValue::List(items)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(items: Vec<&str>) -> Self {
        AttrValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

/// Quote a string as a Starlark string literal.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// A single build rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    kind: String,
    name: String,
    attrs: Vec<(String, AttrValue)>,
}

impl Rule {
    /// Create a rule with no attributes besides its name.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute, replacing any existing value in place.
    pub fn set_attr(&mut self, key: &str, value: impl Into<AttrValue>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((key.to_string(), value)),
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn del_attr(&mut self, key: &str) -> Option<AttrValue> {
        let idx = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(idx).1)
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// String-list view of an attribute.
    pub fn attr_strings(&self, key: &str) -> Option<Vec<&str>> {
        self.attr(key).and_then(AttrValue::as_strings)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// Whether an attribute is unset, an empty string or an empty list.
    pub fn attr_is_empty(&self, key: &str) -> bool {
        match self.attr(key) {
            None => true,
            Some(AttrValue::Str(s)) => s.is_empty(),
            Some(AttrValue::List(items)) => items.is_empty(),
            Some(AttrValue::Bool(_)) => false,
        }
    }

    /// Attribute keys in insertion order (excluding `name`).
    pub fn attr_keys(&self) -> impl Iterator<Item = &str> {
        self.attrs.iter().map(|(k, _)| k.as_str())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}(", self.kind)?;
        writeln!(f, "    name = {},", quote(&self.name))?;
        for (key, value) in &self.attrs {
            match value {
                AttrValue::Str(s) => writeln!(f, "    {} = {},", key, quote(s))?,
                AttrValue::Bool(b) => {
                    writeln!(f, "    {} = {},", key, if *b { "True" } else { "False" })?
                }
                AttrValue::List(items) if items.len() <= 1 => {
                    let inner: Vec<String> = items.iter().map(|s| quote(s)).collect();
                    writeln!(f, "    {} = [{}],", key, inner.join(", "))?
                }
                AttrValue::List(items) => {
                    writeln!(f, "    {} = [", key)?;
                    for item in items {
                        writeln!(f, "        {},", quote(item))?;
                    }
                    writeln!(f, "    ],")?;
                }
            }
        }
        write!(f, ")")
    }
}
