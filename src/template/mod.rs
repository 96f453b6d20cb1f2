//! `{{name}}` placeholder substitution.
//!
//! Variables are either required or declared optional. A required variable
//! with no value aborts the render with [`InstallerError::MissingVariable`].
//! An optional variable with no value renders as an empty string, and a
//! frontmatter line of the form `key: {{name}}` (or `key: "{{name}}"`) that
//! would be left empty is dropped entirely.

pub mod store;

pub use store::TemplateStore;

use crate::error::{InstallerError, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid placeholder regex")
});
static OPTIONAL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*[A-Za-z0-9_.-]+:\s*"?\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}"?\s*$"#)
        .expect("valid optional line regex")
});

/// Flat variable map for one render.
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
    optional: BTreeSet<String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a required variable.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Declare `name` optional and set it when `value` is present.
    pub fn optional<V: Into<String>>(&mut self, name: &str, value: Option<V>) -> &mut Self {
        self.optional.insert(name.to_string());
        match value {
            Some(v) => {
                self.values.insert(name.to_string(), v.into());
            }
            None => {
                self.values.remove(name);
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn is_absent_optional(&self, name: &str) -> bool {
        self.optional.contains(name) && !self.values.contains_key(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            optional: BTreeSet::new(),
        }
    }
}

/// Substitute every placeholder in `template`.
///
/// `source` names the template in error messages.
pub fn render(template: &str, vars: &TemplateVars, source: &str) -> Result<String> {
    let filtered: String = template
        .split('\n')
        .filter(|line| {
            OPTIONAL_LINE
                .captures(line)
                .map_or(true, |caps| !vars.is_absent_optional(&caps[1]))
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut missing: Option<String> = None;
    let rendered = PLACEHOLDER.replace_all(&filtered, |caps: &Captures| {
        let name = &caps[1];
        if let Some(value) = vars.get(name) {
            return value.to_string();
        }
        if !vars.is_absent_optional(name) && missing.is_none() {
            missing = Some(name.to_string());
        }
        String::new()
    });

    if let Some(name) = missing {
        return Err(InstallerError::MissingVariable {
            name,
            template: source.to_string(),
        });
    }

    Ok(rendered.into_owned())
}
