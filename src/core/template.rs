//! Line-oriented text templates with named placeholders.
//!
//! `{{name}}` is replaced by its binding. `{{?name}}` marks an optional line:
//! it must be the only thing on its line, and the whole line (indentation and
//! newline included) is dropped when the binding is empty. Unbound
//! placeholders and unused bindings are errors, so a template and its
//! generator cannot drift apart silently.

use crate::utils::error::{Result, ScaffoldError};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

const PLACEHOLDER_PATTERN: &str = r"\{\{(\??)([a-z0-9_]+)\}\}";

#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: BTreeMap<&'static str, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Template {
    name: &'static str,
    source: &'static str,
}

impl Template {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    pub fn render(&self, bindings: &Bindings) -> Result<String> {
        let re = Regex::new(PLACEHOLDER_PATTERN).map_err(|e| self.error(e.to_string()))?;
        let mut used = BTreeSet::new();
        let mut output = String::with_capacity(self.source.len());

        for line in self.source.split_inclusive('\n') {
            if let Some(rendered) = self.render_line(line, &re, bindings, &mut used)? {
                output.push_str(&rendered);
            }
        }

        if let Some(unused) = bindings.values.keys().find(|key| !used.contains(**key)) {
            return Err(self.error(format!("binding `{}` is never used", unused)));
        }

        Ok(output)
    }

    fn render_line(
        &self,
        line: &str,
        re: &Regex,
        bindings: &Bindings,
        used: &mut BTreeSet<String>,
    ) -> Result<Option<String>> {
        let body = line.strip_suffix('\n').unwrap_or(line);
        let mut rendered = String::with_capacity(line.len());
        let mut last = 0;

        for caps in re.captures_iter(body) {
            let (Some(whole), Some(marker), Some(key)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let key = key.as_str();
            let value = bindings
                .get(key)
                .ok_or_else(|| self.error(format!("placeholder `{}` has no binding", key)))?;
            used.insert(key.to_string());

            if !marker.as_str().is_empty() {
                if body.trim() != whole.as_str() {
                    return Err(self.error(format!(
                        "optional placeholder `{}` must stand alone on its line",
                        key
                    )));
                }
                if value.is_empty() {
                    return Ok(None);
                }
            }

            rendered.push_str(&body[last..whole.start()]);
            rendered.push_str(value);
            last = whole.end();
        }

        rendered.push_str(&body[last..]);
        if line.ends_with('\n') {
            rendered.push('\n');
        }
        Ok(Some(rendered))
    }

    fn error(&self, message: String) -> ScaffoldError {
        ScaffoldError::TemplateError {
            message: format!("{}: {}", self.name, message),
        }
    }
}
