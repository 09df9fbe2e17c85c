use crate::utils::error::{Result, ScaffoldError};
use regex::Regex;
use std::collections::HashSet;

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
const CRATE_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_-]*$";
const COMPONENT_NAME_PATTERN: &str = r"^[A-Za-z0-9]+([._][A-Za-z0-9]+)*$";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn is_match(pattern: &str, value: &str) -> Result<bool> {
    let re = Regex::new(pattern).map_err(|e| ScaffoldError::TemplateError {
        message: format!("invalid validation pattern {}: {}", pattern, e),
    })?;
    Ok(re.is_match(value))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScaffoldError::spec(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Port names and contract identifiers end up as Rust and Nix identifiers.
pub fn validate_identifier(field_name: &str, value: &str) -> Result<()> {
    if !is_match(IDENTIFIER_PATTERN, value)? {
        return Err(ScaffoldError::spec(
            field_name,
            format!("`{}` is not a valid identifier", value),
        ));
    }
    Ok(())
}

pub fn validate_crate_name(field_name: &str, value: &str) -> Result<()> {
    if !is_match(CRATE_NAME_PATTERN, value)? {
        return Err(ScaffoldError::spec(
            field_name,
            format!("`{}` is not a valid crate name", value),
        ));
    }
    Ok(())
}

/// Component names are `_` or `.` separated alphanumeric segments.
pub fn validate_component_name(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if !is_match(COMPONENT_NAME_PATTERN, value)? {
        return Err(ScaffoldError::spec(
            field_name,
            format!(
                "`{}` must be alphanumeric segments separated by `_` or `.`",
                value
            ),
        ));
    }
    Ok(())
}

/// Fails on the first name shared by two of the given groups.
pub fn validate_disjoint<'a, I, G>(field_name: &str, groups: I) -> Result<()>
where
    I: IntoIterator<Item = G>,
    G: IntoIterator<Item = &'a String>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    for group in groups {
        for name in group {
            if !seen.insert(name.as_str()) {
                return Err(ScaffoldError::spec(
                    field_name,
                    format!("port `{}` is declared in more than one group", name),
                ));
            }
        }
    }
    Ok(())
}
