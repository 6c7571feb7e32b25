//! Validation of the selection record before any filesystem work starts.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::feature::Selection;

fn id_regex() -> &'static Regex {
    static ID: OnceLock<Regex> = OnceLock::new();
    // Accepts both `foo_bar` and dotted `com.example.foo_bar`.
    ID.get_or_init(|| Regex::new(r"^[a-z0-9_]+(\.[a-z0-9_]+)*$").expect("id pattern is valid"))
}

pub fn is_valid_id(id: &str) -> bool {
    id_regex().is_match(id)
}

/// Checks an extension id.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::Validation("extension id is required".to_string()));
    }
    if !is_valid_id(id) {
        return Err(Error::Validation(format!(
            "invalid extension id '{id}': use lowercase letters, digits and '_', \
             optionally separated by '.'"
        )));
    }
    Ok(())
}

/// Checks every field the generator relies on.
pub fn validate(selection: &Selection) -> Result<()> {
    let metadata = &selection.metadata;
    validate_id(&metadata.id)?;
    if metadata.name.trim().is_empty() {
        return Err(Error::Validation("extension name is required".to_string()));
    }
    Ok(())
}
