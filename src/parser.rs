//! Preloaded answers.
//!
//! Answers can be piped in on stdin (JSON, or YAML as a fallback) so the
//! generator can run without a terminal. Keys match the fields of
//! [`crate::feature::Selection`]; anything missing is asked interactively.

use std::io::Read;

use log::debug;

use crate::error::Result;

/// Parses preloaded answers. Blank input yields `Value::Null`.
pub fn parse_answers(content: &str) -> Result<serde_json::Value> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(e) => {
            debug!("Answers are not JSON ({e}), trying YAML");
            Ok(serde_yaml::from_str(content)?)
        }
    }
}

pub fn load_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_answers(&buffer)
}

/// Returns the preloaded answers, reading stdin only when asked to.
pub fn get_answers_from(take_from_stdin: bool) -> Result<serde_json::Value> {
    if take_from_stdin {
        load_from_stdin()
    } else {
        Ok(serde_json::Value::Null)
    }
}
