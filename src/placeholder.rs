//! `%[key]` placeholder substitution for format-copied template files.
//!
//! A placeholder is the literal text `%[key]`. Doubling the percent sign
//! (`%%[key]`) escapes it: the output keeps a single `%[key]`. Keys missing
//! from the map are left untouched, escape included.

use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Flat mapping from placeholder key to its replacement text.
pub type PlaceholderMap = IndexMap<String, String>;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"(%?)%\[([^\[\]]+)\]").expect("placeholder pattern is valid")
    })
}

/// Replaces every `%[key]` in `text` whose key is present in `map`.
///
/// The text is scanned once, left to right. Replacement values are never
/// rescanned, so a value containing `%[other]` is emitted verbatim.
pub fn substitute(text: &str, map: &PlaceholderMap) -> String {
    placeholder_regex()
        .replace_all(text, |caps: &Captures| {
            let key = &caps[2];
            match map.get(key) {
                Some(_) if !caps[1].is_empty() => format!("%[{key}]"),
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> PlaceholderMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let m = map(&[("id", "foo"), ("name", "Foo")]);
        assert_eq!(
            substitute("%[id]: %[name] (%[id])", &m),
            "foo: Foo (foo)"
        );
    }

    #[test]
    fn test_escape_strips_one_percent() {
        let m = map(&[("id", "x")]);
        assert_eq!(substitute("%%[id]", &m), "%[id]");
        assert_eq!(substitute("a %%[id] b %[id]", &m), "a %[id] b x");
    }

    #[test]
    fn test_unknown_key_passthrough() {
        assert_eq!(substitute("%[missing]", &PlaceholderMap::new()), "%[missing]");
        assert_eq!(substitute("%%[missing]", &PlaceholderMap::new()), "%%[missing]");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let m = map(&[("a", "%[b]"), ("b", "nope")]);
        assert_eq!(substitute("%[a]", &m), "%[b]");

        let reversed = map(&[("b", "nope"), ("a", "%[b]")]);
        assert_eq!(substitute("%[a]", &reversed), "%[b]");
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let m = map(&[("id", "foo"), ("author", "Alice")]);
        let once = substitute("id=%[id] by %[author]; 100% [sure]", &m);
        assert_eq!(substitute(&once, &m), once);
        assert_eq!(once, "id=foo by Alice; 100% [sure]");
    }

    #[test]
    fn test_text_without_placeholders_is_unchanged() {
        let m = map(&[("id", "foo")]);
        let text = "module.exports = { entry: './index.js' };\n";
        assert_eq!(substitute(text, &m), text);
    }
}
