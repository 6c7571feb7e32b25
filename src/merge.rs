//! Deep merge of configuration fragments.

use serde_json::{Map, Value};

/// Partial, possibly nested configuration object (e.g. an npm `scripts` table).
pub type ConfigFragment = Map<String, Value>;

/// Merges `fragment` into `target`.
///
/// When both sides hold an object at the same key the merge recurses;
/// otherwise the value from `fragment` replaces the existing one. Keys absent
/// from `fragment` are left alone. An overwritten key keeps its position.
pub fn merge_into(target: &mut ConfigFragment, fragment: &ConfigFragment) {
    for (key, value) in fragment {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            (Some(existing), _) => *existing = value.clone(),
            (None, _) => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Merges fragments left to right; later fragments win.
pub fn merge<'a, I>(fragments: I) -> ConfigFragment
where
    I: IntoIterator<Item = &'a ConfigFragment>,
{
    fragments
        .into_iter()
        .fold(ConfigFragment::new(), |mut merged, fragment| {
            merge_into(&mut merged, fragment);
            merged
        })
}
