//! Ignore patterns for template walking.
//! Paths matching these globs (relative to the template root) are never
//! copied, whichever manifest entry reaches them.

use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiles `patterns` together with the default patterns.
///
/// # Example
/// ```ignore
/// let set = build_ignore_set(&["*.orig"])?;
/// assert!(set.is_match("index.js.orig"));
/// assert!(set.is_match("assets/.DS_Store"));
/// ```
pub fn build_ignore_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }
    for pattern in patterns {
        builder.add(Glob::new(pattern.as_ref())?);
    }
    Ok(builder.build()?)
}

/// Only the default patterns.
pub fn default_ignore_set() -> Result<GlobSet> {
    build_ignore_set::<&str>(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns() {
        let set = default_ignore_set().unwrap();
        assert!(set.is_match(".DS_Store"));
        assert!(set.is_match("assets/.DS_Store"));
        assert!(set.is_match("locales/Thumbs.db"));
        assert!(!set.is_match("assets/icon.svg"));
    }

    #[test]
    fn test_extra_patterns() {
        let set = build_ignore_set(&["*.orig"]).unwrap();
        assert!(set.is_match("index.js.orig"));
        assert!(set.is_match(".DS_Store"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(build_ignore_set(&["a[b"]).is_err());
    }
}
