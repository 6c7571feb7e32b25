//! Manifest resolution.
//!
//! Turns an ordered list of feature types into a copy plan, the merged
//! scripts fragment and the dependency lists, using the static tables of a
//! [`Registry`].

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexSet;
use log::debug;

use crate::error::{Error, Result};
use crate::feature::FeatureType;
use crate::merge::{merge_into, ConfigFragment};
use crate::registry::Registry;

/// One file or directory to reproduce at the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    /// Copied byte for byte; directories recursively.
    Copy { path: PathBuf },
    /// Copied with placeholder substitution, optionally under a new name.
    Format {
        source: PathBuf,
        dest: Option<PathBuf>,
    },
}

impl ManifestEntry {
    pub fn copy(path: impl Into<PathBuf>) -> Self {
        Self::Copy { path: path.into() }
    }

    pub fn format(source: impl Into<PathBuf>) -> Self {
        Self::Format {
            source: source.into(),
            dest: None,
        }
    }

    pub fn format_to(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self::Format {
            source: source.into(),
            dest: Some(dest.into()),
        }
    }

    /// Path relative to the template root.
    pub fn source(&self) -> &Path {
        match self {
            Self::Copy { path } => path,
            Self::Format { source, .. } => source,
        }
    }

    /// Path relative to the destination root.
    pub fn destination(&self) -> &Path {
        match self {
            Self::Copy { path } => path,
            Self::Format { source, dest } => dest.as_deref().unwrap_or(source),
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

/// What to do when two feature types target the same destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Keep both entries; the later one overwrites during materialization.
    #[default]
    LastWins,
    /// Fail resolution with [`Error::ManifestCollision`].
    Reject,
}

/// Result of resolving a feature type request.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Normalized request: `plain` first, duplicates removed.
    pub types: Vec<FeatureType>,
    pub copy_plan: Vec<ManifestEntry>,
    pub scripts: ConfigFragment,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

/// Puts `plain` first and drops repeated types, keeping first occurrences.
pub fn normalize(types: &[FeatureType]) -> Vec<FeatureType> {
    let mut normalized = vec![FeatureType::plain()];
    for feature in types {
        if !normalized.contains(feature) {
            normalized.push(feature.clone());
        }
    }
    normalized
}

/// Checks that `path` stays below whatever root it is joined to.
pub fn ensure_relative(path: &Path) -> Result<()> {
    let escapes = path.as_os_str().is_empty()
        || path.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
    if escapes {
        return Err(Error::PathEscape {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// Resolves `types` with [`CollisionPolicy::LastWins`].
pub fn resolve(registry: &Registry, types: &[FeatureType]) -> Result<Resolution> {
    resolve_with(registry, types, CollisionPolicy::LastWins)
}

/// Resolves `types` against `registry`.
///
/// Types without a registration in a table contribute nothing to it;
/// unknown types are never an error.
pub fn resolve_with(
    registry: &Registry,
    types: &[FeatureType],
    policy: CollisionPolicy,
) -> Result<Resolution> {
    let types = normalize(types);

    let mut copy_plan = Vec::new();
    let mut owners: HashMap<PathBuf, FeatureType> = HashMap::new();
    let mut scripts = ConfigFragment::new();
    let mut dependencies = IndexSet::new();
    let mut dev_dependencies = IndexSet::new();

    for feature in &types {
        for entry in registry.entries(feature) {
            ensure_relative(entry.source())?;
            ensure_relative(entry.destination())?;

            let destination = entry.destination().to_path_buf();
            if let Some(first) = owners.insert(destination.clone(), feature.clone()) {
                if policy == CollisionPolicy::Reject {
                    return Err(Error::ManifestCollision {
                        path: destination.display().to_string(),
                        first: first.to_string(),
                        second: feature.to_string(),
                    });
                }
                debug!(
                    "'{}' from '{}' overrides the entry from '{}'",
                    destination.display(),
                    feature,
                    first
                );
            }
            copy_plan.push(entry.clone());
        }

        if let Some(fragment) = registry.scripts(feature) {
            merge_into(&mut scripts, fragment);
        }
        dependencies.extend(registry.dependencies(feature).iter().cloned());
        dev_dependencies.extend(registry.dev_dependencies(feature).iter().cloned());
    }

    debug!(
        "Resolved {} manifest entries for [{}]",
        copy_plan.len(),
        types
            .iter()
            .map(FeatureType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(Resolution {
        types,
        copy_plan,
        scripts,
        dependencies: dependencies.into_iter().collect(),
        dev_dependencies: dev_dependencies.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn types(names: &[&str]) -> Vec<FeatureType> {
        names.iter().map(|name| FeatureType::from(*name)).collect()
    }

    #[test]
    fn test_plain_is_always_first() {
        assert_eq!(normalize(&types(&["yarn", "plain"])), types(&["plain", "yarn"]));
        assert_eq!(normalize(&[]), types(&["plain"]));
        assert_eq!(
            normalize(&types(&["webpack", "webpack"])),
            types(&["plain", "webpack"])
        );
    }

    #[test]
    fn test_unknown_types_are_skipped() {
        let registry = Registry::builtin();
        let with_unknown = resolve(registry, &types(&["plain", "nonexistent-type"])).unwrap();
        let plain = resolve(registry, &types(&["plain"])).unwrap();

        assert_eq!(with_unknown.copy_plan, plain.copy_plan);
        assert_eq!(with_unknown.scripts, plain.scripts);
        assert_eq!(with_unknown.dependencies, plain.dependencies);
    }

    #[test]
    fn test_scripts_precedence() {
        let registry = Registry::builtin();
        let npm = resolve(registry, &types(&["npm", "webpack", "javascript"])).unwrap();
        assert!(npm.scripts["build"].as_str().unwrap().ends_with("webpack --bail"));
        assert_eq!(npm.scripts["build:dist"], "NODE_ENV=production npm run build");

        let yarn = resolve(registry, &types(&["yarn", "webpack"])).unwrap();
        assert_eq!(yarn.scripts["build:dist"], "NODE_ENV=production yarn run build");
    }

    #[test]
    fn test_copy_plan_follows_selection_order() {
        let registry = Registry::new()
            .with_entries("plain", vec![ManifestEntry::copy("a")])
            .with_entries(
                "extra",
                vec![ManifestEntry::format("b"), ManifestEntry::copy("c")],
            );
        let resolution = resolve(&registry, &types(&["extra"])).unwrap();
        let sources: Vec<&Path> = resolution.copy_plan.iter().map(ManifestEntry::source).collect();
        assert_eq!(sources, [Path::new("a"), Path::new("b"), Path::new("c")]);
    }

    #[test]
    fn test_dependencies_are_concatenated_without_duplicates() {
        let registry = Registry::new()
            .with_dependencies("plain", &["a", "b"])
            .with_dependencies("x", &["b", "c"]);
        let resolution = resolve(&registry, &types(&["x"])).unwrap();
        assert_eq!(resolution.dependencies, ["a", "b", "c"]);
    }

    #[test]
    fn test_collision_last_wins_keeps_both() {
        let registry = Registry::new()
            .with_entries("plain", vec![ManifestEntry::format_to("one.js", "out.js")])
            .with_entries("x", vec![ManifestEntry::format_to("two.js", "out.js")]);
        let resolution = resolve(&registry, &types(&["x"])).unwrap();
        assert_eq!(resolution.copy_plan.len(), 2);
        assert_eq!(resolution.copy_plan[1].source(), Path::new("two.js"));
    }

    #[test]
    fn test_collision_reject() {
        let registry = Registry::new()
            .with_entries("plain", vec![ManifestEntry::format_to("one.js", "out.js")])
            .with_entries("x", vec![ManifestEntry::format_to("two.js", "out.js")]);
        let err = resolve_with(&registry, &types(&["x"]), CollisionPolicy::Reject).unwrap_err();
        match err {
            Error::ManifestCollision { path, first, second } => {
                assert_eq!(path, "out.js");
                assert_eq!(first, "plain");
                assert_eq!(second, "x");
            }
            other => panic!("Expected ManifestCollision, got {other:?}"),
        }
    }

    #[test]
    fn test_builtin_has_no_collisions() {
        let registry = Registry::builtin();
        for language in ["javascript", "typescript"] {
            assert!(resolve_with(
                registry,
                &types(&["npm", "webpack", language]),
                CollisionPolicy::Reject
            )
            .is_ok());
        }
    }

    #[test]
    fn test_escaping_destination_is_rejected() {
        for bad in ["../x", "a/../../x", "/etc/passwd", ""] {
            let registry =
                Registry::new().with_entries("plain", vec![ManifestEntry::format_to("ok", bad)]);
            assert!(
                matches!(
                    resolve(&registry, &[]),
                    Err(Error::PathEscape { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
        assert!(ensure_relative(Path::new("./a/b")).is_ok());
    }

    #[test]
    fn test_entry_destination_defaults_to_source() {
        assert_eq!(ManifestEntry::format("a.js").destination(), Path::new("a.js"));
        assert_eq!(
            ManifestEntry::format_to("cjs.webpack.config.js", "webpack.config.js").destination(),
            Path::new("webpack.config.js")
        );
        assert!(!ManifestEntry::copy("assets").is_format());
    }

    #[test]
    fn test_nested_scripts_merge() {
        let registry = Registry::new()
            .with_scripts("plain", json!({"env": {"a": "1"}}))
            .with_scripts("x", json!({"env": {"b": "2"}}));
        let resolution = resolve(&registry, &types(&["x"])).unwrap();
        assert_eq!(
            serde_json::Value::Object(resolution.scripts),
            json!({"env": {"a": "1", "b": "2"}})
        );
    }
}
