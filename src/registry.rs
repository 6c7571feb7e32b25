//! Static per-feature-type tables.
//!
//! The built-in registry is assembled once per process and never mutated.
//! Each table maps a [`FeatureType`] to its contribution: a scripts
//! fragment, dependency lists, or manifest entries.

use std::sync::OnceLock;

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::feature::FeatureType;
use crate::manifest::ManifestEntry;
use crate::merge::ConfigFragment;

const CLEAN_OUTPUT: &str = "rimraf ./build && mkdirp build && rimraf ./dist && mkdirp dist";

/// Lookup tables consulted by manifest resolution.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    scripts: IndexMap<FeatureType, ConfigFragment>,
    dependencies: IndexMap<FeatureType, Vec<String>>,
    dev_dependencies: IndexMap<FeatureType, Vec<String>>,
    manifest: IndexMap<FeatureType, Vec<ManifestEntry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables for the feature types the CLI offers.
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(builtin_registry)
    }

    pub fn with_scripts(mut self, feature: impl Into<FeatureType>, scripts: Value) -> Self {
        if let Value::Object(map) = scripts {
            self.scripts.insert(feature.into(), map);
        }
        self
    }

    pub fn with_dependencies(mut self, feature: impl Into<FeatureType>, deps: &[&str]) -> Self {
        self.dependencies.insert(feature.into(), to_strings(deps));
        self
    }

    pub fn with_dev_dependencies(
        mut self,
        feature: impl Into<FeatureType>,
        deps: &[&str],
    ) -> Self {
        self.dev_dependencies.insert(feature.into(), to_strings(deps));
        self
    }

    pub fn with_entries(
        mut self,
        feature: impl Into<FeatureType>,
        entries: Vec<ManifestEntry>,
    ) -> Self {
        self.manifest.insert(feature.into(), entries);
        self
    }

    pub fn scripts(&self, feature: &FeatureType) -> Option<&ConfigFragment> {
        self.scripts.get(feature)
    }

    pub fn dependencies(&self, feature: &FeatureType) -> &[String] {
        self.dependencies.get(feature).map_or(&[], Vec::as_slice)
    }

    pub fn dev_dependencies(&self, feature: &FeatureType) -> &[String] {
        self.dev_dependencies.get(feature).map_or(&[], Vec::as_slice)
    }

    pub fn entries(&self, feature: &FeatureType) -> &[ManifestEntry] {
        self.manifest.get(feature).map_or(&[], Vec::as_slice)
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_registry() -> Registry {
    Registry::new()
        .with_scripts(
            "plain",
            json!({
                "build": format!("{CLEAN_OUTPUT} && node build.js"),
                "build:dist": "NODE_ENV=production npm run build"
            }),
        )
        .with_scripts(
            "yarn",
            json!({ "build:dist": "NODE_ENV=production yarn run build" }),
        )
        .with_scripts(
            "berry",
            json!({ "build:dist": "NODE_ENV=production yarn run build" }),
        )
        .with_scripts(
            "pnpm",
            json!({ "build:dist": "NODE_ENV=production pnpm run build" }),
        )
        .with_scripts(
            "webpack",
            json!({ "build": format!("{CLEAN_OUTPUT} && webpack --bail") }),
        )
        .with_dependencies("plain", &["clipcc-extension"])
        .with_dev_dependencies("plain", &["mkdirp", "rimraf"])
        .with_dev_dependencies(
            "webpack",
            &[
                "webpack",
                "webpack-cli",
                "copy-webpack-plugin",
                "zip-webpack-plugin",
                "url-loader",
                "mini-svg-data-uri",
            ],
        )
        .with_dev_dependencies("typescript", &["typescript", "ts-loader"])
        .with_entries(
            "plain",
            vec![
                ManifestEntry::copy("assets"),
                ManifestEntry::format(".gitignore_"),
                ManifestEntry::format("locales"),
            ],
        )
        .with_entries(
            "javascript",
            vec![
                ManifestEntry::format_to("javascript/index.js", "index.js"),
                ManifestEntry::format_to("cjs.webpack.config.js", "webpack.config.js"),
            ],
        )
        .with_entries(
            "typescript",
            vec![
                ManifestEntry::format_to("typescript/index.ts", "index.ts"),
                ManifestEntry::format_to("typescript/tsconfig.json", "tsconfig.json"),
                ManifestEntry::copy("typings"),
                ManifestEntry::format_to("ts.webpack.config.js", "webpack.config.js"),
            ],
        )
}
