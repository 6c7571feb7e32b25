//! Feature types and the user's selection record.
//!
//! A feature type is an open-ended string identifier: the static tables in
//! [`crate::registry`] know a handful of them, anything else simply
//! contributes nothing during resolution.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::constants::PLAIN;
use crate::descriptor::Metadata;

/// Identifier selecting one slice of the static tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureType(String);

impl FeatureType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The always-present base feature type.
    pub fn plain() -> Self {
        Self::new(PLAIN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_plain(&self) -> bool {
        self.0 == PLAIN
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FeatureType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Package manager used to install dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    /// Yarn 2+.
    Berry,
    Pnpm,
}

/// Bundler producing the distributable extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bundler {
    #[default]
    Webpack,
}

/// Source language of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[value(name = "javascript")]
    JavaScript,
    #[value(name = "typescript")]
    TypeScript,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [Self::Npm, Self::Yarn, Self::Berry, Self::Pnpm];

    pub fn name(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Berry => "berry",
            Self::Pnpm => "pnpm",
        }
    }
}

impl Bundler {
    pub const ALL: [Bundler; 1] = [Self::Webpack];

    pub fn name(self) -> &'static str {
        match self {
            Self::Webpack => "webpack",
        }
    }
}

impl Language {
    pub const ALL: [Language; 2] = [Self::JavaScript, Self::TypeScript];

    pub fn name(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
        }
    }

    /// Human readable label used by the interactive prompt.
    pub fn label(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
        }
    }
}

macro_rules! impl_feature {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl From<$ty> for FeatureType {
                fn from(value: $ty) -> Self {
                    FeatureType::new(value.name())
                }
            }
        )*
    };
}

impl_feature!(PackageManager, Bundler, Language);

/// Everything the generator needs to know about the project to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(flatten)]
    pub metadata: Metadata,
    #[serde(default)]
    pub package_manager: PackageManager,
    #[serde(default)]
    pub bundler: Bundler,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub use_git: bool,
}

impl Selection {
    /// Feature types in precedence order, lowest first.
    pub fn feature_types(&self) -> Vec<FeatureType> {
        vec![
            FeatureType::plain(),
            self.package_manager.into(),
            self.bundler.into(),
            self.language.into(),
        ]
    }
}
