//! ccext generates ClipCC extension projects.
//! It merges per-feature configuration fragments, materializes a template
//! tree with `%[key]` placeholder substitution, writes the package
//! descriptors and plans the follow-up steps (git init, installs).

/// Template tree embedded in the binary
pub mod bundled;

/// Command-line interface module
pub mod cli;

/// Common constants
pub mod constants;

/// Package descriptor (`package.json`, `info.json`) generation
pub mod descriptor;

/// Error types and handling
pub mod error;

/// Feature types and the selection record
pub mod feature;

/// Generation flow tying resolution, materialization and descriptors together
pub mod generator;

/// Ignore patterns applied while walking the template tree
pub mod ignore;

pub mod logger;

/// Manifest resolution: copy plan, merged scripts, dependency lists
pub mod manifest;

/// Template tree materialization
pub mod materializer;

/// Deep merge of configuration fragments
pub mod merge;

/// Preloaded answers from stdin
pub mod parser;

/// `%[key]` placeholder substitution
pub mod placeholder;

/// Interactive prompts
pub mod prompt;

/// Static per-feature-type tables
pub mod registry;

/// Follow-up steps: git init and dependency installation
pub mod steps;

/// Selection validation
pub mod validation;
