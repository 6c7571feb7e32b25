//! Error handling for ccext.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while generating an extension project.
///
/// The library never prints these; they are returned to the caller,
/// which decides how to present them (see [`default_error_handler`]).
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed id or a required field missing from the selection.
    #[error("Validation error: {0}.")]
    Validation(String),

    /// A manifest entry points at a path missing from the template root.
    #[error("Template path '{path}' does not exist.")]
    TemplateNotFound { path: String },

    /// Template content the materializer cannot reproduce.
    #[error("Template error: {0}.")]
    Template(String),

    #[error("IO error: {0}.")]
    Io(#[from] io::Error),

    #[error("Directory walk error: {0}.")]
    Walk(#[from] walkdir::Error),

    #[error("JSON error: {0}.")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Ignore pattern error: {0}.")]
    Glob(#[from] globset::Error),

    /// Two feature types register the same destination path.
    #[error("Manifest collision: '{path}' is registered by both '{first}' and '{second}'.")]
    ManifestCollision { path: String, first: String, second: String },

    /// A destination path would land outside the destination root.
    #[error("Path '{path}' escapes the destination root.")]
    PathEscape { path: String },

    #[error(
        "Output directory '{output_dir}' already exists. Use --force to write into it anyway."
    )]
    OutputDirectoryExists { output_dir: String },

    #[error("Prompt error: {0}.")]
    Prompt(String),

    #[error("Git error: {0}.")]
    Git(#[from] git2::Error),

    /// An external command exited unsuccessfully or could not be spawned.
    #[error("Command error: {0}.")]
    Command(String),
}

/// Convenience type alias for results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
