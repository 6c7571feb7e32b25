//! Command-line interface for ccext.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::feature::{Bundler, Language, PackageManager};

/// Command-line arguments structure for ccext.
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a ClipCC extension project", long_about = None)]
pub struct Args {
    /// Directory where the project will be created [default: ./clipcc-extension-<id>]
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Template directory to generate from [default: the bundled template]
    #[arg(short, long, value_name = "TEMPLATE_DIR")]
    pub template_dir: Option<PathBuf>,

    /// Extension id, e.g. `com.example.my_extension`
    #[arg(long)]
    pub id: Option<String>,

    /// Extension name
    #[arg(long)]
    pub name: Option<String>,

    /// Author; separate several authors with commas
    #[arg(long)]
    pub author: Option<String>,

    #[arg(long, value_enum)]
    pub package_manager: Option<PackageManager>,

    #[arg(long, value_enum)]
    pub bundler: Option<Bundler>,

    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// Write into an existing output directory
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Read answers from stdin (JSON or YAML)
    #[arg(short, long)]
    pub stdin: bool,

    /// Fail when two feature types would write the same file
    #[arg(long)]
    pub strict: bool,

    /// Do not initialise a git repository
    #[arg(long)]
    pub no_git: bool,

    /// Do not install dependencies
    #[arg(long)]
    pub skip_install: bool,
}

impl Args {
    /// Answers given as flags, in the same shape as preloaded stdin answers.
    pub fn flag_answers(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut answers = serde_json::Map::new();
        let text = [("id", &self.id), ("name", &self.name), ("author", &self.author)];
        for (key, value) in text {
            if let Some(value) = value {
                answers.insert(key.to_string(), value.clone().into());
            }
        }
        if let Some(manager) = self.package_manager {
            answers.insert("package_manager".to_string(), manager.name().into());
        }
        if let Some(bundler) = self.bundler {
            answers.insert("bundler".to_string(), bundler.name().into());
        }
        if let Some(language) = self.language {
            answers.insert("language".to_string(), language.name().into());
        }
        if self.no_git {
            answers.insert("use_git".to_string(), false.into());
        }
        answers
    }
}

/// Parses command line arguments, exiting with clap's error handling on
/// invalid input.
pub fn get_args() -> Args {
    Args::parse()
}
