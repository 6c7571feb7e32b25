//! Generation flow: validate, resolve, materialize, write descriptors and
//! plan the follow-up steps.

use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use log::debug;

use crate::descriptor::{self, ExtensionInfo, Metadata, PackageDescriptor};
use crate::error::{Error, Result};
use crate::feature::Selection;
use crate::ignore::default_ignore_set;
use crate::manifest::{resolve_with, CollisionPolicy, Resolution};
use crate::materializer::{CopiedFile, Materializer, Progress};
use crate::registry::Registry;
use crate::steps::{self, Step};
use crate::validation::validate;

/// Destination used when none is given: `./<package name>`.
pub fn default_output_dir(metadata: &Metadata) -> PathBuf {
    PathBuf::from(metadata.package_name())
}

/// Ensures the output directory is safe to write to.
///
/// # Errors
/// * `Error::OutputDirectoryExists` if the directory exists and `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExists {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// Everything produced by one generation run.
#[derive(Debug)]
pub struct Generated {
    pub resolution: Resolution,
    pub copied: Vec<CopiedFile>,
    pub package: PackageDescriptor,
    pub info: ExtensionInfo,
    /// Follow-up steps still to be executed by the caller.
    pub steps: Vec<Step>,
}

/// Generates projects from a template root and a registry of feature tables.
pub struct Generator<'a> {
    registry: &'a Registry,
    template_root: PathBuf,
    policy: CollisionPolicy,
    ignore: GlobSet,
}

impl Generator<'static> {
    /// Generator over the built-in tables.
    pub fn new<P: Into<PathBuf>>(template_root: P) -> Result<Self> {
        Generator::with_registry(Registry::builtin(), template_root)
    }
}

impl<'a> Generator<'a> {
    pub fn with_registry<P: Into<PathBuf>>(registry: &'a Registry, template_root: P) -> Result<Self> {
        Ok(Self {
            registry,
            template_root: template_root.into(),
            policy: CollisionPolicy::default(),
            ignore: default_ignore_set()?,
        })
    }

    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Runs the generation flow into `output_root`.
    ///
    /// The selection is validated before anything touches the filesystem.
    /// Descriptors are written only after every manifest entry has been
    /// materialized. Follow-up steps are returned, not executed.
    pub fn generate<P: AsRef<Path>>(
        &self,
        selection: &Selection,
        output_root: P,
        progress: &mut dyn Progress,
    ) -> Result<Generated> {
        let output_root = output_root.as_ref();
        validate(selection)?;

        let resolution = resolve_with(self.registry, &selection.feature_types(), self.policy)?;
        let placeholders = selection.metadata.placeholders();

        fs::create_dir_all(output_root)?;
        debug!(
            "Materializing {} entries from {} into {}",
            resolution.copy_plan.len(),
            self.template_root.display(),
            output_root.display()
        );
        let copied = Materializer::new(&self.template_root, output_root, &placeholders)
            .ignore(self.ignore.clone())
            .materialize(&resolution.copy_plan, progress)?;

        let package = descriptor::build(&selection.metadata, &resolution.scripts);
        let info = descriptor::build_info(&selection.metadata);
        descriptor::write_descriptors(output_root, &package, &info)?;

        let steps = steps::plan(
            selection.use_git,
            selection.package_manager,
            &resolution.dependencies,
            &resolution.dev_dependencies,
        );

        Ok(Generated {
            resolution,
            copied,
            package,
            info,
            steps,
        })
    }
}
