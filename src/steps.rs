//! Follow-up steps that finish a generated project.
//!
//! [`plan`] decides what has to happen (git init, dependency installs);
//! [`run`] carries it out. Planning is pure so it can be inspected and
//! tested without touching the system.

use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};
use crate::feature::PackageManager;

/// An external command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<S: Into<String>>(program: S, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// A single follow-up action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Initialise a git repository in the destination root.
    InitGit,
    /// Run an external command in the destination root.
    Run(CommandSpec),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::InitGit => f.write_str("git init"),
            Step::Run(command) => write!(f, "{command}"),
        }
    }
}

/// Install command prefix for `manager`; `dev` selects the dev-dependency form.
pub fn install_command(manager: PackageManager, dev: bool) -> CommandSpec {
    match (manager, dev) {
        (PackageManager::Npm, false) => CommandSpec::new("npm", ["install", "--save"]),
        (PackageManager::Npm, true) => CommandSpec::new("npm", ["install", "--save-dev"]),
        (PackageManager::Yarn | PackageManager::Berry, false) => CommandSpec::new("yarn", ["add"]),
        (PackageManager::Yarn | PackageManager::Berry, true) => {
            CommandSpec::new("yarn", ["add", "-D"])
        }
        (PackageManager::Pnpm, false) => CommandSpec::new("pnpm", ["add"]),
        (PackageManager::Pnpm, true) => CommandSpec::new("pnpm", ["add", "-D"]),
    }
}

/// Follow-up steps in execution order. Install commands with nothing to
/// install are left out.
pub fn plan(
    use_git: bool,
    manager: PackageManager,
    dependencies: &[String],
    dev_dependencies: &[String],
) -> Vec<Step> {
    let mut steps = Vec::new();
    if use_git {
        steps.push(Step::InitGit);
    }
    for (dev, packages) in [(false, dependencies), (true, dev_dependencies)] {
        if packages.is_empty() {
            continue;
        }
        let mut command = install_command(manager, dev);
        command.args.extend(packages.iter().cloned());
        steps.push(Step::Run(command));
    }
    steps
}

/// Executes a single step inside `root`.
pub fn run_step(step: &Step, root: &Path) -> Result<()> {
    match step {
        Step::InitGit => {
            git2::Repository::init(root)?;
            debug!("Initialised git repository in {}", root.display());
            Ok(())
        }
        Step::Run(command) => {
            let status = Command::new(&command.program)
                .args(&command.args)
                .current_dir(root)
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| Error::Command(format!("failed to run '{command}': {e}")))?;

            if !status.success() {
                return Err(Error::Command(format!(
                    "'{command}' failed with status: {status}"
                )));
            }
            Ok(())
        }
    }
}

/// Executes `steps` in order, stopping at the first failure. `before` is
/// called with each step just before it runs.
pub fn run<F: FnMut(&Step)>(steps: &[Step], root: &Path, mut before: F) -> Result<()> {
    for step in steps {
        before(step);
        run_step(step, root)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plan_npm() {
        let steps = plan(
            false,
            PackageManager::Npm,
            &strings(&["clipcc-extension"]),
            &strings(&["mkdirp", "rimraf"]),
        );
        let rendered: Vec<String> = steps.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "npm install --save clipcc-extension",
                "npm install --save-dev mkdirp rimraf"
            ]
        );
    }

    #[test]
    fn test_plan_git_first_and_empty_lists_skipped() {
        let steps = plan(true, PackageManager::Pnpm, &[], &strings(&["typescript"]));
        assert_eq!(steps[0], Step::InitGit);
        assert_eq!(
            steps[1],
            Step::Run(CommandSpec::new("pnpm", ["add", "-D", "typescript"]))
        );
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_berry_uses_yarn() {
        assert_eq!(
            install_command(PackageManager::Berry, true),
            install_command(PackageManager::Yarn, true)
        );
        assert_eq!(install_command(PackageManager::Yarn, false).to_string(), "yarn add");
    }

    #[test]
    fn test_init_git() {
        let dir = tempfile::TempDir::new().unwrap();
        run_step(&Step::InitGit, dir.path()).unwrap();
        assert!(dir.path().join(".git").is_dir());
    }

    #[test]
    fn test_missing_program_is_command_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let step = Step::Run(CommandSpec::new("ccext-no-such-program", []));
        assert!(matches!(run_step(&step, dir.path()), Err(Error::Command(_))));
    }
}
