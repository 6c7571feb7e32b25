//! Template tree materialization.
//!
//! Reproduces a resolved copy plan at the destination root. Directories are
//! walked pre-order so each one exists before anything is written inside
//! it; every file below a directory entry inherits the entry's kind (plain
//! copy or format copy).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use globset::GlobSet;
use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::manifest::{ensure_relative, ManifestEntry};
use crate::placeholder::{substitute, PlaceholderMap};

/// Receives one notification per file written.
pub trait Progress {
    fn copied(&mut self, source: &Path, target: &Path);
}

/// Discards notifications.
pub struct NoProgress;

impl Progress for NoProgress {
    fn copied(&mut self, _source: &Path, _target: &Path) {}
}

impl<F: FnMut(&Path, &Path)> Progress for F {
    fn copied(&mut self, source: &Path, target: &Path) {
        self(source, target)
    }
}

/// A file written by [`Materializer::materialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    pub source: PathBuf,
    pub target: PathBuf,
    pub formatted: bool,
}

/// Copies manifest entries from a template root into a destination root.
pub struct Materializer<'a> {
    template_root: &'a Path,
    destination_root: &'a Path,
    placeholders: &'a PlaceholderMap,
    ignore: GlobSet,
}

impl<'a> Materializer<'a> {
    pub fn new(
        template_root: &'a Path,
        destination_root: &'a Path,
        placeholders: &'a PlaceholderMap,
    ) -> Self {
        Self {
            template_root,
            destination_root,
            placeholders,
            ignore: GlobSet::empty(),
        }
    }

    /// Skips template paths matching `ignore`.
    pub fn ignore(mut self, ignore: GlobSet) -> Self {
        self.ignore = ignore;
        self
    }

    /// Processes `plan` in order. Later entries overwrite earlier ones that
    /// target the same path.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if an entry's source is missing
    /// * `Error::PathEscape` if an entry would write outside the destination
    /// * `Error::Io` / `Error::Walk` on filesystem failures
    ///
    /// Nothing is rolled back on failure.
    pub fn materialize(
        &self,
        plan: &[ManifestEntry],
        progress: &mut dyn Progress,
    ) -> Result<Vec<CopiedFile>> {
        let mut copied = Vec::new();
        for entry in plan {
            self.materialize_entry(entry, progress, &mut copied)?;
        }
        Ok(copied)
    }

    fn materialize_entry(
        &self,
        entry: &ManifestEntry,
        progress: &mut dyn Progress,
        copied: &mut Vec<CopiedFile>,
    ) -> Result<()> {
        ensure_relative(entry.source())?;
        ensure_relative(entry.destination())?;

        let source = self.template_root.join(entry.source());
        let target = self.destination_root.join(entry.destination());
        let formatted = entry.is_format();

        let metadata = match fs::symlink_metadata(&source) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::TemplateNotFound {
                    path: entry.source().display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if self.is_ignored(&source) {
            debug!("Skipping ignored template entry {}", source.display());
            return Ok(());
        }
        if metadata.is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = self.copy_file(&source, &target, formatted)?;
            progress.copied(&file.source, &file.target);
            copied.push(file);
            return Ok(());
        }
        if !metadata.is_dir() {
            return Err(unsupported(&source));
        }

        debug!("Walking template directory {}", source.display());
        let walker = WalkDir::new(&source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_ignored(e.path()));

        for dir_entry in walker {
            let dir_entry = dir_entry?;
            let relative = dir_entry
                .path()
                .strip_prefix(&source)
                .map_err(|e| Error::Template(e.to_string()))?;
            let destination = target.join(relative);
            let file_type = dir_entry.file_type();

            if file_type.is_dir() {
                fs::create_dir_all(&destination)?;
            } else if file_type.is_file() {
                let file = self.copy_file(dir_entry.path(), &destination, formatted)?;
                progress.copied(&file.source, &file.target);
                copied.push(file);
            } else {
                return Err(unsupported(dir_entry.path()));
            }
        }
        Ok(())
    }

    fn is_ignored(&self, path: &Path) -> bool {
        path.strip_prefix(self.template_root)
            .map(|relative| self.ignore.is_match(relative))
            .unwrap_or(false)
    }

    fn copy_file(&self, source: &Path, target: &Path, formatted: bool) -> Result<CopiedFile> {
        let target = output_file_path(target);
        if formatted {
            debug!("Writing file: {}", target.display());
            let content = fs::read_to_string(source)?;
            write_text(&target, &substitute(&content, self.placeholders))?;
        } else {
            debug!("Copying file: {}", target.display());
            fs::copy(source, &target)?;
        }
        Ok(CopiedFile {
            source: source.to_path_buf(),
            target,
            formatted,
        })
    }
}

fn unsupported(path: &Path) -> Error {
    Error::Template(format!(
        "'{}' is neither a regular file nor a directory",
        path.display()
    ))
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Drops one trailing `_` from the file name, so templates can ship
/// dot-files such as `.gitignore_` without them being picked up by tooling.
pub fn output_file_path(path: &Path) -> PathBuf {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) if name.len() > 1 && name.ends_with('_') => {
            path.with_file_name(&name[..name.len() - 1])
        }
        _ => path.to_path_buf(),
    }
}
