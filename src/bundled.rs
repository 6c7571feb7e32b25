//! Template tree compiled into the binary.
//!
//! The files under `template/` are embedded with [`include_bytes!`] and
//! unpacked into a temporary directory when no `--template-dir` is given.
//! Paths are relative to the template root and use `/` separators.

use std::fs;
use std::path::Path;

use log::debug;
use tempfile::TempDir;

use crate::error::Result;

const FILES: &[(&str, &[u8])] = &[
    (".gitignore_", include_bytes!("../template/.gitignore_")),
    ("assets/icon.svg", include_bytes!("../template/assets/icon.svg")),
    (
        "assets/inset_icon.svg",
        include_bytes!("../template/assets/inset_icon.svg"),
    ),
    (
        "cjs.webpack.config.js",
        include_bytes!("../template/cjs.webpack.config.js"),
    ),
    (
        "javascript/index.js",
        include_bytes!("../template/javascript/index.js"),
    ),
    ("locales/en.json", include_bytes!("../template/locales/en.json")),
    (
        "locales/zh-cn.json",
        include_bytes!("../template/locales/zh-cn.json"),
    ),
    (
        "ts.webpack.config.js",
        include_bytes!("../template/ts.webpack.config.js"),
    ),
    (
        "typescript/index.ts",
        include_bytes!("../template/typescript/index.ts"),
    ),
    (
        "typescript/tsconfig.json",
        include_bytes!("../template/typescript/tsconfig.json"),
    ),
    (
        "typings/extension-metadata.ts",
        include_bytes!("../template/typings/extension-metadata.ts"),
    ),
];

/// Embedded files as `(relative path, contents)` pairs.
pub fn files() -> impl Iterator<Item = (&'static Path, &'static [u8])> {
    FILES
        .iter()
        .map(|(path, contents)| (Path::new(*path), *contents))
}

/// Writes every embedded file below `root`, creating directories as needed.
/// Returns the number of files written.
pub fn extract<P: AsRef<Path>>(root: P) -> Result<usize> {
    let root = root.as_ref();
    let mut written = 0;
    for (relative, contents) in files() {
        let target = root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, contents)?;
        written += 1;
    }
    debug!("Unpacked {written} bundled template files into {}", root.display());
    Ok(written)
}

/// The embedded template unpacked into a temporary directory, removed on drop.
pub struct BundledTemplate {
    dir: TempDir,
}

impl BundledTemplate {
    pub fn unpack() -> Result<Self> {
        let dir = TempDir::new()?;
        extract(dir.path())?;
        Ok(Self { dir })
    }

    /// Template root to hand to the generator.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
