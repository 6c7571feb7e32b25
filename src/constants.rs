//! Common constants used throughout ccext.

/// Feature type that is always applied first.
pub const PLAIN: &str = "plain";

/// Prefix of every generated npm package name.
pub const PACKAGE_PREFIX: &str = "clipcc-extension-";

/// Package manifest written at the destination root.
pub const PACKAGE_FILE: &str = "package.json";

/// Extension metadata file read by the ClipCC loader.
pub const INFO_FILE: &str = "info.json";

/// Extension API level written to the metadata file.
pub const EXTENSION_API: u32 = 1;

pub const ICON_PATH: &str = "assets/icon.svg";
pub const INSET_ICON_PATH: &str = "assets/inset_icon.svg";

/// Patterns skipped while walking template directories.
pub const DEFAULT_IGNORE_PATTERNS: [&str; 2] = ["**/.DS_Store", "**/Thumbs.db"];

/// Version offered by the prompt when none is preloaded.
pub const DEFAULT_VERSION: &str = "0.0.1";
