//! Project descriptor generation.
//!
//! Produces the destination `package.json` (package name, author, merged
//! build scripts) and the extension's `info.json` metadata file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cruet::Inflector;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{
    EXTENSION_API, ICON_PATH, INFO_FILE, INSET_ICON_PATH, PACKAGE_FILE, PACKAGE_PREFIX,
};
use crate::error::Result;
use crate::merge::ConfigFragment;
use crate::placeholder::PlaceholderMap;

/// User supplied project metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Metadata {
    pub fn new(id: impl Into<String>, name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            author: author.into(),
            version: None,
            description: None,
        }
    }

    /// npm package name: the id with every `.` turned into `-`, prefixed.
    pub fn package_name(&self) -> String {
        format!("{PACKAGE_PREFIX}{}", self.id.replace('.', "-"))
    }

    /// Placeholder values available to format-copied template files.
    pub fn placeholders(&self) -> PlaceholderMap {
        let mut map = PlaceholderMap::new();
        map.insert("id".to_string(), self.id.clone());
        map.insert("name".to_string(), self.name.clone());
        map.insert("author".to_string(), self.author.clone());
        map.insert(
            "version".to_string(),
            self.version.clone().unwrap_or_default(),
        );
        map.insert(
            "description".to_string(),
            self.description.clone().unwrap_or_default(),
        );
        map.insert("package".to_string(), self.package_name());
        map.insert("class_name".to_string(), class_name(&self.name, &self.id));
        map
    }
}

/// Identifier-safe PascalCase name for the generated extension class.
fn class_name(name: &str, id: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let pascal = cleaned.to_pascal_case();
    match pascal.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => pascal,
        Some(_) => format!("Extension{pascal}"),
        None => id.replace('.', "_").to_pascal_case(),
    }
}

/// Author field: a single name, or an ordered list when the raw value
/// contained commas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Single(String),
    Many(Vec<String>),
}

impl Author {
    /// Splits on `,` and trims each part when the input contains a comma.
    pub fn parse(raw: &str) -> Self {
        if raw.contains(',') {
            Self::Many(
                raw.split(',')
                    .map(|part| part.trim().to_string())
                    .collect(),
            )
        } else {
            Self::Single(raw.to_string())
        }
    }
}

/// Contents of the destination `package.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub author: Author,
    pub scripts: ConfigFragment,
}

/// Contents of the destination `info.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionInfo {
    pub id: String,
    pub author: Author,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub icon: String,
    pub inset_icon: String,
    pub api: u32,
}

/// Builds the package descriptor, embedding `scripts` verbatim.
pub fn build(metadata: &Metadata, scripts: &ConfigFragment) -> PackageDescriptor {
    PackageDescriptor {
        name: metadata.package_name(),
        version: metadata.version.clone(),
        description: metadata.description.clone(),
        author: Author::parse(&metadata.author),
        scripts: scripts.clone(),
    }
}

pub fn build_info(metadata: &Metadata) -> ExtensionInfo {
    ExtensionInfo {
        id: metadata.id.clone(),
        author: Author::parse(&metadata.author),
        version: metadata.version.clone(),
        icon: ICON_PATH.to_string(),
        inset_icon: INSET_ICON_PATH.to_string(),
        api: EXTENSION_API,
    }
}

/// Serializes `value` with four-space indentation and a trailing newline.
pub fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = to_json(value)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&content)?;
    writer.flush()?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Writes `package.json` and `info.json` into `root`.
pub fn write_descriptors<P: AsRef<Path>>(
    root: P,
    package: &PackageDescriptor,
    info: &ExtensionInfo,
) -> Result<()> {
    let root = root.as_ref();
    write_json(&root.join(PACKAGE_FILE), package)?;
    write_json(&root.join(INFO_FILE), info)
}
