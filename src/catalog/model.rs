//! Catalog entry and registry manifest types.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::ParsedTtl;
use crate::turtle::parse_ttl;

/// Where a schema came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaSource {
    /// Compiled into the binary.
    Bundled,
    /// Listed in a `registry.toml` on disk.
    File(PathBuf),
    /// Supplied directly by a user.
    Upload,
}

impl std::fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bundled => write!(f, "(bundled)"),
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Upload => write!(f, "(upload)"),
        }
    }
}

/// A parsed schema with its display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    /// File name used when the raw text is downloaded.
    pub file_name: String,
    pub parsed: ParsedTtl,
    pub source: SchemaSource,
}

impl SchemaEntry {
    /// Parse `raw` and wrap it with the given metadata.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        file_name: impl Into<String>,
        raw: &str,
        source: SchemaSource,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            file_name: file_name.into(),
            parsed: parse_ttl(raw),
            source,
        }
    }

    /// Build an entry from user-supplied text.
    ///
    /// The name is the ontology label when there is one, else the file name
    /// without its `.ttl` extension; the description is the ontology comment.
    pub fn from_upload(file_name: &str, content: &str) -> Self {
        let parsed = parse_ttl(content);
        let header = parsed.ontology.as_ref();
        let name = header
            .map(|o| o.label.clone())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| file_name.replacen(".ttl", "", 1));
        let description = header.map(|o| o.comment.clone()).unwrap_or_default();

        Self {
            id: format!("user-{}", now_millis()),
            name,
            description,
            file_name: file_name.to_string(),
            parsed,
            source: SchemaSource::Upload,
        }
    }

    pub fn is_user_uploaded(&self) -> bool {
        self.source == SchemaSource::Upload
    }

    /// The original document text, for download.
    pub fn raw(&self) -> &str {
        &self.parsed.raw
    }
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// `registry.toml`: the list of schemas in a directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryManifest {
    #[serde(default)]
    pub schema: Vec<RegistryItem>,
}

/// One `[[schema]]` entry of a registry manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryItem {
    pub id: String,
    pub name: String,
    /// Path of the Turtle file, relative to the manifest's directory.
    pub file: String,
    #[serde(default)]
    pub description: String,
}
