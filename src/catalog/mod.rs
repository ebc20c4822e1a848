//! Schema catalog: the set of documents a schema browser can show.
//!
//! Two schemas are bundled into the binary. More can be listed in a
//! `registry.toml` inside a schemas directory:
//!
//! ```toml
//! [[schema]]
//! id = "cards"
//! name = "Card Game"
//! file = "cards.ttl"
//! description = "Cards and decks"
//! ```
//!
//! User-supplied documents are added with [`SchemaCatalog::add_upload`].

pub mod error;
pub mod model;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use error::{CatalogError, CatalogResult};
pub use model::{RegistryItem, RegistryManifest, SchemaEntry, SchemaSource};

/// File name of the registry manifest inside a schemas directory.
pub const MANIFEST_FILE: &str = "registry.toml";

// ── Bundled schemas ─────────────────────────────────────────────────────

const CARD_GAME_TTL: &str = include_str!("../../data/schemas/card-game.ttl");
const LIBRARY_TTL: &str = include_str!("../../data/schemas/library.ttl");

fn bundled_entries() -> Vec<SchemaEntry> {
    [
        (
            "card-game",
            "Card Game",
            "Cards, decks and players",
            "card-game.ttl",
            CARD_GAME_TTL,
        ),
        (
            "library",
            "Library",
            "Books, authors and loans",
            "library.ttl",
            LIBRARY_TTL,
        ),
    ]
    .into_iter()
    .map(|(id, name, description, file, raw)| {
        SchemaEntry::new(id, name, description, file, raw, SchemaSource::Bundled)
    })
    .collect()
}

// ── Configuration ───────────────────────────────────────────────────────

/// Where the catalog looks for schemas.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding a `registry.toml`.
    #[serde(default)]
    pub schemas_dir: Option<PathBuf>,
    /// Whether to include the bundled schemas.
    #[serde(default = "default_include_bundled")]
    pub include_bundled: bool,
}

fn default_include_bundled() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            schemas_dir: None,
            include_bundled: true,
        }
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────

/// Ordered collection of schema entries with unique ids.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    entries: Vec<SchemaEntry>,
}

impl SchemaCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A catalog holding only the bundled schemas.
    pub fn bundled() -> Self {
        Self {
            entries: bundled_entries(),
        }
    }

    /// Bundled schemas plus whatever can be loaded from `dir`.
    ///
    /// Best effort: a missing or malformed manifest, unreadable files and
    /// duplicate ids are logged and skipped.
    pub fn discover(dir: &Path) -> Self {
        let mut catalog = Self::bundled();
        catalog.load_dir_lenient(dir);
        catalog
    }

    /// Strictly load the schemas listed in `dir`, without bundled ones.
    pub fn open(dir: &Path) -> CatalogResult<Self> {
        let mut catalog = Self::empty();
        for item in read_manifest(dir)?.schema {
            let entry = load_item(dir, &item)?;
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    /// Build a catalog as described by a [`CatalogConfig`].
    pub fn from_config(config: &CatalogConfig) -> Self {
        let mut catalog = if config.include_bundled {
            Self::bundled()
        } else {
            Self::empty()
        };
        if let Some(dir) = &config.schemas_dir {
            catalog.load_dir_lenient(dir);
        }
        catalog
    }

    fn load_dir_lenient(&mut self, dir: &Path) {
        let manifest = match read_manifest(dir) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), "skipping schemas directory: {e}");
                return;
            }
        };
        for item in &manifest.schema {
            let loaded = load_item(dir, item).and_then(|entry| self.insert(entry));
            if let Err(e) = loaded {
                tracing::warn!(schema = %item.id, "failed to load schema: {e}");
            }
        }
    }

    /// Add an entry. Fails if its id is already taken.
    pub fn insert(&mut self, entry: SchemaEntry) -> CatalogResult<()> {
        if self.get(&entry.id).is_some() {
            return Err(CatalogError::Duplicate { id: entry.id });
        }
        tracing::debug!(id = %entry.id, source = %entry.source, "schema registered");
        self.entries.push(entry);
        Ok(())
    }

    /// Parse user-supplied text and add it. A clashing id gets a numeric
    /// suffix. Returns the stored entry.
    pub fn add_upload(&mut self, file_name: &str, content: &str) -> &SchemaEntry {
        let mut entry = SchemaEntry::from_upload(file_name, content);
        if self.get(&entry.id).is_some() {
            let base = entry.id.clone();
            let mut n = 1usize;
            while self.get(&format!("{base}-{n}")).is_some() {
                n += 1;
            }
            entry.id = format!("{base}-{n}");
        }
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Like [`get`](Self::get), but a missing id is an error.
    pub fn require(&self, id: &str) -> CatalogResult<&SchemaEntry> {
        self.get(id)
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    /// Remove an entry by id.
    pub fn remove(&mut self, id: &str) -> CatalogResult<SchemaEntry> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })?;
        Ok(self.entries.remove(pos))
    }

    pub fn list(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read and parse `{dir}/registry.toml`.
pub fn read_manifest(dir: &Path) -> CatalogResult<RegistryManifest> {
    let path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| CatalogError::Manifest {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load and parse one manifest item relative to `dir`.
fn load_item(dir: &Path, item: &RegistryItem) -> CatalogResult<SchemaEntry> {
    let path = dir.join(&item.file);
    let data = std::fs::read(&path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parsed = crate::turtle::parse_bytes(&data)?;
    let file_name = Path::new(&item.file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| item.file.clone());

    Ok(SchemaEntry {
        id: item.id.clone(),
        name: item.name.clone(),
        description: item.description.clone(),
        file_name,
        parsed,
        source: SchemaSource::File(path),
    })
}
