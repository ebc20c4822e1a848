//! Export of parsed schemas for consumers outside Rust.
//!
//! `ModelSummary` is the compact overview shown in listings; `to_json`
//! renders the full model, including the raw source text.

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};
use crate::model::ParsedTtl;

/// Entity counts and ontology identity of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Ontology label, empty when there is no header.
    pub label: String,
    /// Ontology URI, empty when there is no header.
    pub uri: String,
    pub prefixes: usize,
    pub classes: usize,
    pub properties: usize,
    pub instances: usize,
}

impl ModelSummary {
    pub fn of(parsed: &ParsedTtl) -> Self {
        let (label, uri) = parsed
            .ontology
            .as_ref()
            .map(|o| (o.label.clone(), o.uri.clone()))
            .unwrap_or_default();
        Self {
            label,
            uri,
            prefixes: parsed.prefixes.len(),
            classes: parsed.classes.len(),
            properties: parsed.properties.len(),
            instances: parsed.instances.len(),
        }
    }
}

impl std::fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} classes, {} properties, {} instances ({} prefixes)",
            self.classes, self.properties, self.instances, self.prefixes
        )
    }
}

/// Serialize a parsed model as JSON.
pub fn to_json(parsed: &ParsedTtl, pretty: bool) -> SchemaResult<String> {
    let result = if pretty {
        serde_json::to_string_pretty(parsed)
    } else {
        serde_json::to_string(parsed)
    };
    result.map_err(|e| SchemaError::Serialize {
        message: e.to_string(),
    })
}
