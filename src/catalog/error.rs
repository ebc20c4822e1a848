//! Diagnostic error types for the schema catalog.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from loading or querying the schema catalog.
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("schema not found: \"{id}\"")]
    #[diagnostic(
        code(turtle_schema::catalog::not_found),
        help(
            "No schema with this id is registered. \
             List available schemas with `turtle-schema catalog list`."
        )
    )]
    NotFound { id: String },

    #[error("duplicate schema id: \"{id}\"")]
    #[diagnostic(
        code(turtle_schema::catalog::duplicate),
        help("Every [[schema]] entry in registry.toml needs a unique id.")
    )]
    Duplicate { id: String },

    #[error("failed to parse registry manifest {path}: {message}")]
    #[diagnostic(
        code(turtle_schema::catalog::manifest),
        help(
            "Check the registry.toml syntax. Each [[schema]] entry needs \
             `id`, `name` and `file`; `description` is optional."
        )
    )]
    Manifest { path: String, message: String },

    #[error("failed to read {path}")]
    #[diagnostic(
        code(turtle_schema::catalog::io),
        help("Ensure the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] crate::turtle::ParseError),
}

/// Convenience alias for catalog results.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
