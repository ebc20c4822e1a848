//! Crate-level error type.
//!
//! Each subsystem defines its own error with miette `#[diagnostic]` derives;
//! `SchemaError` wraps them so callers can use a single `?` target while
//! keeping codes and help text intact.

use miette::Diagnostic;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::turtle::ParseError;

#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to serialize schema: {message}")]
    #[diagnostic(
        code(turtle_schema::export::serialize),
        help("This is a bug: every parsed model should serialize to JSON.")
    )]
    Serialize { message: String },
}

/// Result type for crate-level operations.
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;
