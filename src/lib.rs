// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # turtle-schema
//!
//! A pragmatic Turtle parser that turns an ontology document into a model a
//! schema browser can list: the ontology header, classes, properties and
//! instances, plus the prefixes and the raw text.
//!
//! ## Architecture
//!
//! - **Parser** (`turtle`): lexer → comment stripping → block splitting →
//!   triple extraction → classification, hand-written and infallible on content
//! - **Model** (`model`): immutable, serde-serializable result types
//! - **Catalog** (`catalog`): bundled schemas, `registry.toml` directories and uploads
//! - **Export** (`export`): JSON rendering and summaries
//!
//! ## Library usage
//!
//! ```
//! let doc = turtle_schema::parse_ttl(
//!     "@prefix : <http://ex.org/> .\n\
//!      @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
//!      :Card a rdfs:Class ; rdfs:label \"Card\" .\n",
//! );
//! assert_eq!(doc.classes[0].uri, ":Card");
//! assert_eq!(doc.classes[0].label, "Card");
//! ```

pub mod catalog;
pub mod error;
pub mod export;
pub mod model;
pub mod turtle;
pub mod vocab;

pub use error::{SchemaError, SchemaResult};
pub use model::{
    OntologyHeader, ParsedTtl, Prefix, PropertyMap, SchemaClass, SchemaInstance, SchemaProperty,
};
pub use turtle::{ParseError, ParseResult, parse_bytes, parse_ttl};
