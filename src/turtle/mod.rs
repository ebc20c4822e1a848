//! Pragmatic Turtle parser.
//!
//! The pipeline runs per document:
//! prefixes → strip comments → split blocks → triples → classify → aggregate.
//!
//! It covers prefixes, IRIs, literals with language or datatype suffixes,
//! `;`/`,` lists and opaque `[ ]` blank nodes. Collections, nested blank-node
//! graphs and property paths are out of scope. Nothing in the content can
//! make a parse fail; unusable statements are skipped.

pub mod block;
pub mod classify;
pub mod error;
pub mod lexer;
pub mod literal;
pub mod prefix;
pub mod triples;

pub use classify::{Entity, ModelBuilder, classify};
pub use error::{ParseError, ParseResult};
pub use prefix::PrefixTable;
pub use triples::{Triple, extract_triples};

use crate::model::ParsedTtl;

/// Parse a Turtle document into its schema model.
pub fn parse_ttl(content: &str) -> ParsedTtl {
    let prefixes = PrefixTable::from_document(content);
    let cleaned = block::strip_comments(content);

    let mut builder = ModelBuilder::new();
    let mut skipped = 0usize;
    for block in block::split_blocks(&cleaned) {
        let triples = extract_triples(block);
        if triples.is_empty() {
            tracing::debug!(block, "block yields no triples, skipped");
            skipped += 1;
            continue;
        }
        match classify(triples, &prefixes) {
            Some(entity) => {
                tracing::trace!(kind = entity.kind(), "classified block");
                builder.add(entity);
            }
            None => skipped += 1,
        }
    }

    let parsed = builder.finish(prefixes, content.to_string());
    tracing::info!(
        prefixes = parsed.prefixes.len(),
        classes = parsed.classes.len(),
        properties = parsed.properties.len(),
        instances = parsed.instances.len(),
        ontology = parsed.ontology.is_some(),
        skipped,
        "parsed turtle document"
    );
    parsed
}

/// Parse raw bytes, failing only when they are not UTF-8.
pub fn parse_bytes(data: &[u8]) -> ParseResult<ParsedTtl> {
    let text = std::str::from_utf8(data).map_err(|source| ParseError::NotUtf8 {
        valid_up_to: source.valid_up_to(),
        source,
    })?;
    Ok(parse_ttl(text))
}
