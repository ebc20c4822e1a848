//! Prefix table: `@prefix` discovery and term resolution.
//!
//! `resolve` expands `prefix:local` names and strips `<...>` from IRIs;
//! `shorten` maps an absolute IRI back to the first declared prefix whose
//! namespace covers it. Unknown prefixes pass through untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Prefix;

static RE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@prefix\s+(\w*):?\s+<([^>]+)>\s*\.").unwrap());

/// Namespace bindings for one document, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct PrefixTable {
    prefixes: Vec<Prefix>,
}

impl PrefixTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `@prefix` declaration in the document.
    ///
    /// Runs over the raw text, before comment stripping, so a declaration
    /// written inside a comment is still picked up.
    pub fn from_document(text: &str) -> Self {
        let mut table = Self::new();
        for caps in RE_PREFIX.captures_iter(text) {
            table.declare(&caps[1], &caps[2]);
        }
        table
    }

    /// Bind `prefix` to `uri`. A redeclared prefix keeps its position and
    /// takes the new namespace.
    pub fn declare(&mut self, prefix: &str, uri: &str) {
        match self.prefixes.iter_mut().find(|p| p.prefix == prefix) {
            Some(existing) => {
                tracing::debug!(prefix, old = %existing.uri, new = uri, "prefix redeclared");
                existing.uri = uri.to_string();
            }
            None => self.prefixes.push(Prefix {
                prefix: prefix.to_string(),
                uri: uri.to_string(),
            }),
        }
    }

    /// Namespace bound to `prefix`, if any.
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|p| p.prefix == prefix)
            .map(|p| p.uri.as_str())
    }

    /// Expand a term to an absolute IRI where possible.
    pub fn resolve(&self, term: &str) -> String {
        let term = term.trim();
        if let Some(inner) = term.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            return inner.to_string();
        }
        if let Some((prefix, local)) = term.split_once(':') {
            if let Some(ns) = self.namespace(prefix) {
                return format!("{ns}{local}");
            }
        }
        term.to_string()
    }

    /// Rewrite an absolute IRI as `prefix:local` using the first matching
    /// namespace in declaration order.
    pub fn shorten(&self, uri: &str) -> String {
        self.prefixes
            .iter()
            .find_map(|p| {
                uri.strip_prefix(p.uri.as_str())
                    .map(|local| format!("{}:{local}", p.prefix))
            })
            .unwrap_or_else(|| uri.to_string())
    }

    /// Shorthand for `shorten(resolve(term))`.
    pub fn compact(&self, term: &str) -> String {
        self.shorten(&self.resolve(term))
    }

    pub fn as_slice(&self) -> &[Prefix] {
        &self.prefixes
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn into_vec(self) -> Vec<Prefix> {
        self.prefixes
    }
}

/// Local name of a shortened term: the text after its last `:`.
pub fn local_name(term: &str) -> &str {
    match term.rsplit_once(':') {
        Some((_, local)) if !local.is_empty() => local,
        _ => term,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PrefixTable {
        PrefixTable::from_document(
            "@prefix : <http://ex.org/> .\n\
             @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
             @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n",
        )
    }

    #[test]
    fn discovers_prefixes_in_order() {
        let t = table();
        let names: Vec<_> = t.as_slice().iter().map(|p| p.prefix.as_str()).collect();
        assert_eq!(names, vec!["", "rdf", "rdfs"]);
        assert_eq!(t.namespace(""), Some("http://ex.org/"));
    }

    #[test]
    fn redeclaration_keeps_position_takes_last_namespace() {
        let t = PrefixTable::from_document(
            "@prefix a: <http://one/> .\n@prefix b: <http://two/> .\n@prefix a: <http://three/> .",
        );
        assert_eq!(t.len(), 2);
        assert_eq!(t.as_slice()[0].prefix, "a");
        assert_eq!(t.namespace("a"), Some("http://three/"));
    }

    #[test]
    fn resolve_prefixed_and_bracketed_terms() {
        let t = table();
        assert_eq!(t.resolve(":Card"), "http://ex.org/Card");
        assert_eq!(
            t.resolve("rdf:type"),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        );
        assert_eq!(t.resolve("<http://other.org/x>"), "http://other.org/x");
    }

    #[test]
    fn resolve_leaves_unknown_terms_alone() {
        let t = table();
        assert_eq!(t.resolve("xsd:integer"), "xsd:integer");
        assert_eq!(t.resolve("plain"), "plain");
        assert_eq!(t.resolve("\"3\""), "\"3\"");
    }

    #[test]
    fn shorten_uses_first_matching_namespace() {
        let t = table();
        assert_eq!(t.shorten("http://ex.org/Card"), ":Card");
        assert_eq!(t.shorten("http://www.w3.org/2000/01/rdf-schema#label"), "rdfs:label");
        assert_eq!(t.shorten("http://nowhere.org/x"), "http://nowhere.org/x");
    }

    #[test]
    fn resolve_shorten_round_trip() {
        let t = table();
        for uri in [
            "http://ex.org/Card",
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#Property",
        ] {
            assert_eq!(t.resolve(&t.shorten(uri)), uri);
        }
        for term in [":cost", "rdfs:Class", "rdf:type"] {
            assert_eq!(t.shorten(&t.resolve(term)), term);
        }
    }

    #[test]
    fn local_name_after_last_colon() {
        assert_eq!(local_name(":Card"), "Card");
        assert_eq!(local_name("ex:sub:Thing"), "Thing");
        assert_eq!(local_name("NoColon"), "NoColon");
        assert_eq!(local_name("http://ex.org/x"), "//ex.org/x");
    }
}
