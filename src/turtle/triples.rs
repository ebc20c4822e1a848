//! Triple extraction from one statement block.
//!
//! A block reads as `subject predicate object (, object)* (; predicate ...)*`.
//! Terms stay exactly as written; prefix resolution happens later. Bracketed
//! blank nodes become a single opaque object and are not parsed further.

use std::borrow::Cow;

use super::lexer::{Token, TokenKind, tokenize};

/// The keyword standing for `rdf:type` in predicate position.
const TYPE_KEYWORD: &str = "a";
/// `a` expands to the bracketed IRI so it resolves without an `rdf:` prefix.
const RDF_TYPE_IRI: &str = "<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>";

/// A raw, unresolved statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple<'a> {
    pub subject: &'a str,
    pub predicate: &'a str,
    pub object: Cow<'a, str>,
}

/// Extract every triple of a block. Blocks with fewer than three tokens
/// yield nothing.
pub fn extract_triples(block: &str) -> Vec<Triple<'_>> {
    let tokens = tokenize(block);
    if tokens.len() < 3 {
        return Vec::new();
    }
    TripleReader::new(&tokens).read()
}

struct TripleReader<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    triples: Vec<Triple<'a>>,
}

impl<'t, 'a> TripleReader<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            triples: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn read(mut self) -> Vec<Triple<'a>> {
        let subject = self.tokens[0].text;
        self.pos = 1;

        while let Some(token) = self.peek().copied() {
            self.pos += 1;
            // Stray separators where a predicate belongs are skipped.
            if token.kind.is_separator() {
                continue;
            }
            let predicate = if token.kind == TokenKind::Word && token.text == TYPE_KEYWORD {
                RDF_TYPE_IRI
            } else {
                token.text
            };
            self.read_objects(subject, predicate);
        }

        self.triples
    }

    /// Read the object list of one predicate, up to and including its `;`.
    fn read_objects(&mut self, subject: &'a str, predicate: &'a str) {
        while let Some(token) = self.peek().copied() {
            match token.kind {
                TokenKind::Semicolon => {
                    self.pos += 1;
                    return;
                }
                TokenKind::Comma => {
                    self.pos += 1;
                    continue;
                }
                TokenKind::OpenBracket => {
                    let object = self.blank_node();
                    self.triples.push(Triple {
                        subject,
                        predicate,
                        object: Cow::Owned(object),
                    });
                }
                _ => {
                    self.pos += 1;
                    self.triples.push(Triple {
                        subject,
                        predicate,
                        object: Cow::Borrowed(token.text),
                    });
                }
            }

            if self.after_object_ends_predicate() {
                return;
            }
        }
    }

    /// Consume a separator following an object. Returns `true` when it was a
    /// `;`, closing the current predicate.
    fn after_object_ends_predicate(&mut self) -> bool {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::Semicolon) => {
                self.pos += 1;
                true
            }
            Some(TokenKind::Comma) => {
                self.pos += 1;
                false
            }
            _ => false,
        }
    }

    /// Capture a `[ ... ]` span, tracking nesting, as one space-joined string.
    ///
    /// Unbalanced brackets capture to the end of the block.
    fn blank_node(&mut self) -> String {
        let mut parts = Vec::new();
        let mut depth = 0usize;
        while let Some(token) = self.peek().copied() {
            self.pos += 1;
            match token.kind {
                TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseBracket => depth = depth.saturating_sub(1),
                _ => {}
            }
            parts.push(token.text);
            if depth == 0 {
                break;
            }
        }
        parts.join(" ")
    }
}
