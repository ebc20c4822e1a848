//! Lexer: splits Turtle text into literal, IRI, punctuation and word tokens.
//!
//! The lexer is a small hand-written state machine. At each position it tries,
//! in order:
//! 1. **Whitespace**: skipped
//! 2. **String literal**: `"..."` with `\` escapes, plus an optional `@lang`
//!    tag or `^^datatype` suffix, all one token
//! 3. **IRI**: `<...>` including both brackets
//! 4. **Punctuation**: `;` `,` `[` `]` as one-character tokens
//! 5. **Word**: anything else up to whitespace or punctuation (prefixed
//!    names, the keyword `a`, numbers, booleans)
//!
//! Unterminated strings and IRIs run to the end of input. The lexer never
//! fails; malformed tokens are left for later stages to interpret.

/// Byte-level source span within the lexed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Quoted string, possibly with a language tag or datatype suffix.
    Literal,
    /// Angle-bracketed IRI.
    Iri,
    Semicolon,
    Comma,
    OpenBracket,
    CloseBracket,
    /// Bare token: prefixed name, keyword, number or boolean.
    Word,
}

impl TokenKind {
    /// Whether this token separates predicate or object lists.
    pub fn is_separator(self) -> bool {
        matches!(self, Self::Semicolon | Self::Comma)
    }
}

/// A single lexical token borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub text: &'a str,
    pub span: Span,
}

/// Characters that end a bare word.
fn is_word_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ';' | ',' | '[' | ']')
}

/// Characters that end a bare datatype after `^^`.
fn is_datatype_terminator(c: char) -> bool {
    is_word_terminator(c) || c == '.'
}

/// Lazy token stream over a piece of Turtle text.
///
/// Each call to [`Lexer::new`] starts a fresh scan; no state is shared
/// between lexers.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.src.get(self.pos + offset..)?.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.src[start..self.pos],
            span: Span {
                start,
                end: self.pos,
            },
        }
    }

    /// Scan a quoted literal starting at the opening `"`.
    fn literal(&mut self, start: usize) -> Token<'a> {
        self.bump();
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                '"' => break,
                _ => {}
            }
        }

        // Greedy suffixes: any run of `@lang` and `^^type`.
        loop {
            match self.peek() {
                Some('@') => {
                    self.bump();
                    self.eat_while(|c| c.is_ascii_alphabetic() || c == '-');
                }
                Some('^') if self.peek_at(1) == Some('^') => {
                    self.pos += 2;
                    if self.peek() == Some('<') {
                        self.eat_while(|c| c != '>');
                        self.bump();
                    } else {
                        self.eat_while(|c| !is_datatype_terminator(c));
                    }
                }
                _ => break,
            }
        }

        self.token(TokenKind::Literal, start)
    }

    /// Scan an IRI starting at the opening `<`.
    fn iri(&mut self, start: usize) -> Token<'a> {
        self.bump();
        self.eat_while(|c| c != '>');
        self.bump();
        self.token(TokenKind::Iri, start)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.eat_while(char::is_whitespace);
        let start = self.pos;
        let c = self.peek()?;

        let token = match c {
            '"' => self.literal(start),
            '<' => self.iri(start),
            ';' | ',' | '[' | ']' => {
                self.bump();
                let kind = match c {
                    ';' => TokenKind::Semicolon,
                    ',' => TokenKind::Comma,
                    '[' => TokenKind::OpenBracket,
                    _ => TokenKind::CloseBracket,
                };
                self.token(kind, start)
            }
            _ => {
                self.eat_while(|c| !is_word_terminator(c));
                self.token(TokenKind::Word, start)
            }
        };
        Some(token)
    }
}

/// Tokenize a whole block of text.
pub fn tokenize(src: &str) -> Vec<Token<'_>> {
    Lexer::new(src).collect()
}
