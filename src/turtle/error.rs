//! Diagnostic error types for the Turtle parser.
//!
//! Malformed Turtle content never produces an error: it shows up as a
//! smaller model instead. The only failure is input that is not text.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced before parsing can start.
#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("input is not valid UTF-8 (invalid sequence at byte {valid_up_to})")]
    #[diagnostic(
        code(turtle_schema::parse::not_utf8),
        help(
            "Turtle documents must be UTF-8 text. Re-save the file as UTF-8, \
             or check that a binary file was not passed by mistake."
        )
    )]
    NotUtf8 {
        valid_up_to: usize,
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Result type for parser entry points.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
