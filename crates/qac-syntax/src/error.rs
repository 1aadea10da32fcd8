use std::path::PathBuf;

use thiserror::Error;

use crate::token::TokenKind;

/// Errors raised while turning source text into tokens.
#[derive(Debug, Error)]
pub enum LexError {
    /// The input or an included document could not be opened or read.
    #[error("Couldn't read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Couldn't read input: {0}")]
    Read(#[from] std::io::Error),
}

/// Errors raised by the parser. All of them are fatal for the document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected {expected} but found {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        line: u32,
    },

    /// No alternative of `rule` accepts the lookahead token.
    #[error("line {line}: no rule to parse {rule} starting with {found}")]
    NoRule {
        rule: &'static str,
        found: TokenKind,
        line: u32,
    },

    #[error("line {line}: invalid image '{literal}': {reason}")]
    InvalidImage {
        literal: String,
        reason: &'static str,
        line: u32,
    },

    /// The root rule finished but tokens remain, e.g. a chapter after a
    /// run of free-standing questions.
    #[error("line {line}: unexpected {found} after the end of the document")]
    TrailingInput { found: TokenKind, line: u32 },
}

impl ParseError {
    pub fn line(&self) -> u32 {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::NoRule { line, .. }
            | ParseError::InvalidImage { line, .. }
            | ParseError::TrailingInput { line, .. } => *line,
        }
    }
}
