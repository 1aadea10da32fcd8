//! # Parser - Predictive Recursive Descent
//!
//! The parser turns the token stream into a [`CstNode`] tree. It decides on
//! every production by looking at a single token, and any mismatch aborts the
//! whole parse with a [`ParseError`]; there is no recovery.
//!
//! ## Line structure is invisible
//!
//! `NEW_LINE` and `EMPTY_LINE` tokens separate lines but carry no grammar of
//! their own. [`Parser::lookahead`] and [`Parser::expect`] step over them, so
//! a question may continue over several lines:
//!
//! ```
//! use qac_syntax::{lex, parse, CstKind};
//!
//! let tokens = lex("Q: What is\nthe answer?\n\nA: 42").unwrap();
//! let root = parse(&tokens).unwrap();
//! assert_eq!(root.kind(), &CstKind::RootQuestions);
//! assert_eq!(root.children().len(), 1);
//! ```
//!
//! The one exception is table cell text, which ends at the end of its line;
//! grammar rules check that with [`Parser::at_line_break`].
//!
//! ## Error lines
//!
//! Errors report the line of the offending lookahead token, or the line of
//! the last consumed token when the input ran out.
//!
//! ## Module Structure
//!
//! - [`grammar`] - one function per grammar rule (root, inline, block)

mod grammar;

use log::debug;

use crate::cst::CstNode;
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/// Parse a token stream into a tree.
pub fn parse(tokens: &[Token]) -> Result<CstNode, ParseError> {
    Parser::new(tokens).parse()
}

/// Cursor over the token stream.
///
/// Grammar functions receive `&mut Parser` and use:
///
/// - `lookahead()`, `at()` to inspect the next significant token
/// - `expect()` to consume it
/// - `no_rule()` to report that no alternative applies
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    /// Line of the last consumed token
    line: u32,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            line: 1,
        }
    }

    /// Parse the whole stream; leftover tokens are an error.
    pub fn parse(mut self) -> Result<CstNode, ParseError> {
        let root = grammar::root(&mut self)?;
        if let Some((_, token)) = self.next_significant() {
            return Err(ParseError::TrailingInput {
                found: token.kind,
                line: token.line,
            });
        }
        debug!(
            "Parsed {} tokens into {}",
            self.tokens.len(),
            root.kind().name()
        );
        Ok(root)
    }

    fn next_significant(&self) -> Option<(usize, &'t Token)> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .find(|(_, token)| !token.kind.is_line_break())
    }

    /// Kind of the next token that isn't a line break, or `END_OF_FILE`.
    pub fn lookahead(&self) -> TokenKind {
        self.next_significant()
            .map_or(TokenKind::END_OF_FILE, |(_, token)| token.kind)
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.lookahead() == kind
    }

    /// Whether the very next raw token ends the current line.
    pub fn at_line_break(&self) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|token| token.kind.is_line_break())
    }

    /// Consume the next significant token if it has the given kind.
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'t Token, ParseError> {
        match self.next_significant() {
            Some((index, token)) if token.kind == kind => {
                self.pos = index + 1;
                self.line = token.line;
                Ok(token)
            }
            _ => Err(ParseError::UnexpectedToken {
                expected: kind,
                found: self.lookahead(),
                line: self.error_line(),
            }),
        }
    }

    /// Consume the next significant token whatever its kind.
    pub fn bump(&mut self) -> Option<&'t Token> {
        let (index, token) = self.next_significant()?;
        self.pos = index + 1;
        self.line = token.line;
        Some(token)
    }

    pub fn error_line(&self) -> u32 {
        self.next_significant()
            .map_or(self.line, |(_, token)| token.line)
    }

    /// Error for a rule with no alternative matching the lookahead.
    pub fn no_rule(&self, rule: &'static str) -> ParseError {
        ParseError::NoRule {
            rule,
            found: self.lookahead(),
            line: self.error_line(),
        }
    }
}
