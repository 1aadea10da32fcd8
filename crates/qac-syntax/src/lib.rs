//! # qac-syntax
//!
//! Front end of the Q&A document compiler: a line-oriented lexer, a
//! predictive recursive-descent parser and the concrete syntax tree it builds.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → CstNode tree → (Visitor)
//!               (Keyword/Logos)  (Grammar)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Splits each line into words, recognizes structural keywords through the
//! [`keyword`] classifier and tracks open inline spans (bold, LaTeX ...)
//! across words and lines. `FILE:` lines splice other documents in.
//!
//! ```text
//! "Q: Is *this* bold?" → [QUESTION, WORD(Is), BOLD_OPENING, WORD(this),
//!                         BOLD_CLOSING, WORD(bold?), NEW_LINE]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! One function per grammar rule, one token of lookahead, no error recovery:
//! the first mismatch is reported with its line number.
//!
//! ### 3. CST ([`cst`] module)
//!
//! Owned nodes with ordered children. Back ends walk it with a
//! [`Visitor`]; `Display` prints it as a box-drawing tree.
//!
//! ## Module Structure
//!
//! ```text
//! qac-syntax/
//! ├── lib.rs       # This file - public API and end-to-end tests
//! ├── token.rs     # TokenKind and Token
//! ├── keyword.rs   # Logos keyword classifier
//! ├── lexer.rs     # Line lexer, delimiters, include tracking
//! ├── error.rs     # LexError and ParseError
//! ├── cst/         # CstNode, Visitor, tree dump
//! └── parser/
//!     ├── mod.rs   # Parser cursor and parse()
//!     └── grammar/ # root, inline and block rules
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use qac_syntax::{lex, parse, CstKind};
//!
//! let tokens = lex("CHA: Rust\nQ: Who owns it?\nA: The *owner*.").unwrap();
//! let tree = parse(&tokens).unwrap();
//!
//! assert_eq!(tree.kind(), &CstKind::RootChapters);
//! assert_eq!(tree.children()[0].kind(), &CstKind::Chapter);
//! ```

pub mod cst;
pub mod error;
pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod token;

pub use cst::{Alignment, CstKind, CstNode, ImageRef, Visitor};
pub use error::{LexError, ParseError};
pub use lexer::{IncludeSet, Lexer, lex};
pub use parser::parse;
pub use token::{Token, TokenKind};
