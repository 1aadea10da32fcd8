//! # Lexer - Tokenizing Q&A Source
//!
//! The lexer works line by line. Each line is trimmed and then split on single
//! spaces into words, so a run of spaces yields empty `WORD` tokens; the
//! renderer glues words back together with one space, which keeps those
//! harmless.
//!
//! ```
//! use qac_syntax::lexer::lex;
//! use qac_syntax::TokenKind;
//!
//! let tokens = lex("Q: What is *bold*?").unwrap();
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::QUESTION,
//!         TokenKind::WORD,
//!         TokenKind::WORD,
//!         TokenKind::BOLD_OPENING,
//!         TokenKind::WORD,
//!         TokenKind::BOLD_CLOSING,
//!         TokenKind::WORD,
//!         TokenKind::NEW_LINE,
//!     ]
//! );
//! ```
//!
//! ## Line rules
//!
//! - A line whose first character is `#` is a comment and vanishes, unless it
//!   starts with `#.` (an ordered list marker).
//! - A blank line produces a single `EMPTY_LINE`.
//! - Every other line ends with a `NEW_LINE`, even when it was fully consumed
//!   by delimited content.
//!
//! ## Delimiters
//!
//! Inline spans (LaTeX, bold, underline, code) open on a word prefix and close
//! on a word suffix, optionally followed by one punctuation character. The
//! open span survives line ends: everything up to the closing marker becomes
//! the span's content. See [`Delimiter`].
//!
//! ## Keywords
//!
//! Structural keywords are only recognized as the first word of a line; `Q:`
//! and `A:` keep first-word status for the word after them so that
//! `Q: - item` still starts a list. Once a line starts with a table cell
//! marker, later cell markers on that line are cells too.
//!
//! ## Includes
//!
//! `FILE: name` lexes `name` (relative to the working directory) in place of
//! the line. Each name is included at most once per run, tracked by an
//! [`IncludeSet`] shared with the nested lexers.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};

use crate::error::LexError;
use crate::keyword::Keyword;
use crate::token::{Token, TokenKind};

/// Punctuation allowed to trail a closing marker in the same word.
pub const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ':', ';'];

/// An inline span the lexer may be inside of.
///
/// [`Delimiter::ALL`] is the order in which openings are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Latex,
    CenteredLatex,
    Bold,
    Underline,
    Code,
}

/// Result of checking a word for the closing marker of the active span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Closing<'w> {
    /// No closing marker; the whole word is span content.
    Open(&'w str),
    Closed {
        content: &'w str,
        punctuation: Option<&'w str>,
    },
}

impl Delimiter {
    pub const ALL: [Delimiter; 5] = [
        Delimiter::Latex,
        Delimiter::CenteredLatex,
        Delimiter::Bold,
        Delimiter::Underline,
        Delimiter::Code,
    ];

    pub fn opening(self) -> &'static str {
        match self {
            Delimiter::Latex => "\\(",
            Delimiter::CenteredLatex => "\\[",
            Delimiter::Bold => "*",
            Delimiter::Underline => "_",
            Delimiter::Code => "`",
        }
    }

    pub fn closing(self) -> &'static str {
        match self {
            Delimiter::Latex => "\\)",
            Delimiter::CenteredLatex => "\\]",
            Delimiter::Bold => "*",
            Delimiter::Underline => "_",
            Delimiter::Code => "`",
        }
    }

    fn opening_kind(self) -> TokenKind {
        match self {
            Delimiter::Latex => TokenKind::LATEX_OPENING,
            Delimiter::CenteredLatex => TokenKind::LATEX_CENTERED_OPENING,
            Delimiter::Bold => TokenKind::BOLD_OPENING,
            Delimiter::Underline => TokenKind::UNDERLINE_OPENING,
            Delimiter::Code => TokenKind::CODE_OPENING,
        }
    }

    /// Kind of the tokens between the markers.
    fn content_kind(self) -> TokenKind {
        match self {
            Delimiter::Latex | Delimiter::CenteredLatex => TokenKind::LATEX_CODE,
            Delimiter::Bold | Delimiter::Underline | Delimiter::Code => TokenKind::WORD,
        }
    }

    fn closing_kind(self) -> TokenKind {
        match self {
            Delimiter::Latex => TokenKind::LATEX_CLOSING,
            Delimiter::CenteredLatex => TokenKind::LATEX_CENTERED_CLOSING,
            Delimiter::Bold => TokenKind::BOLD_CLOSING,
            Delimiter::Underline => TokenKind::UNDERLINE_CLOSING,
            Delimiter::Code => TokenKind::CODE_CLOSING,
        }
    }

    /// First delimiter whose opening marker prefixes `word`, with the rest.
    fn open(word: &str) -> Option<(Delimiter, &str)> {
        Delimiter::ALL
            .into_iter()
            .find_map(|d| word.strip_prefix(d.opening()).map(|rest| (d, rest)))
    }

    fn close(self, word: &str) -> Closing<'_> {
        let marker = self.closing();
        if let Some(content) = word.strip_suffix(marker) {
            return Closing::Closed {
                content,
                punctuation: None,
            };
        }
        if let Some(last) = word.chars().last()
            && TRAILING_PUNCTUATION.contains(&last)
        {
            let head = &word[..word.len() - last.len_utf8()];
            if let Some(content) = head.strip_suffix(marker) {
                return Closing::Closed {
                    content,
                    punctuation: Some(&word[head.len()..]),
                };
            }
        }
        Closing::Open(word)
    }
}

/// Names of documents already spliced in during one lexing run.
#[derive(Debug, Default, Clone)]
pub struct IncludeSet {
    names: HashSet<String>,
}

impl IncludeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`; returns `false` if it was already included.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_owned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Tokenizer entry point.
///
/// A `Lexer` owns the include set for its run; lexing several inputs with the
/// same `Lexer` shares it between them.
#[derive(Debug, Default)]
pub struct Lexer {
    includes: IncludeSet,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lex_str(&mut self, input: &str) -> Result<Vec<Token>, LexError> {
        self.lex_reader(input.as_bytes())
    }

    pub fn lex_reader<R: BufRead>(&mut self, reader: R) -> Result<Vec<Token>, LexError> {
        let mut run = Run::new(&mut self.includes);
        for (index, line) in reader.lines().enumerate() {
            run.line(&line?, line_number(index))?;
        }
        Ok(run.tokens)
    }

    pub fn lex_file(&mut self, path: &Path) -> Result<Vec<Token>, LexError> {
        debug!("Lexing {}", path.display());
        lex_path(&mut self.includes, path)
    }

    pub fn includes(&self) -> &IncludeSet {
        &self.includes
    }
}

/// Tokenize a string with a fresh include set.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new().lex_str(input)
}

fn line_number(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn lex_path(includes: &mut IncludeSet, path: &Path) -> Result<Vec<Token>, LexError> {
    let file_error = |source| LexError::File {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(file_error)?;
    let mut run = Run::new(includes);
    for (index, line) in BufReader::new(file).lines().enumerate() {
        run.line(&line.map_err(file_error)?, line_number(index))?;
    }
    Ok(run.tokens)
}

/// State for lexing one file. Nested includes get their own `Run`.
struct Run<'s> {
    includes: &'s mut IncludeSet,
    delimiter: Option<Delimiter>,
    tokens: Vec<Token>,
}

impl<'s> Run<'s> {
    fn new(includes: &'s mut IncludeSet) -> Self {
        Self {
            includes,
            delimiter: None,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, kind: TokenKind, value: &str, line: u32) {
        self.tokens.push(Token::new(kind, value, line));
    }

    fn line(&mut self, raw: &str, line: u32) -> Result<(), LexError> {
        let text = raw.trim();
        if is_comment(text) {
            trace!("line {line}: comment");
            return Ok(());
        }
        if text.is_empty() {
            self.push(TokenKind::EMPTY_LINE, "", line);
            return Ok(());
        }

        let mut first_word = true;
        let mut in_table = false;
        let mut offset = 0;
        for word in text.split(' ') {
            let rest = text[offset + word.len()..].trim();
            offset += word.len() + 1;

            if let Some(delimiter) = self.delimiter {
                self.continue_span(delimiter, word, line);
                first_word = false;
                continue;
            }
            if let Some((delimiter, rest)) = Delimiter::open(word) {
                self.push(delimiter.opening_kind(), delimiter.opening(), line);
                self.delimiter = Some(delimiter);
                self.continue_span(delimiter, rest, line);
                first_word = false;
                continue;
            }

            let keyword = Keyword::classify(word);
            if first_word {
                match keyword {
                    Some(Keyword::File) => return self.include(rest),
                    Some(Keyword::Image) => {
                        self.push(TokenKind::IMAGE, rest, line);
                        break;
                    }
                    Some(keyword) => {
                        in_table |= keyword.is_table_cell();
                        if let Some(kind) = keyword.token_kind() {
                            self.push(kind, word, line);
                        }
                        if keyword.keeps_line_start() {
                            continue;
                        }
                    }
                    None => self.push(TokenKind::WORD, word, line),
                }
            } else {
                match keyword.filter(|k| in_table && k.is_table_cell()) {
                    Some(cell) => {
                        let kind = cell.token_kind().unwrap_or(TokenKind::TABLE_CELL);
                        self.push(kind, word, line);
                    }
                    None => self.push(TokenKind::WORD, word, line),
                }
            }
            first_word = false;
        }

        self.push(TokenKind::NEW_LINE, "", line);
        Ok(())
    }

    /// Lex `word` as content of the open span, closing it if the word ends
    /// with the closing marker.
    fn continue_span(&mut self, delimiter: Delimiter, word: &str, line: u32) {
        match delimiter.close(word) {
            Closing::Open(content) => {
                if !content.is_empty() {
                    self.push(delimiter.content_kind(), content, line);
                }
            }
            Closing::Closed {
                content,
                punctuation,
            } => {
                if !content.is_empty() {
                    self.push(delimiter.content_kind(), content, line);
                }
                self.push(delimiter.closing_kind(), delimiter.closing(), line);
                if let Some(punctuation) = punctuation {
                    self.push(TokenKind::WORD, punctuation, line);
                }
                self.delimiter = None;
            }
        }
    }

    fn include(&mut self, name: &str) -> Result<(), LexError> {
        if !self.includes.insert(name) {
            debug!("Skipping '{name}', already included");
            return Ok(());
        }
        debug!("Including '{name}'");
        let nested = lex_path(&mut *self.includes, Path::new(name))?;
        self.tokens.extend(nested);
        Ok(())
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') && !line.starts_with("#.")
}
