//! Token kinds and the [`Token`] value produced by the lexer.
//!
//! Every token carries its kind, its text and the 1-based source line it was
//! read from. Structural tokens (`NEW_LINE`, `EMPTY_LINE`) carry an empty
//! value; delimiter tokens carry the marker text itself (`*`, `\(` ...).

use std::fmt;

/// All token kinds emitted by the lexer.
///
/// SCREAMING_CASE mirrors the names printed by `--print-tokens`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    /// Synthesized by the parser once the token stream is exhausted
    END_OF_FILE,
    /// `Q:` at the start of a line
    QUESTION,
    /// `A:` at the start of a line
    ANSWER,
    /// Any plain word
    WORD,
    /// `\(`
    LATEX_OPENING,
    /// `\[`
    LATEX_CENTERED_OPENING,
    /// Words between a LaTeX opening and closing marker
    LATEX_CODE,
    /// `\)`
    LATEX_CLOSING,
    /// `\]`
    LATEX_CENTERED_CLOSING,
    /// End of a non-empty line
    NEW_LINE,
    /// A blank line
    EMPTY_LINE,
    /// `-` at the start of a line
    UNORDERED_LIST_ITEM,
    /// `#.` or `<digits>.` at the start of a line
    ORDERED_LIST_ITEM,
    /// `|`
    TABLE_CELL,
    /// `|<`
    TABLE_CELL_LEFT,
    /// `|>`
    TABLE_CELL_RIGHT,
    /// `|-`
    TABLE_CELL_CENTER,
    /// A line starting with `---`
    TABLE_DIVIDER,
    BOLD_OPENING,
    BOLD_CLOSING,
    UNDERLINE_OPENING,
    UNDERLINE_CLOSING,
    /// `CHA:`
    CHAPTER,
    /// `SEC:`
    SECTION,
    /// `SUB:`
    SUBSECTION,
    CODE_OPENING,
    CODE_CLOSING,
    /// `IMG:` followed by the image literal
    IMAGE,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::END_OF_FILE => "END_OF_FILE",
            TokenKind::QUESTION => "QUESTION",
            TokenKind::ANSWER => "ANSWER",
            TokenKind::WORD => "WORD",
            TokenKind::LATEX_OPENING => "LATEX_OPENING",
            TokenKind::LATEX_CENTERED_OPENING => "LATEX_CENTERED_OPENING",
            TokenKind::LATEX_CODE => "LATEX_CODE",
            TokenKind::LATEX_CLOSING => "LATEX_CLOSING",
            TokenKind::LATEX_CENTERED_CLOSING => "LATEX_CENTERED_CLOSING",
            TokenKind::NEW_LINE => "NEW_LINE",
            TokenKind::EMPTY_LINE => "EMPTY_LINE",
            TokenKind::UNORDERED_LIST_ITEM => "UNORDERED_LIST_ITEM",
            TokenKind::ORDERED_LIST_ITEM => "ORDERED_LIST_ITEM",
            TokenKind::TABLE_CELL => "TABLE_CELL",
            TokenKind::TABLE_CELL_LEFT => "TABLE_CELL_LEFT",
            TokenKind::TABLE_CELL_RIGHT => "TABLE_CELL_RIGHT",
            TokenKind::TABLE_CELL_CENTER => "TABLE_CELL_CENTER",
            TokenKind::TABLE_DIVIDER => "TABLE_DIVIDER",
            TokenKind::BOLD_OPENING => "BOLD_OPENING",
            TokenKind::BOLD_CLOSING => "BOLD_CLOSING",
            TokenKind::UNDERLINE_OPENING => "UNDERLINE_OPENING",
            TokenKind::UNDERLINE_CLOSING => "UNDERLINE_CLOSING",
            TokenKind::CHAPTER => "CHAPTER",
            TokenKind::SECTION => "SECTION",
            TokenKind::SUBSECTION => "SUBSECTION",
            TokenKind::CODE_OPENING => "CODE_OPENING",
            TokenKind::CODE_CLOSING => "CODE_CLOSING",
            TokenKind::IMAGE => "IMAGE",
        }
    }

    /// Line structure tokens that the parser's lookahead skips over.
    pub fn is_line_break(self) -> bool {
        matches!(self, TokenKind::NEW_LINE | TokenKind::EMPTY_LINE)
    }

    /// Any of the four table cell markers.
    pub fn is_table_cell(self) -> bool {
        matches!(
            self,
            TokenKind::TABLE_CELL
                | TokenKind::TABLE_CELL_LEFT
                | TokenKind::TABLE_CELL_RIGHT
                | TokenKind::TABLE_CELL_CENTER
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// 1-based line number in the file the token was read from
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
        }
    }
}

/// Formats as `KIND@line[value]`, the layout used by `--print-tokens`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}[{}]", self.kind, self.line, self.value)
    }
}
