//! # Keyword classification
//!
//! Structural markers (`Q:`, `CHA:`, `-`, `|<`, `---` ...) are only meaningful
//! as whole words. The lexer splits each line on spaces and asks
//! [`Keyword::classify`] whether a word is one of them; this module owns the
//! [Logos] automaton doing the recognition.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ```
//! use qac_syntax::keyword::Keyword;
//!
//! assert_eq!(Keyword::classify("Q:"), Some(Keyword::Question));
//! assert_eq!(Keyword::classify("12."), Some(Keyword::NumberedItem));
//! assert_eq!(Keyword::classify("Q:x"), None);
//! ```

use logos::Logos;

use crate::token::TokenKind;

/// Words with structural meaning.
///
/// The automaton matches a prefix; [`Keyword::classify`] additionally requires
/// the match to span the whole word.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    #[token("Q:")]
    Question,
    #[token("A:")]
    Answer,
    #[token("CHA:")]
    Chapter,
    #[token("SEC:")]
    Section,
    #[token("SUB:")]
    Subsection,
    /// `FILE:` splices another document in place of the line
    #[token("FILE:")]
    File,
    /// `IMG:` turns the rest of the line into an image literal
    #[token("IMG:")]
    Image,
    #[token("-")]
    UnorderedItem,
    #[token("#.")]
    OrderedItem,
    #[regex(r"[0-9]+\.")]
    NumberedItem,
    #[token("|")]
    Cell,
    #[token("|<")]
    CellLeft,
    #[token("|>")]
    CellRight,
    #[token("|-")]
    CellCenter,
    #[regex(r"---[^\n]*")]
    Divider,
}

impl Keyword {
    /// Classify a whole word, returning `None` for plain words.
    pub fn classify(word: &str) -> Option<Keyword> {
        let mut lexer = Keyword::lexer(word);
        match lexer.next() {
            Some(Ok(keyword)) if lexer.span().end == word.len() => Some(keyword),
            _ => None,
        }
    }

    pub fn is_table_cell(self) -> bool {
        matches!(
            self,
            Keyword::Cell | Keyword::CellLeft | Keyword::CellRight | Keyword::CellCenter
        )
    }

    /// `Q:` and `A:` leave the following word in first-word position.
    pub fn keeps_line_start(self) -> bool {
        matches!(self, Keyword::Question | Keyword::Answer)
    }

    /// Token emitted for this keyword.
    ///
    /// `File` and `Image` are handled by the lexer directly and have no
    /// token of their own.
    pub fn token_kind(self) -> Option<TokenKind> {
        let kind = match self {
            Keyword::Question => TokenKind::QUESTION,
            Keyword::Answer => TokenKind::ANSWER,
            Keyword::Chapter => TokenKind::CHAPTER,
            Keyword::Section => TokenKind::SECTION,
            Keyword::Subsection => TokenKind::SUBSECTION,
            Keyword::UnorderedItem => TokenKind::UNORDERED_LIST_ITEM,
            Keyword::OrderedItem | Keyword::NumberedItem => TokenKind::ORDERED_LIST_ITEM,
            Keyword::Cell => TokenKind::TABLE_CELL,
            Keyword::CellLeft => TokenKind::TABLE_CELL_LEFT,
            Keyword::CellRight => TokenKind::TABLE_CELL_RIGHT,
            Keyword::CellCenter => TokenKind::TABLE_CELL_CENTER,
            Keyword::Divider => TokenKind::TABLE_DIVIDER,
            Keyword::File | Keyword::Image => return None,
        };
        Some(kind)
    }
}
