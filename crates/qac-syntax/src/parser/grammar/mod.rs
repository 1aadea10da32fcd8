//! # Grammar Rules
//!
//! One function per rule. Each takes `&mut Parser`, decides on the lookahead
//! token and returns the finished node or the first error.
//!
//! ```text
//! root        := question+ | chapter+
//! chapter     := CHAPTER text question* section*
//! section     := SECTION text question* subsection*
//! subsection  := SUBSECTION text question*
//! question    := QUESTION question_text ANSWER answer_text
//! ```
//!
//! The text-bearing rules (`question_text`, `answer_text`, `list_item_text`,
//! `table_cell_text`) share [`content`] and differ only in which block
//! elements they admit; see [`Context`].
//!
//! ## Module Structure
//!
//! - [`inline`] - text, images, LaTeX, bold, underline, code
//! - [`block`] - lists and tables

mod block;
mod inline;

use crate::cst::{CstKind, CstNode};
use crate::error::ParseError;
use crate::parser::Parser;
use crate::token::TokenKind;

pub(crate) fn root(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    match p.lookahead() {
        TokenKind::QUESTION => {
            let mut root = CstNode::new(CstKind::RootQuestions);
            while p.at(TokenKind::QUESTION) {
                root.push(question(p)?);
            }
            Ok(root)
        }
        TokenKind::CHAPTER => {
            let mut root = CstNode::new(CstKind::RootChapters);
            while p.at(TokenKind::CHAPTER) {
                root.push(chapter(p)?);
            }
            Ok(root)
        }
        _ => Err(p.no_rule("root")),
    }
}

fn question(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    p.expect(TokenKind::QUESTION)?;
    let text = content(p, Context::Question)?;
    p.expect(TokenKind::ANSWER)?;
    let answer = content(p, Context::Answer)?;
    Ok(CstNode::with_children(
        CstKind::Question,
        vec![text, answer],
    ))
}

fn chapter(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    p.expect(TokenKind::CHAPTER)?;
    let mut node = CstNode::with_children(CstKind::Chapter, vec![inline::text(p)?]);
    questions(p, &mut node)?;
    while p.at(TokenKind::SECTION) {
        node.push(section(p)?);
    }
    Ok(node)
}

fn section(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    p.expect(TokenKind::SECTION)?;
    let mut node = CstNode::with_children(CstKind::Section, vec![inline::text(p)?]);
    questions(p, &mut node)?;
    while p.at(TokenKind::SUBSECTION) {
        node.push(subsection(p)?);
    }
    Ok(node)
}

fn subsection(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    p.expect(TokenKind::SUBSECTION)?;
    let mut node = CstNode::with_children(CstKind::Subsection, vec![inline::text(p)?]);
    questions(p, &mut node)?;
    Ok(node)
}

fn questions(p: &mut Parser<'_>, parent: &mut CstNode) -> Result<(), ParseError> {
    while p.at(TokenKind::QUESTION) {
        parent.push(question(p)?);
    }
    Ok(())
}

/// Which text-bearing rule is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Question,
    Answer,
    ListItem,
    TableCell,
}

impl Context {
    fn kind(self) -> CstKind {
        match self {
            Context::Question => CstKind::QuestionText,
            Context::Answer => CstKind::AnswerText,
            Context::ListItem => CstKind::ListItemText,
            Context::TableCell => CstKind::TableCellText,
        }
    }

    fn rule(self) -> &'static str {
        match self {
            Context::Question => "question_text",
            Context::Answer => "answer_text",
            Context::ListItem => "list_item_text",
            Context::TableCell => "table_cell_text",
        }
    }

    fn allows_lists(self) -> bool {
        matches!(self, Context::Answer | Context::TableCell)
    }

    fn allows_tables(self) -> bool {
        matches!(self, Context::Answer | Context::ListItem)
    }
}

/// One or more elements admitted by `context`. Table cell text may be empty
/// and stops at the end of its line.
fn content(p: &mut Parser<'_>, context: Context) -> Result<CstNode, ParseError> {
    let mut node = CstNode::new(context.kind());
    loop {
        if context == Context::TableCell && p.at_line_break() {
            break;
        }
        match element(p, context)? {
            Some(child) => node.push(child),
            None => break,
        }
    }
    if node.children().is_empty() && context != Context::TableCell {
        return Err(p.no_rule(context.rule()));
    }
    Ok(node)
}

fn element(p: &mut Parser<'_>, context: Context) -> Result<Option<CstNode>, ParseError> {
    let node = match p.lookahead() {
        TokenKind::WORD if context == Context::TableCell => inline::text_in_line(p)?,
        TokenKind::WORD => inline::text(p)?,
        TokenKind::IMAGE => inline::image(p)?,
        TokenKind::LATEX_OPENING | TokenKind::LATEX_CENTERED_OPENING => inline::latex(p)?,
        TokenKind::BOLD_OPENING => inline::bold(p)?,
        TokenKind::UNDERLINE_OPENING => inline::underlined(p)?,
        TokenKind::CODE_OPENING => inline::code(p)?,
        TokenKind::UNORDERED_LIST_ITEM if context.allows_lists() => block::unordered_list(p)?,
        TokenKind::ORDERED_LIST_ITEM if context.allows_lists() => block::ordered_list(p)?,
        TokenKind::TABLE_DIVIDER if context.allows_tables() => block::table(p)?,
        _ => return Ok(None),
    };
    Ok(Some(node))
}
