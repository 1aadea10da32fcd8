//! # Inline-Level Grammar
//!
//! ```text
//! text        := WORD+
//! image       := IMAGE
//! latex       := normal_latex | centered_latex
//! normal_latex    := LATEX_OPENING latex_body LATEX_CLOSING
//! centered_latex  := LATEX_CENTERED_OPENING latex_body LATEX_CENTERED_CLOSING
//! latex_body  := LATEX_CODE+
//! bold        := BOLD_OPENING text BOLD_CLOSING
//! underlined  := UNDERLINE_OPENING text UNDERLINE_CLOSING
//! code        := CODE_OPENING text CODE_CLOSING
//! ```
//!
//! ## Image literals
//!
//! The value of an `IMAGE` token is `path[,size | ,width,height]`; blanks
//! around the commas are ignored:
//!
//! | Literal | Width | Height |
//! |---------|-------|--------|
//! | `cat.png` | - | - |
//! | `cat.png,80` | 80 | 80 |
//! | `cat.png, 80, 40` | 80 | 40 |

use crate::cst::{CstKind, CstNode, ImageRef};
use crate::error::ParseError;
use crate::parser::Parser;
use crate::token::TokenKind;

pub(super) fn text(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    let words = repeated(p, TokenKind::WORD)?;
    Ok(CstNode::new(CstKind::Text(words)))
}

/// Text that ends with its line, for table cells.
pub(super) fn text_in_line(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    let mut words = vec![p.expect(TokenKind::WORD)?.value.clone()];
    while !p.at_line_break() && p.at(TokenKind::WORD) {
        words.push(p.expect(TokenKind::WORD)?.value.clone());
    }
    Ok(CstNode::new(CstKind::Text(words)))
}

/// Values of one or more consecutive tokens of `kind`.
fn repeated(p: &mut Parser<'_>, kind: TokenKind) -> Result<Vec<String>, ParseError> {
    let mut values = vec![p.expect(kind)?.value.clone()];
    while p.at(kind) {
        values.push(p.expect(kind)?.value.clone());
    }
    Ok(values)
}

pub(super) fn image(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    let token = p.expect(TokenKind::IMAGE)?;
    let image = parse_image(&token.value).map_err(|reason| ParseError::InvalidImage {
        literal: token.value.clone(),
        reason,
        line: token.line,
    })?;
    Ok(CstNode::new(CstKind::Image(image)))
}

fn parse_image(literal: &str) -> Result<ImageRef, &'static str> {
    let parts: Vec<&str> = literal.split(',').map(str::trim).collect();
    let size = |part: &str| part.parse::<u32>().map_err(|_| "size is not a number");
    let (source, width, height) = match parts.as_slice() {
        ["", ..] => return Err("missing image path"),
        [source] => (source, None, None),
        [source, size_part] => {
            let value = size(*size_part)?;
            (source, Some(value), Some(value))
        }
        [source, width, height] => (source, Some(size(*width)?), Some(size(*height)?)),
        _ => return Err("expected a path and at most two sizes"),
    };
    Ok(ImageRef {
        source: (*source).to_owned(),
        width,
        height,
    })
}

pub(super) fn latex(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    let (opening, kind, closing) = match p.lookahead() {
        TokenKind::LATEX_OPENING => (
            TokenKind::LATEX_OPENING,
            CstKind::NormalLatex,
            TokenKind::LATEX_CLOSING,
        ),
        TokenKind::LATEX_CENTERED_OPENING => (
            TokenKind::LATEX_CENTERED_OPENING,
            CstKind::CenteredLatex,
            TokenKind::LATEX_CENTERED_CLOSING,
        ),
        _ => return Err(p.no_rule("latex")),
    };
    p.expect(opening)?;
    let body = CstNode::new(CstKind::LatexBody(repeated(p, TokenKind::LATEX_CODE)?));
    p.expect(closing)?;
    let inner = CstNode::with_children(kind, vec![body]);
    Ok(CstNode::with_children(CstKind::Latex, vec![inner]))
}

pub(super) fn bold(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    delimited(p, TokenKind::BOLD_OPENING, TokenKind::BOLD_CLOSING, CstKind::Bold)
}

pub(super) fn underlined(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    delimited(
        p,
        TokenKind::UNDERLINE_OPENING,
        TokenKind::UNDERLINE_CLOSING,
        CstKind::Underlined,
    )
}

pub(super) fn code(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    delimited(p, TokenKind::CODE_OPENING, TokenKind::CODE_CLOSING, CstKind::Code)
}

fn delimited(
    p: &mut Parser<'_>,
    opening: TokenKind,
    closing: TokenKind,
    kind: CstKind,
) -> Result<CstNode, ParseError> {
    p.expect(opening)?;
    let inner = text(p)?;
    p.expect(closing)?;
    Ok(CstNode::with_children(kind, vec![inner]))
}
