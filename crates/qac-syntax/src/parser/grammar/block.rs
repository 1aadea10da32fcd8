//! # Block-Level Grammar
//!
//! ```text
//! unordered_list  := (UNORDERED_LIST_ITEM list_item_text)+
//! ordered_list    := (ORDERED_LIST_ITEM list_item_text)+
//! table           := TABLE_DIVIDER table_row+
//! table_row       := table_cell+ TABLE_DIVIDER
//! table_cell      := CELL_MARKER table_cell_text?
//! ```
//!
//! A table is a divider line followed by rows, each row closed by its own
//! divider:
//!
//! ```text
//! ---
//! |< name |> count
//! ---
//! | apples | 3
//! ---
//! ```
//!
//! The grammar admits lists inside table cells and tables inside list items,
//! but a list item cannot hold another list.

use super::{Context, content};
use crate::cst::{Alignment, CstKind, CstNode};
use crate::error::ParseError;
use crate::parser::Parser;
use crate::token::TokenKind;

pub(super) fn unordered_list(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    list(
        p,
        TokenKind::UNORDERED_LIST_ITEM,
        CstKind::UnorderedList,
        CstKind::UnorderedListItem,
        "unordered_list",
    )
}

pub(super) fn ordered_list(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    list(
        p,
        TokenKind::ORDERED_LIST_ITEM,
        CstKind::OrderedList,
        CstKind::OrderedListItem,
        "ordered_list",
    )
}

fn list(
    p: &mut Parser<'_>,
    marker: TokenKind,
    kind: CstKind,
    item_kind: CstKind,
    rule: &'static str,
) -> Result<CstNode, ParseError> {
    if !p.at(marker) {
        return Err(p.no_rule(rule));
    }
    let mut node = CstNode::new(kind);
    while p.at(marker) {
        p.expect(marker)?;
        let text = content(p, Context::ListItem)?;
        node.push(CstNode::with_children(item_kind.clone(), vec![text]));
    }
    Ok(node)
}

pub(super) fn table(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    p.expect(TokenKind::TABLE_DIVIDER)?;
    let mut node = CstNode::with_children(CstKind::Table, vec![table_row(p)?]);
    while p.lookahead().is_table_cell() {
        node.push(table_row(p)?);
    }
    Ok(node)
}

fn table_row(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    if !p.lookahead().is_table_cell() {
        return Err(p.no_rule("table_row"));
    }
    let mut row = CstNode::new(CstKind::TableRow);
    while p.lookahead().is_table_cell() {
        row.push(table_cell(p)?);
    }
    p.expect(TokenKind::TABLE_DIVIDER)?;
    Ok(row)
}

fn table_cell(p: &mut Parser<'_>) -> Result<CstNode, ParseError> {
    let alignment = match p.lookahead() {
        TokenKind::TABLE_CELL => Alignment::Standard,
        TokenKind::TABLE_CELL_LEFT => Alignment::Left,
        TokenKind::TABLE_CELL_CENTER => Alignment::Center,
        TokenKind::TABLE_CELL_RIGHT => Alignment::Right,
        _ => return Err(p.no_rule("table_cell")),
    };
    p.bump();
    let mut cell = CstNode::new(CstKind::TableCell(alignment));
    let text = content(p, Context::TableCell)?;
    if !text.children().is_empty() {
        cell.push(text);
    }
    Ok(cell)
}
