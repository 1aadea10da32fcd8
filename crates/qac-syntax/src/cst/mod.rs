//! # Concrete Syntax Tree
//!
//! The parser produces an owned tree of [`CstNode`]s, one node per grammar
//! rule application. Repetition in the grammar (`question*`, `table_row*`)
//! is flattened into siblings, so a chapter node looks like:
//!
//! ```text
//! Chapter
//! ├─Text [Caption words]
//! ├─Question ...        (zero or more)
//! └─Section ...         (zero or more)
//! ```
//!
//! Nodes hold no parent pointers; consumers walk the tree top-down with a
//! [`Visitor`].

mod tree;
mod visit;

pub use visit::{Visitor, walk, walk_children};

/// Table cell alignment, taken from the cell marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// `|`
    #[default]
    Standard,
    /// `|<`
    Left,
    /// `|-`
    Center,
    /// `|>`
    Right,
}

/// Image reference parsed from an `IMG:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub source: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Node kinds, with the payload a few of them carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CstKind {
    /// Document made of free-standing questions
    RootQuestions,
    /// Document made of chapters
    RootChapters,
    Question,
    QuestionText,
    AnswerText,
    Text(Vec<String>),
    Image(ImageRef),
    Latex,
    NormalLatex,
    CenteredLatex,
    LatexBody(Vec<String>),
    UnorderedList,
    UnorderedListItem,
    OrderedList,
    OrderedListItem,
    ListItemText,
    Bold,
    Underlined,
    Code,
    Chapter,
    Section,
    Subsection,
    Table,
    TableRow,
    TableCell(Alignment),
    TableCellText,
}

impl CstKind {
    pub fn name(&self) -> &'static str {
        match self {
            CstKind::RootQuestions => "RootQuestions",
            CstKind::RootChapters => "RootChapters",
            CstKind::Question => "Question",
            CstKind::QuestionText => "QuestionText",
            CstKind::AnswerText => "AnswerText",
            CstKind::Text(_) => "Text",
            CstKind::Image(_) => "Image",
            CstKind::Latex => "Latex",
            CstKind::NormalLatex => "NormalLatex",
            CstKind::CenteredLatex => "CenteredLatex",
            CstKind::LatexBody(_) => "LatexBody",
            CstKind::UnorderedList => "UnorderedList",
            CstKind::UnorderedListItem => "UnorderedListItem",
            CstKind::OrderedList => "OrderedList",
            CstKind::OrderedListItem => "OrderedListItem",
            CstKind::ListItemText => "ListItemText",
            CstKind::Bold => "Bold",
            CstKind::Underlined => "Underlined",
            CstKind::Code => "Code",
            CstKind::Chapter => "Chapter",
            CstKind::Section => "Section",
            CstKind::Subsection => "Subsection",
            CstKind::Table => "Table",
            CstKind::TableRow => "TableRow",
            CstKind::TableCell(_) => "TableCell",
            CstKind::TableCellText => "TableCellText",
        }
    }
}

/// A node of the concrete syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstNode {
    kind: CstKind,
    children: Vec<CstNode>,
}

impl CstNode {
    pub fn new(kind: CstKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: CstKind, children: Vec<CstNode>) -> Self {
        Self { kind, children }
    }

    pub fn push(&mut self, child: CstNode) {
        self.children.push(child);
    }

    pub fn kind(&self) -> &CstKind {
        &self.kind
    }

    pub fn children(&self) -> &[CstNode] {
        &self.children
    }

    /// Words of a `Text` or `LatexBody` node.
    pub fn words(&self) -> &[String] {
        match &self.kind {
            CstKind::Text(words) | CstKind::LatexBody(words) => words.as_slice(),
            _ => &[],
        }
    }

    /// Words joined with single spaces.
    pub fn joined_words(&self) -> String {
        self.words().join(" ")
    }

    /// Dispatch this node to the matching `visit_*` method.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        walk(visitor, self);
    }
}
