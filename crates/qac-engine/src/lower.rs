//! # Lowering
//!
//! Walks the CST once, building the [`Ast`] and rendering every node with a
//! [`Generator`] on the way back up.
//!
//! Rendering uses a stack of output buffers: a node that needs its children's
//! output as a single string pushes a fresh buffer, visits the children
//! (which append to the top buffer) and pops the result. Inline fragments in
//! one buffer are separated by a single space, except before punctuation so
//! that `*bold*.` renders as `<strong>bold</strong>.`.
//!
//! ```
//! use qac_engine::generator::HtmlGenerator;
//! use qac_engine::lower::lower;
//! use qac_syntax::{lex, parse};
//!
//! let tree = parse(&lex("Q: Is it *bold*?\nA: Yes").unwrap()).unwrap();
//! let lowered = lower(&tree, &HtmlGenerator::default());
//!
//! let question = lowered.ast.questions().next().unwrap();
//! assert_eq!(question.text, "Is it <strong>bold</strong>?");
//! ```

use log::trace;
use qac_syntax::lexer::TRAILING_PUNCTUATION;
use qac_syntax::{CstKind, CstNode, Visitor};

use crate::ast::{Ast, ChapterId, Question, SectionId, SubsectionId};
use crate::generator::Generator;

/// Result of lowering: the AST and the rendered document.
#[derive(Debug, Clone)]
pub struct Lowered {
    pub ast: Ast,
    pub output: String,
}

pub fn lower(root: &CstNode, generator: &dyn Generator) -> Lowered {
    let mut lowering = Lowering::new(generator);
    root.accept(&mut lowering);
    Lowered {
        ast: lowering.ast,
        output: lowering.output,
    }
}

struct Lowering<'g> {
    generator: &'g dyn Generator,
    ast: Ast,
    buffers: Vec<String>,
    output: String,
    chapter: Option<ChapterId>,
    section: Option<SectionId>,
    subsection: Option<SubsectionId>,
    chapters: u32,
    sections: u32,
    subsections: u32,
    questions: u32,
}

impl<'g> Lowering<'g> {
    fn new(generator: &'g dyn Generator) -> Self {
        Self {
            generator,
            ast: Ast::new(),
            buffers: Vec::new(),
            output: String::new(),
            chapter: None,
            section: None,
            subsection: None,
            chapters: 0,
            sections: 0,
            subsections: 0,
            questions: 0,
        }
    }

    /// Append a block fragment verbatim.
    fn write(&mut self, fragment: &str) {
        if let Some(buffer) = self.buffers.last_mut() {
            buffer.push_str(fragment);
        }
    }

    /// Append an inline fragment, space separated from what came before.
    fn write_inline(&mut self, fragment: &str) {
        if let Some(buffer) = self.buffers.last_mut() {
            let needs_space = !buffer.is_empty()
                && !buffer.ends_with(char::is_whitespace)
                && !fragment.starts_with(TRAILING_PUNCTUATION);
            if needs_space {
                buffer.push(' ');
            }
            buffer.push_str(fragment);
        }
    }

    /// Render the children of `node` accepted by `filter` into a new buffer.
    fn render_children(&mut self, node: &CstNode, filter: fn(&CstKind) -> bool) -> String {
        self.buffers.push(String::new());
        for child in node.children().iter().filter(|c| filter(c.kind())) {
            child.accept(self);
        }
        self.buffers.pop().unwrap_or_default()
    }

    fn render_all(&mut self, node: &CstNode) -> String {
        self.render_children(node, |_| true)
    }

    fn render_document(&mut self, node: &CstNode) {
        let body = self.render_all(node);
        self.output = self.generator.render_document(&body);
    }
}

/// Caption of a chapter, section or subsection: its leading text node.
fn caption(node: &CstNode) -> String {
    node.children()
        .first()
        .map(CstNode::joined_words)
        .unwrap_or_default()
}

fn is_question(kind: &CstKind) -> bool {
    matches!(kind, CstKind::Question)
}

impl Visitor for Lowering<'_> {
    fn visit_root_questions(&mut self, node: &CstNode) {
        self.render_document(node);
    }

    fn visit_root_chapters(&mut self, node: &CstNode) {
        self.ast.use_chapters();
        self.render_document(node);
    }

    fn visit_chapter(&mut self, node: &CstNode) {
        self.chapters += 1;
        self.sections = 0;
        let id = self.ast.add_chapter(self.chapters, caption(node));
        trace!("chapter {} '{}'", self.chapters, self.ast.chapter(id).caption);
        self.chapter = Some(id);
        self.section = None;
        self.subsection = None;

        let questions = self.render_children(node, is_question);
        let sections = self.render_children(node, |k| matches!(k, CstKind::Section));
        let rendered = self
            .generator
            .render_chapter(self.ast.chapter(id), &questions, &sections);
        self.write(&rendered);
        self.chapter = None;
    }

    fn visit_section(&mut self, node: &CstNode) {
        self.sections += 1;
        self.subsections = 0;
        let id = self.ast.add_section(self.chapter, self.sections, caption(node));
        self.section = Some(id);
        self.subsection = None;

        let questions = self.render_children(node, is_question);
        let subsections = self.render_children(node, |k| matches!(k, CstKind::Subsection));
        let rendered = self
            .generator
            .render_section(self.ast.section(id), &questions, &subsections);
        self.write(&rendered);
        self.section = None;
    }

    fn visit_subsection(&mut self, node: &CstNode) {
        self.subsections += 1;
        let id = self
            .ast
            .add_subsection(self.section, self.subsections, caption(node));
        self.subsection = Some(id);

        let questions = self.render_children(node, is_question);
        let rendered = self
            .generator
            .render_subsection(self.ast.subsection(id), &questions);
        self.write(&rendered);
        self.subsection = None;
    }

    fn visit_question(&mut self, node: &CstNode) {
        self.questions += 1;
        let index = self.questions;
        let text = self.render_children(node, |k| matches!(k, CstKind::QuestionText));
        let answer = self.render_children(node, |k| matches!(k, CstKind::AnswerText));
        trace!("question {index}");

        let id = self.ast.add_question(Question {
            index,
            text,
            answer,
            chapter: self.chapter,
            section: self.section,
            subsection: self.subsection,
        });
        let rendered = self.generator.render_question(&self.ast.context(id));
        self.write(&rendered);
    }

    fn visit_text(&mut self, node: &CstNode) {
        let rendered = self.generator.render_text(&node.joined_words());
        self.write_inline(&rendered);
    }

    fn visit_latex_body(&mut self, node: &CstNode) {
        let rendered = self.generator.render_text(&node.joined_words());
        self.write_inline(&rendered);
    }

    fn visit_image(&mut self, node: &CstNode) {
        if let CstKind::Image(image) = node.kind() {
            let rendered = self
                .generator
                .render_image(&image.source, image.width, image.height);
            self.write_inline(&rendered);
        }
    }

    fn visit_normal_latex(&mut self, node: &CstNode) {
        let body = self.render_all(node);
        let rendered = self.generator.render_normal_latex(&body);
        self.write_inline(&rendered);
    }

    fn visit_centered_latex(&mut self, node: &CstNode) {
        let body = self.render_all(node);
        let rendered = self.generator.render_centered_latex(&body);
        self.write_inline(&rendered);
    }

    fn visit_bold(&mut self, node: &CstNode) {
        let text = self.render_all(node);
        let rendered = self.generator.render_bold(&text);
        self.write_inline(&rendered);
    }

    fn visit_underlined(&mut self, node: &CstNode) {
        let text = self.render_all(node);
        let rendered = self.generator.render_underlined(&text);
        self.write_inline(&rendered);
    }

    fn visit_code(&mut self, node: &CstNode) {
        let text = self.render_all(node);
        let rendered = self.generator.render_code(&text);
        self.write_inline(&rendered);
    }

    fn visit_unordered_list(&mut self, node: &CstNode) {
        let items = self.render_all(node);
        let rendered = self.generator.render_unordered_list(&items);
        self.write_inline(&rendered);
    }

    fn visit_unordered_list_item(&mut self, node: &CstNode) {
        let text = self.render_all(node);
        let rendered = self.generator.render_unordered_list_item(&text);
        self.write(&rendered);
    }

    fn visit_ordered_list(&mut self, node: &CstNode) {
        let items = self.render_all(node);
        let rendered = self.generator.render_ordered_list(&items);
        self.write_inline(&rendered);
    }

    fn visit_ordered_list_item(&mut self, node: &CstNode) {
        let text = self.render_all(node);
        let rendered = self.generator.render_ordered_list_item(&text);
        self.write(&rendered);
    }

    fn visit_table(&mut self, node: &CstNode) {
        let rows = self.render_all(node);
        let rendered = self.generator.render_table(&rows);
        self.write_inline(&rendered);
    }

    fn visit_table_row(&mut self, node: &CstNode) {
        let cells = self.render_all(node);
        let rendered = self.generator.render_table_row(&cells);
        self.write(&rendered);
    }

    fn visit_table_cell(&mut self, node: &CstNode) {
        if let CstKind::TableCell(alignment) = node.kind() {
            let body = self.render_all(node);
            let rendered = self.generator.render_aligned_cell(&body, *alignment);
            self.write(&rendered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Root;
    use crate::generator::{AnkiGenerator, HtmlGenerator};
    use pretty_assertions::assert_eq;
    use qac_syntax::{lex, parse};

    fn lower_html(input: &str) -> Lowered {
        let tree = parse(&lex(input).unwrap()).unwrap();
        lower(&tree, &HtmlGenerator::default())
    }

    fn answer(input: &str) -> String {
        let lowered = lower_html(&format!("Q: q\nA: {input}"));
        lowered.ast.question(lowered.ast.reachable_questions()[0]).answer.clone()
    }

    #[test]
    fn inline_fragments_are_space_separated() {
        assert_eq!(
            answer("plain *bold* and `code`"),
            "plain <strong>bold</strong> and <code>code</code>"
        );
    }

    #[test]
    fn punctuation_sticks_to_previous_fragment() {
        assert_eq!(
            answer("It is _this_, really."),
            "It is <span class=\"qa_ul\">this</span>, really."
        );
    }

    #[test]
    fn latex_keeps_delimiters_in_html() {
        assert_eq!(answer("\\(a < b\\)"), "\\(a &lt; b\\)");
        assert_eq!(answer("\\[x\\]"), "\\[x\\]");
    }

    #[test]
    fn lists_and_tables_render_as_blocks() {
        assert_eq!(
            answer("\n- one\n- two"),
            "<ul><li>one</li><li>two</li></ul>"
        );
        assert_eq!(
            answer("\n---\n|< a |> b\n---"),
            "<table><tr><td class=\"qa_la\">a</td><td class=\"qa_ra\">b</td></tr></table>"
        );
    }

    #[test]
    fn empty_cell_renders_empty() {
        assert_eq!(
            answer("\n---\n| x |\n---"),
            "<table><tr><td>x</td><td></td></tr></table>"
        );
    }

    #[test]
    fn ordered_lists_use_ol() {
        assert_eq!(answer("\n1. a\n2. b"), "<ol><li>a</li><li>b</li></ol>");
    }

    #[test]
    fn numbering_restarts_per_container() {
        let input = "\
CHA: One
SEC: A
Q: a1
A: x
SEC: B
Q: b1
A: x
CHA: Two
SEC: C
SUB: C1
Q: c1
A: x
SUB: C2
Q: c2
A: x";
        let lowered = lower_html(input);
        let ast = &lowered.ast;

        let chapters: Vec<u32> = ast.chapters().map(|c| c.index).collect();
        assert_eq!(chapters, vec![1, 2]);

        let sections: Vec<(String, u32)> = ast
            .questions()
            .filter_map(|q| q.section.map(|s| ast.section(s)))
            .map(|s| (s.caption.clone(), s.index))
            .collect();
        assert_eq!(
            sections,
            vec![
                ("A".to_string(), 1),
                ("B".to_string(), 2),
                ("C".to_string(), 1),
                ("C".to_string(), 1),
            ]
        );

        let subsections: Vec<u32> = ast
            .questions()
            .filter_map(|q| q.subsection.map(|s| ast.subsection(s).index))
            .collect();
        assert_eq!(subsections, vec![1, 2]);

        let questions: Vec<u32> = ast.questions().map(|q| q.index).collect();
        assert_eq!(questions, vec![1, 2, 3, 4]);
    }

    #[derive(Default)]
    struct QuestionCounter {
        questions: usize,
    }

    impl Visitor for QuestionCounter {
        fn visit_question(&mut self, node: &CstNode) {
            self.questions += 1;
            qac_syntax::cst::walk_children(self, node);
        }
    }

    #[test]
    fn sections_are_numbered_within_each_chapter() {
        let input = "\
CHA: One
SEC: A
Q: a
A: x
SEC: B
Q: b
A: x
CHA: Two
SEC: C
Q: c
A: x
SEC: D
Q: d
A: x";
        let tree = parse(&lex(input).unwrap()).unwrap();
        let lowered = lower(&tree, &HtmlGenerator::default());
        let ast = &lowered.ast;

        let sections: Vec<(u32, u32)> = ast
            .questions()
            .map(|q| {
                let chapter = q.chapter.map(|c| ast.chapter(c).index).unwrap_or(0);
                let section = q.section.map(|s| ast.section(s).index).unwrap_or(0);
                (chapter, section)
            })
            .collect();
        assert_eq!(sections, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);

        let mut counter = QuestionCounter::default();
        tree.accept(&mut counter);
        let reachable = ast.reachable_questions();
        assert_eq!(counter.questions, 4);
        assert_eq!(reachable.len(), counter.questions);
        let last = reachable.last().map(|&id| ast.question(id).index);
        assert_eq!(last, Some(4));
    }

    #[test]
    fn every_question_is_reachable_from_the_root() {
        let lowered = lower_html("CHA: One\nQ: a\nA: b\nSEC: S\nQ: c\nA: d\nSUB: T\nQ: e\nA: f");
        let ast = &lowered.ast;
        assert!(matches!(ast.root(), Root::Chapters(ids) if ids.len() == 1));
        assert_eq!(ast.reachable_questions().len(), ast.question_count());
        assert_eq!(ast.question_count(), 3);
    }

    #[test]
    fn question_back_references() {
        let lowered = lower_html("CHA: One\nSEC: S\nSUB: T\nQ: a\nA: b");
        let ast = &lowered.ast;
        let id = ast.reachable_questions()[0];
        let context = ast.context(id);
        assert_eq!(context.chapter.map(|c| c.caption.as_str()), Some("One"));
        assert_eq!(context.section.map(|s| s.caption.as_str()), Some("S"));
        assert_eq!(context.subsection.map(|s| s.caption.as_str()), Some("T"));
    }

    #[test]
    fn anki_output_is_one_line_per_question() {
        let input = "CHA: Set Theory\nQ: What is \\(\\emptyset\\)?\nA: The empty set";
        let tree = parse(&lex(input).unwrap()).unwrap();
        let lowered = lower(&tree, &AnkiGenerator::default());
        assert_eq!(
            lowered.output,
            "What is [$]\\emptyset[/$]?\tThe empty set\tChapter_1 Set_Theory\n"
        );
    }

    #[test]
    fn html_skips_empty_chapter() {
        let lowered = lower_html("CHA: Empty\nCHA: Full\nQ: a\nA: b");
        assert!(!lowered.output.contains("Empty"));
        assert!(lowered.output.contains("<span>Chapter 2</span>Full"));
    }
}
