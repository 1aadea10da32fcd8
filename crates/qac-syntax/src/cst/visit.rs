use super::{CstKind, CstNode};

/// Double-dispatch over [`CstNode`] kinds.
///
/// Every method defaults to visiting the node's children, so an implementor
/// only overrides the kinds it cares about.
pub trait Visitor {
    fn visit_root_questions(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_root_chapters(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_question(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_question_text(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_answer_text(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_text(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_image(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_latex(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_normal_latex(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_centered_latex(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_latex_body(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_unordered_list(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_unordered_list_item(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_ordered_list(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_ordered_list_item(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_list_item_text(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_bold(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_underlined(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_code(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_chapter(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_section(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_subsection(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_table(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_table_row(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_table_cell(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
    fn visit_table_cell_text(&mut self, node: &CstNode) {
        walk_children(self, node);
    }
}

/// Call the `visit_*` method matching `node`'s kind.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &CstNode) {
    match node.kind() {
        CstKind::RootQuestions => visitor.visit_root_questions(node),
        CstKind::RootChapters => visitor.visit_root_chapters(node),
        CstKind::Question => visitor.visit_question(node),
        CstKind::QuestionText => visitor.visit_question_text(node),
        CstKind::AnswerText => visitor.visit_answer_text(node),
        CstKind::Text(_) => visitor.visit_text(node),
        CstKind::Image(_) => visitor.visit_image(node),
        CstKind::Latex => visitor.visit_latex(node),
        CstKind::NormalLatex => visitor.visit_normal_latex(node),
        CstKind::CenteredLatex => visitor.visit_centered_latex(node),
        CstKind::LatexBody(_) => visitor.visit_latex_body(node),
        CstKind::UnorderedList => visitor.visit_unordered_list(node),
        CstKind::UnorderedListItem => visitor.visit_unordered_list_item(node),
        CstKind::OrderedList => visitor.visit_ordered_list(node),
        CstKind::OrderedListItem => visitor.visit_ordered_list_item(node),
        CstKind::ListItemText => visitor.visit_list_item_text(node),
        CstKind::Bold => visitor.visit_bold(node),
        CstKind::Underlined => visitor.visit_underlined(node),
        CstKind::Code => visitor.visit_code(node),
        CstKind::Chapter => visitor.visit_chapter(node),
        CstKind::Section => visitor.visit_section(node),
        CstKind::Subsection => visitor.visit_subsection(node),
        CstKind::Table => visitor.visit_table(node),
        CstKind::TableRow => visitor.visit_table_row(node),
        CstKind::TableCell(_) => visitor.visit_table_cell(node),
        CstKind::TableCellText => visitor.visit_table_cell_text(node),
    }
}

pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, node: &CstNode) {
    for child in node.children() {
        walk(visitor, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct WordCounter {
        words: usize,
        bold: usize,
    }

    impl Visitor for WordCounter {
        fn visit_text(&mut self, node: &CstNode) {
            self.words += node.words().len();
        }

        fn visit_bold(&mut self, node: &CstNode) {
            self.bold += 1;
            walk_children(self, node);
        }
    }

    #[test]
    fn defaults_reach_nested_nodes() {
        let tree = CstNode::with_children(
            CstKind::QuestionText,
            vec![
                CstNode::new(CstKind::Text(vec!["one".into()])),
                CstNode::with_children(
                    CstKind::Bold,
                    vec![CstNode::new(CstKind::Text(vec![
                        "two".into(),
                        "three".into(),
                    ]))],
                ),
            ],
        );

        let mut counter = WordCounter::default();
        tree.accept(&mut counter);

        assert_eq!(counter.words, 3);
        assert_eq!(counter.bold, 1);
    }
}
