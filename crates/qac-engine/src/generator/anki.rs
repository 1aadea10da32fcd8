use std::sync::OnceLock;

use regex::Regex;

use super::{Generator, GeneratorOptions, HtmlGenerator, markup};
use crate::ast::{Chapter, QuestionContext, Section, Subsection};

const CELL_STYLE: &str = "border: 1px solid black; padding: 1em";

/// Tab-separated Anki import file: one `question<TAB>answer<TAB>tags` line
/// per question.
///
/// Fragments are HTML, which Anki renders in card fields, but styling is
/// inline because imported cards carry no stylesheet.
#[derive(Debug, Clone, Default)]
pub struct AnkiGenerator {
    html: HtmlGenerator,
}

impl AnkiGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            html: HtmlGenerator::new(options),
        }
    }

    fn tags(&self, context: &QuestionContext<'_>) -> String {
        let captions = &self.html.options().captions;
        let mut tags = Vec::new();
        if let Some(chapter) = context.chapter {
            tags.push(format!("{} {}", captions.chapter, chapter.index));
            tags.push(chapter.caption.clone());
            if let Some(section) = context.section {
                tags.push(format!("{} {}", captions.section, section.index));
                tags.push(section.caption.clone());
                if let Some(subsection) = context.subsection {
                    tags.push(format!("{} {}", captions.subsection, subsection.index));
                    tags.push(subsection.caption.clone());
                }
            }
        }
        tags.iter()
            .map(|tag| normalize_tag(tag))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn normalize_tag(tag: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s").expect("Invalid whitespace regex"));
    whitespace.replace_all(tag.trim(), "_").into_owned()
}

fn aligned_cell(body: &str, align: &str) -> String {
    markup::wrap_style("td", &format!("{CELL_STYLE}; text-align: {align}"), body)
}

impl Generator for AnkiGenerator {
    fn name(&self) -> &'static str {
        "anki"
    }

    fn description(&self) -> &'static str {
        "Anki import file (tab separated)"
    }

    fn render_text(&self, text: &str) -> String {
        self.html.render_text(text).replace('\t', " ")
    }

    /// Anki keeps media in a flat folder, so only the file name survives.
    fn render_image(&self, source: &str, width: Option<u32>, height: Option<u32>) -> String {
        let file_name = source.rsplit('/').next().unwrap_or(source);
        self.html.render_image(file_name, width, height)
    }

    fn render_normal_latex(&self, body: &str) -> String {
        format!("[$]{body}[/$]")
    }

    fn render_centered_latex(&self, body: &str) -> String {
        format!("[$$]{body}[/$$]")
    }

    fn render_underlined(&self, text: &str) -> String {
        markup::wrap_style("span", "text-decoration: underline", text)
    }

    fn render_table(&self, rows: &str) -> String {
        markup::wrap_style(
            "table",
            "border: 1px solid black; border-collapse: collapse",
            rows,
        )
    }

    fn render_table_cell(&self, body: &str) -> String {
        markup::wrap_style("td", CELL_STYLE, body)
    }

    fn render_table_cell_left(&self, body: &str) -> String {
        aligned_cell(body, "left")
    }

    fn render_table_cell_center(&self, body: &str) -> String {
        aligned_cell(body, "center")
    }

    fn render_table_cell_right(&self, body: &str) -> String {
        aligned_cell(body, "right")
    }

    fn render_chapter(&self, _chapter: &Chapter, questions: &str, sections: &str) -> String {
        format!("{questions}{sections}")
    }

    fn render_section(&self, _section: &Section, questions: &str, subsections: &str) -> String {
        format!("{questions}{subsections}")
    }

    fn render_subsection(&self, _subsection: &Subsection, questions: &str) -> String {
        questions.to_owned()
    }

    fn render_question(&self, context: &QuestionContext<'_>) -> String {
        let question = context.question;
        format!(
            "{}\t{}\t{}\n",
            question.text,
            question.answer,
            self.tags(context)
        )
    }

    fn render_document(&self, body: &str) -> String {
        body.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Question;
    use qac_syntax::Alignment;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("img/cats/tabby.png", "<img src=\"tabby.png\">")]
    #[case("tabby.png", "<img src=\"tabby.png\">")]
    fn image_source_is_stripped_to_file_name(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(
            AnkiGenerator::default().render_image(source, None, None),
            expected
        );
    }

    #[test]
    fn latex_uses_anki_markers() {
        let generator = AnkiGenerator::default();
        assert_eq!(generator.render_normal_latex("x"), "[$]x[/$]");
        assert_eq!(generator.render_centered_latex("x"), "[$$]x[/$$]");
    }

    #[test]
    fn text_never_contains_tabs() {
        let generator = AnkiGenerator::default();
        assert_eq!(generator.render_text("a\tb <c>"), "a b &lt;c&gt;");
    }

    #[test]
    fn cells_carry_inline_alignment() {
        let generator = AnkiGenerator::default();
        assert_eq!(
            generator.render_aligned_cell("x", Alignment::Center),
            "<td style=\"border: 1px solid black; padding: 1em; text-align: center\">x</td>"
        );
        assert_eq!(
            generator.render_aligned_cell("x", Alignment::Standard),
            "<td style=\"border: 1px solid black; padding: 1em\">x</td>"
        );
    }

    #[test]
    fn question_line_with_nested_tags() {
        let chapter = Chapter {
            index: 1,
            caption: " Linear  Algebra ".into(),
            questions: Vec::new(),
            sections: Vec::new(),
        };
        let section = Section {
            index: 2,
            caption: "Eigen values".into(),
            questions: Vec::new(),
            subsections: Vec::new(),
        };
        let question = Question {
            index: 9,
            text: "Q".into(),
            answer: "A".into(),
            chapter: None,
            section: None,
            subsection: None,
        };
        let context = QuestionContext {
            question: &question,
            chapter: Some(&chapter),
            section: Some(&section),
            subsection: None,
        };

        assert_eq!(
            AnkiGenerator::default().render_question(&context),
            "Q\tA\tChapter_1 Linear__Algebra Section_2 Eigen_values\n"
        );
    }

    #[test]
    fn free_question_has_empty_tags() {
        let question = Question {
            index: 1,
            text: "Q".into(),
            answer: "A".into(),
            chapter: None,
            section: None,
            subsection: None,
        };
        let context = QuestionContext {
            question: &question,
            chapter: None,
            section: None,
            subsection: None,
        };
        assert_eq!(AnkiGenerator::default().render_question(&context), "Q\tA\t\n");
    }

    #[test]
    fn structure_only_concatenates() {
        let generator = AnkiGenerator::default();
        let subsection = Subsection {
            index: 1,
            caption: "ignored".into(),
            questions: Vec::new(),
        };
        assert_eq!(generator.render_subsection(&subsection, "q1\n"), "q1\n");
        assert_eq!(generator.render_document("body"), "body");
    }
}
