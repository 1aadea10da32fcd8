use html_escape::encode_text;

use super::{Generator, GeneratorOptions};
use crate::ast::{Chapter, QuestionContext, Section, Subsection};

const MATHJAX_CDN: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/";
const MATHJAX_SCRIPT: &str = "tex-mml-chtml.js";
const FONT_LINK: &str = "        <link href=\"https://fonts.googleapis.com/css?family=Open+Sans:400,300,600\" rel=\"stylesheet\" type=\"text/css\">\n";

const STYLE: &str = r#"        <style>
            body {
                font-family: 'Open Sans', sans-serif;
                color: black;
                background-color: aliceblue;
                margin: 0;
                padding: 0;
            }
            h1, h2, h3, h4 {
                padding: 10px;
                font-weight: 400;
            }
            h1 > span:first-child, h2 > span:first-child, h3 > span:first-child, h4 > span:first-child {
                color: lightgrey;
                font-weight: 300;
                padding-right: .5em;
            }
            h1, h2, h3 {
                background-image: linear-gradient(to bottom, aliceblue 0%, white 100%);
            }
            h2, h3, h4 {
                border-bottom-left-radius: 1em;
            }
            .qa_question, .qa_section, .qa_subsection {
                margin-left: 50px;
            }
            .qa_question div.qa_answer {
                padding: 10px;
                margin: 50px;
                margin-top: 0;
                background-color: white;
                border-radius: .5em;
                box-shadow: 0 0 1em #EEE;
            }
            .qa_ul {
                text-decoration: underline;
            }
            table {
                border-collapse: collapse;
            }
            table, th, td {
                border: 1px solid black;
            }
            td {
                padding: 1em;
            }
            td.qa_la {
                text-align: left;
            }
            td.qa_ca {
                text-align: center;
            }
            td.qa_ra {
                text-align: right;
            }
        </style>
"#;

/// Standalone HTML page with MathJax for the LaTeX fragments.
#[derive(Debug, Clone, Default)]
pub struct HtmlGenerator {
    options: GeneratorOptions,
}

impl HtmlGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn heading(&self, level: u8, word: &str, index: u32, caption: &str) -> String {
        format!(
            "    <h{level}><span>{word} {index}</span>{}</h{level}>\n",
            encode_text(caption)
        )
    }

    fn mathjax_src(&self) -> String {
        if self.options.offline {
            let path = self.options.mathjax_path.trim_end_matches('/');
            if path.is_empty() {
                MATHJAX_SCRIPT.to_string()
            } else {
                format!("{path}/{MATHJAX_SCRIPT}")
            }
        } else {
            format!("{MATHJAX_CDN}{MATHJAX_SCRIPT}")
        }
    }
}

impl Generator for HtmlGenerator {
    fn name(&self) -> &'static str {
        "html"
    }

    fn description(&self) -> &'static str {
        "Standalone HTML page"
    }

    fn render_text(&self, text: &str) -> String {
        encode_text(text).into_owned()
    }

    fn render_chapter(&self, chapter: &Chapter, questions: &str, sections: &str) -> String {
        if chapter.caption.is_empty() || (questions.is_empty() && sections.is_empty()) {
            return String::new();
        }
        let captions = &self.options.captions;
        format!(
            "<div class=\"qa_chapter\">\n{}\n{questions}\n{sections}</div>\n\n",
            self.heading(1, &captions.chapter, chapter.index, &chapter.caption)
        )
    }

    fn render_section(&self, section: &Section, questions: &str, subsections: &str) -> String {
        if section.caption.is_empty() || (questions.is_empty() && subsections.is_empty()) {
            return String::new();
        }
        let captions = &self.options.captions;
        format!(
            "<div class=\"qa_section\">\n{}\n{questions}\n{subsections}</div>\n",
            self.heading(2, &captions.section, section.index, &section.caption)
        )
    }

    fn render_subsection(&self, subsection: &Subsection, questions: &str) -> String {
        if subsection.caption.is_empty() || questions.is_empty() {
            return String::new();
        }
        let captions = &self.options.captions;
        format!(
            "<div class=\"qa_subsection\">\n{}\n{questions}</div>\n",
            self.heading(3, &captions.subsection, subsection.index, &subsection.caption)
        )
    }

    fn render_question(&self, context: &QuestionContext<'_>) -> String {
        let question = context.question;
        format!(
            "<div class=\"qa_question\">\n    <h4><span>{} {}</span>{}</h4>\n    <div class=\"qa_answer\">\n{}\n    </div>\n</div>\n",
            self.options.captions.question, question.index, question.text, question.answer
        )
    }

    fn render_document(&self, body: &str) -> String {
        let font = if self.options.offline { "" } else { FONT_LINK };
        format!(
            "<!DOCTYPE html>\n\
             <html>\n    \
             <head>\n        \
             <meta charset=\"utf-8\">\n\
             {font}        \
             <title>Q&amp;As</title>\n        \
             <script>\n            \
             window.MathJax = {{ tex: {{ inlineMath: [['\\\\(', '\\\\)']], displayMath: [['\\\\[', '\\\\]']] }} }};\n        \
             </script>\n        \
             <script id=\"MathJax-script\" async src=\"{src}\"></script>\n\
             {STYLE}    \
             </head>\n    \
             <body>\n{body}    </body>\n\
             </html>\n",
            src = self.mathjax_src(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Question;
    use pretty_assertions::assert_eq;

    fn chapter(caption: &str) -> Chapter {
        Chapter {
            index: 2,
            caption: caption.to_string(),
            questions: Vec::new(),
            sections: Vec::new(),
        }
    }

    #[test]
    fn text_is_escaped() {
        let generator = HtmlGenerator::default();
        assert_eq!(generator.render_text("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn question_block() {
        let generator = HtmlGenerator::default();
        let question = Question {
            index: 3,
            text: "Why?".into(),
            answer: "Because.".into(),
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
        assert_eq!(
            generator.render_question(&context),
            "<div class=\"qa_question\">\n    <h4><span>Question 3</span>Why?</h4>\n    <div class=\"qa_answer\">\nBecause.\n    </div>\n</div>\n"
        );
    }

    #[test]
    fn chapter_heading_uses_caption_word_and_index() {
        let generator = HtmlGenerator::default();
        let html = generator.render_chapter(&chapter("Basics"), "Q", "");
        assert_eq!(
            html,
            "<div class=\"qa_chapter\">\n    <h1><span>Chapter 2</span>Basics</h1>\n\nQ\n</div>\n\n"
        );
    }

    #[test]
    fn empty_chapters_are_omitted() {
        let generator = HtmlGenerator::default();
        assert_eq!(generator.render_chapter(&chapter("Basics"), "", ""), "");
        assert_eq!(generator.render_chapter(&chapter(""), "Q", ""), "");
    }

    #[test]
    fn custom_caption_words() {
        let mut options = GeneratorOptions::default();
        options.captions.chapter = "Kapitel".into();
        let generator = HtmlGenerator::new(options);
        let html = generator.render_chapter(&chapter("Grundlagen"), "Q", "");
        assert!(html.contains("<span>Kapitel 2</span>Grundlagen"));
    }

    #[test]
    fn document_loads_mathjax_from_cdn() {
        let page = HtmlGenerator::default().render_document("BODY\n");
        assert!(page.starts_with("<!DOCTYPE html>\n<html>\n"));
        assert!(page.contains(
            "src=\"https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js\""
        ));
        assert!(page.contains("fonts.googleapis.com"));
        assert!(page.contains("<body>\nBODY\n    </body>"));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn offline_document_uses_local_mathjax() {
        let options = GeneratorOptions {
            offline: true,
            mathjax_path: "/opt/mathjax/".into(),
            ..GeneratorOptions::default()
        };
        let page = HtmlGenerator::new(options).render_document("");
        assert!(page.contains("src=\"/opt/mathjax/tex-mml-chtml.js\""));
        assert!(!page.contains("fonts.googleapis.com"));
    }
}
