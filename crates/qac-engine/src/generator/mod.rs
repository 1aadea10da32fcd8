//! # Generators
//!
//! A [`Generator`] turns lowered fragments into output text. Lowering calls
//! one `render_*` method per construct, innermost first, and feeds the
//! returned strings into the enclosing construct's call:
//!
//! ```text
//! render_text("x")            → "x"
//! render_bold("x")            → "<strong>x</strong>"
//! render_question(context)    → "<div class=\"qa_question\">..."
//! render_document(body)       → "<!DOCTYPE html>..."
//! ```
//!
//! Inline and block fragments have HTML defaults built from [`markup`];
//! back ends override what they render differently. The structural methods
//! (chapters down to the document wrapper) have no default.
//!
//! Two back ends ship: [`HtmlGenerator`] and [`AnkiGenerator`], both
//! reachable by name through the [`GeneratorRegistry`].

mod anki;
mod html;
pub mod markup;
mod registry;

pub use anki::AnkiGenerator;
pub use html::HtmlGenerator;
pub use registry::GeneratorRegistry;

use qac_syntax::Alignment;

use crate::ast::{Chapter, QuestionContext, Section, Subsection};

/// Words used in headings and tags, e.g. "Chapter" in "Chapter 2".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captions {
    pub chapter: String,
    pub section: String,
    pub subsection: String,
    pub question: String,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            chapter: "Chapter".to_string(),
            section: "Section".to_string(),
            subsection: "Subsection".to_string(),
            question: "Question".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub captions: Captions,
    /// Load MathJax from `mathjax_path` instead of the CDN
    pub offline: bool,
    pub mathjax_path: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            captions: Captions::default(),
            offline: false,
            mathjax_path: "MathJax/".to_string(),
        }
    }
}

/// Output back end.
pub trait Generator {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// Plain words, already joined with spaces.
    fn render_text(&self, text: &str) -> String {
        text.to_owned()
    }

    fn render_image(&self, source: &str, width: Option<u32>, height: Option<u32>) -> String {
        markup::image(source, width, height)
    }

    fn render_normal_latex(&self, body: &str) -> String {
        format!("\\({body}\\)")
    }

    fn render_centered_latex(&self, body: &str) -> String {
        format!("\\[{body}\\]")
    }

    fn render_bold(&self, text: &str) -> String {
        markup::wrap("strong", text)
    }

    fn render_underlined(&self, text: &str) -> String {
        markup::wrap_class("span", "qa_ul", text)
    }

    fn render_code(&self, text: &str) -> String {
        markup::wrap("code", text)
    }

    fn render_unordered_list(&self, items: &str) -> String {
        markup::wrap("ul", items)
    }

    fn render_unordered_list_item(&self, text: &str) -> String {
        markup::wrap("li", text)
    }

    fn render_ordered_list(&self, items: &str) -> String {
        markup::wrap("ol", items)
    }

    fn render_ordered_list_item(&self, text: &str) -> String {
        self.render_unordered_list_item(text)
    }

    fn render_table(&self, rows: &str) -> String {
        markup::wrap("table", rows)
    }

    fn render_table_row(&self, cells: &str) -> String {
        markup::wrap("tr", cells)
    }

    fn render_table_cell(&self, body: &str) -> String {
        markup::wrap("td", body)
    }

    fn render_table_cell_left(&self, body: &str) -> String {
        markup::wrap_class("td", "qa_la", body)
    }

    fn render_table_cell_center(&self, body: &str) -> String {
        markup::wrap_class("td", "qa_ca", body)
    }

    fn render_table_cell_right(&self, body: &str) -> String {
        markup::wrap_class("td", "qa_ra", body)
    }

    /// Route a cell to the callback for its alignment.
    fn render_aligned_cell(&self, body: &str, alignment: Alignment) -> String {
        match alignment {
            Alignment::Standard => self.render_table_cell(body),
            Alignment::Left => self.render_table_cell_left(body),
            Alignment::Center => self.render_table_cell_center(body),
            Alignment::Right => self.render_table_cell_right(body),
        }
    }

    fn render_chapter(&self, chapter: &Chapter, questions: &str, sections: &str) -> String;

    fn render_section(&self, section: &Section, questions: &str, subsections: &str) -> String;

    fn render_subsection(&self, subsection: &Subsection, questions: &str) -> String;

    /// `context.question` carries the rendered question and answer text.
    fn render_question(&self, context: &QuestionContext<'_>) -> String;

    fn render_document(&self, body: &str) -> String;
}
