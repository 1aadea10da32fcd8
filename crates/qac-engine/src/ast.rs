//! # Abstract syntax tree
//!
//! The lowered document: numbered chapters, sections, subsections and
//! questions with their rendered text. Containers own their children through
//! typed ids into the [`Ast`] arena, and every question records the
//! containers enclosing it, so both directions are navigable without
//! reference cycles:
//!
//! ```text
//! Ast ─┬─ chapters[ChapterId]       ─ sections: Vec<SectionId>
//!      ├─ sections[SectionId]       ─ subsections: Vec<SubsectionId>
//!      ├─ subsections[SubsectionId] ─ questions: Vec<QuestionId>
//!      └─ questions[QuestionId]     ─ chapter/section/subsection: Option<Id>
//! ```
//!
//! Numbering is 1-based: chapters count through the document, sections
//! restart in every chapter, subsections in every section, and questions
//! count through the whole document.

macro_rules! arena_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_id!(ChapterId);
arena_id!(SectionId);
arena_id!(SubsectionId);
arena_id!(QuestionId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub index: u32,
    pub caption: String,
    pub questions: Vec<QuestionId>,
    pub sections: Vec<SectionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub index: u32,
    pub caption: String,
    pub questions: Vec<QuestionId>,
    pub subsections: Vec<SubsectionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    pub index: u32,
    pub caption: String,
    pub questions: Vec<QuestionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub index: u32,
    /// Rendered question fragment
    pub text: String,
    /// Rendered answer fragment
    pub answer: String,
    pub chapter: Option<ChapterId>,
    pub section: Option<SectionId>,
    pub subsection: Option<SubsectionId>,
}

/// Top level of a document: either free-standing questions or chapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Root {
    Questions(Vec<QuestionId>),
    Chapters(Vec<ChapterId>),
}

impl Default for Root {
    fn default() -> Self {
        Root::Questions(Vec::new())
    }
}

/// A question together with the containers enclosing it.
#[derive(Debug, Clone, Copy)]
pub struct QuestionContext<'a> {
    pub question: &'a Question,
    pub chapter: Option<&'a Chapter>,
    pub section: Option<&'a Section>,
    pub subsection: Option<&'a Subsection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ast {
    root: Root,
    chapters: Vec<Chapter>,
    sections: Vec<Section>,
    subsections: Vec<Subsection>,
    questions: Vec<Question>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn chapter(&self, id: ChapterId) -> &Chapter {
        &self.chapters[id.0]
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }

    pub fn subsection(&self, id: SubsectionId) -> &Subsection {
        &self.subsections[id.0]
    }

    pub fn question(&self, id: QuestionId) -> &Question {
        &self.questions[id.0]
    }

    /// All chapters in document order.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter()
    }

    /// All questions in document order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn context(&self, id: QuestionId) -> QuestionContext<'_> {
        let question = self.question(id);
        QuestionContext {
            question,
            chapter: question.chapter.map(|id| self.chapter(id)),
            section: question.section.map(|id| self.section(id)),
            subsection: question.subsection.map(|id| self.subsection(id)),
        }
    }

    /// Questions reachable by walking down from the root.
    pub fn reachable_questions(&self) -> Vec<QuestionId> {
        match &self.root {
            Root::Questions(ids) => ids.clone(),
            Root::Chapters(ids) => ids
                .iter()
                .flat_map(|&id| self.chapter_questions(id))
                .collect(),
        }
    }

    fn chapter_questions(&self, id: ChapterId) -> Vec<QuestionId> {
        let chapter = self.chapter(id);
        let mut ids = chapter.questions.clone();
        for &section_id in &chapter.sections {
            let section = self.section(section_id);
            ids.extend(&section.questions);
            for &subsection_id in &section.subsections {
                ids.extend(&self.subsection(subsection_id).questions);
            }
        }
        ids
    }

    pub(crate) fn use_chapters(&mut self) {
        if !matches!(self.root, Root::Chapters(_)) {
            self.root = Root::Chapters(Vec::new());
        }
    }

    pub(crate) fn add_chapter(&mut self, index: u32, caption: String) -> ChapterId {
        let id = ChapterId(self.chapters.len());
        self.chapters.push(Chapter {
            index,
            caption,
            questions: Vec::new(),
            sections: Vec::new(),
        });
        self.use_chapters();
        if let Root::Chapters(ids) = &mut self.root {
            ids.push(id);
        }
        id
    }

    pub(crate) fn add_section(
        &mut self,
        chapter: Option<ChapterId>,
        index: u32,
        caption: String,
    ) -> SectionId {
        let id = SectionId(self.sections.len());
        self.sections.push(Section {
            index,
            caption,
            questions: Vec::new(),
            subsections: Vec::new(),
        });
        if let Some(chapter) = chapter {
            self.chapters[chapter.0].sections.push(id);
        }
        id
    }

    pub(crate) fn add_subsection(
        &mut self,
        section: Option<SectionId>,
        index: u32,
        caption: String,
    ) -> SubsectionId {
        let id = SubsectionId(self.subsections.len());
        self.subsections.push(Subsection {
            index,
            caption,
            questions: Vec::new(),
        });
        if let Some(section) = section {
            self.sections[section.0].subsections.push(id);
        }
        id
    }

    /// Store `question` and attach it to its innermost container.
    pub(crate) fn add_question(&mut self, question: Question) -> QuestionId {
        let id = QuestionId(self.questions.len());
        if let Some(subsection) = question.subsection {
            self.subsections[subsection.0].questions.push(id);
        } else if let Some(section) = question.section {
            self.sections[section.0].questions.push(id);
        } else if let Some(chapter) = question.chapter {
            self.chapters[chapter.0].questions.push(id);
        } else if let Root::Questions(ids) = &mut self.root {
            ids.push(id);
        }
        self.questions.push(question);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn question(index: u32, chapter: Option<ChapterId>, section: Option<SectionId>) -> Question {
        Question {
            index,
            text: format!("q{index}"),
            answer: format!("a{index}"),
            chapter,
            section,
            subsection: None,
        }
    }

    #[test]
    fn free_questions_hang_off_the_root() {
        let mut ast = Ast::new();
        let first = ast.add_question(question(1, None, None));
        let second = ast.add_question(question(2, None, None));
        assert_eq!(ast.root(), &Root::Questions(vec![first, second]));
        assert_eq!(ast.reachable_questions(), vec![first, second]);
    }

    #[test]
    fn questions_attach_to_innermost_container() {
        let mut ast = Ast::new();
        let chapter = ast.add_chapter(1, "Intro".into());
        let in_chapter = ast.add_question(question(1, Some(chapter), None));
        let section = ast.add_section(Some(chapter), 1, "Part".into());
        let in_section = ast.add_question(question(2, Some(chapter), Some(section)));

        assert_eq!(ast.chapter(chapter).questions, vec![in_chapter]);
        assert_eq!(ast.section(section).questions, vec![in_section]);
        assert_eq!(ast.chapter(chapter).sections, vec![section]);
        assert_eq!(ast.reachable_questions(), vec![in_chapter, in_section]);
    }

    #[test]
    fn context_resolves_back_references() {
        let mut ast = Ast::new();
        let chapter = ast.add_chapter(3, "Deep".into());
        let section = ast.add_section(Some(chapter), 2, "Deeper".into());
        let id = ast.add_question(question(7, Some(chapter), Some(section)));

        let context = ast.context(id);
        assert_eq!(context.question.index, 7);
        assert_eq!(context.chapter.map(|c| c.caption.as_str()), Some("Deep"));
        assert_eq!(context.section.map(|s| s.index), Some(2));
        assert!(context.subsection.is_none());
    }
}
