use super::{AnkiGenerator, Generator, GeneratorOptions, HtmlGenerator};

/// Every available back end, looked up by name.
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Registry with the built-in generators, all sharing `options`.
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            generators: vec![
                Box::new(HtmlGenerator::new(options.clone())),
                Box::new(AnkiGenerator::new(options.clone())),
            ],
        }
    }

    pub fn register(&mut self, generator: Box<dyn Generator>) {
        self.generators.push(generator);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Generator> {
        self.generators
            .iter()
            .find(|generator| generator.name() == name)
            .map(|generator| generator.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Generator> {
        self.generators.iter().map(|generator| generator.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|generator| generator.name()).collect()
    }

    /// `name - description` lines, as printed by `--list-generators`.
    pub fn listing(&self) -> String {
        self.iter()
            .map(|generator| format!("{} - {}\n", generator.name(), generator.description()))
            .collect()
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new(&GeneratorOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Chapter, QuestionContext, Section, Subsection};
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    struct Plain;

    impl Generator for Plain {
        fn name(&self) -> &'static str {
            "plain"
        }
        fn description(&self) -> &'static str {
            "Question text only"
        }
        fn render_chapter(&self, _: &Chapter, questions: &str, sections: &str) -> String {
            format!("{questions}{sections}")
        }
        fn render_section(&self, _: &Section, questions: &str, subsections: &str) -> String {
            format!("{questions}{subsections}")
        }
        fn render_subsection(&self, _: &Subsection, questions: &str) -> String {
            questions.to_owned()
        }
        fn render_question(&self, context: &QuestionContext<'_>) -> String {
            format!("{}\n", context.question.text)
        }
        fn render_document(&self, body: &str) -> String {
            body.to_owned()
        }
    }

    #[test]
    fn builtin_generators_in_order() {
        assert_eq!(GeneratorRegistry::default().names(), vec!["html", "anki"]);
    }

    #[test]
    fn lookup_by_name() {
        let registry = GeneratorRegistry::default();
        assert_eq!(registry.get("anki").map(|g| g.name()), Some("anki"));
        assert!(registry.get("pdf").is_none());
    }

    #[test]
    fn listing_shows_descriptions() {
        assert_snapshot!(GeneratorRegistry::default().listing(), @r"
        html - Standalone HTML page
        anki - Anki import file (tab separated)
        ");
    }

    #[test]
    fn registered_generator_follows_builtins() {
        let mut registry = GeneratorRegistry::default();
        registry.register(Box::new(Plain));

        assert_eq!(registry.names(), vec!["html", "anki", "plain"]);
        assert_eq!(
            registry.get("plain").map(|g| g.description()),
            Some("Question text only")
        );
        assert!(registry.listing().ends_with("plain - Question text only\n"));
    }
}
