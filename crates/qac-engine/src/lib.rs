//! Back end of the Q&A compiler: lowers the concrete syntax tree from
//! `qac-syntax` into an [`ast::Ast`] while rendering it through a
//! [`generator::Generator`].

pub mod ast;
pub mod generator;
pub mod io;
pub mod lower;
pub mod pipeline;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use ast::{Ast, Chapter, Question, QuestionContext, Root, Section, Subsection};
pub use generator::{
    AnkiGenerator, Captions, Generator, GeneratorOptions, GeneratorRegistry, HtmlGenerator,
};
pub use io::IoError;
pub use lower::{Lowered, lower};
pub use pipeline::{
    CompileError, compile, compile_file, compile_str, dump_cst, dump_tokens, parse_file,
};
