//! # Pipeline
//!
//! Glue for the whole compiler: lex → parse → lower → write.
//!
//! ```text
//! path ──lex──▶ tokens ──parse──▶ CstNode ──lower(generator)──▶ Lowered
//!                                                              └─▶ sink
//! ```
//!
//! Any error aborts before the sink is touched, so a failed compile never
//! leaves partial output behind.

use std::io::Write;
use std::path::Path;

use log::{debug, info};
use qac_syntax::{CstNode, LexError, Lexer, ParseError, Token, parse};
use thiserror::Error;

use crate::generator::{Generator, GeneratorOptions, GeneratorRegistry};
use crate::io::{self, IoError};
use crate::lower::{Lowered, lower};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Unknown generator '{name}' (available: {available})")]
    UnknownGenerator { name: String, available: String },
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Compile the document at `path` with the generator called `generator_name`
/// and write the result to `sink`.
pub fn compile<W: Write>(
    path: &Path,
    generator_name: &str,
    options: &GeneratorOptions,
    sink: &mut W,
) -> Result<Lowered, CompileError> {
    let registry = GeneratorRegistry::new(options);
    let generator = resolve(&registry, generator_name)?;
    let lowered = compile_file(path, generator)?;
    sink.write_all(lowered.output.as_bytes())
        .and_then(|()| sink.flush())
        .map_err(IoError::Io)?;
    info!(
        "Compiled {} questions from {} with {}",
        lowered.ast.question_count(),
        path.display(),
        generator_name
    );
    Ok(lowered)
}

pub fn resolve<'r>(
    registry: &'r GeneratorRegistry,
    name: &str,
) -> Result<&'r dyn Generator, CompileError> {
    registry
        .get(name)
        .ok_or_else(|| CompileError::UnknownGenerator {
            name: name.to_string(),
            available: registry.names().join(", "),
        })
}

pub fn compile_file(path: &Path, generator: &dyn Generator) -> Result<Lowered, CompileError> {
    let tree = parse_file(path)?;
    Ok(lower(&tree, generator))
}

/// Compile in-memory source. `FILE:` includes resolve against the working
/// directory.
pub fn compile_str(source: &str, generator: &dyn Generator) -> Result<Lowered, CompileError> {
    let tokens = Lexer::new().lex_str(source)?;
    let tree = parse(&tokens)?;
    Ok(lower(&tree, generator))
}

pub fn lex_file(path: &Path) -> Result<Vec<Token>, CompileError> {
    io::ensure_input(path)?;
    let tokens = Lexer::new().lex_file(path)?;
    debug!("{} tokens from {}", tokens.len(), path.display());
    Ok(tokens)
}

/// Lex and parse without rendering.
pub fn parse_file(path: &Path) -> Result<CstNode, CompileError> {
    let tokens = lex_file(path)?;
    Ok(parse(&tokens)?)
}

/// One `KIND@line[value]` line per token.
pub fn dump_tokens(path: &Path) -> Result<String, CompileError> {
    let tokens = lex_file(path)?;
    Ok(tokens.iter().map(|token| format!("{token}\n")).collect())
}

pub fn dump_cst(path: &Path) -> Result<String, CompileError> {
    Ok(parse_file(path)?.to_string())
}
