use std::fs;
use std::path::Path;
use log::{debug, warn};
use crate::ast::Node;
use crate::error::{BoarError, Result};
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::object::Object;
use crate::parser::Parser;

pub const SOURCE_EXTENSION: &str = "br";

pub fn validate_extension(path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(SOURCE_EXTENSION) => Ok(()),
        found => Err(BoarError::InvalidExtension {
            path: path.to_path_buf(),
            found: found.map(str::to_string),
        }),
    }
}

/// Parses and evaluates `source` in a fresh global scope. A program that
/// ends in an error value is reported as `BoarError::Runtime`.
pub fn run_source(source: &str) -> Result<Option<Object>> {
    let mut p = Parser::new(Lexer::new(source));
    let program = p.parse_program();
    let errors = p.errors();
    if !errors.is_empty() {
        warn!("source has {} parser errors", errors.len());
        return Err(BoarError::Parse(errors));
    }

    match Evaluator::new().eval(Node::Program(&program)) {
        Some(Object::Error(msg)) => Err(BoarError::Runtime(msg)),
        other => Ok(other),
    }
}

pub fn run_file(path: &Path) -> Result<Option<Object>> {
    validate_extension(path)?;
    let source = fs::read_to_string(path)?;
    debug!("loaded {} ({} bytes)", path.display(), source.len());
    run_source(&source)
}
