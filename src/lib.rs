pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod object;
pub mod evaluator;
pub mod builtin;
pub mod environment;
pub mod error;
pub mod repl;
pub mod runner;

pub use error::{BoarError, Result};
pub use evaluator::Evaluator;
pub use object::Object;

/// Parses and evaluates `input` in a fresh global scope.
pub fn eval_str(input: &str) -> Result<Option<Object>> {
    runner::run_source(input)
}
