use std::path::PathBuf;
use thiserror::Error;

/// Failures the host sees. Errors inside the language stay ordinary values:
/// parser messages and `Object::Error`.
#[derive(Debug, Error)]
pub enum BoarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} is not a boar source file: expected extension .br, got {found:?}", .path.display())]
    InvalidExtension { path: PathBuf, found: Option<String> },

    #[error("parser errors:\n{}", render_lines(.0))]
    Parse(Vec<String>),

    #[error("ERROR: {0}")]
    Runtime(String),
}

fn render_lines(errors: &[String]) -> String {
    errors.iter().map(|e| format!("    {}", e)).collect::<Vec<_>>().join("\n")
}

pub type Result<T> = std::result::Result<T, BoarError>;
