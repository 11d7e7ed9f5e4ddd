use std::io::{BufRead, BufReader, Read, Write};
use log::warn;
use crate::ast::Node;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::object::Object;
use crate::parser::Parser;

const PROMPT: &str = ">> ";

const TERMINATOR: &str = "exit()";

const BOAR_FACE: &str =
r#"
     __      _
   o'')}____//
    `_/      )
    (_(_/-(_/
"#;

/// Reads one line at a time until end of input or `exit()`, evaluating every
/// line against the same session scope.
pub fn start<R: Read, W: Write>(reader: R, mut writer: W) -> std::io::Result<()> {
    let mut session = Evaluator::new();
    let mut reader = BufReader::new(reader);
    loop {
        write!(writer, "{}", PROMPT)?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            writeln!(writer)?;
            return Ok(());
        }
        if line.trim() == TERMINATOR {
            return Ok(());
        }

        let mut p = Parser::new(Lexer::new(&line));
        let program = p.parse_program();
        if !p.errors().is_empty() {
            warn!("discarding input with {} parser errors", p.errors().len());
            print_parser_errors(&mut writer, p.errors())?;
            continue;
        }

        match session.eval(Node::Program(&program)) {
            None => {},
            Some(Object::Error(msg)) => writeln!(writer, "ERROR: {}", msg)?,
            Some(obj) => writeln!(writer, "{}", obj)?,
        }
    }
}

fn print_parser_errors<W: Write>(mut writer: W, errs: Vec<String>) -> std::io::Result<()> {
    write!(writer, "{}", BOAR_FACE)?;
    writeln!(writer, "Oink! The boar tripped over some syntax here!\n parser errors:")?;
    for msg in errs {
        writeln!(writer, "    {}", msg)?;
    }
    writer.flush()
}
