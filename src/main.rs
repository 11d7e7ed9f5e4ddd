use std::io::{stdin, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use boar::{repl, runner};

/// boar is a small dynamically typed scripting language.
#[derive(Parser, Debug)]
#[command(name = "boar", version, about, long_about = None)]
struct Args {
    /// Start the interactive prompt. This is the default when no file is given.
    #[arg(long, conflicts_with = "file")]
    prompt: bool,

    /// Evaluate a .br source file and print its result.
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("BOAR_LOG", "warn")).init();
    let args = Args::parse();

    let result = match args.file {
        Some(path) if !args.prompt => runner::run_file(&path).map(|value| {
            if let Some(value) = value {
                println!("{}", value);
            }
        }),
        _ => repl::start(stdin(), stdout()).map_err(boar::BoarError::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
