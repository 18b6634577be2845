use std::io::{self, Write};
use std::process::ExitCode;

use lox_lang::error::Reporter;
use lox_lang::{Lox, Outcome};

const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_SOFTWARE: u8 = 70;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let (command, path) = match args.as_slice() {
        [_, command, path] => (command.as_str(), path.as_str()),
        [program, ..] => {
            eprintln!("Usage: {program} <command> <path>");
            return ExitCode::from(EX_USAGE);
        }
        [] => {
            eprintln!("Usage: lox <command> <path>");
            return ExitCode::from(EX_USAGE);
        }
    };

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read file {path}: {error}");
            return ExitCode::from(EX_USAGE);
        }
    };

    let mut stderr = io::stderr();
    let mut reporter = Reporter::new(&mut stderr);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match command {
        "tokenize" => Lox::tokenize(&source, &mut reporter, &mut out),
        "parse" => Lox::parse(&source, &mut reporter, &mut out),
        "evaluate" => Lox::evaluate(&source, &mut reporter, &mut out),
        "run" => Lox::run(&source, &mut reporter, &mut out),
        other => {
            eprintln!("Usage: lox <command> <path>");
            eprintln!("Unknown command: {other}");
            return ExitCode::from(EX_USAGE);
        }
    };

    let _ = out.flush();

    match outcome {
        Outcome::Ok => ExitCode::SUCCESS,
        Outcome::CompileError => ExitCode::from(EX_DATAERR),
        Outcome::RuntimeError => ExitCode::from(EX_SOFTWARE),
    }
}
