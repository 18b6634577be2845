//! A tree-walking interpreter for Lox, the language from *Crafting
//! Interpreters*.
//!
//! The pipeline is four stages, each consuming the previous stage's
//! output:
//!
//! ```text
//! source text -> Scanner -> tokens -> Parser -> AST -> Resolver (distance table) -> Interpreter -> output
//!                                                                                \-> error reporter
//! ```
//!
//! [`scanner::Scanner`] turns source text into a token stream, recovering
//! from lexical errors rather than aborting. [`parser::Parser`] is a
//! recursive-descent parser producing [`expr::Expr`]/[`stmt::Stmt`] trees,
//! with panic-mode recovery at declaration boundaries. [`resolver::Resolver`]
//! walks the AST once to build a binding-distance table and catch a handful
//! of static mistakes. [`interpreter::Interpreter`] walks the AST a second
//! time to actually run the program, writing `print` output to an injected
//! sink.
//!
//! Every stage reports through [`error::Reporter`] rather than a global,
//! see that module for why. This crate never calls `std::process::exit`;
//! [`Lox`] returns an [`Outcome`] and the binary in `src/main.rs` is the
//! only place exit codes are decided.

pub mod ast_printer;
pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;

use std::io::Write;

use error::Reporter;
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;
use token::Token;

/// What happened when a [`Lox`] operation ran, independent of how that
/// should map to a process exit code (that translation lives in
/// `src/main.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    CompileError,
    RuntimeError,
}

/// The library's entry point. Each method is one CLI subcommand's worth of
/// pipeline, parameterized over where errors and `print` output go so
/// tests can run the same code in-process.
pub struct Lox;

impl Lox {
    fn scan(source: &str, reporter: &mut Reporter) -> Vec<Token> {
        Scanner::new(source).scan_tokens(reporter)
    }

    /// `tokenize`: prints each token on its own line, `EOF  null` last.
    pub fn tokenize(source: &str, reporter: &mut Reporter, out: &mut dyn Write) -> Outcome {
        let tokens = Self::scan(source, reporter);
        for token in &tokens {
            let _ = writeln!(out, "{token}");
        }
        if reporter.had_error() { Outcome::CompileError } else { Outcome::Ok }
    }

    /// `parse`: parses one expression and prints it in parenthesized form.
    pub fn parse(source: &str, reporter: &mut Reporter, out: &mut dyn Write) -> Outcome {
        let tokens = Self::scan(source, reporter);
        let mut parser = Parser::new(tokens);
        match parser.parse_expr(reporter) {
            Some(expr) if !reporter.had_error() => {
                let _ = writeln!(out, "{}", ast_printer::AstPrinter::print(&expr));
                Outcome::Ok
            }
            _ => Outcome::CompileError,
        }
    }

    /// `evaluate`: parses one expression and prints its stringified value.
    pub fn evaluate(source: &str, reporter: &mut Reporter, out: &mut dyn Write) -> Outcome {
        let tokens = Self::scan(source, reporter);
        let mut parser = Parser::new(tokens);
        let Some(expr) = parser.parse_expr(reporter) else {
            return Outcome::CompileError;
        };
        if reporter.had_error() {
            return Outcome::CompileError;
        }

        let mut sink = std::io::sink();
        let mut interpreter = Interpreter::new(Default::default(), &mut sink);
        match interpreter.interpret_expr(&expr) {
            Ok(value) => {
                let _ = writeln!(out, "{}", value.stringify());
                Outcome::Ok
            }
            Err(error) => {
                reporter.runtime_error(&error);
                Outcome::RuntimeError
            }
        }
    }

    /// `run`: parses a full program, resolves it, then executes it. Skips
    /// straight to reporting a compile error if lexing, parsing, or
    /// resolving produced one: the interpreter never sees a program with
    /// unresolved static errors.
    pub fn run(source: &str, reporter: &mut Reporter, out: &mut dyn Write) -> Outcome {
        let tokens = Self::scan(source, reporter);
        let mut parser = Parser::new(tokens);
        let stmts = parser.parse_program(reporter);
        if reporter.had_error() {
            return Outcome::CompileError;
        }

        let distances = {
            let resolver = Resolver::new(reporter);
            resolver.resolve(&stmts)
        };
        if reporter.had_error() {
            return Outcome::CompileError;
        }

        let mut interpreter = Interpreter::new(distances, out);
        match interpreter.interpret(&stmts) {
            Ok(()) => Outcome::Ok,
            Err(error) => {
                reporter.runtime_error(&error);
                Outcome::RuntimeError
            }
        }
    }
}
