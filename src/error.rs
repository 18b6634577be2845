use std::io::Write;

use crate::token::{Token, Type};

/// Where a compile error is reported to have happened: either a specific
/// lexeme, or `end` when the offending token is `EOF`.
fn where_clause(token: &Token) -> String {
    if token.r#type == Type::EOF {
        "end".to_string()
    } else {
        format!("'{}'", token.lexeme)
    }
}

/// A lexical error: an unterminated string, an unterminated number, or an
/// unrecognized character. Attaches only a line, since the scanner has not
/// yet produced a token for the offending text.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

/// A syntax error discovered by the parser. Attaches the offending token so
/// the report can say `at 'foo'` or `at end`.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

/// A static semantic error discovered by the resolver (redeclaration,
/// `return` outside a function, `this` outside a class, ...).
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

/// A runtime error: a type mismatch, an undefined variable, an arity
/// mismatch, and so on. Always attaches the token whose line should be
/// reported (the operator, the call's closing paren, or the name).
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

/// The shared collaborator every pipeline stage reports errors through.
///
/// `stderr` is injectable so tests can assert on exact diagnostic text
/// in-process instead of spawning a subprocess for every case; the CLI
/// binary points it at real `stderr`.
pub struct Reporter<'a> {
    stderr: &'a mut dyn Write,
    had_error: bool,
    had_runtime_error: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(stderr: &'a mut dyn Write) -> Self {
        Reporter { stderr, had_error: false, had_runtime_error: false }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Reports a lex error: `[line N] Error: MESSAGE`.
    pub fn scan_error(&mut self, error: &ScanError) {
        self.had_error = true;
        let _ = writeln!(self.stderr, "[line {}] Error: {}", error.line, error.message);
    }

    /// Reports a parse error: `[line N] Error at <where>: MESSAGE`.
    pub fn parse_error(&mut self, error: &ParseError) {
        self.had_error = true;
        let _ = writeln!(
            self.stderr,
            "[line {}] Error at {}: {}",
            error.token.line,
            where_clause(&error.token),
            error.message,
        );
    }

    /// Reports a resolve error: same wire shape as a parse error.
    pub fn resolve_error(&mut self, error: &ResolveError) {
        self.had_error = true;
        let _ = writeln!(
            self.stderr,
            "[line {}] Error at {}: {}",
            error.token.line,
            where_clause(&error.token),
            error.message,
        );
    }

    /// Reports a runtime error: the message on one line, `[line N]` on the
    /// next, no `Error at` prefix.
    pub fn runtime_error(&mut self, error: &RuntimeError) {
        self.had_runtime_error = true;
        let _ = writeln!(self.stderr, "{}\n[line {}]", error.message, error.token.line);
    }
}
