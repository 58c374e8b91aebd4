#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A small scripting language over graphs, automata and sets.
//!
//! ```text
//! bind g = load("graph.txt");
//! bind q = setStart(g, {0}) && "a* b";
//! print getReachable(q);
//! ```
//!
//! Pipeline: `lexer` → `parser` (typed `ast` plus diagnostics) →
//! `interpreter` over an `env` of `value`s.

pub mod ast;
pub mod env;
mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod value;

#[cfg(test)]
mod interpreter_tests;
#[cfg(test)]
mod parser_tests;

use std::io::Write;

use pathq_compiler::Diagnostics;

pub use ast::{BinaryOp, Builtin, Expr, ExprKind, Lambda, Program, Stmt};
pub use env::Env;
pub use error::EvalError;
pub use interpreter::{Interpreter, eval};
pub use parser::parse_program;
pub use value::{Atom, Value, ValueKind};

/// Errors from checking or running a script.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Parse(Diagnostics),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    pub fn diagnostics(&self) -> Diagnostics {
        match self {
            Error::Parse(diagnostics) => diagnostics.clone(),
            Error::Eval(err) => err.to_diagnostics(),
        }
    }

    /// Render against the script source.
    pub fn render(&self, source: &str, colored: bool) -> String {
        self.diagnostics().render_colored(source, colored)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parse a script, failing on any error diagnostic.
///
/// Warnings are logged and otherwise ignored.
pub fn check(source: &str) -> Result<Program> {
    let (program, diagnostics) = parse_program(source);
    if diagnostics.has_errors() {
        return Err(Error::Parse(diagnostics));
    }
    for warning in diagnostics.iter() {
        tracing::warn!("{warning}");
    }
    Ok(program)
}

/// Parse and run a script in a fresh environment, printing to `out`.
///
/// Returns the final environment.
pub fn run<W: Write>(source: &str, out: W) -> Result<Env> {
    let program = check(source)?;
    let mut interpreter = Interpreter::new(out);
    Ok(interpreter.run(&program, Env::new())?)
}
