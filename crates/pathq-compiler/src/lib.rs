//! pathq compiler: turns query text into the structures the engine consumes.
//!
//! - `syntax` - shared lexer and token cursor for regex and grammar text
//! - `regex` - regex parser and the regex to minimal DFA pipeline
//! - `grammar` - grammar parser, weak-CNF normalizer, ECFG and RSM
//! - `diagnostics` - span-carrying error reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod grammar;
pub mod regex;
pub mod syntax;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use grammar::{
    Ecfg, Rsm, is_variable_name, parse_ecfg, parse_ecfg_with_start, parse_grammar,
    parse_grammar_text, parse_grammar_with_start, to_weak_cnf,
};
pub use regex::{Dfa, Regex, compile_regex, parse_regex};

/// Errors from compiling query text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("invalid regex `{source_text}`\n{diagnostics}")]
    RegexParse {
        source_text: String,
        diagnostics: Diagnostics,
    },

    #[error("invalid grammar\n{diagnostics}")]
    GrammarParse {
        source_text: String,
        diagnostics: Diagnostics,
    },

    #[error(transparent)]
    Core(#[from] pathq_core::Error),
}

impl Error {
    /// Render parse diagnostics against their source, or the plain message
    /// for errors without one.
    pub fn render(&self, colored: bool) -> String {
        match self {
            Error::RegexParse {
                source_text,
                diagnostics,
            }
            | Error::GrammarParse {
                source_text,
                diagnostics,
            } => diagnostics.render_colored(source_text, colored),
            Error::Core(err) => err.to_string(),
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
