//! Regular expressions: parsing and compilation to minimal DFAs.

mod ast;
mod dfa;
mod nfa;
mod parser;

#[cfg(test)]
mod parser_tests;

use pathq_core::Automaton;

pub use ast::Regex;
pub use dfa::Dfa;
pub use parser::parse_regex;
pub(crate) use parser::RegexParser;

use crate::{Error, Result};

impl Regex {
    /// Minimal trimmed DFA for this expression.
    ///
    /// States are `0..n` with the start state 0. The empty language yields
    /// an automaton with no states.
    pub fn to_min_dfa(&self) -> Automaton<usize> {
        Dfa::from_regex(self).minimize().to_automaton()
    }
}

/// Parse `text` and compile it to a minimal DFA.
pub fn compile_regex(text: &str) -> Result<Automaton<usize>> {
    let regex = parse_regex(text).map_err(|diagnostics| Error::RegexParse {
        source_text: text.to_owned(),
        diagnostics,
    })?;
    let dfa = regex.to_min_dfa();
    tracing::debug!(
        regex = %regex,
        states = dfa.state_count(),
        transitions = dfa.transition_count(),
        "compiled regex"
    );
    Ok(dfa)
}
