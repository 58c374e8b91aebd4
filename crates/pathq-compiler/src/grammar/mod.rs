//! Context-free grammar front end: text parsing, weak-CNF normalization,
//! extended grammars and recursive state machines.

mod ecfg;
mod normalize;
mod parser;

#[cfg(test)]
mod ecfg_tests;
#[cfg(test)]
mod normalize_tests;

use rowan::TextSize;

use crate::syntax::{SyntaxKind, Token, text_size};

pub use ecfg::{Ecfg, Rsm, parse_ecfg, parse_ecfg_with_start};
pub use normalize::to_weak_cnf;
pub use parser::{parse_grammar, parse_grammar_text, parse_grammar_with_start};

/// Whether a grammar symbol names a variable rather than a terminal.
pub fn is_variable_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// A non-empty line of significant tokens.
struct Line<'t> {
    tokens: &'t [Token],
    /// Offset where the line ends, used for end-of-line diagnostics.
    end: TextSize,
}

fn split_lines<'t>(tokens: &'t [Token], source_len: usize) -> Vec<Line<'t>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != SyntaxKind::Newline {
            continue;
        }
        if i > start {
            lines.push(Line {
                tokens: &tokens[start..i],
                end: token.span.start(),
            });
        }
        start = i + 1;
    }
    if start < tokens.len() {
        lines.push(Line {
            tokens: &tokens[start..],
            end: text_size(source_len),
        });
    }
    lines
}
