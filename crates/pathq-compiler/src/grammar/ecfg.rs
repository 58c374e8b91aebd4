//! Extended context-free grammars and recursive state machines.
//!
//! An ECFG has exactly one regex body per variable. Its RSM replaces each
//! body with a minimal DFA (a "box"); box transitions labeled with a
//! variable name stand for a call into that variable's box.

use std::fmt;

use indexmap::IndexMap;
use pathq_core::{Automaton, DEFAULT_START, Grammar};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::regex::{Regex, RegexParser};
use crate::syntax::{Cursor, SyntaxKind, lex_significant};
use crate::{Error, Result};

use super::split_lines;

/// Extended context-free grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ecfg {
    start: String,
    productions: IndexMap<String, Regex>,
}

impl Ecfg {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            productions: IndexMap::new(),
        }
    }

    /// Add a body for `head`, unioned with any existing one.
    pub fn add_production(&mut self, head: impl Into<String>, body: Regex) {
        let head = head.into();
        match self.productions.get_mut(&head) {
            Some(existing) => {
                let previous = std::mem::replace(existing, Regex::Empty);
                *existing = previous.union(body);
            }
            None => {
                self.productions.insert(head, body);
            }
        }
    }

    /// One regex per head: the union of that head's alternatives.
    pub fn from_grammar(grammar: &Grammar) -> Self {
        let mut ecfg = Self::new(grammar.start());
        for p in grammar.productions() {
            let body = Regex::sequence(p.body.iter().map(|symbol| Regex::symbol(symbol.name())));
            ecfg.add_production(p.head.clone(), body);
        }
        ecfg
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn productions(&self) -> &IndexMap<String, Regex> {
        &self.productions
    }

    pub fn body(&self, head: &str) -> Option<&Regex> {
        self.productions.get(head)
    }

    pub fn to_rsm(&self) -> Rsm {
        let boxes = self
            .productions
            .iter()
            .map(|(head, body)| (head.clone(), body.to_min_dfa()))
            .collect();
        Rsm {
            start: self.start.clone(),
            boxes,
        }
    }
}

impl fmt::Display for Ecfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (head, body) in &self.productions {
            writeln!(f, "{head} -> {body}")?;
        }
        Ok(())
    }
}

/// Recursive state machine: one minimal DFA per variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rsm {
    start: String,
    boxes: IndexMap<String, Automaton<usize>>,
}

impl Rsm {
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn boxes(&self) -> &IndexMap<String, Automaton<usize>> {
        &self.boxes
    }

    pub fn box_for(&self, variable: &str) -> Option<&Automaton<usize>> {
        self.boxes.get(variable)
    }

    /// Whether a box label is a call rather than a terminal.
    pub fn is_variable(&self, label: &str) -> bool {
        self.boxes.contains_key(label)
    }
}

/// Parse `Head -> regex` lines with start symbol `S`.
pub fn parse_ecfg(source: &str) -> Result<Ecfg> {
    parse_ecfg_with_start(source, DEFAULT_START)
}

pub fn parse_ecfg_with_start(source: &str, start: &str) -> Result<Ecfg> {
    let tokens = lex_significant(source);
    let mut ecfg = Ecfg::new(start);
    let mut diagnostics = Diagnostics::new();

    for line in split_lines(&tokens, source.len()) {
        let mut cursor = Cursor::new(source, line.tokens).with_end(line.end);
        if !cursor.at(SyntaxKind::Word) {
            diagnostics
                .report(DiagnosticKind::ExpectedIdentifier, cursor.current_span())
                .emit();
            continue;
        }
        let head = cursor.current_text();
        cursor.bump();
        if !cursor.eat(SyntaxKind::Arrow) {
            diagnostics
                .report(DiagnosticKind::ExpectedArrow, cursor.current_span())
                .emit();
            continue;
        }

        let body_tokens = &line.tokens[2..];
        let mut parser = RegexParser::new(Cursor::new(source, body_tokens).with_end(line.end));
        let body = parser.parse_all();
        match parser.finish(body) {
            // An empty body is ε here, as in plain grammar text.
            Ok(Regex::Empty) => ecfg.add_production(head, Regex::Epsilon),
            Ok(body) => ecfg.add_production(head, body),
            Err(errors) => diagnostics.extend(errors),
        }
    }

    if diagnostics.has_errors() {
        return Err(Error::GrammarParse {
            source_text: source.to_owned(),
            diagnostics,
        });
    }
    Ok(ecfg)
}
