//! Parser for `Head -> body | alt` grammar text.
//!
//! One production group per line. Body symbols are words; `epsilon`, `$` or
//! an empty alternative denote the empty string.

use pathq_core::{DEFAULT_START, Grammar, GrammarSymbol, Production};
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::syntax::{Cursor, SyntaxKind, lex_significant};
use crate::{Error, Result};

use super::{Line, is_variable_name, split_lines};

/// Parse grammar text with start symbol `S`.
pub fn parse_grammar(source: &str) -> Result<Grammar> {
    parse_grammar_with_start(source, DEFAULT_START)
}

/// Parse grammar text with an explicit start symbol.
///
/// Warnings are logged and otherwise ignored; any error fails the parse.
pub fn parse_grammar_with_start(source: &str, start: &str) -> Result<Grammar> {
    let (grammar, diagnostics) = parse_grammar_text(source, start);
    if diagnostics.has_errors() {
        return Err(Error::GrammarParse {
            source_text: source.to_owned(),
            diagnostics,
        });
    }
    for warning in diagnostics.iter() {
        tracing::warn!(%warning, "grammar");
    }
    tracing::debug!(
        productions = grammar.productions().len(),
        start = grammar.start(),
        "parsed grammar"
    );
    Ok(grammar)
}

/// Best-effort parse returning every diagnostic.
///
/// Lines with errors are skipped; the rest still contribute productions.
pub fn parse_grammar_text(source: &str, start: &str) -> (Grammar, Diagnostics) {
    let tokens = lex_significant(source);
    let mut grammar = Grammar::new(start);
    let mut diagnostics = Diagnostics::new();

    for line in split_lines(&tokens, source.len()) {
        parse_line(source, &line, &mut grammar, &mut diagnostics);
    }
    (grammar, diagnostics)
}

fn parse_line(source: &str, line: &Line<'_>, grammar: &mut Grammar, diagnostics: &mut Diagnostics) {
    let mut cursor = Cursor::new(source, line.tokens).with_end(line.end);

    let head_span = cursor.current_span();
    if !cursor.at(SyntaxKind::Word) {
        diagnostics
            .report(DiagnosticKind::ExpectedIdentifier, head_span)
            .message(format!("found `{}`", cursor.current_text()))
            .emit();
        return;
    }
    let head = cursor.current_text();
    cursor.bump();
    if !is_variable_name(head) {
        diagnostics
            .report(DiagnosticKind::InvalidHead, head_span)
            .message(format!("`{head}` is a terminal"))
            .emit();
        return;
    }

    if !cursor.eat(SyntaxKind::Arrow) {
        diagnostics
            .report(DiagnosticKind::ExpectedArrow, cursor.current_span())
            .emit();
        return;
    }

    let mut alternatives = Vec::new();
    let mut body = Vec::new();
    let mut body_span = TextRange::empty(cursor.current_span().start());
    loop {
        match cursor.current() {
            None => break,
            Some(SyntaxKind::Pipe) => {
                alternatives.push((std::mem::take(&mut body), body_span));
                cursor.bump();
                body_span = TextRange::empty(cursor.current_span().start());
            }
            Some(SyntaxKind::Word) => {
                let name = cursor.current_text();
                let symbol = if is_variable_name(name) {
                    GrammarSymbol::Variable(name.to_owned())
                } else {
                    GrammarSymbol::Terminal(name.to_owned())
                };
                body.push(symbol);
                body_span = body_span.cover(cursor.current_span());
                cursor.bump();
            }
            Some(SyntaxKind::Epsilon) => {
                body_span = body_span.cover(cursor.current_span());
                cursor.bump();
            }
            Some(SyntaxKind::Garbage) => {
                diagnostics
                    .report(DiagnosticKind::InvalidCharacters, cursor.current_span())
                    .emit();
                return;
            }
            Some(_) => {
                diagnostics
                    .report(DiagnosticKind::UnexpectedToken, cursor.current_span())
                    .message(format!("`{}` in production body", cursor.current_text()))
                    .emit();
                return;
            }
        }
    }
    alternatives.push((body, body_span));

    for (body, span) in alternatives {
        let production = Production::new(head, body);
        if grammar.productions().contains(&production) {
            diagnostics
                .report(DiagnosticKind::DuplicateProduction, span)
                .message(format!("`{production}`"))
                .emit();
            continue;
        }
        grammar.add_production(production);
    }
}
