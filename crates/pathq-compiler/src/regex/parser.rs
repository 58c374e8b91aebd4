//! Recursive-descent parser for regular expressions.
//!
//! Precedence, loosest first: alternation (`|`, `+`), concatenation
//! (juxtaposition or `.`), postfix `*`. Empty input denotes the empty
//! language; `epsilon` and `$` denote the empty string.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::syntax::{Cursor, SyntaxKind, lex_significant};

use super::ast::Regex;

/// Maximum parenthesis nesting.
const MAX_DEPTH: u32 = 256;

/// Parse a standalone regex.
pub fn parse_regex(source: &str) -> Result<Regex, Diagnostics> {
    let tokens = lex_significant(source);
    let mut parser = RegexParser::new(Cursor::new(source, &tokens));
    let regex = parser.parse_all();
    parser.finish(regex)
}

pub(crate) struct RegexParser<'src, 't> {
    cursor: Cursor<'src, 't>,
    diagnostics: Diagnostics,
    depth: u32,
}

impl<'src, 't> RegexParser<'src, 't> {
    pub(crate) fn new(cursor: Cursor<'src, 't>) -> Self {
        Self {
            cursor,
            diagnostics: Diagnostics::new(),
            depth: 0,
        }
    }

    /// Parse every token of the cursor as one regex.
    pub(crate) fn parse_all(&mut self) -> Option<Regex> {
        if self.cursor.eof() {
            return Some(Regex::Empty);
        }
        let regex = self.alternation()?;
        if !self.cursor.eof() {
            let found = format!("`{}`", self.cursor.current_text());
            self.diagnostics
                .report(DiagnosticKind::UnexpectedToken, self.cursor.current_span())
                .message(found)
                .emit();
            return None;
        }
        Some(regex)
    }

    pub(crate) fn finish(self, regex: Option<Regex>) -> Result<Regex, Diagnostics> {
        match regex {
            Some(regex) if !self.diagnostics.has_errors() => Ok(regex),
            _ => Err(self.diagnostics),
        }
    }

    fn alternation(&mut self) -> Option<Regex> {
        let mut left = self.concatenation()?;
        while self.cursor.current().is_some_and(SyntaxKind::is_alternation) {
            self.cursor.bump();
            let right = self.concatenation()?;
            left = left.union(right);
        }
        Some(left)
    }

    fn concatenation(&mut self) -> Option<Regex> {
        let mut left = self.postfix()?;
        loop {
            let explicit = self.cursor.eat(SyntaxKind::Dot);
            let operand = self
                .cursor
                .current()
                .is_some_and(|kind| kind.starts_atom() || kind == SyntaxKind::Garbage);
            if !explicit && !operand {
                break;
            }
            let right = self.postfix()?;
            left = left.concat(right);
        }
        Some(left)
    }

    fn postfix(&mut self) -> Option<Regex> {
        let mut inner = self.atom()?;
        while self.cursor.eat(SyntaxKind::Star) {
            inner = inner.star();
        }
        Some(inner)
    }

    fn atom(&mut self) -> Option<Regex> {
        match self.cursor.current() {
            Some(SyntaxKind::Word) => {
                let token = self.cursor.bump()?;
                Some(Regex::symbol(self.cursor.text(&token)))
            }
            Some(SyntaxKind::Epsilon) => {
                self.cursor.bump();
                Some(Regex::Epsilon)
            }
            Some(SyntaxKind::ParenOpen) => self.group(),
            Some(SyntaxKind::Garbage) => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidCharacters, self.cursor.current_span())
                    .emit();
                None
            }
            Some(_) => {
                let found = format!("found `{}`", self.cursor.current_text());
                self.diagnostics
                    .report(DiagnosticKind::ExpectedExpression, self.cursor.current_span())
                    .message(found)
                    .emit();
                None
            }
            None => {
                self.diagnostics
                    .report(DiagnosticKind::ExpectedExpression, self.cursor.current_span())
                    .emit();
                None
            }
        }
    }

    fn group(&mut self) -> Option<Regex> {
        let open = self.cursor.current_span();
        self.cursor.bump();

        if self.depth >= MAX_DEPTH {
            self.diagnostics
                .report(DiagnosticKind::NestingTooDeep, open)
                .emit();
            return None;
        }

        self.depth += 1;
        let inner = self.alternation();
        self.depth -= 1;
        let inner = inner?;

        if !self.cursor.eat(SyntaxKind::ParenClose) {
            self.diagnostics
                .report(DiagnosticKind::UnclosedParen, self.cursor.current_span())
                .related_to("opened here", open)
                .emit();
            return None;
        }
        Some(inner)
    }
}
