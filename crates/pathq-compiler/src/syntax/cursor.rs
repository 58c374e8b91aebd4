//! Token cursor shared by the regex and grammar parsers.

use rowan::{TextRange, TextSize};

use super::lexer::{Token, text_size, token_text};
use super::syntax_kind::SyntaxKind;

/// Forward-only view over significant tokens.
///
/// `end` is the byte offset reported for end-of-input, so a cursor over a
/// slice of a larger source still points its EOF diagnostics at the right
/// place.
pub struct Cursor<'src, 't> {
    source: &'src str,
    tokens: &'t [Token],
    pos: usize,
    end: TextSize,
}

impl<'src, 't> Cursor<'src, 't> {
    pub fn new(source: &'src str, tokens: &'t [Token]) -> Self {
        let end = tokens
            .last()
            .map_or(text_size(source.len()), |t| t.span.end());
        Self {
            source,
            tokens,
            pos: 0,
            end,
        }
    }

    /// Override the offset used for end-of-input spans.
    pub fn with_end(mut self, end: TextSize) -> Self {
        self.end = end;
        self
    }

    /// Current token kind, `None` at EOF.
    pub fn current(&self) -> Option<SyntaxKind> {
        self.nth(0)
    }

    pub fn nth(&self, lookahead: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + lookahead).map(|t| t.kind)
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Span of the current token, or an empty span at end of input.
    pub fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.end), |t| t.span)
    }

    pub fn current_text(&self) -> &'src str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    /// Consume the current token.
    pub fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    pub fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }
}
