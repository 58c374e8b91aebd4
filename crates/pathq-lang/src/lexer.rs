//! Lexer for script text.
//!
//! Same shape as the query lexer: span-only tokens, trivia kept, runs of
//! unlexable characters merged into one `Garbage` token.

use std::ops::Range;

use logos::Logos;
use rowan::TextRange;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum TokenKind {
    #[token("bind")]
    KwBind,
    #[token("print")]
    KwPrint,
    #[token("lam")]
    KwLam,
    #[token("true")]
    KwTrue,
    #[token("false")]
    KwFalse,
    #[token("in")]
    KwIn,

    #[token("=")]
    Assign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("->")]
    Arrow,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,

    /// `"..."` with `\"`, `\\`, `\n` and `\t` escapes.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    #[regex("[0-9]+")]
    Int,

    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    Comment,

    /// Coalesced unlexable characters.
    Garbage,
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }

    /// Human-readable form used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Self::KwBind => "`bind`",
            Self::KwPrint => "`print`",
            Self::KwLam => "`lam`",
            Self::KwTrue => "`true`",
            Self::KwFalse => "`false`",
            Self::KwIn => "`in`",
            Self::Assign => "`=`",
            Self::EqEq => "`==`",
            Self::NotEq => "`!=`",
            Self::AndAnd => "`&&`",
            Self::OrOr => "`||`",
            Self::Arrow => "`->`",
            Self::Semicolon => "`;`",
            Self::Comma => "`,`",
            Self::ParenOpen => "`(`",
            Self::ParenClose => "`)`",
            Self::BraceOpen => "`{`",
            Self::BraceClose => "`}`",
            Self::Str => "string",
            Self::Int => "integer",
            Self::Ident => "identifier",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::Comment => "comment",
            Self::Garbage => "invalid characters",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes script source, trivia included.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(TokenKind::Garbage, range_to_text_range(start..end)));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Tokens without trivia.
pub fn lex_significant(source: &str) -> Vec<Token> {
    lex(source).into_iter().filter(|t| !t.kind.is_trivia()).collect()
}

#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[Range::<usize>::from(token.span)]
}

/// Contents of a string literal token with escapes resolved.
///
/// Unknown escapes keep the escaped character.
pub fn unescape(literal: &str) -> String {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
