//! Token kinds for regex and grammar text.
//!
//! Both notations share one token set: a grammar line is a head, an arrow
//! and a body, and an ECFG body is itself a regex.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("->")]
    Arrow = 0,

    /// Alternation
    #[token("|")]
    Pipe,

    /// Alternation synonym
    #[token("+")]
    Plus,

    #[token("*")]
    Star,

    /// Explicit concatenation
    #[token(".")]
    Dot,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    /// Empty string. Defined before `Word` so the keyword wins.
    #[token("epsilon")]
    #[token("$")]
    Epsilon,

    /// Terminal or variable name
    #[regex(r"[A-Za-z0-9_][A-Za-z0-9_']*")]
    Word,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    /// Consecutive unrecognized characters coalesced into one token
    Garbage,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Whitespace and comments. Newlines are significant in grammar text.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Comment)
    }

    /// Tokens that can begin a regex operand.
    #[inline]
    pub fn starts_atom(self) -> bool {
        matches!(self, Word | Epsilon | ParenOpen)
    }

    #[inline]
    pub fn is_alternation(self) -> bool {
        matches!(self, Pipe | Plus)
    }
}
