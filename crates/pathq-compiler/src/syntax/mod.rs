mod cursor;
mod lexer;
mod syntax_kind;

#[cfg(test)]
mod lexer_tests;

pub use cursor::Cursor;
pub use lexer::{Token, lex, lex_significant, text_size, token_text};
pub use syntax_kind::SyntaxKind;
