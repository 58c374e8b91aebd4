//! Recursive-descent parser for scripts.
//!
//! Precedence, loosest first: `||`, `&&`, then the non-associative
//! comparisons `==`, `!=` and `in`. A failed statement reports one
//! diagnostic and parsing resumes after the next `;`.

use std::rc::Rc;

use pathq_compiler::diagnostics::{DiagnosticKind, Diagnostics};
use rowan::{TextRange, TextSize};

use crate::ast::{BinaryOp, Builtin, Expr, ExprKind, Lambda, Program, Stmt};
use crate::lexer::{Token, TokenKind, lex_significant, token_text, unescape};

const MAX_DEPTH: u32 = 256;

/// Parse a script.
///
/// Returns every statement that parsed cleanly together with the
/// diagnostics for the rest. The program is only safe to run when the
/// diagnostics hold no errors.
pub fn parse_program(source: &str) -> (Program, Diagnostics) {
    let tokens = lex_significant(source);
    let mut parser = Parser::new(source, &tokens);
    let program = parser.program();
    (program, parser.diagnostics)
}

struct Parser<'src, 't> {
    source: &'src str,
    tokens: &'t [Token],
    pos: usize,
    depth: u32,
    diagnostics: Diagnostics,
}

impl<'src, 't> Parser<'src, 't> {
    fn new(source: &'src str, tokens: &'t [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    fn current(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    fn current_span(&self) -> TextRange {
        self.tokens.get(self.pos).map_or_else(
            || TextRange::empty(TextSize::from(self.source.len() as u32)),
            |t| t.span,
        )
    }

    /// End of the last consumed token.
    fn prev_end(&self) -> TextSize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(TextSize::from(0), |t| t.span.end())
    }

    fn span_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_end().max(start))
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    fn found(&self) -> String {
        match self.tokens.get(self.pos) {
            Some(t) if t.kind == TokenKind::Garbage => format!("found `{}`", self.text(t)),
            Some(t) => format!("found {}", t.kind.describe()),
            None => "found end of input".to_owned(),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            return self.bump();
        }
        if self.at(TokenKind::Garbage) {
            self.diagnostics
                .report(DiagnosticKind::InvalidCharacters, self.current_span())
                .emit();
            return None;
        }
        let detail = format!("expected {}, {}", kind.describe(), self.found());
        self.diagnostics
            .report(DiagnosticKind::ExpectedToken, self.current_span())
            .message(detail)
            .emit();
        None
    }

    /// Skip past the next `;`, or to end of input.
    fn recover(&mut self) {
        while let Some(token) = self.bump() {
            if token.kind == TokenKind::Semicolon {
                return;
            }
        }
    }

    fn program(&mut self) -> Program {
        let mut stmts = Vec::new();
        while self.current().is_some() {
            let before = self.pos;
            match self.stmt() {
                Some(stmt) => stmts.push(stmt),
                None => {
                    if self.pos == before {
                        self.bump();
                    }
                    self.recover();
                }
            }
        }
        Program { stmts }
    }

    fn stmt(&mut self) -> Option<Stmt> {
        let start = self.current_span().start();
        match self.current() {
            Some(TokenKind::KwBind) => {
                self.bump();
                let name = match self.current() {
                    Some(TokenKind::Ident) => self.bump()?,
                    _ => {
                        let found = self.found();
                        self.diagnostics
                            .report(DiagnosticKind::ExpectedIdentifier, self.current_span())
                            .message(found)
                            .emit();
                        return None;
                    }
                };
                self.expect(TokenKind::Assign)?;
                let value = self.expr()?;
                self.expect(TokenKind::Semicolon)?;
                Some(Stmt::Bind {
                    name: self.text(&name).to_owned(),
                    name_span: name.span,
                    value,
                    span: self.span_from(start),
                })
            }
            Some(TokenKind::KwPrint) => {
                self.bump();
                let value = self.expr()?;
                self.expect(TokenKind::Semicolon)?;
                Some(Stmt::Print {
                    value,
                    span: self.span_from(start),
                })
            }
            Some(TokenKind::Garbage) => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidCharacters, self.current_span())
                    .emit();
                None
            }
            _ => {
                let detail = format!("expected `bind` or `print`, {}", self.found());
                self.diagnostics
                    .report(DiagnosticKind::UnexpectedToken, self.current_span())
                    .message(detail)
                    .emit();
                None
            }
        }
    }

    fn expr(&mut self) -> Option<Expr> {
        if self.depth >= MAX_DEPTH {
            self.diagnostics
                .report(DiagnosticKind::NestingTooDeep, self.current_span())
                .emit();
            return None;
        }
        self.depth += 1;
        let expr = self.concat();
        self.depth -= 1;
        expr
    }

    fn concat(&mut self) -> Option<Expr> {
        let mut lhs = self.intersect()?;
        while self.eat(TokenKind::OrOr) {
            let rhs = self.intersect()?;
            lhs = binary(BinaryOp::Concat, lhs, rhs);
        }
        Some(lhs)
    }

    fn intersect(&mut self) -> Option<Expr> {
        let mut lhs = self.comparison()?;
        while self.eat(TokenKind::AndAnd) {
            let rhs = self.comparison()?;
            lhs = binary(BinaryOp::Intersect, lhs, rhs);
        }
        Some(lhs)
    }

    fn comparison(&mut self) -> Option<Expr> {
        let lhs = self.primary()?;
        let op = match self.current() {
            Some(TokenKind::EqEq) => BinaryOp::Eq,
            Some(TokenKind::NotEq) => BinaryOp::Ne,
            Some(TokenKind::KwIn) => BinaryOp::In,
            _ => return Some(lhs),
        };
        self.bump();
        let rhs = self.primary()?;
        Some(binary(op, lhs, rhs))
    }

    fn primary(&mut self) -> Option<Expr> {
        let span = self.current_span();
        match self.current() {
            Some(TokenKind::Str) => {
                let token = self.bump()?;
                Some(Expr::new(ExprKind::Str(unescape(self.text(&token))), span))
            }
            Some(TokenKind::Int) => {
                let token = self.bump()?;
                match self.text(&token).parse::<i64>() {
                    Ok(n) => Some(Expr::new(ExprKind::Int(n), span)),
                    Err(_) => {
                        self.diagnostics
                            .report(DiagnosticKind::InvalidInteger, span)
                            .emit();
                        None
                    }
                }
            }
            Some(TokenKind::KwTrue) => {
                self.bump();
                Some(Expr::new(ExprKind::Bool(true), span))
            }
            Some(TokenKind::KwFalse) => {
                self.bump();
                Some(Expr::new(ExprKind::Bool(false), span))
            }
            Some(TokenKind::BraceOpen) => self.set_literal(),
            Some(TokenKind::ParenOpen) => self.parenthesized(),
            Some(TokenKind::KwLam) => self.lambda(),
            Some(TokenKind::Ident) => {
                let token = self.bump()?;
                let name = self.text(&token);
                if self.at(TokenKind::ParenOpen) {
                    return self.call(name, token.span);
                }
                Some(Expr::new(ExprKind::Var(name.to_owned()), span))
            }
            Some(TokenKind::Garbage) => {
                self.diagnostics
                    .report(DiagnosticKind::InvalidCharacters, span)
                    .emit();
                None
            }
            _ => {
                let found = self.found();
                self.diagnostics
                    .report(DiagnosticKind::ExpectedExpression, span)
                    .message(found)
                    .emit();
                None
            }
        }
    }

    fn parenthesized(&mut self) -> Option<Expr> {
        let open = self.current_span();
        self.bump();
        let inner = self.expr()?;
        if !self.eat(TokenKind::ParenClose) {
            self.diagnostics
                .report(DiagnosticKind::UnclosedParen, self.current_span())
                .related_to("opened here", open)
                .emit();
            return None;
        }
        Some(Expr::new(inner.kind, self.span_from(open.start())))
    }

    fn set_literal(&mut self) -> Option<Expr> {
        let open = self.current_span();
        self.bump();
        let mut elements = Vec::new();
        if !self.at(TokenKind::BraceClose) {
            loop {
                elements.push(self.expr()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        if !self.eat(TokenKind::BraceClose) {
            self.diagnostics
                .report(DiagnosticKind::UnclosedBrace, self.current_span())
                .related_to("opened here", open)
                .emit();
            return None;
        }
        Some(Expr::new(ExprKind::Set(elements), self.span_from(open.start())))
    }

    /// `lam (param) -> { body }`
    fn lambda(&mut self) -> Option<Expr> {
        let start = self.current_span().start();
        self.bump();
        self.expect(TokenKind::ParenOpen)?;
        let param = match self.current() {
            Some(TokenKind::Ident) => {
                let token = self.bump()?;
                self.text(&token).to_owned()
            }
            _ => {
                let found = self.found();
                self.diagnostics
                    .report(DiagnosticKind::ExpectedIdentifier, self.current_span())
                    .message(found)
                    .emit();
                return None;
            }
        };
        self.expect(TokenKind::ParenClose)?;
        self.expect(TokenKind::Arrow)?;
        let open = self.expect(TokenKind::BraceOpen)?;
        let body = self.expr()?;
        if !self.eat(TokenKind::BraceClose) {
            self.diagnostics
                .report(DiagnosticKind::UnclosedBrace, self.current_span())
                .related_to("opened here", open.span)
                .emit();
            return None;
        }
        let lambda = Lambda { param, body };
        Some(Expr::new(
            ExprKind::Lambda(Rc::new(lambda)),
            self.span_from(start),
        ))
    }

    fn call(&mut self, name: &str, name_span: TextRange) -> Option<Expr> {
        let Some(builtin) = Builtin::from_name(name) else {
            self.diagnostics
                .report(DiagnosticKind::UnboundVariable, name_span)
                .message(format!("no function named `{name}`"))
                .emit();
            return None;
        };

        let open = self.current_span();
        self.bump();
        let mut args = Vec::new();
        if !self.at(TokenKind::ParenClose) {
            loop {
                args.push(self.expr()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        if !self.eat(TokenKind::ParenClose) {
            self.diagnostics
                .report(DiagnosticKind::UnclosedParen, self.current_span())
                .related_to("opened here", open)
                .emit();
            return None;
        }

        let span = self.span_from(name_span.start());
        if args.len() != builtin.arity() {
            let detail = format!(
                "`{}` takes {} argument{}, found {}",
                builtin.name(),
                builtin.arity(),
                if builtin.arity() == 1 { "" } else { "s" },
                args.len()
            );
            self.diagnostics
                .report(DiagnosticKind::ExpectedToken, span)
                .message(detail)
                .emit();
            return None;
        }
        Some(Expr::new(ExprKind::Call { builtin, args }, span))
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.cover(rhs.span);
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}
