//! Typed script AST.
//!
//! Every node carries the span it was parsed from so evaluation errors can
//! point back into the source.

use std::rc::Rc;

use rowan::TextRange;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `bind name = value;`
    Bind {
        name: String,
        name_span: TextRange,
        value: Expr,
        span: TextRange,
    },
    /// `print value;`
    Print { value: Expr, span: TextRange },
}

impl Stmt {
    pub fn span(&self) -> TextRange {
        match self {
            Stmt::Bind { span, .. } | Stmt::Print { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: TextRange,
}

impl Expr {
    pub fn new(kind: ExprKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Str(String),
    Int(i64),
    Bool(bool),
    Set(Vec<Expr>),
    Var(String),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        builtin: Builtin,
        args: Vec<Expr>,
    },
    Lambda(Rc<Lambda>),
}

/// `lam (param) -> { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lambda {
    pub param: String,
    pub body: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `||`
    Concat,
    /// `&&`
    Intersect,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `in`
    In,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Concat => "||",
            BinaryOp::Intersect => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::In => "in",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Load,
    SetStart,
    SetFinal,
    AddStart,
    AddFinal,
    GetStart,
    GetFinal,
    GetReachable,
    GetVertices,
    GetEdges,
    GetLabels,
    Map,
    Filter,
}

impl Builtin {
    pub const ALL: [Builtin; 13] = [
        Builtin::Load,
        Builtin::SetStart,
        Builtin::SetFinal,
        Builtin::AddStart,
        Builtin::AddFinal,
        Builtin::GetStart,
        Builtin::GetFinal,
        Builtin::GetReachable,
        Builtin::GetVertices,
        Builtin::GetEdges,
        Builtin::GetLabels,
        Builtin::Map,
        Builtin::Filter,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Load => "load",
            Builtin::SetStart => "setStart",
            Builtin::SetFinal => "setFinal",
            Builtin::AddStart => "addStart",
            Builtin::AddFinal => "addFinal",
            Builtin::GetStart => "getStart",
            Builtin::GetFinal => "getFinal",
            Builtin::GetReachable => "getReachable",
            Builtin::GetVertices => "getVertices",
            Builtin::GetEdges => "getEdges",
            Builtin::GetLabels => "getLabels",
            Builtin::Map => "map",
            Builtin::Filter => "filter",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Builtin::Load
            | Builtin::GetStart
            | Builtin::GetFinal
            | Builtin::GetReachable
            | Builtin::GetVertices
            | Builtin::GetEdges
            | Builtin::GetLabels => 1,
            Builtin::SetStart
            | Builtin::SetFinal
            | Builtin::AddStart
            | Builtin::AddFinal
            | Builtin::Map
            | Builtin::Filter => 2,
        }
    }
}
