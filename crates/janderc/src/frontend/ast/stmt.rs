//! Statement AST nodes

use super::{ArithExpr, Expr, Ident, Identifier};
use crate::common::Span;

/// Statement node
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Statement kinds
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `leia(x, ^p, r.campo)`
    Read(Vec<ReadTarget>),

    /// `escreva(e1, e2)`
    Write(Vec<Expr>),

    /// `se c entao ... senao ... fim_se`
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },

    /// `caso e seja 1..3: ... senao ... fim_caso`
    Case {
        selector: ArithExpr,
        arms: Vec<CaseArm>,
        default: Option<Vec<Stmt>>,
    },

    /// `para i <- a ate b faca ... fim_para`
    For {
        variable: Ident,
        start: ArithExpr,
        end: ArithExpr,
        body: Vec<Stmt>,
    },

    /// `enquanto c faca ... fim_enquanto`
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },

    /// `faca ... ate c`
    DoUntil {
        body: Vec<Stmt>,
        condition: Expr,
    },

    /// `[^]alvo <- e`
    Assign {
        deref: bool,
        target: Identifier,
        value: Expr,
    },

    /// `p(a, b)`
    Call {
        name: Ident,
        args: Vec<Expr>,
    },

    /// `retorne e`
    Return(Expr),
}

/// One argument of `leia`
#[derive(Debug, Clone)]
pub struct ReadTarget {
    pub deref: bool,
    pub target: Identifier,
}

/// `constantes : comandos` inside `caso`
#[derive(Debug, Clone)]
pub struct CaseArm {
    pub labels: Vec<CaseLabel>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A single value or an inclusive range (`1..5`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseLabel {
    pub start: i64,
    pub end: Option<i64>,
    pub span: Span,
}
