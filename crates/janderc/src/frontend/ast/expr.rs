//! Expression AST nodes
//!
//! The expression grammar is layered, lowest precedence first:
//! `ou` > `e` > `nao` > relational > `+ -` > `* /` > `%` > unary `-` > primary.
//! Each layer is a separate node so the analyzer can apply the typing rule
//! of that layer.

use super::write_joined;
use crate::common::Span;
use std::fmt;

/// A plain name with its location
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An operator token and where it appeared
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operator<K> {
    pub kind: K,
    pub span: Span,
}

impl<K> Operator<K> {
    pub fn new(kind: K, span: Span) -> Self {
        Self { kind, span }
    }
}

impl<K: fmt::Display> fmt::Display for Operator<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    NotEq,
    GtEq,
    LtEq,
    Gt,
    Lt,
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelOp::Eq => "=",
            RelOp::NotEq => "<>",
            RelOp::GtEq => ">=",
            RelOp::LtEq => "<=",
            RelOp::Gt => ">",
            RelOp::Lt => "<",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

impl fmt::Display for AddOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AddOp::Add => "+",
            AddOp::Sub => "-",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

impl fmt::Display for MulOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MulOp::Mul => "*",
            MulOp::Div => "/",
        })
    }
}

/// `expressao`: logical terms joined by `ou`
#[derive(Debug, Clone)]
pub struct Expr {
    pub terms: Vec<LogicalTerm>,
    pub span: Span,
}

impl Expr {
    pub fn new(terms: Vec<LogicalTerm>, span: Span) -> Self {
        Self { terms, span }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.terms, "ou")
    }
}

/// `termo_logico`: logical factors joined by `e`
#[derive(Debug, Clone)]
pub struct LogicalTerm {
    pub factors: Vec<LogicalFactor>,
    pub span: Span,
}

impl LogicalTerm {
    pub fn new(factors: Vec<LogicalFactor>, span: Span) -> Self {
        Self { factors, span }
    }
}

impl fmt::Display for LogicalTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.factors, "e")
    }
}

/// `fator_logico`: optional `nao` before a logical parcel
#[derive(Debug, Clone)]
pub struct LogicalFactor {
    pub negated: bool,
    pub parcel: LogicalParcel,
    pub span: Span,
}

impl LogicalFactor {
    pub fn new(negated: bool, parcel: LogicalParcel, span: Span) -> Self {
        Self { negated, parcel, span }
    }
}

impl fmt::Display for LogicalFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("nao")?;
        }
        write!(f, "{}", self.parcel)
    }
}

/// `parcela_logica`
#[derive(Debug, Clone)]
pub enum LogicalParcel {
    /// `verdadeiro` / `falso`
    Bool(bool),
    Relational(RelationalExpr),
}

impl fmt::Display for LogicalParcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalParcel::Bool(true) => f.write_str("verdadeiro"),
            LogicalParcel::Bool(false) => f.write_str("falso"),
            LogicalParcel::Relational(rel) => write!(f, "{}", rel),
        }
    }
}

/// `exp_relacional`: an arithmetic expression, optionally compared with another
#[derive(Debug, Clone)]
pub struct RelationalExpr {
    pub left: ArithExpr,
    pub comparison: Option<(Operator<RelOp>, ArithExpr)>,
    pub span: Span,
}

impl RelationalExpr {
    pub fn new(left: ArithExpr, comparison: Option<(Operator<RelOp>, ArithExpr)>, span: Span) -> Self {
        Self { left, comparison, span }
    }
}

impl fmt::Display for RelationalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.left)?;
        if let Some((op, right)) = &self.comparison {
            write!(f, "{}{}", op, right)?;
        }
        Ok(())
    }
}

/// `exp_aritmetica`: terms joined by `+` / `-`
#[derive(Debug, Clone)]
pub struct ArithExpr {
    pub first: Term,
    pub rest: Vec<(Operator<AddOp>, Term)>,
    pub span: Span,
}

impl ArithExpr {
    pub fn new(first: Term, rest: Vec<(Operator<AddOp>, Term)>, span: Span) -> Self {
        Self { first, rest, span }
    }
}

impl fmt::Display for ArithExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for (op, term) in &self.rest {
            write!(f, "{}{}", op, term)?;
        }
        Ok(())
    }
}

/// `termo`: factors joined by `*` / `/`
#[derive(Debug, Clone)]
pub struct Term {
    pub first: Factor,
    pub rest: Vec<(Operator<MulOp>, Factor)>,
    pub span: Span,
}

impl Term {
    pub fn new(first: Factor, rest: Vec<(Operator<MulOp>, Factor)>, span: Span) -> Self {
        Self { first, rest, span }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        for (op, factor) in &self.rest {
            write!(f, "{}{}", op, factor)?;
        }
        Ok(())
    }
}

/// `fator`: parcels joined by `%`
#[derive(Debug, Clone)]
pub struct Factor {
    pub parcels: Vec<Parcel>,
    pub span: Span,
}

impl Factor {
    pub fn new(parcels: Vec<Parcel>, span: Span) -> Self {
        Self { parcels, span }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.parcels, "%")
    }
}

/// `parcela`
#[derive(Debug, Clone)]
pub struct Parcel {
    pub kind: ParcelKind,
    pub span: Span,
}

impl Parcel {
    pub fn new(kind: ParcelKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone)]
pub enum ParcelKind {
    /// Optional unary minus before a primary
    Unary { negated: bool, operand: Primary },
    /// `&x` or a string literal; these never take a sign
    NonUnary(NonUnary),
}

impl fmt::Display for Parcel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParcelKind::Unary { negated, operand } => {
                if *negated {
                    f.write_str("-")?;
                }
                write!(f, "{}", operand)
            }
            ParcelKind::NonUnary(non_unary) => write!(f, "{}", non_unary),
        }
    }
}

/// `parcela_unario`
#[derive(Debug, Clone)]
pub struct Primary {
    pub kind: PrimaryKind,
    pub span: Span,
}

impl Primary {
    pub fn new(kind: PrimaryKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone)]
pub enum PrimaryKind {
    /// `^p`
    Deref(Identifier),
    /// `x`, `r.campo`, `v[i]`
    Identifier(Identifier),
    /// Integer literal, kept as written
    IntLiteral(String),
    /// Real literal, kept as written
    RealLiteral(String),
    /// `f(a, b)`
    Call { name: Ident, args: Vec<Expr> },
    /// `(e)`
    Paren(Box<Expr>),
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PrimaryKind::Deref(id) => write!(f, "^{}", id),
            PrimaryKind::Identifier(id) => write!(f, "{}", id),
            PrimaryKind::IntLiteral(text) | PrimaryKind::RealLiteral(text) => f.write_str(text),
            PrimaryKind::Call { name, args } => {
                write!(f, "{}(", name)?;
                write_joined(f, args, ",")?;
                f.write_str(")")
            }
            PrimaryKind::Paren(inner) => write!(f, "({})", inner),
        }
    }
}

/// `parcela_nao_unario`
#[derive(Debug, Clone)]
pub enum NonUnary {
    /// `&x`
    AddressOf(Identifier),
    /// String literal, quotes included
    StringLiteral(String),
}

impl fmt::Display for NonUnary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonUnary::AddressOf(id) => write!(f, "&{}", id),
            NonUnary::StringLiteral(text) => f.write_str(text),
        }
    }
}

/// `identificador`: a name, optional `.field` segments and `[index]` suffixes
#[derive(Debug, Clone)]
pub struct Identifier {
    pub segments: Vec<Ident>,
    pub dimensions: Vec<ArithExpr>,
    pub span: Span,
}

impl Identifier {
    pub fn new(segments: Vec<Ident>, dimensions: Vec<ArithExpr>, span: Span) -> Self {
        Self {
            segments,
            dimensions,
            span,
        }
    }

    /// Plain single-name identifier
    pub fn simple(ident: Ident) -> Self {
        let span = ident.span;
        Self::new(vec![ident], Vec::new(), span)
    }

    /// The leading name; the parser never builds an identifier without one
    pub fn base(&self) -> &Ident {
        &self.segments[0]
    }

    pub fn fields(&self) -> &[Ident] {
        &self.segments[1..]
    }

    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1 && self.dimensions.is_empty()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.segments, ".")?;
        for dim in &self.dimensions {
            write!(f, "[{}]", dim)?;
        }
        Ok(())
    }
}
