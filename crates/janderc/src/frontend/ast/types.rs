//! Type descriptors as written in declarations

use super::{Ident, VarDecl};
use crate::common::Span;
use std::fmt;

/// Built-in scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicType {
    Literal,
    Integer,
    Real,
    Logical,
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BasicType::Literal => "literal",
            BasicType::Integer => "inteiro",
            BasicType::Real => "real",
            BasicType::Logical => "logico",
        })
    }
}

/// A basic type or the name of a declared type
#[derive(Debug, Clone, PartialEq)]
pub enum TypeName {
    Basic(BasicType),
    Named(Ident),
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Basic(basic) => write!(f, "{}", basic),
            TypeName::Named(ident) => write!(f, "{}", ident),
        }
    }
}

/// `^`? followed by a basic type or a type name (`tipo_estendido`)
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedType {
    pub pointer: bool,
    pub name: TypeName,
    pub span: Span,
}

impl ExtendedType {
    pub fn new(pointer: bool, name: TypeName, span: Span) -> Self {
        Self { pointer, name, span }
    }
}

impl fmt::Display for ExtendedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer {
            f.write_str("^")?;
        }
        write!(f, "{}", self.name)
    }
}

/// Any type position of a `declare` or `tipo` declaration
#[derive(Debug, Clone)]
pub enum TypeSpec {
    Extended(ExtendedType),
    Record(RecordSpec),
}

impl TypeSpec {
    pub fn span(&self) -> Span {
        match self {
            TypeSpec::Extended(ext) => ext.span,
            TypeSpec::Record(rec) => rec.span,
        }
    }
}

/// Anonymous record: `registro <fields> fim_registro`
#[derive(Debug, Clone)]
pub struct RecordSpec {
    pub fields: Vec<VarDecl>,
    pub span: Span,
}

impl RecordSpec {
    pub fn new(fields: Vec<VarDecl>, span: Span) -> Self {
        Self { fields, span }
    }
}
