//! Type model: the closed set of LA value types, compatibility and promotion

use crate::frontend::ast::BasicType;
use std::collections::HashMap;
use std::fmt;

/// Field name to field type; every record-typed variable owns its own copy.
pub type FieldMap = HashMap<String, JanderType>;

/// Type of an LA value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JanderType {
    Literal,
    Integer,
    Real,
    Logical,
    Pointer,
    Record,
    /// No type could be determined. Incompatible with everything, itself included.
    Invalid,
}

impl JanderType {
    pub fn is_numeric(self) -> bool {
        matches!(self, JanderType::Integer | JanderType::Real)
    }

    pub fn is_valid(self) -> bool {
        self != JanderType::Invalid
    }

    /// Whether a value of type `source` cannot be stored into a `target`.
    pub fn incompatible(target: JanderType, source: JanderType) -> bool {
        use JanderType::*;

        match (target, source) {
            (Invalid, _) | (_, Invalid) => true,
            (Pointer, Pointer) => false,
            (Pointer, _) | (_, Pointer) => true,
            (t, s) if t.is_numeric() && s.is_numeric() => false,
            (t, s) => t != s,
        }
    }

    /// Result type of an arithmetic operation on two numeric operands.
    pub fn promote(left: JanderType, right: JanderType) -> JanderType {
        use JanderType::*;

        match (left, right) {
            (Integer, Integer) => Integer,
            (Real, Real | Integer) | (Integer, Real) => Real,
            _ => Invalid,
        }
    }
}

impl From<BasicType> for JanderType {
    fn from(basic: BasicType) -> Self {
        match basic {
            BasicType::Literal => JanderType::Literal,
            BasicType::Integer => JanderType::Integer,
            BasicType::Real => JanderType::Real,
            BasicType::Logical => JanderType::Logical,
        }
    }
}

/// Upper-case tags, as quoted in diagnostics
impl fmt::Display for JanderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JanderType::Literal => "LITERAL",
            JanderType::Integer => "INTEGER",
            JanderType::Real => "REAL",
            JanderType::Logical => "LOGICAL",
            JanderType::Pointer => "POINTER",
            JanderType::Record => "RECORD",
            JanderType::Invalid => "INVALID",
        })
    }
}
