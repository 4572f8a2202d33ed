//! Abstract Syntax Tree definitions
//!
//! Every grammar construct is its own node type carrying a [`Span`], and
//! every node renders back to compact source text through `Display`
//! (tokens concatenated without whitespace), which diagnostics quote.

mod types;
mod expr;
mod stmt;
mod decl;

pub use types::*;
pub use expr::*;
pub use stmt::*;
pub use decl::*;

use crate::common::Span;

/// A complete LA program: global declarations followed by the `algoritmo` body
#[derive(Debug, Clone)]
pub struct Program {
    pub declarations: Vec<Declaration>,
    pub body: Block,
    pub span: Span,
}

impl Program {
    pub fn new(declarations: Vec<Declaration>, body: Block, span: Span) -> Self {
        Self { declarations, body, span }
    }
}

/// Local declarations followed by commands (`corpo`)
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn new(declarations: Vec<Declaration>, statements: Vec<Stmt>) -> Self {
        Self { declarations, statements }
    }
}

/// Write `items` separated by `sep`
pub(crate) fn write_joined<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
