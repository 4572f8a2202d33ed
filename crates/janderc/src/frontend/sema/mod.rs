//! Semantic analysis module
//!
//! Scope resolution and type inference over the LA syntax tree. Problems are
//! collected in a `DiagnosticLog`; none of them stops the analysis.

mod analyzer;
mod decl;
mod diagnostics;
mod expr;
mod scope;
mod stmt;
mod types;

pub use analyzer::SemanticAnalyzer;
pub use diagnostics::{Diagnostic, DiagnosticLog, END_OF_COMPILATION};
pub use expr::EvalContext;
pub use scope::{Symbol, SymbolEntry, SymbolKind, SymbolTable};
pub use types::{FieldMap, JanderType};
