//! Parser module for building the LA AST

mod parser;

pub use parser::Parser;
