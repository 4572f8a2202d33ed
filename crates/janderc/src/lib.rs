//! Jander Compiler - front end for the LA ("Linguagem Algoritmica") teaching language
//!
//! This library lexes, parses and semantically checks LA programs, producing
//! the list of diagnostics a student sees for their program.
//!
//! ## Architecture
//!
//! The compiler is organized into:
//! - **Frontend** (`frontend/`): lexer, parser, AST and semantic analysis
//! - **Driver** (`driver/`): runs the frontend and materializes output lines
//! - **Common** (`common/`): Shared infrastructure (errors, spans)

pub mod common;
pub mod driver;
pub mod frontend;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Span};
pub use driver::{CompileOutput, Pipeline, compile};
pub use frontend::{CompileContext, FrontendConfig, JanderFrontend};
