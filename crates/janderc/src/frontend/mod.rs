//! LA frontend
//!
//! The frontend runs the whole analysis for one source file:
//! 1. Lexing source code into tokens
//! 2. Parsing tokens into an AST
//! 3. Semantic analysis, collecting diagnostics

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod sema;

use crate::common::{CompileResult, DiagnosticReporter};

pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use sema::{DiagnosticLog, SemanticAnalyzer};

/// Configuration options passed to the frontend
#[derive(Debug, Clone, Default)]
pub struct FrontendConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    /// Also render semantic diagnostics through the reporter
    pub verbose: bool,
}

/// Compilation context providing access to diagnostics and file info
pub struct CompileContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> CompileContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self {
            filename,
            file_id,
            reporter,
        }
    }
}

/// Frontend for LA source files
#[derive(Debug, Default)]
pub struct JanderFrontend;

impl JanderFrontend {
    pub fn new() -> Self {
        Self
    }

    /// Lex, parse and analyze `source`.
    ///
    /// Lexical and syntax errors are reported and returned; semantic errors
    /// come back in the log.
    pub fn analyze(
        &self,
        source: &str,
        ctx: &CompileContext,
        config: &FrontendConfig,
    ) -> CompileResult<DiagnosticLog> {
        let _span = tracing::info_span!("frontend", file = %ctx.filename).entered();

        if config.dump_tokens {
            match Lexer::new(source).tokenize_all() {
                Ok(tokens) => {
                    eprintln!("=== LA Tokens ===");
                    for token in &tokens {
                        eprintln!("{:?}", token);
                    }
                    eprintln!("=== End Tokens ===\n");
                }
                Err(e) => {
                    ctx.reporter.report_error(ctx.file_id, &e);
                    return Err(e);
                }
            }
        }

        tracing::info!("parsing");
        let program = match Parser::new(source).and_then(|mut parser| parser.parse()) {
            Ok(program) => program,
            Err(e) => {
                ctx.reporter.report_error(ctx.file_id, &e);
                return Err(e);
            }
        };

        if config.dump_ast {
            eprintln!("=== LA AST ===");
            eprintln!("{:#?}", program);
            eprintln!("=== End AST ===\n");
        }

        tracing::info!("semantic analysis");
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&program);
        let log = analyzer.into_diagnostics();

        if config.verbose {
            for diagnostic in log.diagnostics() {
                ctx.reporter
                    .report_semantic(ctx.file_id, &diagnostic.message, diagnostic.span);
            }
        }

        Ok(log)
    }
}
