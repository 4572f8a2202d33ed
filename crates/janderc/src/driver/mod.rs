//! Compilation driver and output materialization

use crate::common::{CompileError, DiagnosticReporter};
use crate::frontend::sema::END_OF_COMPILATION;
use crate::frontend::{CompileContext, DiagnosticLog, FrontendConfig, JanderFrontend};
use std::path::Path;

/// Lines written to the output file: the diagnostics, then the terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    lines: Vec<String>,
}

impl CompileOutput {
    pub fn from_diagnostics(log: &DiagnosticLog) -> Self {
        let mut lines = log.lines();
        lines.push(END_OF_COMPILATION.to_string());
        Self { lines }
    }

    /// A lexical or syntax error replaces the semantic diagnostics entirely
    pub fn from_error(error: &CompileError) -> Self {
        Self {
            lines: vec![error.output_line(), END_OF_COMPILATION.to_string()],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Every line followed by a newline
    pub fn to_text(&self) -> String {
        self.lines.iter().fold(String::new(), |mut text, line| {
            text.push_str(line);
            text.push('\n');
            text
        })
    }

    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_text())
    }
}

/// Runs the frontend and turns its result into output lines
#[derive(Debug, Default)]
pub struct Pipeline {
    frontend: JanderFrontend,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            frontend: JanderFrontend::new(),
        }
    }

    /// Compile one source file. Never fails: every outcome, fatal front-end
    /// errors included, ends up as output lines.
    pub fn compile_source(
        &self,
        source: &str,
        filename: &str,
        config: &FrontendConfig,
        reporter: &DiagnosticReporter,
        file_id: usize,
    ) -> CompileOutput {
        let ctx = CompileContext::new(filename.to_string(), file_id, reporter);
        match self.frontend.analyze(source, &ctx, config) {
            Ok(log) => CompileOutput::from_diagnostics(&log),
            Err(e) => {
                tracing::debug!(error = %e, span = ?e.span(), "front end stopped");
                CompileOutput::from_error(&e)
            }
        }
    }
}

/// Compile `source` with default settings and a private reporter
pub fn compile(source: &str) -> CompileOutput {
    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file("<input>", source);
    Pipeline::new().compile_source(source, "<input>", &FrontendConfig::default(), &reporter, file_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_program_only_has_terminator() {
        let output = compile("algoritmo\n  escreva(\"ola\")\nfim_algoritmo\n");
        assert_eq!(output.lines(), &["Fim da compilacao".to_string()]);
        assert_eq!(output.to_text(), "Fim da compilacao\n");
    }

    #[test]
    fn test_semantic_diagnostics_precede_terminator() {
        let output = compile("declare x: logico\nalgoritmo\n  x <- 3\n  y <- x\nfim_algoritmo\n");
        assert_eq!(
            output.to_text(),
            "Linha 3: atribuicao nao compativel para x\n\
             Linha 4: identificador y nao declarado\n\
             Fim da compilacao\n"
        );
    }

    #[test]
    fn test_syntax_error_replaces_diagnostics() {
        let output = compile("declare x: inteiro\nalgoritmo\n  x <- \nfim_algoritmo\n");
        assert_eq!(
            output.lines(),
            &[
                "Linha 4: erro sintatico proximo a fim_algoritmo".to_string(),
                "Fim da compilacao".to_string(),
            ]
        );
    }

    #[test]
    fn test_lexical_error() {
        let output = compile("algoritmo\n  escreva(\"aberta)\nfim_algoritmo\n");
        assert_eq!(
            output.lines(),
            &[
                "Linha 2: cadeia literal nao fechada".to_string(),
                "Fim da compilacao".to_string(),
            ]
        );
    }

    #[test]
    fn test_write_to_file() {
        let output = compile("algoritmo\n  retorne 1\nfim_algoritmo\n");
        let path = std::env::temp_dir().join(format!("janderc-driver-{}.txt", std::process::id()));

        output.write_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            written,
            "Linha 2: comando retorne nao permitido nesse escopo\nFim da compilacao\n"
        );
    }
}
