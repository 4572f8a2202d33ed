//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;
use super::Span;

/// Fatal front-end error with source location.
///
/// Lexical and syntax errors stop the run; semantic problems never show up
/// here, they go to the analyzer's diagnostic log instead.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexer error at {span:?}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span:?}: {message}")]
    Parser { message: String, span: Span },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lexer { span, .. } | CompileError::Parser { span, .. } => Some(*span),
            CompileError::Io(_) => None,
        }
    }

    /// The line written to the output file for this error, e.g. `Linha 3: erro sintatico proximo a fim_se`
    pub fn output_line(&self) -> String {
        match self {
            CompileError::Lexer { message, span } | CompileError::Parser { message, span }
                if span.has_position() =>
            {
                format!("Linha {}: {}", span.line, message)
            }
            CompileError::Lexer { message, .. } | CompileError::Parser { message, .. } => {
                format!("Error: {}", message)
            }
            CompileError::Io(err) => format!("Error: {}", err),
        }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic reporter for pretty error output on stderr
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report_error(&self, file_id: usize, error: &CompileError) {
        let diagnostic = match error {
            CompileError::Lexer { message, span } => Diagnostic::error()
                .with_message("Lexer error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CompileError::Parser { message, span } => Diagnostic::error()
                .with_message("Syntax error")
                .with_labels(vec![
                    Label::primary(file_id, span.start..span.end).with_message(message)
                ]),

            CompileError::Io(err) => {
                Diagnostic::error().with_message(format!("IO error: {}", err))
            }
        };

        self.emit(&diagnostic);
    }

    /// Report a semantic diagnostic; spans without a position are reported without a label.
    pub fn report_semantic(&self, file_id: usize, message: &str, span: Option<Span>) {
        let mut diagnostic = Diagnostic::error().with_message("Semantic error");
        diagnostic = match span {
            Some(span) => diagnostic.with_labels(vec![
                Label::primary(file_id, span.start..span.end).with_message(message)
            ]),
            None => diagnostic.with_notes(vec![message.to_string()]),
        };
        self.emit(&diagnostic);
    }

    fn emit(&self, diagnostic: &Diagnostic<usize>) {
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_line_with_position() {
        let err = CompileError::parser(
            "erro sintatico proximo a fim_se",
            Span::new(10, 16).with_position(4, 2),
        );
        assert_eq!(err.output_line(), "Linha 4: erro sintatico proximo a fim_se");
    }

    #[test]
    fn test_output_line_without_position() {
        let err = CompileError::lexer("comentario nao fechado", Span::default());
        assert_eq!(err.output_line(), "Error: comentario nao fechado");
    }

    #[test]
    fn test_span_of_front_end_errors() {
        let span = Span::new(3, 5).with_position(1, 4);
        assert_eq!(CompileError::lexer("x", span).span(), Some(span));

        let io = CompileError::from(std::io::Error::other("disco"));
        assert_eq!(io.span(), None);
    }
}
