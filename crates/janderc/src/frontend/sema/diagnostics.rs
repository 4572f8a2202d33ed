//! Ordered log of semantic diagnostics

use crate::common::Span;
use std::fmt;

/// Terminator written after the diagnostics once analysis completes
pub const END_OF_COMPILATION: &str = "Fim da compilacao";

/// A single semantic error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Option<Span>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) if span.has_position() => write!(f, "Linha {}: {}", span.line, self.message),
            _ => write!(f, "Error: {}", self.message),
        }
    }
}

/// Append-only while the analyzer runs; read through `diagnostics` or `lines` afterwards.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, span: Span, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            span: Some(span),
            message: message.into(),
        };
        tracing::debug!(%diagnostic, "semantic error");
        self.entries.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Formatted lines, in the order they were recorded
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut log = DiagnosticLog::new();
        log.push(Span::new(10, 11).with_position(4, 2), "identificador y nao declarado");
        log.push(Span::new(0, 1).with_position(2, 1), "Tipo T já declarado");

        assert_eq!(
            log.lines(),
            vec![
                "Linha 4: identificador y nao declarado".to_string(),
                "Linha 2: Tipo T já declarado".to_string(),
            ]
        );
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_missing_position_renders_error_prefix() {
        let diagnostic = Diagnostic {
            span: None,
            message: "sem posicao".to_string(),
        };
        assert_eq!(diagnostic.to_string(), "Error: sem posicao");

        let mut log = DiagnosticLog::new();
        log.push(Span::new(3, 4), "sem linha");
        assert_eq!(log.lines(), vec!["Error: sem linha".to_string()]);
    }
}
