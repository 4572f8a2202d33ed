//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult, LineIndex};
use logos::Logos;

/// Lexer for LA source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    lines: LineIndex,
    peeked: Option<Token>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            lines: LineIndex::new(source),
            peeked: None,
            at_eof: false,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CompileResult<Token> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }

        let len = self.inner.source().len();
        if self.at_eof {
            return Ok(Token::new(TokenKind::Eof, self.lines.span(len, len)));
        }

        match self.inner.next() {
            Some(Ok(TokenKind::UnclosedComment)) => {
                let range = self.inner.span();
                Err(CompileError::lexer(
                    "comentario nao fechado",
                    self.lines.span(range.start, range.end),
                ))
            }
            Some(Ok(TokenKind::UnclosedCadeia)) => {
                let range = self.inner.span();
                Err(CompileError::lexer(
                    "cadeia literal nao fechada",
                    self.lines.span(range.start, range.end),
                ))
            }
            Some(Ok(kind)) => {
                let range = self.inner.span();
                Ok(Token::new(kind, self.lines.span(range.start, range.end)))
            }
            Some(Err(())) => {
                let range = self.inner.span();
                Err(CompileError::lexer(
                    format!("{} - simbolo nao identificado", self.inner.slice()),
                    self.lines.span(range.start, range.end),
                ))
            }
            None => {
                self.at_eof = true;
                Ok(Token::new(TokenKind::Eof, self.lines.span(len, len)))
            }
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> CompileResult<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize_all(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}
