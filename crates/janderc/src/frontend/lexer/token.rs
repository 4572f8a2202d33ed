//! Token definitions for the LA lexer

use crate::common::Span;
use logos::Logos;

/// Token with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// All token kinds in LA
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]  // Skip whitespace
#[logos(skip r"\{[^}\n\r]*\}")] // Skip single-line comments
pub enum TokenKind {
    // === Keywords ===
    #[token("algoritmo")]
    Algoritmo,
    #[token("fim_algoritmo")]
    FimAlgoritmo,
    #[token("declare")]
    Declare,
    #[token("constante")]
    Constante,
    #[token("tipo")]
    Tipo,
    #[token("literal")]
    Literal,
    #[token("inteiro")]
    Inteiro,
    #[token("real")]
    Real,
    #[token("logico")]
    Logico,
    #[token("verdadeiro")]
    Verdadeiro,
    #[token("falso")]
    Falso,
    #[token("registro")]
    Registro,
    #[token("fim_registro")]
    FimRegistro,
    #[token("procedimento")]
    Procedimento,
    #[token("fim_procedimento")]
    FimProcedimento,
    #[token("funcao")]
    Funcao,
    #[token("fim_funcao")]
    FimFuncao,
    #[token("var")]
    Var,
    #[token("leia")]
    Leia,
    #[token("escreva")]
    Escreva,
    #[token("se")]
    Se,
    #[token("entao")]
    Entao,
    #[token("senao")]
    Senao,
    #[token("fim_se")]
    FimSe,
    #[token("caso")]
    Caso,
    #[token("seja")]
    Seja,
    #[token("fim_caso")]
    FimCaso,
    #[token("para")]
    Para,
    #[token("ate")]
    Ate,
    #[token("faca")]
    Faca,
    #[token("fim_para")]
    FimPara,
    #[token("enquanto")]
    Enquanto,
    #[token("fim_enquanto")]
    FimEnquanto,
    #[token("retorne")]
    Retorne,
    #[token("nao")]
    Nao,
    #[token("e", priority = 3)]
    E,
    #[token("ou")]
    Ou,

    // === Identifiers ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // === Literals ===
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    NumInt(String),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().to_string())]
    NumReal(String),

    /// String literal, quotes included
    #[regex(r#""[^"\n\r]*""#, |lex| lex.slice().to_string())]
    Cadeia(String),

    // === Unterminated constructs (reported by the scanner) ===
    #[regex(r#""[^"\n\r]*"#)]
    UnclosedCadeia,
    #[regex(r"\{[^}\n\r]*")]
    UnclosedComment,

    // === Operators and punctuation ===
    #[token("<-")]
    Assign,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Eq,
    #[token("<>")]
    NotEq,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,

    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if this token names a basic type
    pub fn is_basic_type(&self) -> bool {
        matches!(
            self,
            TokenKind::Literal | TokenKind::Inteiro | TokenKind::Real | TokenKind::Logico
        )
    }

    /// Check if this token can start a command
    pub fn can_start_command(&self) -> bool {
        matches!(
            self,
            TokenKind::Leia
                | TokenKind::Escreva
                | TokenKind::Se
                | TokenKind::Caso
                | TokenKind::Para
                | TokenKind::Enquanto
                | TokenKind::Faca
                | TokenKind::Caret
                | TokenKind::Ident(_)
                | TokenKind::Retorne
        )
    }

    /// Check if this token can start a local declaration
    pub fn can_start_local_declaration(&self) -> bool {
        matches!(self, TokenKind::Declare | TokenKind::Constante | TokenKind::Tipo)
    }

    pub fn is_relational_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::GtEq
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::Lt
        )
    }
}

/// Renders the token the way it appears in source; syntax errors quote this text.
impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TokenKind::Ident(s) | TokenKind::NumInt(s) | TokenKind::NumReal(s) | TokenKind::Cadeia(s) => {
                return write!(f, "{}", s);
            }
            TokenKind::Algoritmo => "algoritmo",
            TokenKind::FimAlgoritmo => "fim_algoritmo",
            TokenKind::Declare => "declare",
            TokenKind::Constante => "constante",
            TokenKind::Tipo => "tipo",
            TokenKind::Literal => "literal",
            TokenKind::Inteiro => "inteiro",
            TokenKind::Real => "real",
            TokenKind::Logico => "logico",
            TokenKind::Verdadeiro => "verdadeiro",
            TokenKind::Falso => "falso",
            TokenKind::Registro => "registro",
            TokenKind::FimRegistro => "fim_registro",
            TokenKind::Procedimento => "procedimento",
            TokenKind::FimProcedimento => "fim_procedimento",
            TokenKind::Funcao => "funcao",
            TokenKind::FimFuncao => "fim_funcao",
            TokenKind::Var => "var",
            TokenKind::Leia => "leia",
            TokenKind::Escreva => "escreva",
            TokenKind::Se => "se",
            TokenKind::Entao => "entao",
            TokenKind::Senao => "senao",
            TokenKind::FimSe => "fim_se",
            TokenKind::Caso => "caso",
            TokenKind::Seja => "seja",
            TokenKind::FimCaso => "fim_caso",
            TokenKind::Para => "para",
            TokenKind::Ate => "ate",
            TokenKind::Faca => "faca",
            TokenKind::FimPara => "fim_para",
            TokenKind::Enquanto => "enquanto",
            TokenKind::FimEnquanto => "fim_enquanto",
            TokenKind::Retorne => "retorne",
            TokenKind::Nao => "nao",
            TokenKind::E => "e",
            TokenKind::Ou => "ou",
            TokenKind::UnclosedCadeia => "\"",
            TokenKind::UnclosedComment => "{",
            TokenKind::Assign => "<-",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Caret => "^",
            TokenKind::Amp => "&",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "=",
            TokenKind::NotEq => "<>",
            TokenKind::GtEq => ">=",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::Lt => "<",
            TokenKind::Eof => "EOF",
        };
        f.write_str(text)
    }
}
