//! Declaration AST nodes

use super::{BasicType, Block, ExtendedType, Ident, Identifier, TypeSpec};
use crate::common::Span;

/// Declaration node
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclKind,
    pub span: Span,
}

impl Declaration {
    pub fn new(kind: DeclKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Declaration kinds
#[derive(Debug, Clone)]
pub enum DeclKind {
    /// `declare a, b : inteiro`
    Variable(VarDecl),

    /// `constante PI : real = 3.14`
    Constant(ConstDecl),

    /// `tipo Ponto : registro ... fim_registro`
    Type(TypeDecl),

    /// `procedimento` / `funcao` (global only)
    Routine(RoutineDecl),
}

/// Variable declaration; also used for record fields
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub names: Vec<Identifier>,
    pub ty: TypeSpec,
    pub span: Span,
}

impl VarDecl {
    pub fn new(names: Vec<Identifier>, ty: TypeSpec, span: Span) -> Self {
        Self { names, ty, span }
    }
}

/// Constant declaration
#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub name: Ident,
    pub ty: BasicType,
    pub value: ConstValue,
    pub span: Span,
}

/// Literal value of a constant, kept as written
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    String(String),
    Int(String),
    Real(String),
    Bool(bool),
}

/// Named type declaration
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: Ident,
    pub ty: TypeSpec,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineKind {
    Procedure,
    Function,
}

/// Procedure or function definition
#[derive(Debug, Clone)]
pub struct RoutineDecl {
    pub kind: RoutineKind,
    pub name: Ident,
    pub params: Vec<ParamGroup>,
    /// Present for functions only
    pub return_type: Option<ExtendedType>,
    pub body: Block,
    pub span: Span,
}

impl RoutineDecl {
    pub fn is_function(&self) -> bool {
        self.kind == RoutineKind::Function
    }
}

/// `var? a, b : tipo_estendido`
#[derive(Debug, Clone)]
pub struct ParamGroup {
    pub by_ref: bool,
    pub names: Vec<Ident>,
    pub ty: ExtendedType,
    pub span: Span,
}
