//! Symbol table and scope management
//!
//! The table is pure mechanism: callers check `exists_in_current_scope`
//! before declaring and decide which diagnostics to raise.

use super::types::{FieldMap, JanderType};
use std::collections::HashMap;
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// What a name was declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Constant,
    Parameter,
    /// Type name introduced by `tipo`; resolvable in type positions
    Type,
    Routine,
}

/// Shape of a declared name
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolEntry {
    /// Literal, integer, real or logical value
    Scalar(JanderType),
    /// The pointee may be `Invalid` when it could not be resolved
    Pointer { pointee: JanderType },
    Record { fields: FieldMap },
    /// A missing return type marks a procedure
    Routine {
        return_type: Option<JanderType>,
        params: Vec<JanderType>,
    },
}

impl SymbolEntry {
    /// Type of the name when used as a value; routines yield their return type
    pub fn ty(&self) -> JanderType {
        match self {
            SymbolEntry::Scalar(ty) => *ty,
            SymbolEntry::Pointer { .. } => JanderType::Pointer,
            SymbolEntry::Record { .. } => JanderType::Record,
            SymbolEntry::Routine { return_type, .. } => return_type.unwrap_or(JanderType::Invalid),
        }
    }

    /// Type of `field` if this is a record that has it
    pub fn field_type(&self, field: &str) -> Option<JanderType> {
        match self {
            SymbolEntry::Record { fields } => fields.get(field).copied(),
            _ => None,
        }
    }
}

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub entry: SymbolEntry,
}

impl Symbol {
    pub fn new(kind: SymbolKind, entry: SymbolEntry) -> Self {
        Self { kind, entry }
    }

    pub fn ty(&self) -> JanderType {
        self.entry.ty()
    }
}

/// Stack of scope frames; the global frame is never popped
#[derive(Debug)]
pub struct SymbolTable {
    names: DefaultStringInterner,
    scopes: Vec<HashMap<DefaultSymbol, Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            names: DefaultStringInterner::default(),
            scopes: vec![HashMap::new()],
        }
    }

    pub fn open_scope(&mut self) {
        self.scopes.push(HashMap::new());
        tracing::trace!(depth = self.depth(), "scope opened");
    }

    pub fn close_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            tracing::trace!(depth = self.depth(), "scope closed");
        }
    }

    /// Number of open frames, global included
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn exists_in_current_scope(&self, name: &str) -> bool {
        match (self.names.get(name), self.scopes.last()) {
            (Some(key), Some(scope)) => scope.contains_key(&key),
            _ => false,
        }
    }

    pub fn declare_scalar(&mut self, name: &str, kind: SymbolKind, ty: JanderType) {
        self.declare(name, Symbol::new(kind, SymbolEntry::Scalar(ty)));
    }

    pub fn declare_pointer(&mut self, name: &str, kind: SymbolKind, pointee: JanderType) {
        self.declare(name, Symbol::new(kind, SymbolEntry::Pointer { pointee }));
    }

    pub fn declare_record(&mut self, name: &str, kind: SymbolKind, fields: FieldMap) {
        self.declare(name, Symbol::new(kind, SymbolEntry::Record { fields }));
    }

    pub fn declare_routine(&mut self, name: &str, return_type: Option<JanderType>, params: Vec<JanderType>) {
        self.declare(
            name,
            Symbol::new(SymbolKind::Routine, SymbolEntry::Routine { return_type, params }),
        );
    }

    /// Bind `name` in the innermost frame, replacing any binding it already has there
    pub fn declare(&mut self, name: &str, symbol: Symbol) {
        tracing::trace!(name, kind = ?symbol.kind, ty = %symbol.ty(), depth = self.depth(), "declare");
        let key = self.names.get_or_intern(name);
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(key, symbol);
        }
    }

    /// Resolve `name`, innermost frame first
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let key = self.names.get(name)?;
        self.scopes.iter().rev().find_map(|scope| scope.get(&key))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
