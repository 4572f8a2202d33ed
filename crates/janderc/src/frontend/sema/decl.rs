//! Declaration processing: variables, constants, types and routines

use super::analyzer::SemanticAnalyzer;
use super::scope::{Symbol, SymbolEntry, SymbolKind};
use super::types::{FieldMap, JanderType};
use crate::frontend::ast::*;

impl SemanticAnalyzer {
    pub(super) fn analyze_declaration(&mut self, decl: &Declaration) {
        match &decl.kind {
            DeclKind::Variable(var) => self.analyze_var_decl(var),
            DeclKind::Constant(constant) => self.analyze_const_decl(constant),
            DeclKind::Type(alias) => self.analyze_type_decl(alias),
            DeclKind::Routine(routine) => self.analyze_routine_decl(routine),
        }
    }

    fn analyze_var_decl(&mut self, var: &VarDecl) {
        let (entry, unresolved) = match &var.ty {
            TypeSpec::Record(record) => (
                SymbolEntry::Record {
                    fields: self.collect_fields(record),
                },
                None,
            ),
            TypeSpec::Extended(ty) => match self.resolve_extended(ty) {
                Some(entry) => (entry, None),
                None => (placeholder(ty), Some(&ty.name)),
            },
        };

        for name in &var.names {
            let base = name.base();
            if self.table.exists_in_current_scope(&base.name) {
                self.log.push(
                    base.span,
                    format!("identificador {} ja declarado anteriormente", base),
                );
                continue;
            }
            if !name.fields().is_empty() {
                self.log.push(
                    name.span,
                    format!("acesso a campos aninhados nao suportado: {}", name),
                );
                continue;
            }

            self.table
                .declare(&base.name, Symbol::new(SymbolKind::Variable, entry.clone()));

            if !name.dimensions.is_empty() {
                self.log.push(
                    name.span,
                    format!("indexacao de vetores nao implementada: {}", name),
                );
            }
            if let Some(type_name) = unresolved {
                self.log
                    .push(base.span, format!("tipo {} nao declarado", type_name));
            }
        }
    }

    /// The literal value is not checked against the declared type.
    fn analyze_const_decl(&mut self, constant: &ConstDecl) {
        let name = &constant.name;
        if self.table.exists_in_current_scope(&name.name) {
            self.log
                .push(name.span, format!("Constante {} já existe", name));
            return;
        }
        self.table
            .declare_scalar(&name.name, SymbolKind::Constant, constant.ty.into());
    }

    fn analyze_type_decl(&mut self, alias: &TypeDecl) {
        let name = &alias.name;
        if self.table.exists_in_current_scope(&name.name) {
            self.log
                .push(name.span, format!("Tipo {} já declarado", name));
            return;
        }

        let entry = match &alias.ty {
            TypeSpec::Record(record) => SymbolEntry::Record {
                fields: self.collect_fields(record),
            },
            TypeSpec::Extended(ty) => match self.resolve_extended(ty) {
                Some(entry) => entry,
                None => {
                    self.log
                        .push(ty.span, format!("Tipo {} nao declarado", ty.name));
                    return;
                }
            },
        };
        self.table.declare(&name.name, Symbol::new(SymbolKind::Type, entry));
    }

    /// Flat field map of a record body. Nested records and dotted or
    /// indexed field names are rejected.
    fn collect_fields(&mut self, record: &RecordSpec) -> FieldMap {
        let mut fields = FieldMap::new();

        for field in &record.fields {
            let TypeSpec::Extended(ty) = &field.ty else {
                self.log.push(field.span, NESTED_FIELDS_UNSUPPORTED);
                continue;
            };
            let (field_ty, unresolved) = match self.resolve_extended(ty) {
                Some(entry) => (entry.ty(), false),
                None => (placeholder(ty).ty(), true),
            };

            for name in &field.names {
                if !name.is_simple() {
                    self.log.push(name.span, NESTED_FIELDS_UNSUPPORTED);
                    continue;
                }
                let base = name.base();
                if fields.contains_key(&base.name) {
                    self.log.push(
                        base.span,
                        format!("Campo {} já declarado no registro", base),
                    );
                    continue;
                }
                fields.insert(base.name.clone(), field_ty);
                if unresolved {
                    self.log
                        .push(base.span, format!("tipo {} nao declarado", ty.name));
                }
            }
        }

        fields
    }

    /// Register the signature in the enclosing scope, then analyze the body
    /// in a scope of its own. The signature comes first so the body can call
    /// the routine recursively.
    fn analyze_routine_decl(&mut self, routine: &RoutineDecl) {
        let mut params = Vec::new();
        for group in &routine.params {
            let entry = self.resolve_or_report(&group.ty);
            params.extend(group.names.iter().map(|name| (name, entry.clone())));
        }
        let return_type = routine
            .return_type
            .as_ref()
            .map(|ty| self.resolve_or_report(ty).ty());

        let name = &routine.name;
        if self.table.exists_in_current_scope(&name.name) {
            self.log.push(
                name.span,
                format!("identificador {} ja declarado anteriormente", name),
            );
            return;
        }
        self.table.declare_routine(
            &name.name,
            return_type,
            params.iter().map(|(_, entry)| entry.ty()).collect(),
        );

        tracing::debug!(routine = %name, function = routine.is_function(), "entering routine body");
        self.table.open_scope();

        for (param, entry) in params {
            if self.table.exists_in_current_scope(&param.name) {
                self.log.push(
                    param.span,
                    format!("identificador {} ja declarado anteriormente", param),
                );
                continue;
            }
            self.table
                .declare(&param.name, Symbol::new(SymbolKind::Parameter, entry));
        }

        let enclosing = std::mem::replace(&mut self.current_function_return_type, return_type);
        self.analyze_block(&routine.body);
        self.current_function_return_type = enclosing;

        self.table.close_scope();
        tracing::debug!(routine = %name, "leaving routine body");
    }

    /// Resolve a type in a position that must name an existing type
    fn resolve_extended(&self, ty: &ExtendedType) -> Option<SymbolEntry> {
        let entry = match &ty.name {
            TypeName::Basic(basic) => SymbolEntry::Scalar((*basic).into()),
            TypeName::Named(name) => match self.table.lookup(&name.name) {
                Some(symbol) if symbol.kind == SymbolKind::Type => symbol.entry.clone(),
                _ => return None,
            },
        };

        if ty.pointer {
            Some(SymbolEntry::Pointer { pointee: entry.ty() })
        } else {
            Some(entry)
        }
    }

    fn resolve_or_report(&mut self, ty: &ExtendedType) -> SymbolEntry {
        self.resolve_extended(ty).unwrap_or_else(|| {
            self.log
                .push(ty.span, format!("tipo {} nao declarado", ty.name));
            placeholder(ty)
        })
    }
}

const NESTED_FIELDS_UNSUPPORTED: &str =
    "Campos de registro aninhados ou arrays em campos de registro nao suportados neste exemplo";

/// Entry bound for a name whose type did not resolve
fn placeholder(ty: &ExtendedType) -> SymbolEntry {
    if ty.pointer {
        SymbolEntry::Pointer {
            pointee: JanderType::Invalid,
        }
    } else {
        SymbolEntry::Scalar(JanderType::Invalid)
    }
}
