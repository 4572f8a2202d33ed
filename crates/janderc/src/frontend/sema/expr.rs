//! Expression type inference
//!
//! One method per operator layer, lowest precedence first. Layers fold their
//! operands left to right and mostly return `Invalid` without reporting
//! anything, leaving the diagnostic to whoever consumes the value. The
//! multiplicative layer is the exception: it reports the offending operator
//! itself.

use super::analyzer::SemanticAnalyzer;
use super::scope::{Symbol, SymbolEntry};
use super::types::JanderType;
use crate::frontend::ast::*;

/// Context carried into the evaluation of a whole expression
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalContext<'a> {
    /// Variable receiving the value, for an assignment's right-hand side
    pub assignment_target: Option<&'a str>,
}

impl<'a> EvalContext<'a> {
    pub fn assigning(target: &'a str) -> Self {
        Self {
            assignment_target: Some(target),
        }
    }
}

/// Where a routine call appears; only changes the undeclared-name message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CallSite {
    Statement,
    Expression,
}

impl SemanticAnalyzer {
    /// Type of `expr`, evaluated under `ctx`
    pub fn infer_expr(&mut self, expr: &Expr, ctx: EvalContext<'_>) -> JanderType {
        let _span = tracing::trace_span!("expr", assignment = ?ctx.assignment_target).entered();
        let ty = self.eval_expr(expr);
        tracing::trace!(expr = %expr, %ty, "inferred");
        ty
    }

    pub(super) fn eval_expr(&mut self, expr: &Expr) -> JanderType {
        let mut result = JanderType::Invalid;
        for (i, term) in expr.terms.iter().enumerate() {
            if i > 0 && !result.is_valid() {
                break;
            }
            let ty = self.eval_logical_term(term);
            result = if i == 0 { ty } else { both_logical(result, ty) };
        }
        result
    }

    fn eval_logical_term(&mut self, term: &LogicalTerm) -> JanderType {
        let mut result = JanderType::Invalid;
        for (i, factor) in term.factors.iter().enumerate() {
            if i > 0 && !result.is_valid() {
                break;
            }
            let ty = self.eval_logical_factor(factor);
            result = if i == 0 { ty } else { both_logical(result, ty) };
        }
        result
    }

    fn eval_logical_factor(&mut self, factor: &LogicalFactor) -> JanderType {
        let ty = match &factor.parcel {
            LogicalParcel::Bool(_) => JanderType::Logical,
            LogicalParcel::Relational(rel) => self.eval_relational(rel),
        };
        match (factor.negated, ty) {
            (false, ty) | (true, ty @ JanderType::Logical) => ty,
            (true, _) => JanderType::Invalid,
        }
    }

    fn eval_relational(&mut self, rel: &RelationalExpr) -> JanderType {
        let left = self.eval_arith(&rel.left);
        let Some((_, right)) = &rel.comparison else {
            return left;
        };
        let right = self.eval_arith(right);

        use JanderType::*;
        match (left, right) {
            (Invalid, _) | (_, Invalid) => Invalid,
            (Logical, _) | (_, Logical) => Invalid,
            (Literal, Literal) => Logical,
            (l, r) if l.is_numeric() && r.is_numeric() => Logical,
            _ => Invalid,
        }
    }

    pub(super) fn eval_arith(&mut self, arith: &ArithExpr) -> JanderType {
        let mut result = self.eval_term(&arith.first);
        for (op, term) in &arith.rest {
            if !result.is_valid() {
                break;
            }
            let ty = self.eval_term(term);
            result = match op.kind {
                AddOp::Add if result == JanderType::Literal && ty == JanderType::Literal => {
                    JanderType::Literal
                }
                _ if result.is_numeric() && ty.is_numeric() => JanderType::promote(result, ty),
                _ => JanderType::Invalid,
            };
        }
        result
    }

    fn eval_term(&mut self, term: &Term) -> JanderType {
        let mut result = self.eval_factor(&term.first);
        for (op, factor) in &term.rest {
            if !result.is_valid() {
                break;
            }
            let ty = self.eval_factor(factor);
            if JanderType::incompatible(result, ty) || !(result.is_numeric() && ty.is_numeric()) {
                self.log.push(op.span, format!("Termo {} contém tipos incompatíveis", term));
                return JanderType::Invalid;
            }
            result = JanderType::promote(result, ty);
        }
        result
    }

    fn eval_factor(&mut self, factor: &Factor) -> JanderType {
        let mut result = JanderType::Invalid;
        for (i, parcel) in factor.parcels.iter().enumerate() {
            if i > 0 && !result.is_valid() {
                break;
            }
            let ty = self.eval_parcel(parcel);
            result = match (i, result, ty) {
                (0, _, ty) => ty,
                (_, JanderType::Integer, JanderType::Integer) => JanderType::Integer,
                _ => JanderType::Invalid,
            };
        }
        result
    }

    fn eval_parcel(&mut self, parcel: &Parcel) -> JanderType {
        match &parcel.kind {
            ParcelKind::Unary { negated, operand } => {
                let ty = self.eval_primary(operand);
                if *negated && !ty.is_numeric() {
                    JanderType::Invalid
                } else {
                    ty
                }
            }
            ParcelKind::NonUnary(NonUnary::AddressOf(target)) => {
                let base = target.base();
                if self.table.lookup(&base.name).is_none() {
                    self.log
                        .push(target.span, format!("identificador {} nao declarado", base));
                    return JanderType::Invalid;
                }
                JanderType::Pointer
            }
            ParcelKind::NonUnary(NonUnary::StringLiteral(_)) => JanderType::Literal,
        }
    }

    fn eval_primary(&mut self, primary: &Primary) -> JanderType {
        match &primary.kind {
            PrimaryKind::Deref(target) => self.resolve_deref(target),
            PrimaryKind::Identifier(target) => self.resolve_identifier(target),
            PrimaryKind::IntLiteral(_) => JanderType::Integer,
            PrimaryKind::RealLiteral(_) => JanderType::Real,
            PrimaryKind::Call { name, args } => self.check_call(name, args, CallSite::Expression),
            PrimaryKind::Paren(inner) => self.eval_expr(inner),
        }
    }

    /// Type reached through `^target`: the pointee of a declared pointer
    pub(super) fn resolve_deref(&mut self, target: &Identifier) -> JanderType {
        let base = target.base();
        let pointee = match self.table.lookup(&base.name) {
            None => {
                self.log
                    .push(base.span, format!("identificador {} nao declarado", base));
                return JanderType::Invalid;
            }
            Some(Symbol {
                entry: SymbolEntry::Pointer { pointee },
                ..
            }) => *pointee,
            Some(_) => {
                self.log
                    .push(base.span, format!("identificador {} nao eh um ponteiro", base));
                return JanderType::Invalid;
            }
        };

        if !target.dimensions.is_empty() {
            self.log.push(
                target.span,
                format!("indexacao de vetores nao implementada: {}", target),
            );
            return JanderType::Invalid;
        }
        if !target.fields().is_empty() {
            self.log.push(
                target.span,
                format!("acesso a campos aninhados nao suportado: {}", target),
            );
            return JanderType::Invalid;
        }
        pointee
    }

    /// Type of `base` or `base.field`; indexing and longer chains are rejected
    pub(super) fn resolve_identifier(&mut self, target: &Identifier) -> JanderType {
        let base = target.base();
        let Some(symbol) = self.table.lookup(&base.name) else {
            self.log
                .push(base.span, format!("identificador {} nao declarado", base));
            return JanderType::Invalid;
        };

        if !target.dimensions.is_empty() {
            self.log.push(
                target.span,
                format!("indexacao de vetores nao implementada: {}", target),
            );
            return JanderType::Invalid;
        }

        match target.fields() {
            [] => symbol.ty(),
            [field] => match &symbol.entry {
                SymbolEntry::Record { fields } => match fields.get(&field.name) {
                    Some(ty) => *ty,
                    None => {
                        self.log.push(
                            field.span,
                            format!("Campo '{}' nao existe no registro '{}'", field, base),
                        );
                        JanderType::Invalid
                    }
                },
                _ => {
                    self.log.push(
                        target.span,
                        format!(
                            "Identificador '{}' nao eh um registro ou nao possui o campo '{}'",
                            base, field
                        ),
                    );
                    JanderType::Invalid
                }
            },
            _ => {
                self.log.push(
                    target.span,
                    format!("acesso a campos aninhados nao suportado: {}", target),
                );
                JanderType::Invalid
            }
        }
    }

    /// Check a routine call against its signature and return the call's type.
    ///
    /// An undeclared or non-routine name is reported once and the arguments
    /// are left alone. On an arity mismatch the arguments are still evaluated
    /// but not matched against parameters.
    pub(super) fn check_call(&mut self, name: &Ident, args: &[Expr], site: CallSite) -> JanderType {
        let (return_type, params) = match self.table.lookup(&name.name) {
            None => {
                let message = match site {
                    CallSite::Statement => format!("identificador {} nao declarado", name),
                    CallSite::Expression => format!("Funcao {} nao declarada", name),
                };
                self.log.push(name.span, message);
                return JanderType::Invalid;
            }
            Some(Symbol {
                entry: SymbolEntry::Routine { return_type, params },
                ..
            }) => (*return_type, params.clone()),
            Some(_) => {
                self.log.push(
                    name.span,
                    format!("identificador {} nao eh uma funcao ou procedimento", name),
                );
                return JanderType::Invalid;
            }
        };

        if params.len() != args.len() {
            self.log.push(
                name.span,
                format!(
                    "Chamada {}: número de argumentos incompatível (esperado {}, encontrado {})",
                    name,
                    params.len(),
                    args.len()
                ),
            );
            for arg in args {
                self.eval_expr(arg);
            }
        } else {
            for (i, (expected, arg)) in params.iter().zip(args).enumerate() {
                let found = self.eval_expr(arg);
                if JanderType::incompatible(*expected, found) {
                    self.log.push(
                        arg.span,
                        format!(
                            "Chamada {}: tipo do argumento {} incompatível (esperado {}, encontrado {})",
                            name,
                            i + 1,
                            expected,
                            found
                        ),
                    );
                }
            }
        }

        return_type.unwrap_or(JanderType::Invalid)
    }
}

fn both_logical(left: JanderType, right: JanderType) -> JanderType {
    if left == JanderType::Logical && right == JanderType::Logical {
        JanderType::Logical
    } else {
        JanderType::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::Parser;
    use crate::frontend::sema::scope::SymbolKind;
    use crate::frontend::sema::types::FieldMap;
    use pretty_assertions::assert_eq;

    fn analyzer() -> SemanticAnalyzer {
        let mut analyzer = SemanticAnalyzer::new();
        let table = &mut analyzer.table;
        table.declare_scalar("i", SymbolKind::Variable, JanderType::Integer);
        table.declare_scalar("r", SymbolKind::Variable, JanderType::Real);
        table.declare_scalar("s", SymbolKind::Variable, JanderType::Literal);
        table.declare_scalar("b", SymbolKind::Variable, JanderType::Logical);
        table.declare_pointer("p", SymbolKind::Variable, JanderType::Integer);
        table.declare_record(
            "c",
            SymbolKind::Variable,
            FieldMap::from([("x".to_string(), JanderType::Real)]),
        );
        table.declare_routine("soma", Some(JanderType::Integer), vec![JanderType::Integer; 2]);
        table.declare_routine("mostra", None, vec![JanderType::Literal]);
        analyzer
    }

    fn infer(source: &str) -> (JanderType, Vec<String>) {
        let expr = Parser::new(source)
            .and_then(|mut parser| parser.parse_expr())
            .unwrap();
        let mut analyzer = analyzer();
        let ty = analyzer.infer_expr(&expr, EvalContext::default());
        (ty, analyzer.log.lines())
    }

    fn infer_type(source: &str) -> JanderType {
        infer(source).0
    }

    #[test]
    fn test_literals() {
        assert_eq!(infer_type("42"), JanderType::Integer);
        assert_eq!(infer_type("4.2"), JanderType::Real);
        assert_eq!(infer_type("\"ola\""), JanderType::Literal);
        assert_eq!(infer_type("verdadeiro"), JanderType::Logical);
    }

    #[test]
    fn test_additive_layer() {
        assert_eq!(infer_type("i + i"), JanderType::Integer);
        assert_eq!(infer_type("i + r - 1"), JanderType::Real);
        assert_eq!(infer_type("s + \"x\""), JanderType::Literal);
        assert_eq!(infer("s - s"), (JanderType::Invalid, vec![]));
        assert_eq!(infer("i + s"), (JanderType::Invalid, vec![]));
    }

    #[test]
    fn test_multiplicative_layer_reports_operator() {
        assert_eq!(infer_type("i * r / 2"), JanderType::Real);
        assert_eq!(
            infer("i * s"),
            (
                JanderType::Invalid,
                vec!["Linha 1: Termo i*s contém tipos incompatíveis".to_string()]
            )
        );
    }

    #[test]
    fn test_multiplicative_asymmetry_on_unresolved_operand() {
        let (ty, lines) = infer("2 * y");
        assert_eq!(ty, JanderType::Invalid);
        assert_eq!(
            lines,
            vec![
                "Linha 1: identificador y nao declarado".to_string(),
                "Linha 1: Termo 2*y contém tipos incompatíveis".to_string(),
            ]
        );

        let (_, lines) = infer("y * 2");
        assert_eq!(lines, vec!["Linha 1: identificador y nao declarado".to_string()]);
    }

    #[test]
    fn test_modulo_and_unary() {
        assert_eq!(infer_type("i % 2"), JanderType::Integer);
        assert_eq!(infer("r % 2"), (JanderType::Invalid, vec![]));
        assert_eq!(infer_type("-r"), JanderType::Real);
        assert_eq!(infer("-s"), (JanderType::Invalid, vec![]));
    }

    #[test]
    fn test_relational_layer() {
        assert_eq!(infer_type("i < r"), JanderType::Logical);
        assert_eq!(infer_type("s = \"a\""), JanderType::Logical);
        assert_eq!(infer_type("s = 1"), JanderType::Invalid);
        assert_eq!(infer_type("b = b"), JanderType::Invalid);
        assert_eq!(infer_type("i"), JanderType::Integer);
    }

    #[test]
    fn test_logical_layers() {
        assert_eq!(infer_type("b e nao b"), JanderType::Logical);
        assert_eq!(infer_type("i > 0 ou b"), JanderType::Logical);
        assert_eq!(infer_type("b ou i"), JanderType::Invalid);
        assert_eq!(infer_type("nao i"), JanderType::Invalid);
    }

    #[test]
    fn test_pointers() {
        assert_eq!(infer_type("^p"), JanderType::Integer);
        assert_eq!(infer_type("&i"), JanderType::Pointer);
        assert_eq!(
            infer("^i"),
            (
                JanderType::Invalid,
                vec!["Linha 1: identificador i nao eh um ponteiro".to_string()]
            )
        );
        assert_eq!(
            infer("&z"),
            (
                JanderType::Invalid,
                vec!["Linha 1: identificador z nao declarado".to_string()]
            )
        );
    }

    #[test]
    fn test_field_access() {
        assert_eq!(infer_type("c.x"), JanderType::Real);
        assert_eq!(
            infer("c.z").1,
            vec!["Linha 1: Campo 'z' nao existe no registro 'c'".to_string()]
        );
        assert_eq!(
            infer("i.x").1,
            vec!["Linha 1: Identificador 'i' nao eh um registro ou nao possui o campo 'x'".to_string()]
        );
        assert_eq!(
            infer("c.x.y").1,
            vec!["Linha 1: acesso a campos aninhados nao suportado: c.x.y".to_string()]
        );
        assert_eq!(
            infer("i[1]").1,
            vec!["Linha 1: indexacao de vetores nao implementada: i[1]".to_string()]
        );
    }

    #[test]
    fn test_calls() {
        assert_eq!(infer("soma(1, 2)"), (JanderType::Integer, vec![]));
        assert_eq!(infer_type("mostra(\"x\")"), JanderType::Invalid);
        assert_eq!(
            infer("soma(1, \"a\")").1,
            vec![
                "Linha 1: Chamada soma: tipo do argumento 2 incompatível (esperado INTEGER, encontrado LITERAL)"
                    .to_string()
            ]
        );
        assert_eq!(
            infer("soma(1)").1,
            vec![
                "Linha 1: Chamada soma: número de argumentos incompatível (esperado 2, encontrado 1)"
                    .to_string()
            ]
        );
        assert_eq!(
            infer("i(1)").1,
            vec!["Linha 1: identificador i nao eh uma funcao ou procedimento".to_string()]
        );
    }

    #[test]
    fn test_undeclared_call_skips_arguments() {
        assert_eq!(
            infer("f(y, 1)"),
            (
                JanderType::Invalid,
                vec!["Linha 1: Funcao f nao declarada".to_string()]
            )
        );
    }

    #[test]
    fn test_parenthesized() {
        assert_eq!(infer_type("(i + 1) * 2.0"), JanderType::Real);
    }
}
