//! Statement checks

use super::analyzer::SemanticAnalyzer;
use super::expr::{CallSite, EvalContext};
use super::types::JanderType;
use crate::common::Span;
use crate::frontend::ast::*;

impl SemanticAnalyzer {
    pub(super) fn analyze_statements(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.analyze_stmt(stmt);
        }
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Read(targets) => {
                for target in targets {
                    self.analyze_read_target(target);
                }
            }

            StmtKind::Write(values) => {
                for value in values {
                    self.infer_expr(value, EvalContext::default());
                }
            }

            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.infer_expr(condition, EvalContext::default());
                self.analyze_statements(then_branch);
                if let Some(else_branch) = else_branch {
                    self.analyze_statements(else_branch);
                }
            }

            StmtKind::Case {
                selector,
                arms,
                default,
            } => {
                self.eval_arith(selector);
                for arm in arms {
                    self.analyze_statements(&arm.body);
                }
                if let Some(default) = default {
                    self.analyze_statements(default);
                }
            }

            StmtKind::For {
                variable,
                start,
                end,
                body,
            } => {
                if self.table.lookup(&variable.name).is_none() {
                    self.log.push(
                        variable.span,
                        format!("identificador {} nao declarado", variable),
                    );
                }
                self.eval_arith(start);
                self.eval_arith(end);
                self.analyze_statements(body);
            }

            StmtKind::While { condition, body } => {
                self.infer_expr(condition, EvalContext::default());
                self.analyze_statements(body);
            }

            StmtKind::DoUntil { body, condition } => {
                self.analyze_statements(body);
                self.infer_expr(condition, EvalContext::default());
            }

            StmtKind::Assign {
                deref,
                target,
                value,
            } => self.analyze_assignment(stmt.span, *deref, target, value),

            StmtKind::Call { name, args } => {
                self.check_call(name, args, CallSite::Statement);
            }

            StmtKind::Return(value) => {
                if self.current_function_return_type.is_none() {
                    self.log
                        .push(stmt.span, "comando retorne nao permitido nesse escopo");
                }
                self.infer_expr(value, EvalContext::default());
            }
        }
    }

    /// The right-hand side is evaluated before the target is resolved, so its
    /// errors come first and are reported even when the target is unknown.
    fn analyze_assignment(&mut self, span: Span, deref: bool, target: &Identifier, value: &Expr) {
        let value_ty = self.infer_expr(value, EvalContext::assigning(&target.base().name));
        let target_ty = if deref {
            self.resolve_deref(target)
        } else {
            self.resolve_identifier(target)
        };

        if target_ty.is_valid() && JanderType::incompatible(target_ty, value_ty) {
            let prefix = if deref { "^" } else { "" };
            self.log.push(
                span,
                format!("atribuicao nao compativel para {}{}", prefix, target),
            );
        }
    }

    fn analyze_read_target(&mut self, read: &ReadTarget) {
        let ty = if read.deref {
            self.resolve_deref(&read.target)
        } else {
            self.resolve_identifier(&read.target)
        };
        if matches!(ty, JanderType::Pointer | JanderType::Record) {
            self.log.push(
                read.target.span,
                format!("tipo incompativel para leitura: {}", ty),
            );
        }
    }
}
