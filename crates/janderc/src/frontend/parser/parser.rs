//! Recursive descent parser for LA

use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::ast::*;
use crate::frontend::lexer::{Lexer, Token, TokenKind};

/// Recursive descent parser for LA
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    previous: Span,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> CompileResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        let previous = current.span;
        Ok(Self {
            lexer,
            current,
            previous,
        })
    }

    /// Parse a complete program
    pub fn parse(&mut self) -> CompileResult<Program> {
        let start = self.current.span;
        let mut declarations = Vec::new();

        while self.current.kind.can_start_local_declaration()
            || self.check(&TokenKind::Procedimento)
            || self.check(&TokenKind::Funcao)
        {
            declarations.push(self.parse_declaration()?);
        }

        self.expect(TokenKind::Algoritmo)?;
        let body = self.parse_block()?;
        self.expect(TokenKind::FimAlgoritmo)?;
        let span = self.span_from(start);
        self.expect(TokenKind::Eof)?;

        Ok(Program::new(declarations, body, span))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn advance(&mut self) -> CompileResult<Token> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        self.previous = prev.span;
        Ok(prev)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> CompileResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> CompileResult<Token> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(self.error_here())
        }
    }

    /// Syntax error pointing at the current token
    fn error_here(&self) -> CompileError {
        CompileError::parser(
            format!("erro sintatico proximo a {}", self.current.kind),
            self.current.span,
        )
    }

    /// `IDENT (` starts a call rather than an identifier
    fn at_call(&mut self) -> CompileResult<bool> {
        if !matches!(self.current.kind, TokenKind::Ident(_)) {
            return Ok(false);
        }
        let next = self.lexer.peek()?;
        Ok(matches!(next.kind, TokenKind::LParen))
    }

    /// Span from `start` to the end of the last consumed token
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous)
    }

    fn expect_ident(&mut self) -> CompileResult<Ident> {
        if let TokenKind::Ident(name) = &self.current.kind {
            let ident = Ident::new(name.clone(), self.current.span);
            self.advance()?;
            Ok(ident)
        } else {
            Err(self.error_here())
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_declaration(&mut self) -> CompileResult<Declaration> {
        match self.current.kind {
            TokenKind::Procedimento | TokenKind::Funcao => self.parse_routine(),
            _ => self.parse_local_declaration(),
        }
    }

    fn parse_local_declaration(&mut self) -> CompileResult<Declaration> {
        let start = self.current.span;
        let kind = match self.current.kind {
            TokenKind::Declare => {
                self.advance()?;
                DeclKind::Variable(self.parse_variable()?)
            }
            TokenKind::Constante => {
                self.advance()?;
                let name = self.expect_ident()?;
                self.expect(TokenKind::Colon)?;
                let ty = self.parse_basic_type()?;
                self.expect(TokenKind::Eq)?;
                let value = self.parse_const_value()?;
                DeclKind::Constant(ConstDecl {
                    name,
                    ty,
                    value,
                    span: self.span_from(start),
                })
            }
            TokenKind::Tipo => {
                self.advance()?;
                let name = self.expect_ident()?;
                self.expect(TokenKind::Colon)?;
                let ty = self.parse_type_spec()?;
                DeclKind::Type(TypeDecl {
                    name,
                    ty,
                    span: self.span_from(start),
                })
            }
            _ => return Err(self.error_here()),
        };
        Ok(Declaration::new(kind, self.span_from(start)))
    }

    fn parse_variable(&mut self) -> CompileResult<VarDecl> {
        let start = self.current.span;
        let mut names = vec![self.parse_identifier()?];
        while self.match_token(&TokenKind::Comma)? {
            names.push(self.parse_identifier()?);
        }
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type_spec()?;
        Ok(VarDecl::new(names, ty, self.span_from(start)))
    }

    fn parse_type_spec(&mut self) -> CompileResult<TypeSpec> {
        if self.check(&TokenKind::Registro) {
            let start = self.current.span;
            self.advance()?;
            let mut fields = Vec::new();
            while matches!(self.current.kind, TokenKind::Ident(_)) {
                fields.push(self.parse_variable()?);
            }
            self.expect(TokenKind::FimRegistro)?;
            Ok(TypeSpec::Record(RecordSpec::new(fields, self.span_from(start))))
        } else {
            Ok(TypeSpec::Extended(self.parse_extended_type()?))
        }
    }

    fn parse_extended_type(&mut self) -> CompileResult<ExtendedType> {
        let start = self.current.span;
        let pointer = self.match_token(&TokenKind::Caret)?;
        let name = if self.current.kind.is_basic_type() {
            TypeName::Basic(self.parse_basic_type()?)
        } else {
            TypeName::Named(self.expect_ident()?)
        };
        Ok(ExtendedType::new(pointer, name, self.span_from(start)))
    }

    fn parse_basic_type(&mut self) -> CompileResult<BasicType> {
        let basic = match self.current.kind {
            TokenKind::Literal => BasicType::Literal,
            TokenKind::Inteiro => BasicType::Integer,
            TokenKind::Real => BasicType::Real,
            TokenKind::Logico => BasicType::Logical,
            _ => return Err(self.error_here()),
        };
        self.advance()?;
        Ok(basic)
    }

    fn parse_const_value(&mut self) -> CompileResult<ConstValue> {
        let value = match &self.current.kind {
            TokenKind::Cadeia(text) => ConstValue::String(text.clone()),
            TokenKind::NumInt(text) => ConstValue::Int(text.clone()),
            TokenKind::NumReal(text) => ConstValue::Real(text.clone()),
            TokenKind::Verdadeiro => ConstValue::Bool(true),
            TokenKind::Falso => ConstValue::Bool(false),
            _ => return Err(self.error_here()),
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_routine(&mut self) -> CompileResult<Declaration> {
        let start = self.current.span;
        let kind = if self.match_token(&TokenKind::Funcao)? {
            RoutineKind::Function
        } else {
            self.expect(TokenKind::Procedimento)?;
            RoutineKind::Procedure
        };

        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            params.push(self.parse_param_group()?);
            while self.match_token(&TokenKind::Comma)? {
                params.push(self.parse_param_group()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        let return_type = match kind {
            RoutineKind::Function => {
                self.expect(TokenKind::Colon)?;
                Some(self.parse_extended_type()?)
            }
            RoutineKind::Procedure => None,
        };

        let body = self.parse_block()?;
        match kind {
            RoutineKind::Function => self.expect(TokenKind::FimFuncao)?,
            RoutineKind::Procedure => self.expect(TokenKind::FimProcedimento)?,
        };

        let span = self.span_from(start);
        Ok(Declaration::new(
            DeclKind::Routine(RoutineDecl {
                kind,
                name,
                params,
                return_type,
                body,
                span,
            }),
            span,
        ))
    }

    fn parse_param_group(&mut self) -> CompileResult<ParamGroup> {
        let start = self.current.span;
        let by_ref = self.match_token(&TokenKind::Var)?;
        let mut names = vec![self.expect_ident()?];
        while self.match_token(&TokenKind::Comma)? {
            names.push(self.expect_ident()?);
        }
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_extended_type()?;
        Ok(ParamGroup {
            by_ref,
            names,
            ty,
            span: self.span_from(start),
        })
    }

    fn parse_block(&mut self) -> CompileResult<Block> {
        let mut declarations = Vec::new();
        while self.current.kind.can_start_local_declaration() {
            declarations.push(self.parse_local_declaration()?);
        }
        let statements = self.parse_commands()?;
        Ok(Block::new(declarations, statements))
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn parse_commands(&mut self) -> CompileResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while self.current.kind.can_start_command() {
            statements.push(self.parse_command()?);
        }
        Ok(statements)
    }

    fn parse_command(&mut self) -> CompileResult<Stmt> {
        let start = self.current.span;
        let is_call = self.at_call()?;
        let kind = match self.current.kind {
            TokenKind::Leia => {
                self.advance()?;
                self.expect(TokenKind::LParen)?;
                let mut targets = vec![self.parse_read_target()?];
                while self.match_token(&TokenKind::Comma)? {
                    targets.push(self.parse_read_target()?);
                }
                self.expect(TokenKind::RParen)?;
                StmtKind::Read(targets)
            }
            TokenKind::Escreva => {
                self.advance()?;
                self.expect(TokenKind::LParen)?;
                let args = self.parse_expr_list()?;
                self.expect(TokenKind::RParen)?;
                StmtKind::Write(args)
            }
            TokenKind::Se => {
                self.advance()?;
                let condition = self.parse_expr()?;
                self.expect(TokenKind::Entao)?;
                let then_branch = self.parse_commands()?;
                let else_branch = if self.match_token(&TokenKind::Senao)? {
                    Some(self.parse_commands()?)
                } else {
                    None
                };
                self.expect(TokenKind::FimSe)?;
                StmtKind::If {
                    condition,
                    then_branch,
                    else_branch,
                }
            }
            TokenKind::Caso => {
                self.advance()?;
                let selector = self.parse_arith()?;
                self.expect(TokenKind::Seja)?;
                let mut arms = Vec::new();
                while self.check(&TokenKind::NumInt(String::new())) || self.check(&TokenKind::Minus) {
                    arms.push(self.parse_case_arm()?);
                }
                let default = if self.match_token(&TokenKind::Senao)? {
                    Some(self.parse_commands()?)
                } else {
                    None
                };
                self.expect(TokenKind::FimCaso)?;
                StmtKind::Case {
                    selector,
                    arms,
                    default,
                }
            }
            TokenKind::Para => {
                self.advance()?;
                let variable = self.expect_ident()?;
                self.expect(TokenKind::Assign)?;
                let start_value = self.parse_arith()?;
                self.expect(TokenKind::Ate)?;
                let end = self.parse_arith()?;
                self.expect(TokenKind::Faca)?;
                let body = self.parse_commands()?;
                self.expect(TokenKind::FimPara)?;
                StmtKind::For {
                    variable,
                    start: start_value,
                    end,
                    body,
                }
            }
            TokenKind::Enquanto => {
                self.advance()?;
                let condition = self.parse_expr()?;
                self.expect(TokenKind::Faca)?;
                let body = self.parse_commands()?;
                self.expect(TokenKind::FimEnquanto)?;
                StmtKind::While { condition, body }
            }
            TokenKind::Faca => {
                self.advance()?;
                let body = self.parse_commands()?;
                self.expect(TokenKind::Ate)?;
                let condition = self.parse_expr()?;
                StmtKind::DoUntil { body, condition }
            }
            TokenKind::Caret => {
                self.advance()?;
                let target = self.parse_identifier()?;
                self.expect(TokenKind::Assign)?;
                let value = self.parse_expr()?;
                StmtKind::Assign {
                    deref: true,
                    target,
                    value,
                }
            }
            TokenKind::Ident(_) if is_call => {
                let name = self.expect_ident()?;
                self.expect(TokenKind::LParen)?;
                let args = self.parse_expr_list()?;
                self.expect(TokenKind::RParen)?;
                StmtKind::Call { name, args }
            }
            TokenKind::Ident(_) => {
                let target = self.parse_identifier()?;
                self.expect(TokenKind::Assign)?;
                let value = self.parse_expr()?;
                StmtKind::Assign {
                    deref: false,
                    target,
                    value,
                }
            }
            TokenKind::Retorne => {
                self.advance()?;
                StmtKind::Return(self.parse_expr()?)
            }
            _ => return Err(self.error_here()),
        };
        Ok(Stmt::new(kind, self.span_from(start)))
    }

    fn parse_read_target(&mut self) -> CompileResult<ReadTarget> {
        let deref = self.match_token(&TokenKind::Caret)?;
        let target = self.parse_identifier()?;
        Ok(ReadTarget { deref, target })
    }

    fn parse_case_arm(&mut self) -> CompileResult<CaseArm> {
        let start = self.current.span;
        let mut labels = vec![self.parse_case_label()?];
        while self.match_token(&TokenKind::Comma)? {
            labels.push(self.parse_case_label()?);
        }
        self.expect(TokenKind::Colon)?;
        let body = self.parse_commands()?;
        Ok(CaseArm {
            labels,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_case_label(&mut self) -> CompileResult<CaseLabel> {
        let start = self.current.span;
        let first = self.parse_signed_int()?;
        let end = if self.match_token(&TokenKind::DotDot)? {
            Some(self.parse_signed_int()?)
        } else {
            None
        };
        Ok(CaseLabel {
            start: first,
            end,
            span: self.span_from(start),
        })
    }

    fn parse_signed_int(&mut self) -> CompileResult<i64> {
        let negative = self.match_token(&TokenKind::Minus)?;
        let value = match &self.current.kind {
            TokenKind::NumInt(text) => text.parse::<i64>().map_err(|_| self.error_here())?,
            _ => return Err(self.error_here()),
        };
        self.advance()?;
        Ok(if negative { -value } else { value })
    }

    /// `identificador`: `IDENT ('.' IDENT)* ('[' exp_aritmetica ']')*`
    fn parse_identifier(&mut self) -> CompileResult<Identifier> {
        let start = self.current.span;
        let mut segments = vec![self.expect_ident()?];
        while self.match_token(&TokenKind::Dot)? {
            segments.push(self.expect_ident()?);
        }
        let mut dimensions = Vec::new();
        while self.match_token(&TokenKind::LBracket)? {
            dimensions.push(self.parse_arith()?);
            self.expect(TokenKind::RBracket)?;
        }
        Ok(Identifier::new(segments, dimensions, self.span_from(start)))
    }

    // =========================================================================
    // Expressions, lowest precedence first
    // =========================================================================

    /// At least one expression: LA has no empty argument list, so a routine
    /// declared without parameters cannot be called.
    fn parse_expr_list(&mut self) -> CompileResult<Vec<Expr>> {
        let mut exprs = vec![self.parse_expr()?];
        while self.match_token(&TokenKind::Comma)? {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    pub fn parse_expr(&mut self) -> CompileResult<Expr> {
        let start = self.current.span;
        let mut terms = vec![self.parse_logical_term()?];
        while self.match_token(&TokenKind::Ou)? {
            terms.push(self.parse_logical_term()?);
        }
        Ok(Expr::new(terms, self.span_from(start)))
    }

    fn parse_logical_term(&mut self) -> CompileResult<LogicalTerm> {
        let start = self.current.span;
        let mut factors = vec![self.parse_logical_factor()?];
        while self.match_token(&TokenKind::E)? {
            factors.push(self.parse_logical_factor()?);
        }
        Ok(LogicalTerm::new(factors, self.span_from(start)))
    }

    fn parse_logical_factor(&mut self) -> CompileResult<LogicalFactor> {
        let start = self.current.span;
        let negated = self.match_token(&TokenKind::Nao)?;
        let parcel = if self.match_token(&TokenKind::Verdadeiro)? {
            LogicalParcel::Bool(true)
        } else if self.match_token(&TokenKind::Falso)? {
            LogicalParcel::Bool(false)
        } else {
            LogicalParcel::Relational(self.parse_relational()?)
        };
        Ok(LogicalFactor::new(negated, parcel, self.span_from(start)))
    }

    fn parse_relational(&mut self) -> CompileResult<RelationalExpr> {
        let start = self.current.span;
        let left = self.parse_arith()?;
        let comparison = if self.current.kind.is_relational_op() {
            let op_token = self.advance()?;
            let op = match op_token.kind {
                TokenKind::Eq => RelOp::Eq,
                TokenKind::NotEq => RelOp::NotEq,
                TokenKind::GtEq => RelOp::GtEq,
                TokenKind::LtEq => RelOp::LtEq,
                TokenKind::Gt => RelOp::Gt,
                _ => RelOp::Lt,
            };
            let right = self.parse_arith()?;
            Some((Operator::new(op, op_token.span), right))
        } else {
            None
        };
        Ok(RelationalExpr::new(left, comparison, self.span_from(start)))
    }

    fn parse_arith(&mut self) -> CompileResult<ArithExpr> {
        let start = self.current.span;
        let first = self.parse_term()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => AddOp::Add,
                TokenKind::Minus => AddOp::Sub,
                _ => break,
            };
            let op_token = self.advance()?;
            rest.push((Operator::new(op, op_token.span), self.parse_term()?));
        }
        Ok(ArithExpr::new(first, rest, self.span_from(start)))
    }

    fn parse_term(&mut self) -> CompileResult<Term> {
        let start = self.current.span;
        let first = self.parse_factor()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.current.kind {
                TokenKind::Star => MulOp::Mul,
                TokenKind::Slash => MulOp::Div,
                _ => break,
            };
            let op_token = self.advance()?;
            rest.push((Operator::new(op, op_token.span), self.parse_factor()?));
        }
        Ok(Term::new(first, rest, self.span_from(start)))
    }

    fn parse_factor(&mut self) -> CompileResult<Factor> {
        let start = self.current.span;
        let mut parcels = vec![self.parse_parcel()?];
        while self.match_token(&TokenKind::Percent)? {
            parcels.push(self.parse_parcel()?);
        }
        Ok(Factor::new(parcels, self.span_from(start)))
    }

    fn parse_parcel(&mut self) -> CompileResult<Parcel> {
        let start = self.current.span;
        let kind = match &self.current.kind {
            TokenKind::Amp => {
                self.advance()?;
                ParcelKind::NonUnary(NonUnary::AddressOf(self.parse_identifier()?))
            }
            TokenKind::Cadeia(text) => {
                let text = text.clone();
                self.advance()?;
                ParcelKind::NonUnary(NonUnary::StringLiteral(text))
            }
            _ => {
                let negated = self.match_token(&TokenKind::Minus)?;
                ParcelKind::Unary {
                    negated,
                    operand: self.parse_primary()?,
                }
            }
        };
        Ok(Parcel::new(kind, self.span_from(start)))
    }

    fn parse_primary(&mut self) -> CompileResult<Primary> {
        let start = self.current.span;
        let is_call = self.at_call()?;
        let kind = match &self.current.kind {
            TokenKind::Caret => {
                self.advance()?;
                PrimaryKind::Deref(self.parse_identifier()?)
            }
            TokenKind::Ident(_) if is_call => {
                let name = self.expect_ident()?;
                self.expect(TokenKind::LParen)?;
                let args = self.parse_expr_list()?;
                self.expect(TokenKind::RParen)?;
                PrimaryKind::Call { name, args }
            }
            TokenKind::Ident(_) => PrimaryKind::Identifier(self.parse_identifier()?),
            TokenKind::NumInt(text) => {
                let text = text.clone();
                self.advance()?;
                PrimaryKind::IntLiteral(text)
            }
            TokenKind::NumReal(text) => {
                let text = text.clone();
                self.advance()?;
                PrimaryKind::RealLiteral(text)
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                PrimaryKind::Paren(Box::new(inner))
            }
            _ => return Err(self.error_here()),
        };
        Ok(Primary::new(kind, self.span_from(start)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse().unwrap()
    }

    fn parse_expr(source: &str) -> Expr {
        Parser::new(source).unwrap().parse_expr().unwrap()
    }

    #[test]
    fn test_parse_minimal_program() {
        let program = parse("algoritmo fim_algoritmo");
        assert!(program.declarations.is_empty());
        assert!(program.body.statements.is_empty());
    }

    #[test]
    fn test_parse_declarations() {
        let source = "
            declare a, b : inteiro
            constante PI : real = 3.14
            tipo Ponto : registro x, y : real fim_registro
            declare p : ^inteiro
            algoritmo
                declare c : Ponto
                a <- 1
            fim_algoritmo";
        let program = parse(source);

        assert_eq!(program.declarations.len(), 4);
        if let DeclKind::Variable(var) = &program.declarations[0].kind {
            assert_eq!(var.names.len(), 2);
            assert!(matches!(
                &var.ty,
                TypeSpec::Extended(ExtendedType { pointer: false, name: TypeName::Basic(BasicType::Integer), .. })
            ));
        } else {
            panic!("expected variable declaration");
        }
        if let DeclKind::Constant(c) = &program.declarations[1].kind {
            assert_eq!(c.name.name, "PI");
            assert_eq!(c.value, ConstValue::Real("3.14".to_string()));
        } else {
            panic!("expected constant declaration");
        }
        if let DeclKind::Type(t) = &program.declarations[2].kind {
            assert!(matches!(&t.ty, TypeSpec::Record(rec) if rec.fields.len() == 1));
        } else {
            panic!("expected type declaration");
        }
        assert_eq!(program.body.declarations.len(), 1);
        assert_eq!(program.body.statements.len(), 1);
    }

    #[test]
    fn test_parse_routines() {
        let source = "
            procedimento mostra(var a, b : inteiro, s : literal)
                escreva(s)
            fim_procedimento
            funcao dobro(x : real) : real
                retorne x * 2
            fim_funcao
            algoritmo
                mostra(1, 2, \"oi\")
            fim_algoritmo";
        let program = parse(source);

        assert_eq!(program.declarations.len(), 2);
        if let DeclKind::Routine(r) = &program.declarations[0].kind {
            assert_eq!(r.kind, RoutineKind::Procedure);
            assert_eq!(r.params.len(), 2);
            assert!(r.params[0].by_ref);
            assert_eq!(r.params[0].names.len(), 2);
            assert!(r.return_type.is_none());
        } else {
            panic!("expected procedure");
        }
        if let DeclKind::Routine(r) = &program.declarations[1].kind {
            assert!(r.is_function());
            assert!(r.return_type.is_some());
        } else {
            panic!("expected function");
        }
        assert!(matches!(&program.body.statements[0].kind, StmtKind::Call { name, args } if name.name == "mostra" && args.len() == 3));
    }

    #[test]
    fn test_parse_commands() {
        let source = "
            algoritmo
                leia(x, ^p)
                se x > 1 entao escreva(x) senao escreva(\"nao\") fim_se
                caso x seja 1..3, 5: escreva(1) senao escreva(2) fim_caso
                para i <- 1 ate 10 faca x <- x + i fim_para
                enquanto x < 10 faca x <- x + 1 fim_enquanto
                faca x <- x - 1 ate x = 0
                ^p <- 3
                r.campo <- 2
            fim_algoritmo";
        let program = parse(source);
        let stmts = &program.body.statements;

        assert_eq!(stmts.len(), 8);
        assert!(matches!(&stmts[0].kind, StmtKind::Read(targets) if targets.len() == 2 && targets[1].deref));
        assert!(matches!(&stmts[1].kind, StmtKind::If { else_branch: Some(_), .. }));
        if let StmtKind::Case { arms, default, .. } = &stmts[2].kind {
            assert_eq!(arms[0].labels[0].start, 1);
            assert_eq!(arms[0].labels[0].end, Some(3));
            assert_eq!(arms[0].labels[1].start, 5);
            assert!(default.is_some());
        } else {
            panic!("expected caso");
        }
        assert!(matches!(&stmts[3].kind, StmtKind::For { .. }));
        assert!(matches!(&stmts[4].kind, StmtKind::While { .. }));
        assert!(matches!(&stmts[5].kind, StmtKind::DoUntil { .. }));
        assert!(matches!(&stmts[6].kind, StmtKind::Assign { deref: true, .. }));
        assert!(matches!(&stmts[7].kind, StmtKind::Assign { deref: false, target, .. } if target.segments.len() == 2));
    }

    #[test]
    fn test_expression_layers() {
        let expr = parse_expr("a + b * c % 2 > 3 e nao falso ou x");

        assert_eq!(expr.terms.len(), 2);
        assert_eq!(expr.terms[0].factors.len(), 2);
        assert!(expr.terms[0].factors[1].negated);
        if let LogicalParcel::Relational(rel) = &expr.terms[0].factors[0].parcel {
            assert!(rel.comparison.is_some());
            assert_eq!(rel.left.rest.len(), 1);
            let term = &rel.left.rest[0].1;
            assert_eq!(term.rest.len(), 1);
            assert_eq!(term.rest[0].1.parcels.len(), 2);
        } else {
            panic!("expected relational parcel");
        }
    }

    #[test]
    fn test_expression_renders_compact_text() {
        let expr = parse_expr("f(a, 2) * -x . y + \"s\" - &z");
        assert_eq!(expr.to_string(), "f(a,2)*-x.y+\"s\"-&z");
    }

    #[test]
    fn test_syntax_error_message() {
        let err = Parser::new("algoritmo\n  x <- \nfim_algoritmo")
            .unwrap()
            .parse()
            .unwrap_err();
        assert_eq!(err.output_line(), "Linha 3: erro sintatico proximo a fim_algoritmo");
    }

    #[test]
    fn test_syntax_error_at_eof() {
        let err = Parser::new("algoritmo\nx <- 1").unwrap().parse().unwrap_err();
        assert_eq!(err.output_line(), "Linha 2: erro sintatico proximo a EOF");
    }

    #[test]
    fn test_empty_argument_list_is_rejected() {
        let err = Parser::new("procedimento p()\nfim_procedimento\nalgoritmo\n  p()\nfim_algoritmo")
            .unwrap()
            .parse()
            .unwrap_err();
        assert_eq!(err.output_line(), "Linha 4: erro sintatico proximo a )");
    }
}
