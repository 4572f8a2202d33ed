//! Semantic analyzer - scope and type checking over a parsed program

use super::diagnostics::DiagnosticLog;
use super::scope::SymbolTable;
use super::types::JanderType;
use crate::frontend::ast::{Block, Program};

/// Walks a program once and records every semantic error it finds.
///
/// Each instance owns its symbol table and diagnostic log, so independent
/// analyses never share state.
#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    pub(super) table: SymbolTable,
    pub(super) log: DiagnosticLog,
    /// Declared return type of the function whose body is being analyzed;
    /// `None` at top level and inside procedures
    pub(super) current_function_return_type: Option<JanderType>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze a whole program. Global declarations and the main body share
    /// the global scope.
    pub fn analyze(&mut self, program: &Program) -> &DiagnosticLog {
        self.table = SymbolTable::new();
        self.log = DiagnosticLog::new();
        self.current_function_return_type = None;

        for decl in &program.declarations {
            self.analyze_declaration(decl);
        }
        self.analyze_block(&program.body);

        tracing::debug!(diagnostics = self.log.len(), "semantic analysis finished");
        &self.log
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.log
    }

    pub fn into_diagnostics(self) -> DiagnosticLog {
        self.log
    }

    pub(super) fn analyze_block(&mut self, block: &Block) {
        for decl in &block.declarations {
            self.analyze_declaration(decl);
        }
        self.analyze_statements(&block.statements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::Parser;
    use pretty_assertions::assert_eq;

    fn analyze(source: &str) -> Vec<String> {
        let program = Parser::new(source).unwrap().parse().unwrap();
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&program).lines()
    }

    fn lines(expected: &[&str]) -> Vec<String> {
        expected.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_clean_program() {
        let source = "\
declare x, y: inteiro
declare nome: literal
algoritmo
  leia(x, nome)
  y <- x * 2 + 1
  se y > 10 e nao falso entao
    escreva(\"grande: \", nome)
  senao
    escreva(y)
  fim_se
fim_algoritmo";
        assert_eq!(analyze(source), lines(&[]));
    }

    #[test]
    fn test_logical_target_rejects_integer() {
        let source = "\
declare x: logico
algoritmo
  x <- 3
fim_algoritmo";
        assert_eq!(analyze(source), lines(&["Linha 3: atribuicao nao compativel para x"]));
    }

    #[test]
    fn test_pointer_assignments() {
        let source = "\
declare p: ^inteiro
declare x: inteiro
algoritmo
  p <- &x
  ^p <- 10
  x <- ^p
  ^p <- \"texto\"
fim_algoritmo";
        assert_eq!(analyze(source), lines(&["Linha 7: atribuicao nao compativel para ^p"]));
    }

    #[test]
    fn test_record_type_fields() {
        let source = "\
tipo Ponto: registro
  x: real
  y: real
fim_registro
declare c: Ponto
algoritmo
  c.x <- 1
  c.z <- 1
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&["Linha 8: Campo 'z' nao existe no registro 'c'"])
        );
    }

    #[test]
    fn test_call_argument_type() {
        let source = "\
funcao soma(a: inteiro, b: inteiro): inteiro
  retorne a + b
fim_funcao
algoritmo
  escreva(soma(1, \"a\"))
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&["Linha 5: Chamada soma: tipo do argumento 2 incompatível (esperado INTEGER, encontrado LITERAL)"])
        );
    }

    #[test]
    fn test_call_arity() {
        let source = "\
procedimento mostra(a: inteiro)
fim_procedimento
algoritmo
  mostra(1, 2)
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&["Linha 4: Chamada mostra: número de argumentos incompatível (esperado 1, encontrado 2)"])
        );
    }

    #[test]
    fn test_undeclared_call_reported_once() {
        let source = "\
algoritmo
  calcula(y, 2)
fim_algoritmo";
        assert_eq!(analyze(source), lines(&["Linha 2: identificador calcula nao declarado"]));
    }

    #[test]
    fn test_return_placement() {
        let source = "\
procedimento p()
  retorne 1
fim_procedimento
funcao f(): inteiro
  retorne 1
fim_funcao
algoritmo
  retorne 0
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 2: comando retorne nao permitido nesse escopo",
                "Linha 8: comando retorne nao permitido nesse escopo",
            ])
        );
    }

    #[test]
    fn test_recursive_call() {
        let source = "\
funcao fat(n: inteiro): inteiro
  se n <= 1 entao
    retorne 1
  fim_se
  retorne n * fat(n - 1)
fim_funcao
algoritmo
  escreva(fat(5))
fim_algoritmo";
        assert_eq!(analyze(source), lines(&[]));
    }

    #[test]
    fn test_redeclarations() {
        let source = "\
declare x: inteiro
declare x: real
tipo T: inteiro
tipo T: real
constante C: inteiro = 1
constante C: inteiro = 2
declare T: inteiro
procedimento x()
  escreva(1)
fim_procedimento
procedimento q(a: inteiro, a: real)
fim_procedimento
algoritmo
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 2: identificador x ja declarado anteriormente",
                "Linha 4: Tipo T já declarado",
                "Linha 6: Constante C já existe",
                "Linha 7: identificador T ja declarado anteriormente",
                "Linha 8: identificador x ja declarado anteriormente",
                "Linha 11: identificador a ja declarado anteriormente",
            ])
        );
    }

    #[test]
    fn test_shadowing_in_routine_scope() {
        let source = "\
declare x: inteiro
procedimento p(x: literal)
  declare y: real
  x <- \"ok\"
  y <- x
fim_procedimento
algoritmo
  x <- 1
  y <- 2
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 5: atribuicao nao compativel para y",
                "Linha 9: identificador y nao declarado",
            ])
        );
    }

    #[test]
    fn test_unresolved_types() {
        let source = "\
declare v: Coisa
declare q: ^Coisa
tipo A: Nada
funcao f(a: Nada): Coisa
  retorne a
fim_funcao
algoritmo
  v <- 1
  q <- &v
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 1: tipo Coisa nao declarado",
                "Linha 2: tipo Coisa nao declarado",
                "Linha 3: Tipo Nada nao declarado",
                "Linha 4: tipo Nada nao declarado",
                "Linha 4: tipo Coisa nao declarado",
            ])
        );
    }

    #[test]
    fn test_variable_cannot_be_used_as_type() {
        let source = "\
declare n: inteiro
declare m: n
algoritmo
fim_algoritmo";
        assert_eq!(analyze(source), lines(&["Linha 2: tipo n nao declarado"]));
    }

    #[test]
    fn test_record_declaration_errors() {
        let source = "\
tipo R: registro
  a: inteiro
  a: real
  b: registro c: inteiro fim_registro
  d: Nada
fim_registro
declare r: R
algoritmo
  r.a <- 1
  r.b <- 1
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 3: Campo a já declarado no registro",
                "Linha 4: Campos de registro aninhados ou arrays em campos de registro nao suportados neste exemplo",
                "Linha 5: tipo Nada nao declarado",
                "Linha 10: Campo 'b' nao existe no registro 'r'",
            ])
        );
    }

    #[test]
    fn test_anonymous_record_variables_own_their_fields() {
        let source = "\
declare a, b: registro
  nome: literal
  idade: inteiro
fim_registro
declare p: ^inteiro
algoritmo
  a.nome <- \"Ana\"
  b.idade <- 30
  a.idade <- \"x\"
  leia(a, p, ^p, b.nome)
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 9: atribuicao nao compativel para a.idade",
                "Linha 10: tipo incompativel para leitura: RECORD",
                "Linha 10: tipo incompativel para leitura: POINTER",
            ])
        );
    }

    #[test]
    fn test_multiplicative_errors_in_assignment() {
        let source = "\
declare x: inteiro
algoritmo
  x <- 2 * y
  x <- y * 2
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 3: identificador y nao declarado",
                "Linha 3: Termo 2*y contém tipos incompatíveis",
                "Linha 3: atribuicao nao compativel para x",
                "Linha 4: identificador y nao declarado",
                "Linha 4: atribuicao nao compativel para x",
            ])
        );
    }

    #[test]
    fn test_value_errors_precede_target_errors() {
        let source = "\
declare p: inteiro
algoritmo
  z <- w + 1
  ^p <- v
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 3: identificador w nao declarado",
                "Linha 3: identificador z nao declarado",
                "Linha 4: identificador v nao declarado",
                "Linha 4: identificador p nao eh um ponteiro",
            ])
        );
    }

    #[test]
    fn test_record_field_of_declared_record_type() {
        let source = "\
tipo A: registro
  x: inteiro
fim_registro
tipo B: registro
  a: A
fim_registro
declare b: B
algoritmo
  leia(b.a)
  b.a.x <- 1
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 9: tipo incompativel para leitura: RECORD",
                "Linha 10: acesso a campos aninhados nao suportado: b.a.x",
            ])
        );
    }

    #[test]
    fn test_pointer_and_basic_type_aliases() {
        let source = "\
tipo PI: ^inteiro
tipo N: real
declare x: inteiro
declare q: PI
declare m: N
algoritmo
  q <- &x
  ^q <- 1
  m <- x
  m <- \"a\"
  leia(q)
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 10: atribuicao nao compativel para m",
                "Linha 11: tipo incompativel para leitura: POINTER",
            ])
        );
    }

    #[test]
    fn test_control_flow_statements() {
        let source = "\
declare n: inteiro
algoritmo
  para i <- 1 ate 10 faca
    escreva(i)
  fim_para
  enquanto n < 10 faca
    n <- n + k
  fim_enquanto
  faca
    n <- n - 1
  ate n = 0
  caso n seja
    1..3: escreva(\"baixo\")
    senao escreva(m)
  fim_caso
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 3: identificador i nao declarado",
                "Linha 4: identificador i nao declarado",
                "Linha 7: identificador k nao declarado",
                "Linha 7: atribuicao nao compativel para n",
                "Linha 14: identificador m nao declarado",
            ])
        );
    }

    #[test]
    fn test_unsupported_constructs() {
        let source = "\
declare v[5]: inteiro
declare c: registro x: real fim_registro
algoritmo
  v[1] <- 2
  c.x.y <- 1
fim_algoritmo";
        assert_eq!(
            analyze(source),
            lines(&[
                "Linha 1: indexacao de vetores nao implementada: v[5]",
                "Linha 4: indexacao de vetores nao implementada: v[1]",
                "Linha 5: acesso a campos aninhados nao suportado: c.x.y",
            ])
        );
    }

    #[test]
    fn test_separate_analyses_agree() {
        let source = "\
declare x: logico
algoritmo
  x <- 2 * y
  f(1)
fim_algoritmo";
        let program = Parser::new(source).unwrap().parse().unwrap();

        let first = SemanticAnalyzer::new().analyze(&program).lines();
        let second = SemanticAnalyzer::new().analyze(&program).lines();
        assert_eq!(first, second);

        let mut reused = SemanticAnalyzer::new();
        reused.analyze(&program);
        assert_eq!(reused.analyze(&program).lines(), first);
    }
}
