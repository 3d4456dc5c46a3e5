use crate::{
    ast::{Node, NodeKind},
    config::CompileOptions,
    error::RuntimeError,
    forms::FormStore,
    interpreter::{evaluator::budget::Budget, symbol_table::Scopes, value::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// This struct holds everything one compile mutates: the variable scopes, the
/// forms extracted so far and the lines printed by `Println`. Each compile
/// owns its own context, so concurrent compiles never share state.
#[derive(Debug, Default)]
pub struct Context {
    /// Variables visible to the program.
    pub scopes: Scopes,
    /// Forms registered by evaluated form declarations.
    pub forms:  FormStore,
    /// Lines emitted by `Println`, in execution order.
    pub output: Vec<String>,
    pub(in crate::interpreter::evaluator) budget: Budget,
}

impl Context {
    /// Creates a context with empty scopes and no evaluation limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context whose evaluation is bounded by `options`.
    #[must_use]
    pub fn with_options(options: &CompileOptions) -> Self {
        Self { budget: Budget::from_options(options),
               ..Self::default() }
    }

    /// Loop iterations executed so far.
    #[must_use]
    pub const fn iterations(&self) -> u64 {
        self.budget.iterations()
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Literals
    /// evaluate to themselves, identifiers read their initialized value, and
    /// operators evaluate both operands left to right before applying.
    ///
    /// # Errors
    /// Name errors for undeclared or uninitialized variables, type errors for
    /// unsupported operand types, arithmetic errors, and an internal error
    /// when given a statement node.
    ///
    /// # Example
    /// ```
    /// use pato::interpreter::{evaluator::core::Context, value::Value};
    ///
    /// let root = pato::parse("{\nPrintln(7 / 2)\n}").unwrap();
    /// let mut context = Context::new();
    /// context.eval_statement(&root).unwrap();
    /// assert_eq!(context.output, vec!["3"]);
    /// ```
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        match &node.kind {
            NodeKind::Int(n) => Ok(Value::Int(*n)),
            NodeKind::Str(s) => Ok(Value::Str(s.clone())),
            NodeKind::Bool(b) => Ok(Value::Bool(*b)),
            NodeKind::Identifier(name) => Ok(self.scopes.value(name, node.line)?.clone()),
            NodeKind::UnaryOp { op, operand } => {
                let value = self.eval(operand)?;
                Self::eval_unary(*op, value, node.line)
            },
            NodeKind::BinaryOp { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, left, right, node.line)
            },
            NodeKind::Scan => Ok(Value::Int(0)),
            NodeKind::Block(_)
            | NodeKind::Assignment { .. }
            | NodeKind::VarDeclaration { .. }
            | NodeKind::If { .. }
            | NodeKind::While { .. }
            | NodeKind::Print(_)
            | NodeKind::FieldDeclaration { .. }
            | NodeKind::FieldProperty { .. }
            | NodeKind::FormDeclaration { .. }
            | NodeKind::NoOp => Err(RuntimeError::UnexpectedNode { node:  node.describe(),
                                                                   phase: "expression evaluation",
                                                                   line:  node.line, }),
        }
    }

    /// Executes a statement for its side effects.
    ///
    /// Handles blocks, declarations, assignments, `Println`, `if`, `for` and
    /// form declarations. Field declarations outside a form and blank lines
    /// do nothing. Expressions in statement position are evaluated and their
    /// value dropped.
    pub fn eval_statement(&mut self, node: &Node) -> EvalResult<()> {
        tracing::trace!(line = node.line, kind = node.describe(), "statement");
        match &node.kind {
            NodeKind::Block(statements) => self.eval_block(statements),
            NodeKind::Assignment { target, value } => self.eval_assignment(target, value),
            NodeKind::VarDeclaration { name, ty, init } => {
                let value = init.as_deref().map(|init| self.eval(init)).transpose()?;
                if let Some(value) = &value
                   && value.ty() != *ty
                {
                    return Err(RuntimeError::AssignmentTypeMismatch { name:     name.clone(),
                                                                      expected: *ty,
                                                                      found:    value.ty(),
                                                                      line:     node.line, });
                }
                self.scopes.declare(name, *ty, node.line)?;
                match value {
                    Some(value) => self.scopes.assign(name, value, node.line),
                    None => Ok(()),
                }
            },
            NodeKind::If { condition,
                           then_branch,
                           else_branch, } => {
                self.eval_if(condition, then_branch, else_branch.as_deref())
            },
            NodeKind::While { condition, body } => self.eval_while(condition, body),
            NodeKind::Print(expr) => {
                let value = self.eval(expr)?;
                self.output.push(value.to_string());
                Ok(())
            },
            NodeKind::FormDeclaration { name, body } => {
                self.eval_form_declaration(name, body, node.line)
            },
            NodeKind::FieldDeclaration { .. } | NodeKind::NoOp => Ok(()),
            NodeKind::Int(_)
            | NodeKind::Str(_)
            | NodeKind::Bool(_)
            | NodeKind::Identifier(_)
            | NodeKind::UnaryOp { .. }
            | NodeKind::BinaryOp { .. }
            | NodeKind::Scan => self.eval(node).map(drop),
            NodeKind::FieldProperty { .. } => {
                Err(RuntimeError::UnexpectedNode { node:  node.describe(),
                                                   phase: "statement evaluation",
                                                   line:  node.line, })
            },
        }
    }

    /// Evaluates statements in order in the current scope.
    ///
    /// The budget is checked before every statement.
    pub fn eval_block(&mut self, statements: &[Node]) -> EvalResult<()> {
        for statement in statements {
            self.budget.check(statement.line)?;
            self.eval_statement(statement)?;
        }
        Ok(())
    }

    fn eval_assignment(&mut self, target: &Node, value: &Node) -> EvalResult<()> {
        let NodeKind::Identifier(name) = &target.kind else {
            return Err(RuntimeError::UnexpectedNode { node:  target.describe(),
                                                      phase: "assignment",
                                                      line:  target.line, });
        };
        let value = self.eval(value)?;
        self.scopes.assign(name, value, target.line)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{interpreter::value::SymbolType, parse};

    fn run(source: &str) -> EvalResult<Context> {
        let root = parse(source).unwrap();
        let mut context = Context::new();
        context.eval_statement(&root)?;
        Ok(context)
    }

    #[test]
    fn declarations_and_assignments() {
        let source = indoc! {r#"
            {
              var x int = 2
              var s string
              s = "v"
              x = x * 10
              Println(x)
              Println(s)
            }
        "#};
        let context = run(source).unwrap();
        assert_eq!(context.output, vec!["20", "v"]);
        assert_eq!(context.scopes.value("x", 0).unwrap(), &Value::Int(20));
    }

    #[test]
    fn initializer_is_evaluated_before_declaring() {
        let err = run("{\nvar x int = x\n}").unwrap_err();
        assert!(matches!(err, RuntimeError::UndeclaredVariable { .. }));
    }

    #[test]
    fn initializer_type_must_match() {
        let err = run("{\nvar b bool = 1\n}").unwrap_err();
        assert_eq!(err,
                   RuntimeError::AssignmentTypeMismatch { name:     "b".to_string(),
                                                          expected: SymbolType::Bool,
                                                          found:    SymbolType::Int,
                                                          line:     2, });
    }

    #[test]
    fn uninitialized_read_fails() {
        let err = run("{\nvar x int\nPrintln(x)\n}").unwrap_err();
        assert_eq!(err,
                   RuntimeError::Uninitialized { name: "x".to_string(),
                                                 line: 3, });
    }

    #[test]
    fn scan_reads_zero() {
        let context = run("{\nvar n int = Scan()\nPrintln(n + 1)\n}").unwrap();
        assert_eq!(context.output, vec!["1"]);
    }

    #[test]
    fn field_declaration_outside_a_form_does_nothing() {
        let context = run("{\nstring_field a { label: \"A\" }\n}").unwrap();
        assert!(context.forms.is_empty());
    }

    #[test]
    fn statement_node_is_not_an_expression() {
        let root = parse("{\n}").unwrap();
        let err = Context::new().eval(&root).unwrap_err();
        assert!(matches!(err, RuntimeError::UnexpectedNode { node: "block", .. }));
    }
}
