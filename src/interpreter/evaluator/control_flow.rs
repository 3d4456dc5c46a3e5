use crate::{
    ast::Node,
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Context {
    /// Evaluates `if condition then_branch [else else_branch]`.
    ///
    /// The condition must be a boolean. Branches run in the current scope.
    pub fn eval_if(&mut self,
                   condition: &Node,
                   then_branch: &Node,
                   else_branch: Option<&Node>)
                   -> EvalResult<()> {
        if self.eval(condition)?.as_condition("if", condition.line)? {
            self.eval_statement(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.eval_statement(else_branch)
        } else {
            Ok(())
        }
    }

    /// Evaluates `for condition body`, which repeats while the condition
    /// holds.
    ///
    /// The body runs in the current scope, so its assignments are visible
    /// after the loop. Every iteration is charged against the budget.
    pub fn eval_while(&mut self, condition: &Node, body: &Node) -> EvalResult<()> {
        while self.eval(condition)?.as_condition("for", condition.line)? {
            self.budget.tick(condition.line)?;
            self.eval_statement(body)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use crate::{
        config::CompileOptions,
        error::RuntimeError,
        interpreter::{evaluator::core::Context, value::Value},
        parse,
    };

    fn run_with(source: &str, options: &CompileOptions) -> Result<Context, RuntimeError> {
        let root = parse(source).unwrap();
        let mut context = Context::with_options(options);
        context.eval_statement(&root)?;
        Ok(context)
    }

    #[test]
    fn loop_runs_until_condition_fails() {
        let source = indoc! {"
            {
              var i int = 0
              for i < 3 {
                Println(i)
                i = i + 1
              }
            }
        "};
        let context = run_with(source, &CompileOptions::default()).unwrap();
        assert_eq!(context.output, vec!["0", "1", "2"]);
        assert_eq!(context.scopes.value("i", 0).unwrap(), &Value::Int(3));
        assert_eq!(context.iterations(), 3);
    }

    #[test]
    fn else_branch_runs_when_condition_is_false() {
        let source = indoc! {r#"
            {
              if 2 < 1 {
                Println("then")
              } else {
                Println("else")
              }
            }
        "#};
        let context = run_with(source, &CompileOptions::default()).unwrap();
        assert_eq!(context.output, vec!["else"]);
    }

    #[test]
    fn integer_condition_is_a_type_error() {
        let err = run_with("{\nif 1 {\n}\n}", &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, RuntimeError::ConditionNotBoolean { construct: "if", .. }));
    }

    #[test]
    fn endless_loop_hits_the_budget() {
        let options = CompileOptions::unbounded().with_max_iterations(50);
        let err = run_with("{\nfor true {\n}\n}", &options).unwrap_err();
        assert_eq!(err,
                   RuntimeError::IterationBudgetExceeded { limit: 50,
                                                           line:  2, });
    }
}
