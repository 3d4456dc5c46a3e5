use indexmap::{IndexMap, map::Entry};

use crate::{
    ast::{FieldKind, Node, NodeKind, PropertyValue},
    error::RuntimeError,
    forms::{FieldProperties, FormDefinition, FormField},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

impl Context {
    /// Extracts the fields of a form declaration and registers the form.
    ///
    /// Children are resolved in order into one flat field list:
    /// - a field declaration contributes one field.
    /// - an `if` contributes the fields of its body when the condition holds.
    /// - a `for` contributes the fields of its body once per iteration, each
    ///   named `<name>_<iteration>` starting at 1.
    ///
    /// A form registered earlier under the same name is replaced.
    pub fn eval_form_declaration(&mut self,
                                 name: &str,
                                 body: &[Node],
                                 line: usize)
                                 -> EvalResult<()> {
        let mut extraction = Extraction { form:   name,
                                          fields: IndexMap::new(), };
        for child in body {
            match &child.kind {
                NodeKind::FieldDeclaration { .. } => {
                    let field = self.extract_field(child, None)?;
                    extraction.push(field, child.line)?;
                },
                NodeKind::If { condition,
                               then_branch,
                               .. } => {
                    if self.eval(condition)?.as_condition("if", condition.line)? {
                        self.extract_body(then_branch, None, &mut extraction)?;
                    }
                },
                NodeKind::While { condition, body } => {
                    self.scopes.push_isolated();
                    let result = self.extract_loop(condition, body, &mut extraction);
                    self.scopes.pop();
                    result?;
                },
                NodeKind::NoOp => {},
                _ => {
                    return Err(RuntimeError::UnexpectedNode { node:  child.describe(),
                                                              phase: "form extraction",
                                                              line:  child.line, });
                },
            }
        }

        tracing::debug!(form = name, line, fields = extraction.fields.len(), "registered form");
        let form = FormDefinition { name:   name.to_string(),
                                    fields: extraction.fields.into_values().collect(), };
        if self.forms.insert(form).is_some() {
            tracing::debug!(form = name, "replaced earlier definition");
        }
        Ok(())
    }

    /// Unrolls a form-level loop inside the isolated scope pushed by the
    /// caller.
    ///
    /// Each iteration runs the body, which updates the loop scope, then
    /// extracts the body's fields against that scope, then checks the
    /// condition again.
    fn extract_loop(&mut self,
                    condition: &Node,
                    body: &Node,
                    extraction: &mut Extraction<'_>)
                    -> EvalResult<()> {
        let mut iteration: u64 = 0;
        while self.eval(condition)?.as_condition("for", condition.line)? {
            self.budget.tick(condition.line)?;
            iteration += 1;
            self.eval_statement(body)?;
            self.extract_body(body, Some(iteration), extraction)?;
        }
        tracing::trace!(form = extraction.form, iterations = iteration, "unrolled form loop");
        Ok(())
    }

    /// Collects the field declarations directly inside `block`.
    ///
    /// Assignments were already executed by the loop and blank lines carry
    /// nothing, so both are skipped.
    fn extract_body(&mut self,
                    block: &Node,
                    iteration: Option<u64>,
                    extraction: &mut Extraction<'_>)
                    -> EvalResult<()> {
        let NodeKind::Block(statements) = &block.kind else {
            return Err(RuntimeError::UnexpectedNode { node:  block.describe(),
                                                      phase: "form extraction",
                                                      line:  block.line, });
        };
        for statement in statements {
            match &statement.kind {
                NodeKind::FieldDeclaration { .. } => {
                    let field = self.extract_field(statement, iteration)?;
                    extraction.push(field, statement.line)?;
                },
                NodeKind::Assignment { .. } | NodeKind::NoOp => {},
                _ => {
                    return Err(RuntimeError::UnexpectedNode { node:  statement.describe(),
                                                              phase: "form extraction",
                                                              line:  statement.line, });
                },
            }
        }
        Ok(())
    }

    /// Builds a [`FormField`] from a field declaration node.
    fn extract_field(&self, node: &Node, iteration: Option<u64>) -> EvalResult<FormField> {
        let NodeKind::FieldDeclaration { kind,
                                         name,
                                         properties, } = &node.kind
        else {
            return Err(RuntimeError::UnexpectedNode { node:  node.describe(),
                                                      phase: "field extraction",
                                                      line:  node.line, });
        };
        let name = match iteration {
            Some(iteration) => format!("{name}_{iteration}"),
            None => name.clone(),
        };
        let properties = self.extract_properties(*kind, &name, properties)?;
        Ok(FormField { kind: *kind,
                       name,
                       properties })
    }

    /// Applies the declared properties over the defaults.
    ///
    /// `options` must be an array; its strings and string-valued identifiers
    /// are kept in order, empty strings dropped. `label` and `placeholder`
    /// take string literals and `required` a boolean literal. Anything else
    /// is ignored.
    fn extract_properties(&self,
                          kind: FieldKind,
                          field: &str,
                          properties: &[Node])
                          -> EvalResult<FieldProperties> {
        let mut extracted = FieldProperties::default();
        for property in properties {
            let NodeKind::FieldProperty { key, value } = &property.kind else {
                return Err(RuntimeError::UnexpectedNode { node:  property.describe(),
                                                          phase: "field extraction",
                                                          line:  property.line, });
            };
            let scalar = match value {
                PropertyValue::Scalar(node) => Some(&node.kind),
                PropertyValue::Array(_) => None,
            };
            match (key.as_str(), value, scalar) {
                ("options", PropertyValue::Array(items), _) => {
                    extracted.options = self.resolve_options(items)?;
                },
                ("options", PropertyValue::Scalar(_), _) => {
                    return Err(RuntimeError::InvalidProperty { field:   field.to_string(),
                                                               key:     key.clone(),
                                                               details: "must be an array".to_string(),
                                                               line:    property.line, });
                },
                ("label", _, Some(NodeKind::Str(label))) => extracted.label.clone_from(label),
                ("placeholder", _, Some(NodeKind::Str(placeholder))) => {
                    extracted.placeholder.clone_from(placeholder);
                },
                ("required", _, Some(NodeKind::Bool(required))) => extracted.required = *required,
                _ => {
                    tracing::debug!(field, key = key.as_str(), kind = %kind, "ignoring property");
                },
            }
        }
        Ok(extracted)
    }

    /// Resolves the elements of an `options` array against the current scope.
    fn resolve_options(&self, items: &[Node]) -> EvalResult<Vec<String>> {
        let mut options = Vec::with_capacity(items.len());
        for item in items {
            let option = match &item.kind {
                NodeKind::Str(s) => s.clone(),
                NodeKind::Identifier(name) => match self.scopes.value(name, item.line)? {
                    Value::Str(s) => s.clone(),
                    Value::Int(_) | Value::Bool(_) => String::new(),
                },
                _ => String::new(),
            };
            if !option.is_empty() {
                options.push(option);
            }
        }
        Ok(options)
    }
}

/// Fields collected so far for one form, keyed by name in extraction order.
struct Extraction<'a> {
    form:   &'a str,
    fields: IndexMap<String, FormField>,
}

impl Extraction<'_> {
    /// Appends `field`, rejecting a name the form already has.
    fn push(&mut self, field: FormField, line: usize) -> EvalResult<()> {
        match self.fields.entry(field.name.clone()) {
            Entry::Occupied(_) => Err(RuntimeError::DuplicateField { form: self.form.to_string(),
                                                                     field: field.name,
                                                                     line }),
            Entry::Vacant(slot) => {
                slot.insert(field);
                Ok(())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::CompileOptions, parse};

    fn run(source: &str) -> EvalResult<Context> {
        let root = parse(source).unwrap();
        let mut context = Context::new();
        context.eval_statement(&root)?;
        Ok(context)
    }

    fn field_names(context: &Context, form: &str) -> Vec<String> {
        context.forms
               .get(form)
               .map(|f| f.fields.iter().map(|field| field.name.clone()).collect())
               .unwrap_or_default()
    }

    #[test]
    fn loop_unrolls_with_suffixes() {
        let source = indoc! {r#"
            {
              var counter int = 0
              form f {
                for counter < 3 {
                  string_field x { label: "X" }
                  counter = counter + 1
                }
              }
              Println(counter)
            }
        "#};
        let context = run(source).unwrap();
        assert_eq!(field_names(&context, "f"), vec!["x_1", "x_2", "x_3"]);
        assert_eq!(context.output, vec!["0"]);
    }

    #[test]
    fn options_resolve_identifiers_in_the_loop_scope() {
        let source = indoc! {r#"
            {
              var i int = 0
              var choice string = "first"
              form f {
                for i < 2 {
                  select_field s { options: [choice, ""] }
                  i = i + 1
                  choice = "next"
                }
              }
            }
        "#};
        let context = run(source).unwrap();
        let form = context.forms.get("f").unwrap();
        let options: Vec<_> = form.fields.iter().map(|f| f.properties.options.clone()).collect();
        assert_eq!(options, vec![vec!["next".to_string()], vec!["next".to_string()]]);
        assert_eq!(context.scopes.value("choice", 0).unwrap(), &Value::from("first"));
    }

    #[test]
    fn non_string_identifier_options_are_dropped() {
        let source = indoc! {r#"
            {
              var n int = 4
              form f {
                select_field s { options: ["A", n, "B"] }
              }
            }
        "#};
        let context = run(source).unwrap();
        assert_eq!(context.forms.get("f").unwrap().fields[0].properties.options,
                   vec!["A", "B"]);
    }

    #[test]
    fn scalar_options_are_a_type_error() {
        let source = "{\nform f {\nselect_field s { options: \"A\" }\n}\n}";
        assert!(matches!(run(source), Err(RuntimeError::InvalidProperty { .. })));
    }

    #[test]
    fn mistyped_properties_are_ignored() {
        let source = indoc! {r#"
            {
              form f {
                string_field a { label: 3, required: "yes", color: "red", placeholder: "p" }
              }
            }
        "#};
        let context = run(source).unwrap();
        assert_eq!(context.forms.get("f").unwrap().fields[0].properties,
                   FieldProperties { placeholder: "p".to_string(),
                                     ..FieldProperties::default() });
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let source = "{\nform f {\nstring_field a { }\ncheckbox_field a { }\n}\n}";
        assert_eq!(run(source).unwrap_err(),
                   RuntimeError::DuplicateField { form:  "f".to_string(),
                                                  field: "a".to_string(),
                                                  line:  4, });
    }

    #[test]
    fn form_condition_must_be_boolean() {
        let source = "{\nform f {\nif 1 {\nstring_field a { }\n}\n}\n}";
        assert!(matches!(run(source),
                         Err(RuntimeError::ConditionNotBoolean { construct: "if", .. })));
    }

    #[test]
    fn exhausted_form_loop_releases_its_scope() {
        let source = indoc! {r#"
            {
              var seen int = 0
              form f {
                for true {
                  string_field x { }
                  seen = seen + 1
                }
              }
            }
        "#};
        let root = parse(source).unwrap();
        let mut context =
            Context::with_options(&CompileOptions::unbounded().with_max_iterations(50));
        assert_eq!(context.eval_statement(&root).unwrap_err(),
                   RuntimeError::IterationBudgetExceeded { limit: 50,
                                                           line:  4, });
        assert_eq!(context.scopes.depth(), 1);
        assert_eq!(context.scopes.value("seen", 0).unwrap(), &Value::Int(0));
        assert!(context.forms.get("f").is_none());
    }

    #[test]
    fn undeclared_identifier_in_options_is_a_name_error() {
        let source = "{\nform f {\nselect_field s { options: [missing] }\n}\n}";
        assert!(matches!(run(source), Err(RuntimeError::UndeclaredVariable { .. })));
    }
}
