use indoc::indoc;
use std::time::{Duration, Instant};

use pato::{
    CompileOptions, ErrorKind, FieldProperties, FormDefinition, FormField, ast::FieldKind, compile,
    compile_with, interpreter::parser::core::parse_program,
};
use pretty_assertions::assert_eq;

fn forms(source: &str) -> Vec<FormDefinition> {
    match compile(source) {
        Ok(compilation) => compilation.forms,
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn names(form: &FormDefinition) -> Vec<&str> {
    form.fields.iter().map(|field| field.name.as_str()).collect()
}

#[test]
fn plain_fields_keep_declaration_order() {
    let source = indoc! {r#"
        {
          form signup {
            string_field name { label: "Name", placeholder: "Jane", required: true }
            checkbox_field terms { label: "I agree" }
            select_field plan { label: "Plan", options: ["Free", "Pro"] }
          }
        }
    "#};
    let forms = forms(source);
    assert_eq!(forms,
               vec![FormDefinition { name:   "signup".to_string(),
                                     fields: vec![FormField { kind:       FieldKind::String,
                                                              name:       "name".to_string(),
                                                              properties: FieldProperties { label:       "Name".to_string(),
                                                                                            required:    true,
                                                                                            placeholder: "Jane".to_string(),
                                                                                            options:     vec![], }, },
                                                  FormField { kind:       FieldKind::Checkbox,
                                                              name:       "terms".to_string(),
                                                              properties: FieldProperties { label: "I agree".to_string(),
                                                                                            ..FieldProperties::default() }, },
                                                  FormField { kind:       FieldKind::Select,
                                                              name:       "plan".to_string(),
                                                              properties: FieldProperties { label:   "Plan".to_string(),
                                                                                            options: vec!["Free".to_string(),
                                                                                                          "Pro".to_string()],
                                                                                            ..FieldProperties::default() }, }], }]);
}

#[test]
fn false_branch_contributes_nothing() {
    let source = indoc! {r#"
        {
          form f {
            string_field before { }
            if false {
              string_field a { label: "A" }
            }
            if (1 < 2) {
              string_field b { }
              string_field c { }
            }
          }
        }
    "#};
    assert_eq!(names(&forms(source)[0]), vec!["before", "b", "c"]);
}

#[test]
fn conditions_see_program_variables() {
    let source = indoc! {r#"
        {
          var premium bool = true
          form f {
            if premium {
              checkbox_field priority { }
            }
            if !premium {
              checkbox_field ads { }
            }
          }
        }
    "#};
    assert_eq!(names(&forms(source)[0]), vec!["priority"]);
}

#[test]
fn loop_yields_numbered_fields() {
    let source = indoc! {r#"
        {
          var counter int = 0
          form f {
            for (counter < 3) {
              string_field x { label: "X" }
              counter = counter + 1
            }
          }
        }
    "#};
    assert_eq!(names(&forms(source)[0]), vec!["x_1", "x_2", "x_3"]);
}

#[test]
fn loop_that_never_runs_yields_nothing() {
    let source = indoc! {r#"
        {
          var counter int = 5
          form f {
            for counter < 3 {
              string_field x { }
              counter = counter + 1
            }
          }
        }
    "#};
    assert!(forms(source)[0].fields.is_empty());
}

#[test]
fn loop_variable_is_not_updated_after_the_form() {
    let source = indoc! {r#"
        {
          var counter int = 0
          form f {
            for counter < 2 {
              string_field x { }
              counter = counter + 1
            }
          }
          Println(counter)
          form g {
            for counter < 1 {
              checkbox_field y { }
              counter = counter + 1
            }
          }
        }
    "#};
    let compilation = compile(source).unwrap();
    assert_eq!(compilation.output, vec!["0"]);
    assert_eq!(names(&compilation.forms[1]), vec!["y_1"]);
}

#[test]
fn two_loops_number_independently() {
    let source = indoc! {r#"
        {
          var i int = 0
          form f {
            for i < 2 {
              string_field a { }
              i = i + 1
            }
            for i < 1 {
              string_field b { }
              i = i + 1
            }
          }
        }
    "#};
    assert_eq!(names(&forms(source)[0]), vec!["a_1", "a_2", "b_1"]);
}

#[test]
fn options_keep_order_and_resolve_identifiers() {
    let source = indoc! {r#"
        {
          var third string = "C"
          form f {
            select_field pick {
              options: ["A", "B", third]
            }
          }
        }
    "#};
    assert_eq!(forms(source)[0].fields[0].properties.options, vec!["A", "B", "C"]);
}

#[test]
fn compiling_twice_gives_the_same_forms() {
    let source = indoc! {r#"
        {
          var n int = 0
          form f {
            for n < 2 {
              string_field x { }
              n = n + 1
            }
          }
        }
    "#};
    let first = compile(source).unwrap();
    let second = compile(source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn node_ids_restart_for_every_parse() {
    let source = "{\nPrintln(1)\n}";
    assert_eq!(parse_program(source).unwrap(), parse_program(source).unwrap());
}

#[test]
fn unterminated_string_produces_no_forms() {
    let source = indoc! {r#"
        {
          form f {
            string_field a { label: "open }
          }
        }
    "#};
    let err = compile(source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Lexical);
}

#[test]
fn later_form_with_the_same_name_wins() {
    let source = indoc! {r#"
        {
          form f {
            string_field old { }
          }
          form other {
          }
          form f {
            string_field new_one { }
            string_field new_two { }
          }
        }
    "#};
    let forms = forms(source);
    let form_names: Vec<_> = forms.iter().map(|form| form.name.as_str()).collect();
    assert_eq!(form_names, vec!["f", "other"]);
    assert_eq!(names(&forms[0]), vec!["new_one", "new_two"]);
}

#[test]
fn generated_components_match_forms() {
    let source = indoc! {r#"
        {
          form login {
            string_field user { label: "User", required: true }
          }
          form newsletter {
            checkbox_field subscribe { label: "Subscribe" }
          }
        }
    "#};
    let compilation = compile(source).unwrap();
    assert_eq!(compilation.generated.len(), 2);
    assert!(compilation.generated[0].contains("export function LoginForm()"));
    assert!(compilation.generated[0].contains("user: z.string().min(1, 'This field is required')"));
    assert!(compilation.generated[1].contains("export function NewsletterForm()"));
    assert!(compilation.generated[1].contains("subscribe: false"));
}

#[test]
fn form_errors() {
    let cases = [("{\nform f {\nif true {\nPrintln(1)\n}\n}\n}", ErrorKind::Syntax),
                 ("{\nform f {\nvar x int\n}\n}", ErrorKind::Syntax),
                 ("{\nform f {\nif 1 {\n}\n}\n}", ErrorKind::Type),
                 ("{\nform f {\nselect_field s { options: true }\n}\n}", ErrorKind::Type),
                 ("{\nform f {\nstring_field a { }\nstring_field a { }\n}\n}", ErrorKind::Name),
                 ("{\nform f {\nselect_field s { options: [nope] }\n}\n}", ErrorKind::Name)];
    for (source, kind) in cases {
        let err = compile(source).unwrap_err();
        assert_eq!(err.kind(), kind, "{source:?} failed with {err}");
    }
}

#[test]
fn forms_serialize_for_the_host() {
    let source = "{\nform f {\nselect_field s { options: [\"A\"] }\n}\n}";
    let json = serde_json::to_value(forms(source)).unwrap();
    assert_eq!(json,
               serde_json::json!([{
                   "name": "f",
                   "fields": [{
                       "type": "select_field",
                       "name": "s",
                       "properties": {
                           "label": "",
                           "required": false,
                           "placeholder": "",
                           "options": ["A"]
                       }
                   }]
               }]));
}

#[test]
fn runaway_form_loop_is_stopped_by_the_budget() {
    let source = indoc! {r#"
        {
          form f {
            for true {
              string_field x { }
            }
          }
        }
    "#};
    let options = CompileOptions::default().with_max_iterations(100_000);
    let started = Instant::now();
    let err = compile_with(source, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Budget);
    assert_eq!(err.line(), 3);
    assert!(started.elapsed() < Duration::from_secs(30),
            "unrolling took {:?}",
            started.elapsed());
}
