use crate::{
    ast::FieldKind,
    forms::{FormDefinition, FormField},
};

const IMPORTS: &str = r#""use client"

import { zodResolver } from "@hookform/resolvers/zod"
import { useForm } from "react-hook-form"
import * as z from "zod"
import { Button } from "@/components/ui/button"
import {
  Form,
  FormControl,
  FormField,
  FormItem,
  FormLabel,
  FormMessage,
} from "@/components/ui/form"
import { Input } from "@/components/ui/input"
import {
  Select,
  SelectContent,
  SelectItem,
  SelectTrigger,
  SelectValue,
} from "@/components/ui/select"
import { Checkbox } from "@/components/ui/checkbox"
"#;

/// Name of the generated component: the form name with its first character
/// upper-cased, followed by `Form`.
///
/// # Example
/// ```
/// use pato::codegen::component_name;
///
/// assert_eq!(component_name("signup"), "SignupForm");
/// ```
#[must_use]
pub fn component_name(form_name: &str) -> String {
    let mut chars = form_name.chars();
    let mut name: String = chars.next()
                                .map(|first| first.to_uppercase().collect())
                                .unwrap_or_default();
    name.push_str(chars.as_str());
    name.push_str("Form");
    name
}

fn zod_schema(fields: &[FormField]) -> String {
    let entries: Vec<String> =
        fields.iter()
              .map(|field| {
                  let required = field.properties.required;
                  let validation = match field.kind {
                      FieldKind::String | FieldKind::Select if required => {
                          "z.string().min(1, 'This field is required')"
                      },
                      FieldKind::String | FieldKind::Select => "z.string()",
                      FieldKind::Checkbox if required => {
                          "z.boolean().refine((val) => val === true, 'This field is required')"
                      },
                      FieldKind::Checkbox => "z.boolean()",
                  };
                  format!("  {}: {validation}", field.name)
              })
              .collect();
    format!("const formSchema = z.object({{\n{}\n}});", entries.join(",\n"))
}

fn default_values(fields: &[FormField]) -> String {
    fields.iter()
          .map(|field| match field.kind {
              FieldKind::Checkbox => format!("{}: false", field.name),
              FieldKind::String | FieldKind::Select => format!("{}: \"\"", field.name),
          })
          .collect::<Vec<_>>()
          .join(",\n      ")
}

fn form_field(field: &FormField) -> String {
    let name = &field.name;
    let label = &field.properties.label;
    let placeholder = &field.properties.placeholder;
    match field.kind {
        FieldKind::String => format!(r#"
        <FormField
          control={{form.control}}
          name="{name}"
          render={{({{ field }}) => (
            <FormItem>
              <FormLabel>{label}</FormLabel>
              <FormControl>
                <Input placeholder="{placeholder}" {{...field}} />
              </FormControl>
              <FormMessage />
            </FormItem>
          )}}
        />"#),
        FieldKind::Select => {
            let items = field.properties
                             .options
                             .iter()
                             .map(|option| format!(r#"<SelectItem value="{option}">{option}</SelectItem>"#))
                             .collect::<Vec<_>>()
                             .join("\n");
            format!(r#"
        <FormField
          control={{form.control}}
          name="{name}"
          render={{({{ field }}) => (
            <FormItem>
              <FormLabel>{label}</FormLabel>
              <Select onValueChange={{field.onChange}} defaultValue={{field.value}}>
                <FormControl>
                  <SelectTrigger>
                    <SelectValue placeholder="{placeholder}" />
                  </SelectTrigger>
                </FormControl>
                <SelectContent>
                  {items}
                </SelectContent>
              </Select>
              <FormMessage />
            </FormItem>
          )}}
        />"#)
        },
        FieldKind::Checkbox => format!(r#"
        <FormField
          control={{form.control}}
          name="{name}"
          render={{({{ field }}) => (
            <FormItem className="flex flex-row items-start space-x-3 space-y-0">
              <FormControl>
                <Checkbox
                  checked={{field.value}}
                  onCheckedChange={{field.onChange}}
                />
              </FormControl>
              <div className="space-y-1 leading-none">
                <FormLabel>{label}</FormLabel>
              </div>
            </FormItem>
          )}}
        />"#),
    }
}

/// Renders a React component for `form`.
///
/// The component validates with a Zod schema derived from the fields,
/// initializes every field to its empty value and renders one `FormField`
/// per field in order, followed by a submit button.
#[must_use]
pub fn generate_form_component(form: &FormDefinition) -> String {
    let name = component_name(&form.name);
    let schema = zod_schema(&form.fields);
    let defaults = default_values(&form.fields);
    let fields = form.fields.iter().map(form_field).collect::<Vec<_>>().join("\n");

    format!(r#"{IMPORTS}
{schema}

export function {name}() {{
  const form = useForm<z.infer<typeof formSchema>>({{
    resolver: zodResolver(formSchema),
    defaultValues: {{
      {defaults}
    }},
  }})

  function onSubmit(values: z.infer<typeof formSchema>) {{
    console.log(values)
  }}

  return (
    <Form {{...form}}>
      <form onSubmit={{form.handleSubmit(onSubmit)}} className="space-y-8">
        {fields}
        <Button type="submit">Submit</Button>
      </form>
    </Form>
  )
}}"#)
}

/// Renders one component per form, in the given order.
#[must_use]
pub fn generate_forms(forms: &[FormDefinition]) -> Vec<String> {
    forms.iter().map(generate_form_component).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::forms::FieldProperties;

    fn field(kind: FieldKind, name: &str, properties: FieldProperties) -> FormField {
        FormField { kind,
                    name: name.to_string(),
                    properties }
    }

    #[test]
    fn schema_marks_required_fields() {
        let fields = vec![field(FieldKind::String,
                                "name",
                                FieldProperties { required: true,
                                                  ..FieldProperties::default() }),
                          field(FieldKind::Select, "plan", FieldProperties::default()),
                          field(FieldKind::Checkbox,
                                "terms",
                                FieldProperties { required: true,
                                                  ..FieldProperties::default() })];
        assert_eq!(zod_schema(&fields),
                   "const formSchema = z.object({\n  name: z.string().min(1, 'This field is \
                    required'),\n  plan: z.string(),\n  terms: z.boolean().refine((val) => val \
                    === true, 'This field is required')\n});");
    }

    #[test]
    fn defaults_use_false_for_checkboxes() {
        let fields = vec![field(FieldKind::String, "a", FieldProperties::default()),
                          field(FieldKind::Checkbox, "b", FieldProperties::default())];
        assert_eq!(default_values(&fields), "a: \"\",\n      b: false");
    }

    #[test]
    fn select_lists_its_options() {
        let select = field(FieldKind::Select,
                           "plan",
                           FieldProperties { options: vec!["Free".to_string(), "Pro".to_string()],
                                             ..FieldProperties::default() });
        let rendered = form_field(&select);
        assert!(rendered.contains(r#"<SelectItem value="Free">Free</SelectItem>
<SelectItem value="Pro">Pro</SelectItem>"#));
    }

    #[test]
    fn component_has_imports_name_and_fields() {
        let form = FormDefinition { name:   "contact".to_string(),
                                    fields: vec![field(FieldKind::String,
                                                       "email",
                                                       FieldProperties { label:
                                                                             "Email".to_string(),
                                                                         ..FieldProperties::default() })], };
        let component = generate_form_component(&form);
        assert!(component.starts_with("\"use client\"\n"));
        assert!(component.contains("export function ContactForm() {"));
        assert!(component.contains("<FormLabel>Email</FormLabel>"));
        assert!(component.contains("name=\"email\""));
        assert!(component.ends_with("  )\n}"));
    }

    #[test]
    fn empty_name_still_produces_a_component_name() {
        assert_eq!(component_name(""), "Form");
        assert_eq!(component_name("éclair"), "ÉclairForm");
    }
}
