use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ast::FieldKind;

/// Metadata of one input field.
///
/// Every property starts from its default and is overridden by the
/// properties written in the field declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldProperties {
    pub label:       String,
    pub required:    bool,
    pub placeholder: String,
    /// Choices of a select field, in declaration order. Never contains empty
    /// strings.
    pub options:     Vec<String>,
}

/// One input definition extracted from a field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(rename = "type")]
    pub kind:       FieldKind,
    /// Declared name, suffixed with `_<iteration>` for fields produced by a
    /// form loop.
    pub name:       String,
    pub properties: FieldProperties,
}

/// A named, ordered list of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub name:   String,
    pub fields: Vec<FormField>,
}

/// Registry of the forms extracted during one compile.
///
/// Iteration follows first-insertion order. Registering a name again replaces
/// the definition but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    forms: IndexMap<String, FormDefinition>,
}

impl FormStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `form` under its name, replacing any previous definition.
    /// Returns the replaced definition, if any.
    pub fn insert(&mut self, form: FormDefinition) -> Option<FormDefinition> {
        self.forms.insert(form.name.clone(), form)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FormDefinition> {
        self.forms.get(name)
    }

    pub fn clear(&mut self) {
        self.forms.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormDefinition> {
        self.forms.values()
    }

    /// Consumes the store, returning the definitions in store order.
    #[must_use]
    pub fn into_forms(self) -> Vec<FormDefinition> {
        self.forms.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn form(name: &str, fields: &[&str]) -> FormDefinition {
        FormDefinition { name:   name.to_string(),
                         fields: fields.iter()
                                       .map(|field| FormField { kind:       FieldKind::String,
                                                                name:       (*field).to_string(),
                                                                properties:
                                                                    FieldProperties::default(), })
                                       .collect(), }
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut store = FormStore::new();
        store.insert(form("a", &["x"]));
        store.insert(form("b", &[]));
        let replaced = store.insert(form("a", &["y", "z"]));

        assert_eq!(replaced, Some(form("a", &["x"])));
        let names: Vec<_> = store.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(store.get("a").map(|f| f.fields.len()), Some(2));
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = FormStore::new();
        store.insert(form("a", &[]));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn field_serializes_with_type_key() {
        let field = FormField { kind:       FieldKind::Checkbox,
                                name:       "terms".to_string(),
                                properties: FieldProperties::default(), };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json,
                   serde_json::json!({
                       "type": "checkbox_field",
                       "name": "terms",
                       "properties": {
                           "label": "",
                           "required": false,
                           "placeholder": "",
                           "options": []
                       }
                   }));
    }
}
