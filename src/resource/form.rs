//! Form schema: the fields an admin fills in to create or edit a record.

use crate::case::headline;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text.
    TextInput,
    /// Multi-line text.
    Textarea,
    /// Boolean switch.
    Toggle,
}

impl FieldKind {
    pub fn is_text(self) -> bool {
        matches!(self, FieldKind::TextInput | FieldKind::Textarea)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// Stored field name; never affected by the label.
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
}

impl FormField {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            label: headline(name),
            required: false,
        }
    }

    pub fn text_input(name: &str) -> Self {
        Self::new(name, FieldKind::TextInput)
    }

    pub fn textarea(name: &str) -> Self {
        Self::new(name, FieldKind::Textarea)
    }

    pub fn toggle(name: &str) -> Self {
        Self::new(name, FieldKind::Toggle)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FormSchema {
    fields: Vec<FormField>,
}

impl FormSchema {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
