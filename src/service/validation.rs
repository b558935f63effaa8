//! Request validation from the resource's form schema.

use crate::error::{AppError, FieldErrors};
use crate::resource::{FieldKind, FormField, FormSchema};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. Every form field ends up in the result: absent text fields as null,
    /// absent toggles as false. Text is trimmed and blank text becomes null.
    pub fn validate(body: Map<String, Value>, form: &FormSchema) -> Result<Map<String, Value>, AppError> {
        let mut errors = FieldErrors::new();
        reject_unknown(&body, form, &mut errors);
        let mut out = Map::new();
        for field in form.fields() {
            let raw = body.get(&field.name).cloned().unwrap_or(Value::Null);
            if let Some(v) = check_field(field, raw, &mut errors) {
                out.insert(field.name.clone(), v);
            }
        }
        finish(out, errors)
    }

    /// Validate only the fields present in body (edit action). A required field that is
    /// present must still be non-blank.
    pub fn validate_partial(body: Map<String, Value>, form: &FormSchema) -> Result<Map<String, Value>, AppError> {
        let mut errors = FieldErrors::new();
        reject_unknown(&body, form, &mut errors);
        let mut out = Map::new();
        for (name, raw) in body {
            let Some(field) = form.field(&name) else { continue };
            if let Some(v) = check_field(field, raw, &mut errors) {
                out.insert(name, v);
            }
        }
        finish(out, errors)
    }
}

fn finish(out: Map<String, Value>, errors: FieldErrors) -> Result<Map<String, Value>, AppError> {
    if errors.is_empty() {
        Ok(out)
    } else {
        Err(AppError::Validation(errors))
    }
}

fn reject_unknown(body: &Map<String, Value>, form: &FormSchema, errors: &mut FieldErrors) {
    for key in body.keys() {
        if form.field(key).is_none() {
            errors.add(key, format!("the {} field is not part of the form", key));
        }
    }
}

fn check_field(field: &FormField, raw: Value, errors: &mut FieldErrors) -> Option<Value> {
    let attribute = field.label.to_lowercase();
    let value = match normalize(field.kind, raw) {
        Ok(v) => v,
        Err(expected) => {
            errors.add(&field.name, format!("the {} field must be {}", attribute, expected));
            return None;
        }
    };
    if field.required && value.is_null() {
        errors.add(&field.name, format!("the {} field is required", attribute));
        return None;
    }
    Some(value)
}

/// Coerce a submitted value to the field's stored shape. Err carries the expected shape.
fn normalize(kind: FieldKind, raw: Value) -> Result<Value, &'static str> {
    match kind {
        FieldKind::TextInput | FieldKind::Textarea => match raw {
            Value::Null => Ok(Value::Null),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Ok(Value::Null)
                } else {
                    Ok(Value::String(trimmed.to_string()))
                }
            }
            _ => Err("a string"),
        },
        FieldKind::Toggle => match raw {
            Value::Null => Ok(Value::Bool(false)),
            Value::Bool(b) => Ok(Value::Bool(b)),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Ok(Value::Bool(false)),
                Some(1) => Ok(Value::Bool(true)),
                _ => Err("true or false"),
            },
            Value::String(s) => match s.as_str() {
                "0" | "false" => Ok(Value::Bool(false)),
                "1" | "true" => Ok(Value::Bool(true)),
                _ => Err("true or false"),
            },
            _ => Err("true or false"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;
    use crate::todo::TodoResource;
    use serde_json::json;

    fn body(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    fn field_error(err: AppError, field: &str) -> String {
        match err {
            AppError::Validation(errors) => errors.get(field).unwrap_or_default().to_string(),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn create_fills_defaults() {
        let out = RequestValidator::validate(body(json!({ "title": "  Write report " })), &TodoResource.form()).unwrap();
        assert_eq!(out["title"], json!("Write report"));
        assert_eq!(out["description"], Value::Null);
        assert_eq!(out["is_done"], json!(false));
    }

    #[test]
    fn create_requires_title() {
        let err = RequestValidator::validate(body(json!({ "description": "x" })), &TodoResource.form()).unwrap_err();
        assert_eq!(field_error(err, "title"), "the title field is required");
    }

    #[test]
    fn blank_title_is_missing() {
        let err = RequestValidator::validate(body(json!({ "title": "   " })), &TodoResource.form()).unwrap_err();
        assert_eq!(field_error(err, "title"), "the title field is required");
    }

    #[test]
    fn toggle_accepts_numeric_booleans_and_uses_label() {
        let form = TodoResource.form();
        let out = RequestValidator::validate(body(json!({ "title": "a", "is_done": "1" })), &form).unwrap();
        assert_eq!(out["is_done"], json!(true));
        let err = RequestValidator::validate(body(json!({ "title": "a", "is_done": "yes" })), &form).unwrap_err();
        assert_eq!(field_error(err, "is_done"), "the selesai? field must be true or false");
    }

    #[test]
    fn unknown_and_managed_fields_rejected() {
        let err = RequestValidator::validate(
            body(json!({ "title": "a", "created_at": "2026-01-01T00:00:00Z" })),
            &TodoResource.form(),
        )
        .unwrap_err();
        assert_eq!(field_error(err, "created_at"), "the created_at field is not part of the form");
    }

    #[test]
    fn partial_only_touches_present_fields() {
        let out = RequestValidator::validate_partial(body(json!({ "is_done": true })), &TodoResource.form()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out["is_done"], json!(true));
    }

    #[test]
    fn partial_rejects_clearing_title() {
        let err = RequestValidator::validate_partial(body(json!({ "title": "" })), &TodoResource.form()).unwrap_err();
        assert_eq!(field_error(err, "title"), "the title field is required");
    }

    #[test]
    fn text_must_be_string() {
        let err = RequestValidator::validate(body(json!({ "title": 42 })), &TodoResource.form()).unwrap_err();
        assert_eq!(field_error(err, "title"), "the title field must be a string");
    }
}
