// Schema - parse untyped JSON into validated values
use serde_json::{Map, Value};

use super::{ValidationResult, Validator};

/// A validator that turns an untyped JSON value into `Output`.
///
/// Implementations never panic on malformed input; every failure is
/// reported through the returned [`ValidationError`](super::ValidationError).
/// Unknown object keys are ignored so producers can add fields without
/// breaking consumers.
pub trait Schema {
    /// Validated value produced on success
    type Output;

    /// Validate `value`, returning the parsed output or every failure found
    fn safe_parse(&self, value: &Value) -> ValidationResult<Self::Output>;

}

/// Name of a JSON value's type as used in validation messages.
pub fn json_type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Field reader over a JSON object that records failures on a [`Validator`].
#[derive(Debug, Clone, Copy)]
pub struct JsonObject<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    /// Borrow `value` as an object, recording a root-level failure otherwise
    pub fn from_value(value: &'a Value, validator: &mut Validator) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self { map }),
            other => {
                validator.add_error_with_code(
                    "",
                    format!(
                        "Invalid input: expected object, received {}",
                        json_type_name(Some(other))
                    ),
                    "invalid_type",
                );
                None
            }
        }
    }

    /// A string field that must be present and non-empty
    pub fn required_string(&self, field: &str, validator: &mut Validator) -> Option<String> {
        match self.map.get(field) {
            Some(Value::String(s)) if s.is_empty() => {
                validator.add_error_with_code(
                    field,
                    "Too small: expected string to have >=1 characters",
                    "too_small",
                );
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            other => {
                Self::invalid_type(field, other, validator);
                None
            }
        }
    }

    /// A string field that may be absent; present values must be strings
    pub fn optional_string(&self, field: &str, validator: &mut Validator) -> Option<String> {
        match self.map.get(field) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            other => {
                Self::invalid_type(field, other, validator);
                None
            }
        }
    }

    fn invalid_type(field: &str, found: Option<&Value>, validator: &mut Validator) {
        validator.add_error_with_code(
            field,
            format!("Invalid input: expected string, received {}", json_type_name(found)),
            "invalid_type",
        );
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct NameSchema;

    impl Schema for NameSchema {
        type Output = (String, Option<String>);

        fn safe_parse(&self, value: &Value) -> ValidationResult<Self::Output> {
            let mut validator = Validator::new();
            let Some(obj) = JsonObject::from_value(value, &mut validator) else {
                return validator.finish((String::new(), None));
            };
            let name = obj.required_string("name", &mut validator);
            let nick = obj.optional_string("nick", &mut validator);
            validator.finish((name.unwrap_or_default(), nick))
        }
    }

    #[test]
    fn parses_known_fields_and_ignores_unknown() {
        let parsed = NameSchema.safe_parse(&json!({"name": "a", "extra": 1})).unwrap();
        assert_eq!(parsed, ("a".to_string(), None));
    }

    #[test]
    fn reports_missing_and_mistyped_fields() {
        let err = NameSchema.safe_parse(&json!({"nick": 5})).unwrap_err();
        assert_eq!(err.error_count(), 2);
        assert_eq!(
            err.field_errors("name")[0].message,
            "Invalid input: expected string, received undefined"
        );
        assert_eq!(err.field_errors("nick")[0].code.as_deref(), Some("invalid_type"));
    }

    #[test]
    fn rejects_empty_required_string() {
        let err = NameSchema.safe_parse(&json!({"name": ""})).unwrap_err();
        assert_eq!(err.errors[0].code.as_deref(), Some("too_small"));
    }

    #[test]
    fn rejects_non_object_root() {
        let err = NameSchema.safe_parse(&json!(["name"])).unwrap_err();
        assert_eq!(err.errors[0].field, "");
        assert_eq!(err.errors[0].message, "Invalid input: expected object, received array");
    }
}
