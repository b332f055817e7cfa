//! JSON request body decoding and required-field validation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::shape::{Shape, TypeShape};

/// One rejected body field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every failure found while validating a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("request body failed validation ({} error(s))", errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<ValidationFailure>,
}

impl ValidationErrors {
    fn single(field: &str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ValidationFailure::new(field, message)],
        }
    }
}

/// Decode `bytes` into `T`.
///
/// An empty body counts as `{}`. Required fields that are missing or `null`
/// are all reported together before deserialization is attempted. Keys are
/// matched exactly, as serde matches them.
pub fn decode_body<T>(shape: &TypeShape<T>, bytes: &[u8]) -> Result<T, ValidationErrors>
where
    T: Shape + DeserializeOwned,
{
    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice::<Value>(bytes)
            .map_err(|e| ValidationErrors::single("body", format!("Malformed JSON: {e}")))?
    };

    let Value::Object(object) = &value else {
        return Err(ValidationErrors::single("body", "A JSON object is required."));
    };

    let errors: Vec<_> = shape
        .fields()
        .iter()
        .filter(|field| field.is_required())
        .filter(|field| object.get(field.name()).map_or(true, Value::is_null))
        .map(|field| {
            ValidationFailure::new(field.name(), format!("The {} field is required.", field.name()))
        })
        .collect();
    if !errors.is_empty() {
        return Err(ValidationErrors { errors });
    }

    serde_json::from_value(value).map_err(|e| ValidationErrors::single("body", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{shape_of, FieldTable};
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default, rename_all = "camelCase")]
    struct Rename {
        id: i64,
        first_name: String,
        last_name: String,
    }

    impl Shape for Rename {
        fn fields(table: &mut FieldTable<Self>) {
            table.integer("id", |r, v: i64| r.id = v);
            table.string("firstName", |r, v| r.first_name = v).required();
            table.string("lastName", |r, v| r.last_name = v).required();
        }
    }

    fn decode(body: &str) -> Result<Rename, ValidationErrors> {
        decode_body(&shape_of::<Rename>(), body.as_bytes())
    }

    #[test]
    fn test_valid_body() {
        let decoded = decode(r#"{"id":4,"firstName":"Bruce","lastName":"Wayne"}"#).unwrap();
        assert_eq!(decoded.id, 4);
        assert_eq!(decoded.first_name, "Bruce");
    }

    #[test]
    fn test_all_missing_fields_are_listed() {
        let err = decode(r#"{"firstName":null}"#).unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["firstName", "lastName"]);
        assert_eq!(err.errors[1].message, "The lastName field is required.");
    }

    #[test]
    fn test_required_keys_match_exactly() {
        let err = decode(r#"{"FIRSTNAME":"Bruce","lastName":"Wayne"}"#).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "firstName");
    }

    #[test]
    fn test_empty_body_is_an_empty_object() {
        let err = decode("  ").unwrap_err();
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_structural_failures() {
        let err = decode("[1,2]").unwrap_err();
        assert_eq!(err.errors[0].field, "body");

        let err = decode("{not json").unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert!(err.errors[0].message.starts_with("Malformed JSON"));

        let err = decode(r#"{"id":"x","firstName":"a","lastName":"b"}"#).unwrap_err();
        assert_eq!(err.errors[0].field, "body");
    }
}
