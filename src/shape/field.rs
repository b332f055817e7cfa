//! Field tables and string-to-value conversion.
//!
//! A [`FieldTable`] is filled by [`Shape::fields`](super::Shape::fields). Each
//! typed registration method pairs a parser for the field's primitive kind
//! with a plain setter function, so binding a raw path or query string never
//! needs to know the concrete field type.

use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};
use thiserror::Error;

use super::schema::Shape;

/// Primitive classification of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Number,
    Boolean,
    String,
    /// String restricted to the listed variant names.
    Enumeration(&'static [&'static str]),
    /// Composite value; documented but never bound from path or query.
    Nested,
}

impl FieldKind {
    /// Label used in conversion errors.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::String => "string",
            FieldKind::Enumeration(_) => "enumeration",
            FieldKind::Nested => "object",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A raw path or query string could not be converted to the field's kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert `{value}` to {expected} for field `{field}`")]
pub struct ConversionError {
    pub field: String,
    pub value: String,
    pub expected: &'static str,
}

impl ConversionError {
    pub fn new(field: &str, value: &str, kind: FieldKind) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            expected: kind.label(),
        }
    }
}

type Assign<T> = Box<dyn Fn(&mut T, &str) -> Result<(), ConversionError> + Send + Sync>;

/// One entry of a type's field table.
pub struct FieldBinding<T> {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    schema: fn() -> Value,
    assign: Option<Assign<T>>,
}

impl<T> FieldBinding<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the field can be populated from a path or query string.
    pub fn is_bindable(&self) -> bool {
        self.assign.is_some()
    }

    /// Mark the field as required in request bodies.
    pub fn required(&mut self) -> &mut Self {
        self.required = true;
        self
    }

    /// JSON schema fragment describing the field.
    pub fn schema(&self) -> Value {
        match self.kind {
            FieldKind::Enumeration(variants) => json!({ "type": "string", "enum": variants }),
            _ => (self.schema)(),
        }
    }

    /// Convert `raw` and store it into `target`. Nested fields are left untouched.
    pub fn assign(&self, target: &mut T, raw: &str) -> Result<(), ConversionError> {
        match &self.assign {
            Some(assign) => assign(target, raw),
            None => Ok(()),
        }
    }

    /// Type-erased view used by the descriptor builder.
    pub fn info(&self) -> FieldInfo {
        FieldInfo {
            name: self.name,
            kind: self.kind,
            required: self.required,
            bindable: self.is_bindable(),
            schema: self.schema(),
        }
    }
}

impl<T> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .finish()
    }
}

/// Field description detached from the owning type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub bindable: bool,
    pub schema: Value,
}

/// Ordered list of field bindings for `T`, filled by `Shape::fields`.
pub struct FieldTable<T> {
    fields: Vec<FieldBinding<T>>,
}

impl<T: 'static> FieldTable<T> {
    pub(crate) fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub(crate) fn into_fields(self) -> Vec<FieldBinding<T>> {
        self.fields
    }

    /// Integer field (`i32`, `i64`, `u16`, ...).
    pub fn integer<I>(&mut self, name: &'static str, set: fn(&mut T, I)) -> &mut FieldBinding<T>
    where
        I: FromStr + Shape,
    {
        self.parsed(name, FieldKind::Integer, I::schema, set)
    }

    /// Floating point field.
    pub fn number<N>(&mut self, name: &'static str, set: fn(&mut T, N)) -> &mut FieldBinding<T>
    where
        N: FromStr + Shape,
    {
        self.parsed(name, FieldKind::Number, N::schema, set)
    }

    /// Boolean field; accepts `true`/`false` in any letter case.
    pub fn boolean(&mut self, name: &'static str, set: fn(&mut T, bool)) -> &mut FieldBinding<T> {
        self.push(
            name,
            FieldKind::Boolean,
            bool::schema,
            Box::new(move |target: &mut T, raw: &str| -> Result<(), ConversionError> {
                let value = match raw.trim().to_ascii_lowercase().as_str() {
                    "true" => true,
                    "false" => false,
                    _ => return Err(ConversionError::new(name, raw, FieldKind::Boolean)),
                };
                set(target, value);
                Ok(())
            }),
        )
    }

    /// String field; conversion never fails.
    pub fn string(&mut self, name: &'static str, set: fn(&mut T, String)) -> &mut FieldBinding<T> {
        self.push(
            name,
            FieldKind::String,
            String::schema,
            Box::new(move |target: &mut T, raw: &str| -> Result<(), ConversionError> {
                set(target, raw.to_string());
                Ok(())
            }),
        )
    }

    /// Enumerated string field. The raw value is matched case-insensitively
    /// against `variants` and the canonical variant name is handed to `E::from_str`.
    pub fn enumeration<E>(
        &mut self,
        name: &'static str,
        variants: &'static [&'static str],
        set: fn(&mut T, E),
    ) -> &mut FieldBinding<T>
    where
        E: FromStr + 'static,
    {
        let kind = FieldKind::Enumeration(variants);
        self.push(
            name,
            kind,
            String::schema,
            Box::new(move |target: &mut T, raw: &str| -> Result<(), ConversionError> {
                let canonical = variants
                    .iter()
                    .find(|variant| variant.eq_ignore_ascii_case(raw.trim()))
                    .ok_or_else(|| ConversionError::new(name, raw, kind))?;
                let value = E::from_str(canonical).map_err(|_| ConversionError::new(name, raw, kind))?;
                set(target, value);
                Ok(())
            }),
        )
    }

    /// Composite field of shape `F`, listed in schemas only.
    pub fn nested<F: Shape>(&mut self, name: &'static str) -> &mut FieldBinding<T> {
        self.fields.push(FieldBinding {
            name,
            kind: FieldKind::Nested,
            required: false,
            schema: F::schema,
            assign: None,
        });
        let index = self.fields.len() - 1;
        &mut self.fields[index]
    }

    fn parsed<V>(
        &mut self,
        name: &'static str,
        kind: FieldKind,
        schema: fn() -> Value,
        set: fn(&mut T, V),
    ) -> &mut FieldBinding<T>
    where
        V: FromStr + 'static,
    {
        self.push(
            name,
            kind,
            schema,
            Box::new(move |target: &mut T, raw: &str| -> Result<(), ConversionError> {
                let value = raw
                    .trim()
                    .parse::<V>()
                    .map_err(|_| ConversionError::new(name, raw, kind))?;
                set(target, value);
                Ok(())
            }),
        )
    }

    fn push(
        &mut self,
        name: &'static str,
        kind: FieldKind,
        schema: fn() -> Value,
        assign: Assign<T>,
    ) -> &mut FieldBinding<T> {
        self.fields.push(FieldBinding {
            name,
            kind,
            required: false,
            schema,
            assign: Some(assign),
        });
        let index = self.fields.len() - 1;
        &mut self.fields[index]
    }
}
