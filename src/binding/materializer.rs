//! Populate an input value from path and query strings.
//!
//! # Responsibilities
//! - Classify each field as path-bound, query-bound or unbound
//! - Convert raw strings with the field's own converter
//! - Stop at the first conversion failure
//!
//! # Design Decisions
//! - Fields are visited in declaration order
//! - A path match short-circuits the query lookup for that field
//! - Absent fields keep whatever value the starting instance had

use crate::shape::{ConversionError, Shape, TypeShape};

use super::values::RawValues;

/// Where a field's value comes from for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldBindingSource {
    PathSegment,
    QueryParameter,
    Unbound,
}

/// Classify `name` against the request's raw values.
pub fn binding_source(name: &str, path: &RawValues, query: &RawValues) -> FieldBindingSource {
    if path.contains(name) {
        FieldBindingSource::PathSegment
    } else if query.contains(name) {
        FieldBindingSource::QueryParameter
    } else {
        FieldBindingSource::Unbound
    }
}

/// Apply path and query values on top of `target`.
///
/// `target` is either a default instance or the deserialized request body;
/// path values always override what the body carried.
pub fn materialize<T: Shape>(
    shape: &TypeShape<T>,
    mut target: T,
    path: &RawValues,
    query: &RawValues,
) -> Result<T, ConversionError> {
    for field in shape.fields().iter().filter(|f| f.is_bindable()) {
        let raw = match binding_source(field.name(), path, query) {
            FieldBindingSource::PathSegment => path.get(field.name()),
            FieldBindingSource::QueryParameter => query.get(field.name()),
            FieldBindingSource::Unbound => None,
        };
        if let Some(raw) = raw {
            field.assign(&mut target, raw)?;
        }
    }
    Ok(target)
}
