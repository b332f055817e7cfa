//! Route declarations.
//!
//! # Responsibilities
//! - Describe one declared endpoint: verb, path template, input and output
//! - Keep a type-erased invoker that runs the request pipeline
//!
//! # Design Decisions
//! - Immutable once built; shared as `Arc<RouteDeclaration>`
//! - Input and output types are captured as plain function pointers, so
//!   documentation can be derived without a live request

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use axum::routing::MethodFilter;
use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Invoke;
use crate::shape::{shape_of, short_type_name, FieldInfo, Shape};

use super::template::placeholders;

/// HTTP verbs a route can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
        }
    }

    /// Verb name as used in operation ids (`Get`, `Post`, ...).
    pub fn title(&self) -> &'static str {
        match self {
            HttpVerb::Get => "Get",
            HttpVerb::Post => "Post",
            HttpVerb::Put => "Put",
            HttpVerb::Delete => "Delete",
        }
    }

    pub fn method_filter(&self) -> MethodFilter {
        match self {
            HttpVerb::Get => MethodFilter::GET,
            HttpVerb::Post => MethodFilter::POST,
            HttpVerb::Put => MethodFilter::PUT,
            HttpVerb::Delete => MethodFilter::DELETE,
        }
    }

    /// Verbs that read a JSON body by default.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpVerb::Post | HttpVerb::Put)
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a route's input receives the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyBinding {
    /// Input starts from its default value.
    None,
    /// Input is deserialized from the JSON body first.
    Json,
}

/// Type-erased description of a route's input type.
#[derive(Clone, Copy)]
pub struct InputSpec {
    type_id: TypeId,
    type_key: &'static str,
    fields: fn() -> Vec<FieldInfo>,
    schema: fn() -> Value,
}

impl InputSpec {
    pub fn of<T: Shape>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_key: std::any::type_name::<T>(),
            fields: field_infos::<T>,
            schema: T::schema,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_key(&self) -> &'static str {
        self.type_key
    }

    pub fn type_name(&self) -> &'static str {
        short_type_name(self.type_key)
    }

    /// Field table of the input type, from the shape cache.
    pub fn fields(&self) -> Vec<FieldInfo> {
        (self.fields)()
    }

    pub fn schema(&self) -> Value {
        (self.schema)()
    }
}

impl fmt::Debug for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InputSpec").field(&self.type_key).finish()
    }
}

fn field_infos<T: Shape>() -> Vec<FieldInfo> {
    shape_of::<T>().field_infos()
}

/// Type-erased description of a route's output type.
#[derive(Clone, Copy)]
pub struct OutputSpec {
    type_key: &'static str,
    schema: fn() -> Value,
}

impl OutputSpec {
    pub fn of<T: Shape>() -> Self {
        Self {
            type_key: std::any::type_name::<T>(),
            schema: T::schema,
        }
    }

    pub fn type_name(&self) -> &'static str {
        short_type_name(self.type_key)
    }

    pub fn schema(&self) -> Value {
        (self.schema)()
    }
}

impl fmt::Debug for OutputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutputSpec").field(&self.type_key).finish()
    }
}

/// A declared endpoint.
pub struct RouteDeclaration {
    verb: HttpVerb,
    path: String,
    body: BodyBinding,
    input: Option<InputSpec>,
    output: Option<OutputSpec>,
    invoker: Arc<dyn Invoke>,
}

impl RouteDeclaration {
    pub(crate) fn new(
        verb: HttpVerb,
        path: String,
        body: BodyBinding,
        input: Option<InputSpec>,
        output: Option<OutputSpec>,
        invoker: Arc<dyn Invoke>,
    ) -> Self {
        // A body only makes sense when there is an input to decode it into.
        let body = if input.is_some() { body } else { BodyBinding::None };
        Self {
            verb,
            path,
            body,
            input,
            output,
            invoker,
        }
    }

    pub fn verb(&self) -> HttpVerb {
        self.verb
    }

    /// Normalized path template, relative to the API prefix.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> BodyBinding {
        self.body
    }

    pub fn binds_body(&self) -> bool {
        self.body == BodyBinding::Json
    }

    pub fn input(&self) -> Option<&InputSpec> {
        self.input.as_ref()
    }

    pub fn output(&self) -> Option<&OutputSpec> {
        self.output.as_ref()
    }

    pub fn placeholders(&self) -> Vec<&str> {
        placeholders(&self.path)
    }

    pub(crate) fn invoker(&self) -> &Arc<dyn Invoke> {
        &self.invoker
    }
}

impl fmt::Debug for RouteDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDeclaration")
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("body", &self.body)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
