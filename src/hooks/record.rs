//! The per-request record handed to hooks.

use std::any::Any;

use serde_json::Value;

use crate::routing::HttpVerb;
use crate::shape::short_type_name;

/// What a hook can see of the request being processed.
///
/// Before-hooks get no result. Borrowed data only lives for the duration of
/// the hook call.
#[derive(Clone, Copy)]
pub struct RouteResult<'a> {
    verb: HttpVerb,
    path: &'a str,
    input: Option<&'a (dyn Any + Send + Sync)>,
    input_type: Option<&'static str>,
    result: Option<&'a Value>,
}

impl<'a> RouteResult<'a> {
    pub fn new(verb: HttpVerb, path: &'a str) -> Self {
        Self {
            verb,
            path,
            input: None,
            input_type: None,
            result: None,
        }
    }

    pub fn with_input(
        mut self,
        input: Option<&'a (dyn Any + Send + Sync)>,
        type_key: Option<&'static str>,
    ) -> Self {
        self.input = input;
        self.input_type = type_key;
        self
    }

    pub fn with_result(mut self, result: Option<&'a Value>) -> Self {
        self.result = result;
        self
    }

    pub fn verb(&self) -> HttpVerb {
        self.verb
    }

    /// Route path template, including the API prefix.
    pub fn path(&self) -> &str {
        self.path
    }

    /// The materialized input, if it is a `T`.
    pub fn input<T: Any>(&self) -> Option<&'a T> {
        self.input.and_then(|input| input.downcast_ref::<T>())
    }

    pub fn input_is<T: Any>(&self) -> bool {
        self.input.is_some_and(|input| input.is::<T>())
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Input type name without its module path.
    pub fn input_type_name(&self) -> Option<&'static str> {
        self.input_type.map(short_type_name)
    }

    /// The serialized handler result; `None` before the handler ran or when
    /// the route has no output.
    pub fn result(&self) -> Option<&'a Value> {
        self.result
    }
}

impl std::fmt::Debug for RouteResult<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteResult")
            .field("verb", &self.verb)
            .field("path", &self.path)
            .field("input_type", &self.input_type)
            .field("result", &self.result)
            .finish()
    }
}
