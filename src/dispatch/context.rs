//! Raw request material for one dispatch.

use axum::body::Bytes;

use crate::binding::RawValues;
use crate::routing::HttpVerb;

/// Everything the pipeline needs from the host request. Consumed once.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub verb: HttpVerb,
    /// Route template including the API prefix.
    pub matched_path: String,
    pub path_values: RawValues,
    pub query_values: RawValues,
    pub body: Bytes,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(verb: HttpVerb, matched_path: impl Into<String>) -> Self {
        Self {
            verb,
            matched_path: matched_path.into(),
            path_values: RawValues::new(),
            query_values: RawValues::new(),
            body: Bytes::new(),
            request_id: None,
        }
    }

    pub fn with_path_values(mut self, values: RawValues) -> Self {
        self.path_values = values;
        self
    }

    pub fn with_query_values(mut self, values: RawValues) -> Self {
        self.query_values = values;
        self
    }

    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}
