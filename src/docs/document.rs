//! Descriptor sinks and the Swagger 2.0 document.

use std::sync::{Arc, RwLock};

use serde_json::{json, Map, Value};

use crate::routing::RouteDeclaration;

use super::descriptor::{describe, OperationDescriptor, ParameterDescriptor, ParameterLocation};

/// Receives every route the dispatcher binds.
pub trait DescriptorSink: Send + Sync {
    fn submit(&self, prefix: &str, route: &Arc<RouteDeclaration>);
}

/// Collects routes and renders a Swagger 2.0 document on demand.
pub struct SwaggerDocument {
    title: String,
    version: String,
    routes: RwLock<Vec<(String, Arc<RouteDeclaration>)>>,
}

impl SwaggerDocument {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            routes: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (full path, verb, descriptor) for every submitted route.
    pub fn operations(&self) -> Vec<(String, &'static str, OperationDescriptor)> {
        let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
        routes
            .iter()
            .map(|(prefix, route)| {
                (
                    full_path(prefix, route.path()),
                    route.verb().as_str(),
                    describe(prefix, route),
                )
            })
            .collect()
    }

    /// Render the whole document.
    pub fn render(&self) -> Value {
        let mut paths = Map::new();
        for (path, verb, operation) in self.operations() {
            let entry = paths
                .entry(path)
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(verbs) = entry {
                verbs.insert(verb.to_ascii_lowercase(), render_operation(operation));
            }
        }

        json!({
            "swagger": "2.0",
            "info": {
                "title": self.title,
                "version": self.version,
            },
            "paths": paths,
        })
    }
}

impl DescriptorSink for SwaggerDocument {
    fn submit(&self, prefix: &str, route: &Arc<RouteDeclaration>) {
        self.routes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((prefix.to_string(), Arc::clone(route)));
    }
}

fn full_path(prefix: &str, path: &str) -> String {
    match (prefix, path) {
        ("/", path) => path.to_string(),
        (prefix, "/") => prefix.to_string(),
        (prefix, path) => format!("{prefix}{path}"),
    }
}

fn render_operation(operation: OperationDescriptor) -> Value {
    let parameters: Vec<Value> = operation.parameters.into_iter().map(render_parameter).collect();
    let responses: Map<String, Value> = operation
        .responses
        .into_iter()
        .map(|(status, response)| {
            let mut rendered = json!({ "description": response.description });
            if let Some(schema) = response.schema {
                rendered["schema"] = schema;
            }
            (status, rendered)
        })
        .collect();

    let mut rendered = json!({
        "operationId": operation.operation_id,
        "tags": operation.tags,
        "produces": operation.produces,
        "parameters": parameters,
        "responses": responses,
    });
    if !operation.consumes.is_empty() {
        rendered["consumes"] = json!(operation.consumes);
    }
    rendered
}

/// Body parameters keep their schema; the others carry it inline.
fn render_parameter(parameter: ParameterDescriptor) -> Value {
    let mut rendered = json!({
        "name": parameter.name,
        "in": parameter.location,
        "required": parameter.required,
    });
    match parameter.location {
        ParameterLocation::Body => rendered["schema"] = parameter.schema,
        ParameterLocation::Path | ParameterLocation::Query => {
            if let (Value::Object(target), Value::Object(schema)) = (&mut rendered, parameter.schema) {
                for key in ["type", "format", "enum", "items"] {
                    if let Some(value) = schema.get(key) {
                        target.insert(key.to_string(), value.clone());
                    }
                }
            }
        }
    }
    rendered
}
