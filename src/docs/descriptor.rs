//! Operation descriptors derived from route declarations.
//!
//! # Responsibilities
//! - Derive operation ids, tags and media types
//! - Classify input fields as path, query or body parameters
//! - Describe the `200` response from the output type
//!
//! # Design Decisions
//! - Pure function of the declaration and the shape cache; never touches
//!   request state, so repeated calls compare equal

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::routing::template::{capitalize, lower_capitalize, placeholder, segments};
use crate::routing::{HttpVerb, RouteDeclaration};

/// Media types accepted by routes that read a JSON body.
pub const CONSUMED_MEDIA_TYPES: [&str; 4] = [
    "application/json-patch+json",
    "application/json",
    "text/json",
    "application/*+json",
];

/// Media types every route may produce.
pub const PRODUCED_MEDIA_TYPES: [&str; 3] = ["text/plain", "application/json", "text/json"];

/// Name of the single body parameter.
pub const BODY_PARAMETER: &str = "command";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDescriptor {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Documentation-only projection of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    pub operation_id: String,
    pub tags: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub parameters: Vec<ParameterDescriptor>,
    pub responses: BTreeMap<String, ResponseDescriptor>,
}

/// `ApiContactsByIdGet` for prefix `/api`, path `/contacts/{id}`, GET.
pub fn operation_id(prefix: &str, path: &str, verb: HttpVerb) -> String {
    let mut id: String = segments(prefix).map(capitalize).collect();
    for segment in segments(path) {
        match placeholder(segment) {
            Some(name) => {
                id.push_str("By");
                id.push_str(&capitalize(name));
            }
            None => id.push_str(&capitalize(segment)),
        }
    }
    id.push_str(verb.title());
    id
}

/// Build the descriptor for `route` mounted under `prefix`.
pub fn describe(prefix: &str, route: &RouteDeclaration) -> OperationDescriptor {
    let placeholders: Vec<String> = route
        .placeholders()
        .iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();

    let mut parameters = Vec::new();
    if let Some(input) = route.input() {
        for field in input.fields() {
            let is_path = placeholders.contains(&field.name.to_ascii_lowercase());
            let location = match (is_path, route.binds_body()) {
                (true, _) => ParameterLocation::Path,
                (false, false) if field.bindable => ParameterLocation::Query,
                _ => continue,
            };
            parameters.push(ParameterDescriptor {
                name: lower_capitalize(field.name),
                location,
                required: location == ParameterLocation::Path,
                schema: field.schema,
            });
        }
        if route.binds_body() {
            parameters.push(ParameterDescriptor {
                name: BODY_PARAMETER.to_string(),
                location: ParameterLocation::Body,
                required: false,
                schema: input.schema(),
            });
        }
    }

    let consumes = if route.binds_body() {
        CONSUMED_MEDIA_TYPES.iter().map(|m| m.to_string()).collect()
    } else {
        Vec::new()
    };

    let mut responses = BTreeMap::new();
    responses.insert(
        "200".to_string(),
        ResponseDescriptor {
            description: "Success".to_string(),
            schema: route.output().map(|output| output.schema()),
        },
    );

    OperationDescriptor {
        operation_id: operation_id(prefix, route.path(), route.verb()),
        tags: segments(route.path())
            .next()
            .filter(|segment| placeholder(segment).is_none())
            .map(|segment| vec![segment.to_string()])
            .unwrap_or_default(),
        consumes,
        produces: PRODUCED_MEDIA_TYPES.iter().map(|m| m.to_string()).collect(),
        parameters,
        responses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ApiBuilder;
    use crate::shape::{FieldTable, Shape};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Default, Clone, Deserialize, Serialize)]
    struct Lookup {
        id: i64,
        verbose: bool,
    }

    impl Shape for Lookup {
        fn fields(table: &mut FieldTable<Self>) {
            table.integer("Id", |l, v: i64| l.id = v);
            table.boolean("verbose", |l, v| l.verbose = v);
        }
    }

    #[derive(Debug, Default, Clone, Deserialize, Serialize)]
    struct Rename {
        id: i64,
        name: String,
    }

    impl Shape for Rename {
        fn fields(table: &mut FieldTable<Self>) {
            table.integer("id", |r, v: i64| r.id = v);
            table.string("name", |r, v| r.name = v).required();
        }
    }

    fn api() -> ApiBuilder {
        ApiBuilder::new("/api")
            .get("/hello", || "Hello world!".to_string())
            .get("/items/{id}", |l: Lookup| l)
            .put("/items/{id}", |r: Rename| r)
            .delete("/items/{id}", |_: Lookup| ())
    }

    fn descriptor(verb: HttpVerb, path: &str) -> OperationDescriptor {
        let api = api();
        let route = api.registry().find(verb, path).unwrap();
        describe(api.prefix(), route)
    }

    #[test]
    fn test_operation_ids() {
        assert_eq!(operation_id("/api", "/contacts/{id}", HttpVerb::Get), "ApiContactsByIdGet");
        assert_eq!(operation_id("/api", "/hello", HttpVerb::Get), "ApiHelloGet");
        assert_eq!(operation_id("/", "/add/{number1}/{number2}", HttpVerb::Get), "AddByNumber1ByNumber2Get");
        assert_eq!(operation_id("/api/v1", "/contacts", HttpVerb::Delete), "ApiV1ContactsDelete");
    }

    #[test]
    fn test_query_route_parameters() {
        let op = descriptor(HttpVerb::Get, "/items/{id}");
        assert_eq!(op.tags, vec!["items"]);
        assert!(op.consumes.is_empty());
        assert_eq!(op.produces, vec!["text/plain", "application/json", "text/json"]);

        let params: Vec<_> = op
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.location, p.required))
            .collect();
        assert_eq!(
            params,
            vec![
                ("id", ParameterLocation::Path, true),
                ("verbose", ParameterLocation::Query, false),
            ]
        );
        assert_eq!(op.responses["200"].schema.as_ref().unwrap()["title"], "Lookup");
    }

    #[test]
    fn test_body_route_lists_path_and_body() {
        let op = descriptor(HttpVerb::Put, "/items/{id}");
        assert_eq!(op.operation_id, "ApiItemsByIdPut");
        assert_eq!(op.consumes.len(), 4);
        assert_eq!(op.parameters.len(), 2);
        assert_eq!(op.parameters[0].location, ParameterLocation::Path);
        assert_eq!(op.parameters[1].name, "command");
        assert_eq!(op.parameters[1].location, ParameterLocation::Body);
        assert!(!op.parameters[1].required);
        assert_eq!(op.parameters[1].schema["required"], json!(["name"]));
    }

    #[test]
    fn test_route_without_output_or_input() {
        let op = descriptor(HttpVerb::Delete, "/items/{id}");
        assert!(op.responses["200"].schema.is_none());
        assert_eq!(op.responses["200"].description, "Success");

        let op = descriptor(HttpVerb::Get, "/hello");
        assert!(op.parameters.is_empty());
        assert_eq!(op.responses["200"].schema, Some(json!({ "type": "string" })));
    }

    #[test]
    fn test_describe_is_idempotent() {
        let api = api();
        for route in api.registry().all() {
            assert_eq!(describe(api.prefix(), route), describe(api.prefix(), route));
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let op = descriptor(HttpVerb::Get, "/items/{id}");
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["operationId"], "ApiItemsByIdGet");
        assert_eq!(value["parameters"][0]["in"], "path");
    }
}
