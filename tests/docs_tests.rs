//! The generated Swagger document served by the demo API.

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use waypoint::config::WaypointConfig;
use waypoint::demo::{contacts_api, ContactStore, EventLog};
use waypoint::HttpServer;

mod common;

const DOCS: &str = "/swagger/v1/swagger.json";

async fn document() -> Value {
    let app = common::demo_app();
    let (status, body) = common::send(&app.router, Method::GET, DOCS, None).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_document_lists_every_path() {
    let doc = document().await;
    assert_eq!(doc["swagger"], "2.0");
    assert_eq!(doc["info"]["title"], "Waypoint API");
    assert_eq!(doc["info"]["version"], "v1");

    let mut paths: Vec<_> = doc["paths"].as_object().unwrap().keys().cloned().collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "/api/add/{number1}/{number2}",
            "/api/calculate/{operator}",
            "/api/contacts",
            "/api/contacts/search",
            "/api/contacts/{id}",
            "/api/count",
            "/api/events",
            "/api/hello",
        ]
    );

    let contacts = doc["paths"]["/api/contacts/{id}"].as_object().unwrap();
    let mut verbs: Vec<_> = contacts.keys().cloned().collect();
    verbs.sort();
    assert_eq!(verbs, vec!["delete", "get"]);
}

#[tokio::test]
async fn test_path_parameter_operation() {
    let doc = document().await;
    let op = &doc["paths"]["/api/contacts/{id}"]["get"];

    assert_eq!(op["operationId"], "ApiContactsByIdGet");
    assert_eq!(op["tags"], json!(["contacts"]));
    assert!(op.get("consumes").is_none());
    assert_eq!(
        op["produces"],
        json!(["text/plain", "application/json", "text/json"])
    );
    assert_eq!(
        op["parameters"],
        json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "type": "integer",
            "format": "int64",
        }])
    );
    assert_eq!(op["responses"]["200"]["description"], "Success");
}

#[tokio::test]
async fn test_query_and_enum_parameters() {
    let doc = document().await;
    let op = &doc["paths"]["/api/calculate/{operator}"]["get"];

    assert_eq!(op["operationId"], "ApiCalculateByOperatorGet");
    let params = op["parameters"].as_array().unwrap();
    assert_eq!(params.len(), 3);

    assert_eq!(params[0]["name"], "operator");
    assert_eq!(params[0]["in"], "path");
    assert_eq!(params[0]["enum"], json!(["plus", "minus", "times", "divide"]));

    assert_eq!(params[1]["name"], "number1");
    assert_eq!(params[1]["in"], "query");
    assert_eq!(params[1]["required"], false);
    assert_eq!(params[2]["name"], "number2");
}

#[tokio::test]
async fn test_body_operation() {
    let doc = document().await;
    let op = &doc["paths"]["/api/contacts"]["post"];

    assert_eq!(op["operationId"], "ApiContactsPost");
    assert_eq!(
        op["consumes"],
        json!([
            "application/json-patch+json",
            "application/json",
            "text/json",
            "application/*+json",
        ])
    );

    let params = op["parameters"].as_array().unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0]["name"], "command");
    assert_eq!(params[0]["in"], "body");
    assert_eq!(params[0]["schema"]["title"], "CreateContactCommand");
    assert_eq!(params[0]["schema"]["required"], json!(["name"]));

    let schema = &op["responses"]["200"]["schema"];
    assert_eq!(schema["title"], "Contact");
    assert_eq!(schema["properties"]["id"]["format"], "int64");
}

#[tokio::test]
async fn test_response_schemas() {
    let doc = document().await;

    let list = &doc["paths"]["/api/contacts"]["get"];
    assert!(list["parameters"].as_array().unwrap().is_empty());
    assert_eq!(list["responses"]["200"]["schema"]["type"], "array");
    assert_eq!(list["responses"]["200"]["schema"]["items"]["title"], "Contact");

    let hello = &doc["paths"]["/api/hello"]["get"];
    assert_eq!(hello["tags"], json!(["hello"]));
    assert_eq!(hello["responses"]["200"]["schema"]["type"], "string");

    let delete = &doc["paths"]["/api/contacts/{id}"]["delete"];
    assert_eq!(delete["operationId"], "ApiContactsByIdDelete");
    assert_eq!(delete["responses"]["200"]["schema"]["type"], "boolean");
}

#[tokio::test]
async fn test_document_can_be_disabled() {
    let mut config = WaypointConfig::default();
    config.docs.enabled = false;
    let api = contacts_api("/api", ContactStore::seeded(), EventLog::new());
    let server = HttpServer::new(config, api).unwrap();
    assert!(server.document().is_none());

    let (status, _) = common::send_raw(&server.router(), Method::GET, DOCS, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
