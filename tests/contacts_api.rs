//! End-to-end tests of the contacts demo API.

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;

#[tokio::test]
async fn test_hello_and_add() {
    let app = common::demo_app();

    let (status, body) = common::send(&app.router, Method::GET, "/api/hello", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Hello world!"));

    let (status, body) = common::send(&app.router, Method::GET, "/api/add/2/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(7));
}

#[tokio::test]
async fn test_add_overflow_is_a_handler_error() {
    let app = common::demo_app();

    let (status, body) = common::send(
        &app.router,
        Method::GET,
        "/api/add/9223372036854775807/1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "handler_error");
}

#[tokio::test]
async fn test_calculate() {
    let app = common::demo_app();

    let (status, body) = common::send(
        &app.router,
        Method::GET,
        "/api/calculate/times?number1=6&number2=7",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(42));

    let (status, body) = common::send(
        &app.router,
        Method::GET,
        "/api/calculate/divide?number1=4&number2=0",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "handler_error");
}

#[tokio::test]
async fn test_unknown_operator_is_rejected() {
    let app = common::demo_app();

    let (status, body) =
        common::send(&app.router, Method::GET, "/api/calculate/modulo", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "conversion_error");
    assert_eq!(body["field"], "operator");
    assert_eq!(body["value"], "modulo");
}

#[tokio::test]
async fn test_list_and_search_contacts() {
    let app = common::demo_app();

    let (status, body) = common::send(&app.router, Method::GET, "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": 1, "name": "Peter Parker" },
            { "id": 2, "name": "Tony Stark" },
        ])
    );

    let (_, body) = common::send(
        &app.router,
        Method::GET,
        "/api/contacts/search?value=stark",
        None,
    )
    .await;
    assert_eq!(body, json!([{ "id": 2, "name": "Tony Stark" }]));
}

#[tokio::test]
async fn test_create_then_fetch_contact() {
    let app = common::demo_app();

    let (status, body) = common::send(
        &app.router,
        Method::POST,
        "/api/contacts",
        Some(r#"{"name":"Bruce Wayne"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 3, "name": "Bruce Wayne" }));

    let (status, body) = common::send(&app.router, Method::GET, "/api/contacts/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 3, "name": "Bruce Wayne" }));
    assert_eq!(app.store.all().len(), 3);
}

#[tokio::test]
async fn test_missing_contact_is_null() {
    let app = common::demo_app();

    let (status, body) = common::send(&app.router, Method::GET, "/api/contacts/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn test_path_value_beats_query_value() {
    let app = common::demo_app();

    let (_, body) = common::send(&app.router, Method::GET, "/api/contacts/1?id=2", None).await;
    assert_eq!(body["name"], "Peter Parker");
}

#[tokio::test]
async fn test_non_numeric_id_is_a_conversion_error() {
    let app = common::demo_app();

    let (status, body) = common::send(&app.router, Method::GET, "/api/contacts/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "conversion_error");
    assert_eq!(body["field"], "id");
    assert_eq!(body["value"], "abc");
}

#[tokio::test]
async fn test_missing_required_name_is_a_validation_error() {
    let app = common::demo_app();

    let (status, body) =
        common::send(&app.router, Method::POST, "/api/contacts", Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(body["errors"][0]["message"], "The name field is required.");

    let (status, body) =
        common::send(&app.router, Method::POST, "/api/contacts", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "body");
    assert_eq!(app.store.all().len(), 2);
}

#[tokio::test]
async fn test_wrongly_cased_required_key_is_a_validation_error() {
    let app = common::demo_app();

    let (status, body) = common::send(
        &app.router,
        Method::POST,
        "/api/contacts",
        Some(r#"{"NAME":"Bruce Wayne"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(app.store.all().len(), 2);
    assert!(app.store.find(3).is_none());
}

#[tokio::test]
async fn test_update_contact() {
    let app = common::demo_app();

    let (status, body) = common::send(
        &app.router,
        Method::PUT,
        "/api/contacts",
        Some(r#"{"id":1,"name":"Spider-Man"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 1, "name": "Spider-Man" }));

    let (_, body) = common::send(
        &app.router,
        Method::PUT,
        "/api/contacts",
        Some(r#"{"id":9,"name":"Nobody"}"#),
    )
    .await;
    assert!(body.is_null());
}

#[tokio::test]
async fn test_delete_contacts() {
    let app = common::demo_app();

    let (status, body) =
        common::send(&app.router, Method::DELETE, "/api/contacts/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (_, body) = common::send(&app.router, Method::DELETE, "/api/contacts/2", None).await;
    assert_eq!(body, json!(false));

    let (_, body) = common::send(
        &app.router,
        Method::DELETE,
        "/api/contacts/search?value=parker",
        None,
    )
    .await;
    assert_eq!(body, json!(true));
    assert!(app.store.all().is_empty());
}

#[tokio::test]
async fn test_events_and_count() {
    let app = common::demo_app();

    common::send(&app.router, Method::GET, "/api/contacts", None).await;
    common::send(&app.router, Method::GET, "/api/contacts", None).await;
    common::send(&app.router, Method::GET, "/api/contacts/1", None).await;
    common::send(&app.router, Method::GET, "/api/hello", None).await;

    let (_, body) = common::send(&app.router, Method::GET, "/api/count", None).await;
    assert_eq!(body, json!(2));

    let (_, body) = common::send(&app.router, Method::GET, "/api/events", None).await;
    assert_eq!(
        body,
        json!([
            "GetContactsQuery",
            "GetContactsQuery",
            "GetContactByIdQuery",
            "/api/hello",
            "/api/count",
        ])
    );
    assert_eq!(app.events.contact_queries(), 2);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = common::demo_app();

    let (status, _) = common::send_raw(&app.router, Method::GET, "/api/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
