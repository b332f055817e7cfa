//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use waypoint::config::WaypointConfig;
use waypoint::demo::{contacts_api, ContactStore, EventLog};
use waypoint::lifecycle::Shutdown;
use waypoint::routing::ApiBuilder;
use waypoint::HttpServer;

/// Demo API router plus handles on its shared state.
pub struct DemoApp {
    pub router: Router,
    pub store: ContactStore,
    pub events: EventLog,
}

pub fn demo_app() -> DemoApp {
    let store = ContactStore::seeded();
    let events = EventLog::new();
    let api = contacts_api("/api", store.clone(), events.clone());
    let server = HttpServer::new(WaypointConfig::default(), api).expect("demo api binds");
    DemoApp {
        router: server.router(),
        store,
        events,
    }
}

/// Layered router for an arbitrary API under default config.
pub fn router_for(api: ApiBuilder) -> Router {
    HttpServer::new(WaypointConfig::default(), api)
        .expect("api binds")
        .router()
}

/// Send one request through the router. Returns the status and raw body.
pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Like `send_raw`, parsing the body as JSON (`Null` when empty).
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let (status, text) = send_raw(router, method, uri, body).await;
    let json = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap()
    };
    (status, json)
}

/// Serve the demo API on an ephemeral port.
pub async fn spawn_server(config: WaypointConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let api = contacts_api(&config.api.prefix, ContactStore::seeded(), EventLog::new());
    let server = HttpServer::new(config, api).unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
