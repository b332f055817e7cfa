//! Waypoint: convention-based query/command routing over axum.
//!
//! # Architecture Overview
//!
//! ```text
//!   setup ─────────────────────────────────────────────────────────────────
//!     ApiBuilder ──▶ routing (declarations, registry) ──▶ dispatch::Dispatcher
//!         │                                                  │
//!         ├──▶ hooks (before / after lists)                  ├──▶ axum Router
//!         └──▶ docs (DescriptorSink, SwaggerDocument) ◀──────┘
//!
//!   request ───────────────────────────────────────────────────────────────
//!     axum match ──▶ dispatch ──▶ binding (body, path, query) ──▶ hooks
//!                       │               ▲
//!                       │           shape (field tables, cache)
//!                       └──▶ handler ──▶ JSON ──▶ after-hooks ──▶ response
//!
//!   cross-cutting: config · http (server, request ids) · observability · lifecycle
//! ```

// Core subsystems
pub mod binding;
pub mod dispatch;
pub mod docs;
pub mod hooks;
pub mod routing;
pub mod shape;

// Hosting and cross-cutting concerns
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

// Example application
pub mod demo;

pub use config::WaypointConfig;
pub use dispatch::{BuildError, DispatchError};
pub use hooks::{BoxError, RouteResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::ApiBuilder;
pub use shape::{FieldTable, Shape};
