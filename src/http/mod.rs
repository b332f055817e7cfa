//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, middleware stack)
//!     → request.rs (assign / propagate x-request-id)
//!     → API router built by routing::ApiBuilder
//!     → docs route (Swagger document), when enabled
//! ```

pub mod request;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
