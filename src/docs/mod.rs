//! API documentation.
//!
//! # Data Flow
//! ```text
//! Dispatcher::bind
//!     → DescriptorSink::submit(prefix, route)     (every bound route)
//!     → document.rs (SwaggerDocument keeps route references)
//!
//! GET <docs path>
//!     → SwaggerDocument::render
//!     → descriptor.rs (describe each route) → Swagger 2.0 JSON
//! ```
//!
//! # Design Decisions
//! - The sink is wired explicitly; no discovery at startup
//! - Descriptors are built lazily and never influence dispatch
//! - Body routes document only path parameters and the `command` body, even
//!   though matching query values still override body fields at dispatch

pub mod descriptor;
pub mod document;

pub use descriptor::{
    describe, operation_id, OperationDescriptor, ParameterDescriptor, ParameterLocation,
    ResponseDescriptor,
};
pub use document::{DescriptorSink, SwaggerDocument};
