//! Route declaration subsystem.
//!
//! # Data Flow
//! ```text
//! Setup:
//!     ApiBuilder::get/post/put/delete(path, handler)
//!     → template.rs (normalize path)
//!     → declaration.rs (verb, path, input/output specs, invoker)
//!     → registry.rs (append, declaration order)
//!     → dispatch::Dispatcher (bind into the host router)
//! ```
//!
//! # Design Decisions
//! - Declarations are immutable once registered
//! - The registry only appends; grouping by path is computed on demand
//! - Path matching is left entirely to the host router

pub mod builder;
pub mod declaration;
pub mod registry;
pub mod template;

pub use builder::ApiBuilder;
pub use declaration::{BodyBinding, HttpVerb, InputSpec, OutputSpec, RouteDeclaration};
pub use registry::RouteRegistry;
pub use template::normalize_path;
