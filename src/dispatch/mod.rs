//! Request dispatch.
//!
//! # Data Flow
//! ```text
//! axum request (matched by the host router)
//!     → dispatcher.rs (RequestContext, span, metrics)
//!     → pipeline.rs
//!         Matched → InputBuilt → BeforeHooksRun → HandlerInvoked
//!         → OutputSerialized → AfterHooksRun → Complete
//!         (any step → Failed)
//!     → error.rs (400 for client errors, 500 otherwise)
//! ```
//!
//! # Design Decisions
//! - Handlers are adapted once at declaration time into a type-erased
//!   `Invoke`; nothing is resolved per request
//! - Failures never retry and never affect other requests

pub mod context;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod pipeline;

pub use context::RequestContext;
pub use dispatcher::Dispatcher;
pub use error::{BuildError, DispatchError};
pub use handler::{AsyncHandler, Handler, Reply, RouteInput};
pub use pipeline::{Invoke, RequestPhase};

pub(crate) use handler::{Blocking, Deferred};
pub(crate) use pipeline::Pipeline;
