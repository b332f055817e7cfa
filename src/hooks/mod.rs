//! Lifecycle hooks.
//!
//! # Data Flow
//! ```text
//! setup:   ApiBuilder::before_each / after_each (optionally typed)
//!              → bus.rs (append to the phase's list)
//! request: dispatcher builds a RouteResult
//!              → before list (in order) → handler → after list (in order)
//! ```
//!
//! # Design Decisions
//! - One interleaved list per phase; filters are checked per invocation
//! - Type filters compare `TypeId`, never structure
//! - A failing hook aborts the request as a server error

pub mod bus;
pub mod record;

pub use bus::{BoxError, HookBus, HookPhase, HookRegistration, HookResult};
pub use record::RouteResult;
