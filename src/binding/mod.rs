//! Request materialization.
//!
//! # Data Flow
//! ```text
//! RequestContext (path values, query values, body bytes)
//!     → body.rs (JSON body → T, required-field checks)   [body routes]
//!     → T::default()                                     [other routes]
//!     → materializer.rs (path, then query, per field)
//!     → populated input handed to the handler
//! ```
//!
//! # Design Decisions
//! - The body is decoded first; path values are applied on top of it
//! - Conversion failures are client errors, never server faults
//! - Validation reports every missing field at once

pub mod body;
pub mod materializer;
pub mod values;

pub use body::{decode_body, ValidationErrors, ValidationFailure};
pub use materializer::{binding_source, materialize, FieldBindingSource};
pub use values::RawValues;
