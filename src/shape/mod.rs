//! Type shapes: the field tables behind request materialization and docs.
//!
//! # Data Flow
//! ```text
//! Shape::fields(&mut FieldTable<T>)     (declared once per type)
//!     → cache.rs (built lazily, memoized by TypeId)
//!     → TypeShape<T> (ordered converter/setter bindings)
//!     → binding::materialize (populate a T from raw strings)
//!     → docs::describe (parameters and schemas)
//! ```
//!
//! # Design Decisions
//! - No runtime reflection: every bindable field is an explicit
//!   (name, kind, converter + setter) entry
//! - Shapes are static for the process; the cache never evicts
//! - A shape is built under the cache's entry lock, so concurrent first
//!   access computes it exactly once

pub mod cache;
pub mod field;
pub mod schema;

pub use cache::{shape_of, short_type_name, ShapeCache, TypeShape};
pub use field::{ConversionError, FieldBinding, FieldInfo, FieldKind, FieldTable};
pub use schema::Shape;
