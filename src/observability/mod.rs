//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher / server / hooks produce:
//!     → logging.rs (structured log events, per-request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID is carried on every request span
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
