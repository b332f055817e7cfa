//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → shutdown_signal() resolves
//!
//! Shutdown (shutdown.rs):
//!     Shutdown::trigger → every subscribed server stops accepting
//!     → in-flight requests drain → run() returns
//! ```
//!
//! # Design Decisions
//! - Servers listen to both the OS signal and the broadcast channel
//! - Shutdown is cooperative; nothing is force-killed

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
