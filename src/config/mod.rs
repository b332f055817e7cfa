//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WaypointConfig (validated, immutable)
//!     → handed to HttpServer, logging and metrics at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ApiConfig, DocsConfig, ListenerConfig, LogFormat, ObservabilityConfig, TimeoutConfig,
    WaypointConfig,
};
pub use validation::{validate_config, ValidationError};
