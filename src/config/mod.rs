//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, then env overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared with the HTTP server at boot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the gateway is restarted to change it
//! - All fields have defaults so an empty (or absent) config file works
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every violation, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::GatewayConfig;
pub use schema::UpstreamConfig;
