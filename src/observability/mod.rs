//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the relay observer produce:
//!     → tracing events (structured, leveled, request-id correlated)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metric updates are cheap (atomic increments); recording never fails
//!   the request path
//! - The exporter is optional and boot-gated by config

pub mod metrics;
