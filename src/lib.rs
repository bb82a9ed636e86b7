//! AgriVision inference gateway.
//!
//! A small HTTP gateway that relays crop-image uploads to externally
//! hosted ML inference endpoints. The hosted models sleep when idle, so
//! every relay runs through a resilient call path: a hard deadline per
//! attempt, capped exponential backoff between attempts, and a bounded
//! attempt count, with terminal outcomes classified into a structured
//! error taxonomy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                INFERENCE GATEWAY                  │
//!                    │                                                   │
//!   Image upload     │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│ handlers │───▶│    relay    │──┼──▶ Hosted
//!                    │  │ server  │    │          │    │ (multipart, │  │    model
//!                    │  └─────────┘    └──────────┘    │ retry loop) │  │
//!                    │                                  └──────┬──────┘  │
//!   JSON prediction  │  ┌─────────┐                           │         │
//!   ◀────────────────┼──│  error  │◀──────────────────────────┘         │
//!                    │  │ mapping │                                     │
//!                    │  └─────────┘                                     │
//!                    │  ┌─────────────────────────────────────────────┐ │
//!                    │  │            Cross-Cutting Concerns            │ │
//!                    │  │  ┌────────┐ ┌────────────┐ ┌─────────────┐  │ │
//!                    │  │  │ config │ │ resilience │ │observability│  │ │
//!                    │  │  └────────┘ └────────────┘ └─────────────┘  │ │
//!                    │  │  ┌───────────────────────────────────────┐  │ │
//!                    │  │  │        lifecycle (shutdown)           │  │ │
//!                    │  │  └───────────────────────────────────────┘  │ │
//!                    │  └─────────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod resilience;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
