//! Resilient relay to hosted inference endpoints.
//!
//! # Data Flow
//! ```text
//! inbound upload
//!     → multipart.rs (single-file form, byte-exact payload)
//!     → upstream.rs (attempt loop: deadline per attempt, capped backoff between)
//!     → observer.rs (attempt events → tracing in production, recorders in tests)
//!     → error.rs (terminal taxonomy surfaced to the HTTP layer)
//! ```
//!
//! # Design Decisions
//! - Attempts are strictly sequential; the remote model must never see
//!   duplicate concurrent inference for one upload
//! - Transport failures retry, contract failures do not
//! - The loop holds no state across invocations; every call owns its policy

pub mod error;
pub mod multipart;
pub mod observer;
pub mod upstream;

pub use error::RelayError;
pub use multipart::UpstreamRequest;
pub use observer::{CallObserver, TracingObserver};
pub use upstream::call_with_retry;
