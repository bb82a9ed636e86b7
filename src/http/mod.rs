//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID stamped and propagated)
//!     → handlers.rs (multipart extraction, model lookup)
//!     → [relay performs the upstream call]
//!     → error.rs (terminal taxonomy → status + structured JSON body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
