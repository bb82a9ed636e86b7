//! Process lifecycle.
//!
//! # Design Decisions
//! - One broadcast channel fans the shutdown signal out to every
//!   long-running task
//! - Ctrl-C is just one trigger; tests trigger programmatically

pub mod shutdown;

pub use shutdown::Shutdown;
