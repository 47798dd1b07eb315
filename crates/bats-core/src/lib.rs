//! # bats-core
//!
//! Core crate for the BATS PITCH feed handler, providing:
//!
//! - **Types** (`types`) — PITCH message structs, char-coded enums, symbol utils
//! - **Configuration** (`config`) — JSON config deserialization
//! - **Error types** (`error`) — domain-specific `BatsError` via thiserror
//! - **CPU affinity** (`cpu_affinity`) — thread-to-core pinning for the book thread
//! - **Time utilities** (`time_util`) — wall-clock and feed-timestamp helpers
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod cpu_affinity;
pub mod error;
pub mod logging;
pub mod time_util;
pub mod types;

// Re-export types at crate root for convenience.
pub use error::BatsError;
pub use types::*;
