//! Swingman Common Utilities
//!
//! Shared infrastructure for all Swingman crates:
//! - Error types and result aliases
//! - Frame clock for stamping incoming frames
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
