//! Frame clock for stamping incoming frames.
//!
//! The transport delivers raw frame payloads without timestamps, so each
//! session anchors a monotonic epoch at creation and stamps frames with the
//! elapsed time at arrival. Path timestamps are fractional seconds since the
//! session epoch.

use std::time::Instant;

/// A session clock that provides monotonic timestamps relative to a fixed
/// epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl FrameClock {
    /// Create a new frame clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Seconds elapsed since the session epoch.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Nanoseconds elapsed since the session epoch.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }

    /// Convert seconds to nanoseconds.
    pub fn secs_to_ns(secs: f64) -> u64 {
        (secs * 1_000_000_000.0) as u64
    }
}
