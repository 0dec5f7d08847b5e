//! Swing scoring.
//!
//! Computes bounded, comparable metrics from a finished path and its impact
//! event. All scores are deterministic pure functions of the input: the same
//! path always yields the same metrics. Degenerate paths (zero duration,
//! zero length) score 0 rather than propagating a division error.

use swingman_model::metrics::{ImpactEvent, SwingMetrics};
use swingman_model::path::SwingPath;

/// Configuration for the swing scorer.
#[derive(Debug, Clone, Copy)]
pub struct ScorerConfig {
    /// Maximum physically plausible bat speed for this camera/scale setup,
    /// pixels per second. Caps the power score at 100.
    pub max_expected_speed: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            max_expected_speed: 2000.0,
        }
    }
}

/// Maximum per-segment velocity magnitude, pixels per second.
/// Zero when no segment has a positive time delta.
fn peak_speed(path: &SwingPath) -> f64 {
    path.segments()
        .map(|(a, b)| {
            let dt = b.timestamp - a.timestamp;
            if dt > 0.0 {
                a.distance_to(b) / dt
            } else {
                0.0
            }
        })
        .fold(0.0, f64::max)
}

/// Compute metrics for one finalized swing.
///
/// The caller gates invocation on `path.is_analyzable()`; a shorter path
/// still produces well-defined zero metrics rather than an error.
pub fn score_swing(
    path: &SwingPath,
    impact: Option<&ImpactEvent>,
    config: ScorerConfig,
) -> SwingMetrics {
    let path_length = path.total_length();
    let duration_s = path.duration_secs();
    let peak = peak_speed(path);

    // An efficient swing travels a direct arc rather than a wandering one.
    let efficiency_score = if path_length > 0.0 {
        (path.net_displacement() / path_length * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let power_score = if config.max_expected_speed > 0.0 {
        (peak / config.max_expected_speed * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    SwingMetrics {
        efficiency_score,
        power_score,
        peak_speed: peak,
        path_length,
        duration_s,
        impact_point: impact.map(|event| event.point),
    }
}
