//! Derived swing metrics.
//!
//! All metric types are immutable once computed and carry named, typed
//! fields; optionality is explicit (`impact_point` is `None` when no impact
//! was found, never an out-of-band sentinel).

use serde::{Deserialize, Serialize};

/// The detected impact instant within a finished swing path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEvent {
    /// Impact location in frame pixels.
    pub point: (f64, f64),

    /// Bat orientation at impact, degrees from `atan2(dy, dx)`.
    pub bat_angle_deg: f64,

    /// Index of the impact point in the path it was computed from.
    pub path_index: usize,
}

/// Bounded, comparable metrics for one finalized swing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingMetrics {
    /// Path straightness, 0–100. Ratio of net displacement to arc length.
    pub efficiency_score: f64,

    /// Peak speed normalized against the configured ceiling, 0–100.
    pub power_score: f64,

    /// Maximum per-segment speed, pixels per second.
    pub peak_speed: f64,

    /// Total arc length of the path, pixels.
    pub path_length: f64,

    /// Elapsed time from first to last path point, seconds.
    pub duration_s: f64,

    /// Impact location, if one was detected.
    pub impact_point: Option<(f64, f64)>,
}

/// Live, partial snapshot streamed back per processed frame.
///
/// May be empty (fresh session, no swing in progress); the engine returns a
/// snapshot for every frame regardless of state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveMetrics {
    /// Engine state name ("idle", "tracking", "finalizing").
    pub state: String,

    /// Frames processed so far in this session.
    pub frames_processed: u64,

    /// Points accumulated on the in-progress swing path.
    pub swing_points: usize,

    /// Most recent smoothed position, if a swing is in progress.
    pub last_point: Option<(f64, f64)>,

    /// Swings finalized so far in this session.
    pub swings_recorded: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_roundtrip() {
        let metrics = SwingMetrics {
            efficiency_score: 87.5,
            power_score: 42.0,
            peak_speed: 840.0,
            path_length: 312.5,
            duration_s: 0.45,
            impact_point: Some((512.0, 388.0)),
        };
        let json = serde_json::to_string(&metrics).unwrap();
        let parsed: SwingMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(metrics, parsed);
    }

    #[test]
    fn test_missing_impact_serializes_as_null() {
        let metrics = SwingMetrics {
            efficiency_score: 0.0,
            power_score: 0.0,
            peak_speed: 0.0,
            path_length: 0.0,
            duration_s: 0.0,
            impact_point: None,
        };
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains("\"impact_point\":null"));
    }

    #[test]
    fn test_impact_event_roundtrip() {
        let impact = ImpactEvent {
            point: (100.0, 200.0),
            bat_angle_deg: -35.5,
            path_index: 7,
        };
        let json = serde_json::to_string(&impact).unwrap();
        let parsed: ImpactEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(impact, parsed);
    }
}
