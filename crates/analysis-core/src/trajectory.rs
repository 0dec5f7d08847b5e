//! Trajectory smoothing and path accumulation.
//!
//! Converts raw per-frame detection centers into stabilized path points.
//! A moving-average window over the last K raw positions rejects
//! single-frame jitter; candidates that jump further than the configured
//! per-frame maximum are treated as detection outliers and dropped rather
//! than appended, so one false detection cannot corrupt the path.

use std::collections::VecDeque;

use swingman_model::path::{PathPoint, SwingPath};

/// Configuration for the trajectory tracker.
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// Moving-average window over raw positions (samples).
    pub smoothing_window: usize,

    /// Maximum accepted displacement from the last accepted raw position
    /// (pixels per frame). Larger jumps are dropped as outliers.
    pub max_jump_px: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 4,
            max_jump_px: 120.0,
        }
    }
}

/// Per-swing smoothing state plus the path under construction.
///
/// Filter state never carries over between swings: `begin_swing` resets the
/// window and replaces the path.
#[derive(Debug)]
pub struct TrajectoryTracker {
    config: TrackerConfig,
    window: VecDeque<(f64, f64)>,
    last_raw: Option<(f64, f64)>,
    path: SwingPath,
}

impl TrajectoryTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            window: VecDeque::with_capacity(config.smoothing_window.max(1)),
            last_raw: None,
            path: SwingPath::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(TrackerConfig::default())
    }

    /// Reset smoothing state and start a fresh, empty path.
    pub fn begin_swing(&mut self) {
        self.window.clear();
        self.last_raw = None;
        self.path = SwingPath::new();
    }

    /// Feed one raw detection center. Returns the appended smoothed point,
    /// or `None` when the candidate was rejected as an outlier. Never fails;
    /// the worst case is a sparse path caught downstream at finalize time.
    pub fn observe(
        &mut self,
        x: f64,
        y: f64,
        frame_seq: u64,
        timestamp: f64,
    ) -> Option<PathPoint> {
        if let Some((last_x, last_y)) = self.last_raw {
            let jump = ((x - last_x).powi(2) + (y - last_y).powi(2)).sqrt();
            if jump > self.config.max_jump_px {
                tracing::debug!(jump, max = self.config.max_jump_px, "Dropping detection outlier");
                return None;
            }
        }

        self.last_raw = Some((x, y));
        self.window.push_back((x, y));
        while self.window.len() > self.config.smoothing_window.max(1) {
            self.window.pop_front();
        }

        let count = self.window.len() as f64;
        let sum_x: f64 = self.window.iter().map(|(wx, _)| wx).sum();
        let sum_y: f64 = self.window.iter().map(|(_, wy)| wy).sum();

        let point = PathPoint::new(sum_x / count, sum_y / count, frame_seq, timestamp);
        self.path.push(point);
        Some(point)
    }

    /// The path accumulated so far.
    pub fn path(&self) -> &SwingPath {
        &self.path
    }

    /// Take ownership of the finished path, leaving a fresh empty one.
    pub fn take_path(&mut self) -> SwingPath {
        std::mem::take(&mut self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jittery_positions() -> Vec<(f64, f64)> {
        // Simulated bat hovering near (500, 500) with detection noise
        vec![
            (500.0, 500.0),
            (503.0, 498.0),
            (498.0, 502.0),
            (502.0, 499.0),
            (499.0, 501.0),
            (501.0, 500.0),
        ]
    }

    #[test]
    fn test_smoothing_reduces_jitter() {
        let mut tracker = TrajectoryTracker::with_defaults();
        tracker.begin_swing();
        for (i, (x, y)) in jittery_positions().into_iter().enumerate() {
            tracker.observe(x, y, i as u64, i as f64 * 0.016);
        }

        // Smoothed points should sit closer to the center than the raw noise
        for point in &tracker.path().points()[2..] {
            assert!((point.x - 500.0).abs() < 2.0, "x={} too far", point.x);
            assert!((point.y - 500.0).abs() < 2.0, "y={} too far", point.y);
        }
    }

    #[test]
    fn test_outlier_is_dropped_not_appended() {
        let mut tracker = TrajectoryTracker::new(TrackerConfig {
            smoothing_window: 3,
            max_jump_px: 50.0,
        });
        tracker.begin_swing();
        assert!(tracker.observe(100.0, 100.0, 0, 0.0).is_some());
        assert!(tracker.observe(110.0, 100.0, 1, 0.016).is_some());
        // 500px jump: a false detection elsewhere in the frame
        assert!(tracker.observe(610.0, 100.0, 2, 0.033).is_none());
        assert_eq!(tracker.path().len(), 2);
        // Tracking resumes near the real position
        assert!(tracker.observe(120.0, 100.0, 3, 0.05).is_some());
        assert_eq!(tracker.path().len(), 3);
    }

    #[test]
    fn test_first_observation_is_never_an_outlier() {
        let mut tracker = TrajectoryTracker::new(TrackerConfig {
            smoothing_window: 3,
            max_jump_px: 10.0,
        });
        tracker.begin_swing();
        assert!(tracker.observe(1800.0, 900.0, 0, 0.0).is_some());
    }

    #[test]
    fn test_begin_swing_clears_carry_over() {
        let mut tracker = TrajectoryTracker::with_defaults();
        tracker.begin_swing();
        tracker.observe(100.0, 100.0, 0, 0.0);
        tracker.observe(110.0, 110.0, 1, 0.016);

        tracker.begin_swing();
        assert!(tracker.path().is_empty());
        // With no window carry-over the first point passes through unsmoothed
        let point = tracker.observe(900.0, 900.0, 2, 0.033).unwrap();
        assert_eq!(point.position(), (900.0, 900.0));
    }

    #[test]
    fn test_take_path_leaves_empty() {
        let mut tracker = TrajectoryTracker::with_defaults();
        tracker.begin_swing();
        tracker.observe(0.0, 0.0, 0, 0.0);
        let path = tracker.take_path();
        assert_eq!(path.len(), 1);
        assert!(tracker.path().is_empty());
    }
}
