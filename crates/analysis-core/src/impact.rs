//! Impact detection within a finished swing path.
//!
//! A bat striking a ball slows abruptly, so the impact candidate is the
//! point of maximum deceleration: the largest drop in velocity magnitude
//! between consecutive path segments. Candidates tying within an epsilon
//! resolve to the earliest point in path order, keeping the result
//! deterministic for identical input.

use swingman_model::metrics::ImpactEvent;
use swingman_model::path::SwingPath;

/// Configuration for impact detection.
#[derive(Debug, Clone, Copy)]
pub struct ImpactConfig {
    /// Two deceleration candidates within this margin are considered tied;
    /// the earlier one wins.
    pub tie_epsilon: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self { tie_epsilon: 1e-6 }
    }
}

/// Velocity magnitude of each path segment, pixels per second.
/// Segments with a non-positive time delta report zero speed.
fn segment_speeds(path: &SwingPath) -> Vec<f64> {
    path.segments()
        .map(|(a, b)| {
            let dt = b.timestamp - a.timestamp;
            if dt > 0.0 {
                a.distance_to(b) / dt
            } else {
                0.0
            }
        })
        .collect()
}

/// Find the impact point and bat angle inside a completed path.
///
/// Returns `None` only when the path has fewer than 2 points; the engine
/// filters those upstream, this is a defensive check. A path of exactly 2
/// points has one segment: the impact is the later point, the angle comes
/// from that single segment.
pub fn detect_impact(path: &SwingPath, config: ImpactConfig) -> Option<ImpactEvent> {
    let points = path.points();
    if points.len() < 2 {
        return None;
    }

    let speeds = segment_speeds(path);

    // The impact index is the point between the decelerating segment pair.
    let impact_index = if speeds.len() < 2 {
        points.len() - 1
    } else {
        let mut best_index = 1;
        let mut best_drop = speeds[0] - speeds[1];
        for i in 1..speeds.len() - 1 {
            let drop = speeds[i] - speeds[i + 1];
            if drop > best_drop + config.tie_epsilon {
                best_drop = drop;
                best_index = i + 1;
            }
        }
        best_index
    };

    let impact = points[impact_index];
    let (from, to) = if impact_index + 1 < points.len() {
        // Vector between the two points surrounding the impact
        (points[impact_index - 1], points[impact_index + 1])
    } else {
        // Impact at the path's last point: use the final segment
        (points[impact_index - 1], points[impact_index])
    };

    let bat_angle_deg = (to.y - from.y).atan2(to.x - from.x).to_degrees();

    Some(ImpactEvent {
        point: (impact.x, impact.y),
        bat_angle_deg,
        path_index: impact_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use swingman_model::path::PathPoint;

    fn path_of(points: &[(f64, f64, f64)]) -> SwingPath {
        SwingPath::from(
            points
                .iter()
                .enumerate()
                .map(|(i, &(x, y, t))| PathPoint::new(x, y, i as u64, t))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_short_path_yields_none() {
        assert!(detect_impact(&SwingPath::new(), ImpactConfig::default()).is_none());
        let single = path_of(&[(0.0, 0.0, 0.0)]);
        assert!(detect_impact(&single, ImpactConfig::default()).is_none());
    }

    #[test]
    fn test_two_point_path_impacts_at_later_point() {
        // Single segment: speed 10, impact at (10, 0), angle 0°
        let path = path_of(&[(0.0, 0.0, 0.0), (10.0, 0.0, 1.0)]);
        let impact = detect_impact(&path, ImpactConfig::default()).unwrap();
        assert_eq!(impact.point, (10.0, 0.0));
        assert_eq!(impact.path_index, 1);
        assert!(impact.bat_angle_deg.abs() < 1e-9);
    }

    #[test]
    fn test_tie_break_picks_earliest() {
        // Both segments travel at speed 5; tied deceleration resolves to
        // the earliest candidate, impact at (5, 0)
        let path = path_of(&[(0.0, 0.0, 0.0), (5.0, 0.0, 1.0), (5.0, 5.0, 2.0)]);
        let impact = detect_impact(&path, ImpactConfig::default()).unwrap();
        assert_eq!(impact.point, (5.0, 0.0));
        assert_eq!(impact.path_index, 1);
    }

    #[test]
    fn test_max_deceleration_wins() {
        // Speeds: 100, 90, 10, 8; the 90->10 drop sits at the junction of
        // segments 1 and 2, path index 2
        let path = path_of(&[
            (0.0, 0.0, 0.0),
            (100.0, 0.0, 1.0),
            (190.0, 0.0, 2.0),
            (200.0, 0.0, 3.0),
            (208.0, 0.0, 4.0),
        ]);
        let impact = detect_impact(&path, ImpactConfig::default()).unwrap();
        assert_eq!(impact.path_index, 2);
        assert_eq!(impact.point, (190.0, 0.0));
    }

    #[test]
    fn test_angle_from_surrounding_points() {
        // Impact surrounded by (0,0) and (10,10): 45° bat angle
        let path = path_of(&[
            (0.0, 0.0, 0.0),
            (100.0, 100.0, 1.0),
            (105.0, 105.0, 2.0),
            (106.0, 106.0, 3.0),
        ]);
        let impact = detect_impact(&path, ImpactConfig::default()).unwrap();
        assert!((impact.bat_angle_deg - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_timestamps_do_not_panic() {
        let path = path_of(&[(0.0, 0.0, 1.0), (10.0, 0.0, 1.0), (20.0, 0.0, 1.0)]);
        let impact = detect_impact(&path, ImpactConfig::default()).unwrap();
        assert!(impact.path_index < path.len());
    }

    proptest! {
        #[test]
        fn prop_detection_is_deterministic(
            coords in proptest::collection::vec((-1000.0..1000.0f64, -1000.0..1000.0f64), 2..40)
        ) {
            let points: Vec<(f64, f64, f64)> = coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| (x, y, i as f64 * 0.016))
                .collect();
            let path = path_of(&points);

            let first = detect_impact(&path, ImpactConfig::default());
            let second = detect_impact(&path, ImpactConfig::default());
            prop_assert_eq!(first, second);

            let impact = first.unwrap();
            prop_assert!(impact.path_index >= 1);
            prop_assert!(impact.path_index < path.len());
        }
    }
}
