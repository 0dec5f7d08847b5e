//! Tabular session export.
//!
//! One CSV row per finalized swing. The full CSV content also travels
//! in-band with the session-end message, so the table survives even when the
//! disk write fails.

use swingman_model::record::SessionRecord;

const HEADER: &str =
    "swing_index,recorded_at,efficiency_score,power_score,peak_speed,path_length,duration_s,impact_x,impact_y";

/// Build the CSV for a session record. Missing impact points leave their
/// columns empty rather than writing a sentinel.
pub fn session_csv(record: &SessionRecord) -> String {
    let mut out = String::with_capacity(64 * (record.swings.len() + 1));
    out.push_str(HEADER);
    out.push('\n');

    for swing in &record.swings {
        let m = &swing.metrics;
        let (impact_x, impact_y) = match m.impact_point {
            Some((x, y)) => (format!("{x:.2}"), format!("{y:.2}")),
            None => (String::new(), String::new()),
        };
        out.push_str(&format!(
            "{},{},{:.2},{:.2},{:.2},{:.2},{:.4},{},{}\n",
            swing.index,
            swing.recorded_at,
            m.efficiency_score,
            m.power_score,
            m.peak_speed,
            m.path_length,
            m.duration_s,
            impact_x,
            impact_y,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingman_model::metrics::SwingMetrics;

    fn metrics(impact: Option<(f64, f64)>) -> SwingMetrics {
        SwingMetrics {
            efficiency_score: 87.5,
            power_score: 42.0,
            peak_speed: 840.0,
            path_length: 312.525,
            duration_s: 0.45,
            impact_point: impact,
        }
    }

    #[test]
    fn test_empty_session_is_header_only() {
        let record = SessionRecord::new("test");
        let csv = session_csv(&record);
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("swing_index,"));
    }

    #[test]
    fn test_one_row_per_swing() {
        let mut record = SessionRecord::new("test");
        record.add_swing(metrics(Some((512.0, 388.5))));
        record.add_swing(metrics(None));

        let csv = session_csv(&record);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,"));
        assert!(lines[1].ends_with(",512.00,388.50"));
        // Missing impact leaves the columns empty
        assert!(lines[2].starts_with("2,"));
        assert!(lines[2].ends_with(",,"));
    }

    #[test]
    fn test_column_count_is_stable() {
        let mut record = SessionRecord::new("test");
        record.add_swing(metrics(None));
        let csv = session_csv(&record);
        for line in csv.lines() {
            assert_eq!(line.matches(',').count(), 8, "bad row: {line}");
        }
    }
}
