//! Per-session swing records.
//!
//! A session record accumulates every finalized swing for one tracking
//! session and is the input to the export collaborator (one CSV row per
//! swing plus the rendered heatmap).

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::metrics::SwingMetrics;

/// One finalized swing within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingRecord {
    /// 1-based swing number within the session.
    pub index: usize,

    /// Wall-clock time the swing was finalized (ISO 8601).
    pub recorded_at: String,

    /// The computed metrics.
    pub metrics: SwingMetrics,
}

/// All finalized swings for one tracking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique session identifier.
    pub session_id: String,

    /// Wall-clock session start (ISO 8601).
    pub created_at: String,

    /// Finalized swings in completion order.
    pub swings: Vec<SwingRecord>,
}

impl SessionRecord {
    /// Create a record for a new session. The identifier combines the given
    /// name with a timestamp so repeated sessions never collide on disk.
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            session_id: format!("{}-{}", name, now.format("%Y%m%d-%H%M%S")),
            created_at: now.to_rfc3339(),
            swings: Vec::new(),
        }
    }

    /// Append a finalized swing and return its record.
    pub fn add_swing(&mut self, metrics: SwingMetrics) -> &SwingRecord {
        let record = SwingRecord {
            index: self.swings.len() + 1,
            recorded_at: Utc::now().to_rfc3339(),
            metrics,
        };
        self.swings.push(record);
        self.swings.last().expect("just pushed")
    }

    pub fn swing_count(&self) -> usize {
        self.swings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> SwingMetrics {
        SwingMetrics {
            efficiency_score: 75.0,
            power_score: 50.0,
            peak_speed: 1000.0,
            path_length: 400.0,
            duration_s: 0.5,
            impact_point: Some((300.0, 200.0)),
        }
    }

    #[test]
    fn test_session_id_includes_name() {
        let record = SessionRecord::new("cage");
        assert!(record.session_id.starts_with("cage-"));
        assert!(chrono::DateTime::parse_from_rfc3339(&record.created_at).is_ok());
    }

    #[test]
    fn test_swing_indices_are_sequential() {
        let mut record = SessionRecord::new("test");
        record.add_swing(sample_metrics());
        record.add_swing(sample_metrics());
        let indices: Vec<usize> = record.swings.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert_eq!(record.swing_count(), 2);
    }

    #[test]
    fn test_record_roundtrip() {
        let mut record = SessionRecord::new("test");
        record.add_swing(sample_metrics());
        let json = serde_json::to_string(&record).unwrap();
        let parsed: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }
}
