//! Wire message and detection-stream types.
//!
//! The transport delivers two message kinds per session: binary frame
//! payloads and textual command payloads. Commands and outbound updates are
//! tagged serde unions; recorded detection streams use append-only JSONL
//! (one JSON object per line, `#`-prefixed header lines skipped) so a
//! session can be replayed offline.

use serde::{Deserialize, Serialize};

use crate::metrics::{LiveMetrics, SwingMetrics};

/// A textual command from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientCommand {
    StartSwing,
    StopSwing,
    /// Terminates the session. `stop_session` is accepted as a legacy alias.
    #[serde(alias = "stop_session")]
    EndSession,
}

/// Envelope for textual command payloads: `{"action": "start_swing"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub action: ClientCommand,
}

/// Parse a textual command payload.
pub fn parse_command(text: &str) -> Result<ClientCommand, serde_json::Error> {
    serde_json::from_str::<CommandEnvelope>(text).map(|envelope| envelope.action)
}

/// A single skeletal keypoint from the pose estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Landmark name (e.g., "left_wrist").
    pub name: String,
    /// Frame-pixel coordinates.
    pub x: f64,
    pub y: f64,
    /// Estimator confidence [0.0, 1.0].
    pub confidence: f64,
}

/// Auxiliary pose snapshot reported alongside tracking updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub keypoints: Vec<Keypoint>,
}

/// Payload of a per-frame tracking update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingPayload {
    pub metrics: LiveMetrics,
    pub pose: Option<PoseSnapshot>,
}

/// Outcome of a `stop_swing` request: metrics, or an explicit error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SwingOutcome {
    Metrics(SwingMetrics),
    Error { error: String },
}

/// Artifacts delivered with the session-end message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalArtifacts {
    /// Full CSV content, one row per finalized swing.
    pub session_csv: String,

    /// Path of the rendered heatmap image, if it was written.
    pub heatmap_path: Option<String>,
}

/// Outbound message emitted by the session engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Live feedback per processed frame.
    TrackingUpdate(TrackingPayload),

    /// Response to `stop_swing`.
    SwingAnalysis(SwingOutcome),

    /// Final message before the session closes.
    SessionEnd(FinalArtifacts),
}

/// A recorded per-frame observation or command, for offline replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    /// Fractional seconds since the session epoch.
    #[serde(rename = "t")]
    pub timestamp: f64,

    /// The event payload.
    #[serde(flatten)]
    pub kind: DetectionKind,
}

/// Discriminated union of detection-stream entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetectionKind {
    /// The detector found the bat in this frame.
    Detection {
        /// Bat center in frame pixels.
        x: f64,
        y: f64,
    },

    /// A frame was processed but the detector found nothing.
    Miss,

    /// A textual client command.
    Command { action: ClientCommand },
}

impl DetectionEvent {
    /// Create a detection entry.
    pub fn detection(timestamp: f64, x: f64, y: f64) -> Self {
        Self {
            timestamp,
            kind: DetectionKind::Detection { x, y },
        }
    }

    /// Create a no-detection entry.
    pub fn miss(timestamp: f64) -> Self {
        Self {
            timestamp,
            kind: DetectionKind::Miss,
        }
    }

    /// Create a command entry.
    pub fn command(timestamp: f64, action: ClientCommand) -> Self {
        Self {
            timestamp,
            kind: DetectionKind::Command { action },
        }
    }

    /// Extract the detected position if this entry contains one.
    pub fn position(&self) -> Option<(f64, f64)> {
        match &self.kind {
            DetectionKind::Detection { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}

/// Parse detection events from JSONL content (one JSON object per line).
pub fn parse_detections(jsonl: &str) -> Result<Vec<DetectionEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize detection events to JSONL format.
pub fn serialize_detections(events: &[DetectionEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(
            parse_command(r#"{"action":"start_swing"}"#).unwrap(),
            ClientCommand::StartSwing
        );
        assert_eq!(
            parse_command(r#"{"action":"stop_swing"}"#).unwrap(),
            ClientCommand::StopSwing
        );
        assert_eq!(
            parse_command(r#"{"action":"end_session"}"#).unwrap(),
            ClientCommand::EndSession
        );
    }

    #[test]
    fn test_stop_session_alias() {
        assert_eq!(
            parse_command(r#"{"action":"stop_session"}"#).unwrap(),
            ClientCommand::EndSession
        );
    }

    #[test]
    fn test_detection_event_roundtrip() {
        let event = DetectionEvent::detection(1.25, 640.0, 360.5);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: DetectionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }

    #[test]
    fn test_json_format_matches_wire_shape() {
        let event = DetectionEvent::detection(0.5, 100.0, 200.0);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"t\":0.5"));
        assert!(json.contains("\"type\":\"detection\""));
        assert!(json.contains("\"x\":100.0"));
        assert!(json.contains("\"y\":200.0"));
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let events = vec![
            DetectionEvent::command(0.0, ClientCommand::StartSwing),
            DetectionEvent::detection(0.016, 120.0, 400.0),
            DetectionEvent::miss(0.033),
            DetectionEvent::command(0.05, ClientCommand::StopSwing),
        ];
        let jsonl = serialize_detections(&events).unwrap();
        let parsed = parse_detections(&jsonl).unwrap();
        assert_eq!(events, parsed);
    }

    #[test]
    fn test_parse_detections_skips_header_comment() {
        let jsonl = "# {\"schema_version\":\"1.0\"}\n{\"t\":0.0,\"type\":\"miss\"}\n";
        let parsed = parse_detections(jsonl).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind, DetectionKind::Miss);
    }

    #[test]
    fn test_server_message_tags() {
        let msg = ServerMessage::SwingAnalysis(SwingOutcome::Error {
            error: "Not enough swing data captured.".to_string(),
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"swing_analysis\""));
        assert!(json.contains("\"payload\""));
        assert!(json.contains("\"error\""));

        let update = ServerMessage::TrackingUpdate(TrackingPayload::default());
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"type\":\"tracking_update\""));
    }

    #[test]
    fn test_swing_outcome_untagged_roundtrip() {
        let outcome = SwingOutcome::Metrics(SwingMetrics {
            efficiency_score: 90.0,
            power_score: 60.0,
            peak_speed: 1200.0,
            path_length: 500.0,
            duration_s: 0.4,
            impact_point: None,
        });
        let json = serde_json::to_string(&outcome).unwrap();
        let parsed: SwingOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, parsed);
    }
}
