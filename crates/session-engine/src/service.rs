//! The channel-based session service loop.
//!
//! One task per session: it pulls frames and commands off an ordered inbound
//! channel, drives the state machine, and pushes tracking updates, swing
//! analyses, and the final session-end message to the outbound channel. The
//! inbound channel closing mid-session reads as a disconnect and triggers an
//! implicit best-effort `end_session`; the session-end message is only sent
//! after the session's own export has completed.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use swingman_common::clock::FrameClock;
use swingman_common::error::SwingmanResult;
use swingman_analysis::HeatmapRaster;
use swingman_model::message::{
    ClientCommand, FinalArtifacts, ServerMessage, SwingOutcome, TrackingPayload,
};
use swingman_model::record::SessionRecord;

use crate::detector::{detect_or_miss, estimate_or_none, ObjectDetector, PoseEstimator};
use crate::engine::{EngineConfig, SwingSession};
use crate::registry::SessionRegistry;

/// One raw frame delivered to a session.
///
/// The transport carries no timing, so frames without an explicit timestamp
/// are stamped at arrival from the session clock. Replay supplies the
/// recorded timestamps instead so derived speeds match the original capture.
#[derive(Debug, Clone)]
pub struct FramePayload {
    pub data: Vec<u8>,
    pub timestamp: Option<f64>,
}

impl FramePayload {
    pub fn live(data: Vec<u8>) -> Self {
        Self {
            data,
            timestamp: None,
        }
    }

    pub fn recorded(data: Vec<u8>, timestamp: f64) -> Self {
        Self {
            data,
            timestamp: Some(timestamp),
        }
    }
}

/// Inbound session traffic, in channel order.
#[derive(Debug, Clone)]
pub enum SessionInput {
    Frame(FramePayload),
    Command(ClientCommand),
}

/// Durable export of a finished session. Implementations run their I/O off
/// the async runtime (spawn_blocking); the service awaits the result before
/// emitting the session-end message.
#[async_trait]
pub trait SessionExporter: Send + Sync {
    async fn export(
        &self,
        record: &SessionRecord,
        heatmap: &HeatmapRaster,
    ) -> SwingmanResult<FinalArtifacts>;
}

/// Everything one session task needs besides its channels.
pub struct SessionContext {
    pub config: EngineConfig,
    pub detector: Box<dyn ObjectDetector>,
    pub pose_estimator: Option<Box<dyn PoseEstimator>>,
    pub registry: Arc<SessionRegistry>,
    pub exporter: Arc<dyn SessionExporter>,
}

/// Drive one session from creation to termination.
///
/// Returns the final session record. Outbound sends are best-effort; a
/// receiver that has gone away never fails the session.
pub async fn run_session(
    name: &str,
    mut ctx: SessionContext,
    mut inputs: mpsc::Receiver<SessionInput>,
    outputs: mpsc::Sender<ServerMessage>,
) -> SwingmanResult<SessionRecord> {
    let mut session = SwingSession::new(name, ctx.config);
    let clock = FrameClock::start();
    let mut frame_seq: u64 = 0;

    ctx.registry.insert(session.session_id());
    let session_id = session.session_id().to_string();

    let mut explicit_end = false;
    while let Some(input) = inputs.recv().await {
        match input {
            SessionInput::Frame(frame) => {
                let timestamp = frame.timestamp.unwrap_or_else(|| clock.elapsed_secs());
                let detection =
                    detect_or_miss(ctx.detector.as_mut(), &frame.data).map(|b| b.center());
                let pose = ctx
                    .pose_estimator
                    .as_mut()
                    .and_then(|estimator| estimate_or_none(estimator.as_mut(), &frame.data));

                let metrics = session.ingest_frame(detection, frame_seq, timestamp);
                frame_seq += 1;

                let _ = outputs
                    .send(ServerMessage::TrackingUpdate(TrackingPayload {
                        metrics,
                        pose,
                    }))
                    .await;
            }
            SessionInput::Command(ClientCommand::StartSwing) => {
                if let Err(e) = session.start_swing() {
                    tracing::warn!(session_id = %session_id, error = %e, "start_swing rejected");
                }
            }
            SessionInput::Command(ClientCommand::StopSwing) => {
                let outcome = match session.stop_swing() {
                    Ok(metrics) => SwingOutcome::Metrics(metrics),
                    Err(e) => {
                        tracing::warn!(session_id = %session_id, error = %e, "stop_swing failed");
                        SwingOutcome::Error {
                            error: e.to_string(),
                        }
                    }
                };
                let _ = outputs.send(ServerMessage::SwingAnalysis(outcome)).await;
            }
            SessionInput::Command(ClientCommand::EndSession) => {
                explicit_end = true;
                break;
            }
        }
    }

    if !explicit_end {
        tracing::info!(session_id = %session_id, "Client disconnected; ending session");
    }

    let summary = session.end_session();
    let artifacts = match ctx.exporter.export(&summary.record, &summary.heatmap).await {
        Ok(artifacts) => artifacts,
        Err(e) => {
            tracing::warn!(session_id = %session_id, error = %e, "Session export failed");
            FinalArtifacts {
                session_csv: String::new(),
                heatmap_path: None,
            }
        }
    };

    let _ = outputs.send(ServerMessage::SessionEnd(artifacts)).await;
    ctx.registry.remove(&session_id);

    Ok(summary.record)
}
